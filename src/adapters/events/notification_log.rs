//! NotificationLogger - stands in for the messaging collaborator.
//!
//! Patient and staff notifications (WhatsApp, email) are delivered outside
//! this service. Until a gateway is wired in, the messages that would be
//! sent are written to the structured log so operators can follow along.

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::ports::EventHandler;

/// Logs a one-line notification for each booking and inquiry event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotificationLogger;

impl NotificationLogger {
    /// Every event type this handler understands.
    pub const EVENT_TYPES: &'static [&'static str] = &[
        "booking.created.v1",
        "booking.status_changed.v1",
        "booking.provider_assigned.v1",
        "booking.provider_unassigned.v1",
        "booking.results_uploaded.v1",
        "surgery_inquiry.received.v1",
    ];

    /// The message that would be sent for `event`, if any.
    pub fn render(event: &EventEnvelope) -> Option<String> {
        let field = |name: &str| event.payload.get(name).and_then(JsonValue::as_str).unwrap_or("?");

        let message = match event.event_type.as_str() {
            "booking.created.v1" => format!(
                "Booking {} received. We will confirm your provider shortly.",
                field("booking_number")
            ),
            "booking.status_changed.v1" => format!(
                "Booking {} is now {}.",
                field("booking_number"),
                field("to")
            ),
            "booking.provider_assigned.v1" => {
                format!("Provider {} assigned to booking {}.", field("provider_id"), event.aggregate_id)
            }
            "booking.provider_unassigned.v1" => {
                format!("Booking {} returned to the assignment queue.", event.aggregate_id)
            }
            "booking.results_uploaded.v1" => format!(
                "Results for booking {} are ready.",
                field("booking_number")
            ),
            "surgery_inquiry.received.v1" => format!(
                "Surgery inquiry {} received for {}.",
                field("inquiry_number"),
                field("surgery_type")
            ),
            _ => return None,
        };
        Some(message)
    }
}

#[async_trait]
impl EventHandler for NotificationLogger {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        let message = Self::render(&event).ok_or_else(|| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("No notification template for {}", event.event_type),
            )
        })?;

        tracing::info!(
            event_type = %event.event_type,
            aggregate_id = %event.aggregate_id,
            event_id = %event.event_id,
            "notification: {}",
            message
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "NotificationLogger"
    }
}
