//! EventSubscriber port - registration of handlers for domain events.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Reacts to one or more event types.
///
/// Delivery is at-least-once, so handlers must tolerate duplicates.
///
/// # Example
///
/// ```ignore
/// #[async_trait]
/// impl EventHandler for ResultsNotifier {
///     async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
///         let uploaded: ResultsUploaded = event.payload_as()?;
///         // hand off to the messaging collaborator
///         Ok(())
///     }
///
///     fn name(&self) -> &'static str {
///         "ResultsNotifier"
///     }
/// }
/// ```
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Used in logs and error messages.
    fn name(&self) -> &'static str;
}

/// Port for subscribing handlers to event types.
pub trait EventSubscriber: Send + Sync {
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>);

    fn subscribe_all(&self, event_types: &[&str], handler: Arc<dyn EventHandler>) {
        for event_type in event_types {
            self.subscribe(event_type, handler.clone());
        }
    }
}
