//! EventPublisher port - hands domain events to whatever delivers
//! notifications (WhatsApp, email) without the core knowing the transport.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Port for publishing booking and inquiry events.
///
/// Handlers call this only after the write the event describes has been
/// persisted, so a publish failure never undoes a booking.
///
/// # Example
///
/// ```ignore
/// let envelope = booking_created.to_envelope().with_user_id(actor.audit_id());
/// publisher.publish(envelope).await?;
/// ```
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Publishes in order, stopping at the first failure.
    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn EventPublisher) {}
}
