//! UnassignProviderHandler - admin reset of a confirmed booking back to
//! pending, clearing its provider so it can be reassigned.

use std::sync::Arc;

use crate::application::handlers::events::publish_after_commit;
use crate::domain::access::Actor;
use crate::domain::booking::{AssignmentCoordinator, Booking, BookingError, ProviderUnassigned};
use crate::domain::foundation::{BookingId, EventId, SerializableDomainEvent};
use crate::ports::{BookingRepository, EventPublisher};

use super::{load_booking, log_rejection, status_changed};

pub struct UnassignProviderHandler {
    repo: Arc<dyn BookingRepository>,
    publisher: Arc<dyn EventPublisher>,
    coordinator: AssignmentCoordinator,
}

impl UnassignProviderHandler {
    pub fn new(
        repo: Arc<dyn BookingRepository>,
        publisher: Arc<dyn EventPublisher>,
        coordinator: AssignmentCoordinator,
    ) -> Self {
        Self {
            repo,
            publisher,
            coordinator,
        }
    }

    pub async fn handle(&self, booking_id: BookingId, actor: &Actor) -> Result<Booking, BookingError> {
        let result = self.apply(booking_id, actor).await;
        if let Err(e) = &result {
            log_rejection(e, &booking_id, actor, "unassign_provider");
        }
        result
    }

    async fn apply(&self, booking_id: BookingId, actor: &Actor) -> Result<Booking, BookingError> {
        let before = load_booking(self.repo.as_ref(), &booking_id).await?;
        let update = self.coordinator.plan_unassign(&before, actor)?;
        let after = self.repo.update_status(&update).await?;

        let mut events = vec![status_changed(&before, &after, actor)];
        if let Some(previous) = before.provider_id() {
            tracing::info!(
                booking_number = %after.booking_number(),
                previous_provider_id = %previous,
                role = %actor.role,
                "provider unassigned"
            );
            events.insert(
                0,
                ProviderUnassigned {
                    event_id: EventId::new(),
                    booking_id: after.id(),
                    previous_provider_id: previous,
                    unassigned_by: actor.audit_id(),
                    unassigned_at: after.updated_at(),
                }
                .to_envelope()
                .with_user_id(actor.audit_id()),
            );
        }
        publish_after_commit(self.publisher.as_ref(), events).await;

        Ok(after)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::Fixture;
    use super::super::{AssignProviderCommand, AssignProviderHandler};
    use super::*;
    use crate::domain::booking::{BookingStateMachine, BookingStatus};

    fn coordinator() -> AssignmentCoordinator {
        AssignmentCoordinator::new(BookingStateMachine::default())
    }

    async fn assigned_booking(fx: &Fixture) -> Booking {
        let booking = fx.pending_booking().await;
        AssignProviderHandler::new(
            Arc::new(fx.catalog.clone()),
            Arc::new(fx.repo.clone()),
            fx.bus.clone(),
            coordinator(),
        )
        .handle(
            AssignProviderCommand {
                booking_id: booking.id(),
                provider_id: fx.providers[1],
            },
            &fx.sub_admin(),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn admin_returns_booking_to_pending() {
        let fx = Fixture::new().await;
        let booking = assigned_booking(&fx).await;
        let handler = UnassignProviderHandler::new(Arc::new(fx.repo.clone()), fx.bus.clone(), coordinator());

        let after = handler.handle(booking.id(), &fx.admin()).await.unwrap();

        assert_eq!(after.status(), BookingStatus::Pending);
        assert_eq!(after.provider_id(), None);
        let events = fx.bus.events_of_type("booking.provider_unassigned.v1");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].payload["previous_provider_id"], fx.providers[1].to_string());
    }

    #[tokio::test]
    async fn sub_admin_cannot_unassign() {
        let fx = Fixture::new().await;
        let booking = assigned_booking(&fx).await;
        let handler = UnassignProviderHandler::new(Arc::new(fx.repo.clone()), fx.bus.clone(), coordinator());

        let err = handler.handle(booking.id(), &fx.sub_admin()).await.unwrap_err();

        assert!(matches!(err, BookingError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn pending_booking_cannot_be_unassigned() {
        let fx = Fixture::new().await;
        let booking = fx.pending_booking().await;
        let handler = UnassignProviderHandler::new(Arc::new(fx.repo.clone()), fx.bus.clone(), coordinator());

        let err = handler.handle(booking.id(), &fx.admin()).await.unwrap_err();

        assert!(matches!(err, BookingError::InvalidTransition { .. }));
    }
}
