//! AssignProviderHandler - pins a pending booking to a provider and
//! confirms it in one conditional write.

use std::sync::Arc;

use crate::application::handlers::catalog::load_price_book;
use crate::application::handlers::events::publish_after_commit;
use crate::domain::access::Actor;
use crate::domain::booking::{AssignmentCoordinator, Booking, BookingError, ProviderAssigned};
use crate::domain::foundation::{BookingId, EventId, ProviderId, SerializableDomainEvent};
use crate::ports::{BookingRepository, EventPublisher, PricingCatalog};

use super::{load_booking, log_rejection, status_changed};

#[derive(Debug, Clone, Copy)]
pub struct AssignProviderCommand {
    pub booking_id: BookingId,
    pub provider_id: ProviderId,
}

pub struct AssignProviderHandler {
    catalog: Arc<dyn PricingCatalog>,
    repo: Arc<dyn BookingRepository>,
    publisher: Arc<dyn EventPublisher>,
    coordinator: AssignmentCoordinator,
}

impl AssignProviderHandler {
    pub fn new(
        catalog: Arc<dyn PricingCatalog>,
        repo: Arc<dyn BookingRepository>,
        publisher: Arc<dyn EventPublisher>,
        coordinator: AssignmentCoordinator,
    ) -> Self {
        Self {
            catalog,
            repo,
            publisher,
            coordinator,
        }
    }

    /// Two staff racing to assign the same booking: exactly one wins, the
    /// other receives `Conflict`.
    pub async fn handle(&self, cmd: AssignProviderCommand, actor: &Actor) -> Result<Booking, BookingError> {
        let result = self.apply(cmd, actor).await;
        if let Err(e) = &result {
            log_rejection(e, &cmd.booking_id, actor, "assign_provider");
        }
        result
    }

    async fn apply(&self, cmd: AssignProviderCommand, actor: &Actor) -> Result<Booking, BookingError> {
        let before = load_booking(self.repo.as_ref(), &cmd.booking_id).await?;
        let prices = load_price_book(
            self.catalog.as_ref(),
            &[(cmd.provider_id, before.test_ids())],
        )
        .await?;

        let update = self
            .coordinator
            .plan_assign(&before, cmd.provider_id, &prices, actor)?;
        let after = self.repo.update_status(&update).await?;

        tracing::info!(
            booking_number = %after.booking_number(),
            provider_id = %cmd.provider_id,
            role = %actor.role,
            "provider assigned"
        );

        let assigned = ProviderAssigned {
            event_id: EventId::new(),
            booking_id: after.id(),
            provider_id: cmd.provider_id,
            assigned_by: actor.audit_id(),
            assigned_at: after.updated_at(),
        }
        .to_envelope()
        .with_user_id(actor.audit_id());
        publish_after_commit(
            self.publisher.as_ref(),
            vec![assigned, status_changed(&before, &after, actor)],
        )
        .await;

        Ok(after)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::Fixture;
    use super::*;
    use crate::domain::access::{Action, Role};
    use crate::domain::booking::{BookingStateMachine, BookingStatus};

    fn handler(fx: &Fixture) -> AssignProviderHandler {
        AssignProviderHandler::new(
            Arc::new(fx.catalog.clone()),
            Arc::new(fx.repo.clone()),
            fx.bus.clone(),
            AssignmentCoordinator::new(BookingStateMachine::default()),
        )
    }

    fn cmd(booking: &Booking, provider_id: ProviderId) -> AssignProviderCommand {
        AssignProviderCommand {
            booking_id: booking.id(),
            provider_id,
        }
    }

    #[tokio::test]
    async fn sub_admin_assigns_and_confirms() {
        let fx = Fixture::new().await;
        let booking = fx.pending_booking().await;

        let after = handler(&fx)
            .handle(cmd(&booking, fx.providers[3]), &fx.sub_admin())
            .await
            .unwrap();

        assert_eq!(after.status(), BookingStatus::Confirmed);
        assert_eq!(after.provider_id(), Some(fx.providers[3]));
        assert_eq!(after.requested_provider_id(), fx.providers[0]);
        assert!(fx.bus.has_event("booking.provider_assigned.v1"));
        assert!(fx.bus.has_event("booking.status_changed.v1"));
    }

    #[tokio::test]
    async fn clinic_cannot_assign() {
        let fx = Fixture::new().await;
        let booking = fx.pending_booking().await;

        let err = handler(&fx)
            .handle(cmd(&booking, fx.providers[0]), &fx.clinic(fx.providers[0]))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            BookingError::Unauthorized {
                role: Role::Clinic,
                action: Action::AssignProvider
            }
        );
    }

    #[tokio::test]
    async fn second_assignment_is_rejected() {
        let fx = Fixture::new().await;
        let booking = fx.pending_booking().await;
        let handler = handler(&fx);
        handler
            .handle(cmd(&booking, fx.providers[0]), &fx.sub_admin())
            .await
            .unwrap();

        let err = handler
            .handle(cmd(&booking, fx.providers[1]), &fx.admin())
            .await
            .unwrap_err();

        assert!(matches!(err, BookingError::AlreadyAssigned { .. }));
        let stored = fx.repo.find_by_id(&booking.id()).await.unwrap().unwrap();
        assert_eq!(stored.provider_id(), Some(fx.providers[0]));
    }

    #[tokio::test]
    async fn provider_without_the_booked_tests_is_rejected() {
        let fx = Fixture::new().await;
        let booking = fx.pending_booking().await;
        let mut entry = fx
            .catalog
            .get_pricing(&fx.tests[1], &fx.providers[2])
            .await
            .unwrap()
            .unwrap();
        entry.is_available = false;
        fx.catalog.set_price(entry).await;

        let err = handler(&fx)
            .handle(cmd(&booking, fx.providers[2]), &fx.sub_admin())
            .await
            .unwrap_err();

        assert!(matches!(err, BookingError::Validation { ref field, .. } if field == "provider_id"));
    }

    #[tokio::test]
    async fn unknown_provider_is_not_found() {
        let fx = Fixture::new().await;
        let booking = fx.pending_booking().await;

        let err = handler(&fx)
            .handle(cmd(&booking, ProviderId::new()), &fx.sub_admin())
            .await
            .unwrap_err();

        assert!(matches!(err, BookingError::NotFound { resource: "provider", .. }));
    }

    #[tokio::test]
    async fn concurrent_assignments_have_one_winner() {
        let fx = Fixture::new().await;
        let booking = fx.pending_booking().await;
        let handler = Arc::new(handler(&fx));

        let mut tasks = Vec::new();
        for provider in fx.providers.clone() {
            let handler = handler.clone();
            let actor = fx.sub_admin();
            let command = cmd(&booking, provider);
            tasks.push(tokio::spawn(async move { handler.handle(command, &actor).await }));
        }

        let mut winners = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => winners += 1,
                Err(BookingError::Conflict { .. }) | Err(BookingError::AlreadyAssigned { .. }) => {}
                Err(other) => panic!("unexpected error: {:?}", other),
            }
        }
        assert_eq!(winners, 1);
        assert_eq!(fx.bus.events_of_type("booking.provider_assigned.v1").len(), 1);
    }
}
