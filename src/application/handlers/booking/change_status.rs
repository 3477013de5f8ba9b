//! ChangeStatusHandler - moves a booking along the lifecycle graph.

use std::sync::Arc;

use crate::application::handlers::events::publish_after_commit;
use crate::domain::access::Actor;
use crate::domain::booking::{Booking, BookingError, BookingStateMachine, BookingStatus};
use crate::domain::foundation::BookingId;
use crate::ports::{BookingRepository, EventPublisher};

use super::{load_booking, log_rejection, status_changed};

#[derive(Debug, Clone, Copy)]
pub struct ChangeStatusCommand {
    pub booking_id: BookingId,
    pub target: BookingStatus,
}

pub struct ChangeStatusHandler {
    repo: Arc<dyn BookingRepository>,
    publisher: Arc<dyn EventPublisher>,
    state_machine: BookingStateMachine,
}

impl ChangeStatusHandler {
    pub fn new(
        repo: Arc<dyn BookingRepository>,
        publisher: Arc<dyn EventPublisher>,
        state_machine: BookingStateMachine,
    ) -> Self {
        Self {
            repo,
            publisher,
            state_machine,
        }
    }

    /// # Errors
    ///
    /// - `Unauthorized` / `InvalidTransition` / `Validation` from planning,
    ///   before anything is written
    /// - `Conflict` if another writer moved the booking first
    pub async fn handle(&self, cmd: ChangeStatusCommand, actor: &Actor) -> Result<Booking, BookingError> {
        let result = self.apply(cmd, actor).await;
        if let Err(e) = &result {
            log_rejection(e, &cmd.booking_id, actor, "change_status");
        }
        result
    }

    async fn apply(&self, cmd: ChangeStatusCommand, actor: &Actor) -> Result<Booking, BookingError> {
        let before = load_booking(self.repo.as_ref(), &cmd.booking_id).await?;
        let update = self
            .state_machine
            .plan_transition(&before, cmd.target, actor, None)?;
        let after = self.repo.update_status(&update).await?;

        tracing::info!(
            booking_number = %after.booking_number(),
            from = %before.status(),
            to = %after.status(),
            role = %actor.role,
            "booking status changed"
        );
        publish_after_commit(
            self.publisher.as_ref(),
            vec![status_changed(&before, &after, actor)],
        )
        .await;

        Ok(after)
    }
}
