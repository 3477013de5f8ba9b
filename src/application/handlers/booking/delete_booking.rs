//! DeleteBookingHandler - admin hard delete.

use std::sync::Arc;

use crate::domain::access::{Action, Actor, RolePermissionGate};
use crate::domain::booking::BookingError;
use crate::domain::foundation::BookingId;
use crate::ports::BookingRepository;

pub struct DeleteBookingHandler {
    repo: Arc<dyn BookingRepository>,
    gate: RolePermissionGate,
}

impl DeleteBookingHandler {
    pub fn new(repo: Arc<dyn BookingRepository>, gate: RolePermissionGate) -> Self {
        Self { repo, gate }
    }

    pub async fn handle(&self, booking_id: BookingId, actor: &Actor) -> Result<(), BookingError> {
        if let Err(denied) = self.gate.require(actor, Action::DeleteBooking) {
            tracing::warn!(booking_id = %booking_id, role = %actor.role, "booking delete denied");
            return Err(denied.into());
        }

        if !self.repo.delete(&booking_id).await? {
            return Err(BookingError::not_found("booking", booking_id));
        }

        tracing::info!(booking_id = %booking_id, deleted_by = %actor.audit_id(), "booking deleted");
        Ok(())
    }
}
