//! GetBookingHandler - single booking, scoped to what the actor may see.

use std::sync::Arc;

use crate::domain::access::{Action, Actor, RolePermissionGate, ViewScope};
use crate::domain::booking::{Booking, BookingError};
use crate::domain::foundation::BookingId;
use crate::ports::BookingRepository;

use super::load_booking;

pub struct GetBookingHandler {
    repo: Arc<dyn BookingRepository>,
    gate: RolePermissionGate,
}

impl GetBookingHandler {
    pub fn new(repo: Arc<dyn BookingRepository>, gate: RolePermissionGate) -> Self {
        Self { repo, gate }
    }

    /// Provider staff only see bookings assigned to their provider; anyone
    /// else without `view_all_bookings` sees nothing.
    pub async fn handle(&self, booking_id: BookingId, actor: &Actor) -> Result<Booking, BookingError> {
        let action = match self.gate.view_scope(actor) {
            ViewScope::Nothing => {
                return Err(BookingError::Unauthorized {
                    role: actor.role,
                    action: Action::ViewAllBookings,
                })
            }
            ViewScope::All => Action::ViewAllBookings,
            ViewScope::OwnProvider(_) => Action::ViewOwnBookings,
        };

        let booking = load_booking(self.repo.as_ref(), &booking_id).await?;
        if !self.gate.can_view(actor, &booking) {
            tracing::warn!(booking_id = %booking_id, role = %actor.role, "booking view denied");
            return Err(BookingError::Unauthorized {
                role: actor.role,
                action,
            });
        }
        Ok(booking)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::Fixture;
    use super::*;

    #[tokio::test]
    async fn staff_scope_is_enforced() {
        let fx = Fixture::new().await;
        let booking = fx.pending_booking().await;
        let handler = GetBookingHandler::new(Arc::new(fx.repo.clone()), RolePermissionGate::new());

        assert!(handler.handle(booking.id(), &fx.sub_admin()).await.is_ok());
        assert!(handler.handle(booking.id(), &fx.admin()).await.is_ok());

        // Pending bookings have no provider yet, so no clinic can see them.
        let err = handler
            .handle(booking.id(), &fx.clinic(fx.providers[0]))
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::Unauthorized { .. }));

        let err = handler.handle(booking.id(), &Actor::anonymous()).await.unwrap_err();
        assert!(matches!(err, BookingError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn missing_booking_is_not_found() {
        let fx = Fixture::new().await;
        let handler = GetBookingHandler::new(Arc::new(fx.repo.clone()), RolePermissionGate::new());
        let err = handler.handle(BookingId::new(), &fx.admin()).await.unwrap_err();
        assert!(matches!(err, BookingError::NotFound { .. }));
    }
}
