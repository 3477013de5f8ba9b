//! AssignmentCoordinator - single-provider assignment for pending bookings.

use super::{Booking, BookingError, BookingStateMachine, BookingStatus, ProviderChange, StatusUpdate};
use crate::domain::access::{Action, Actor};
use crate::domain::catalog::PriceBook;
use crate::domain::foundation::ProviderId;

/// Assigns a provider and confirms in one conditional write. Never
/// overwrites an existing assignment; reassignment goes through an explicit
/// admin unassign first.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssignmentCoordinator {
    state_machine: BookingStateMachine,
}

impl AssignmentCoordinator {
    pub fn new(state_machine: BookingStateMachine) -> Self {
        Self { state_machine }
    }

    /// Plans `pending → confirmed` with `provider_id` set.
    ///
    /// `prices` must contain the provider and its prices for the booking's
    /// tests; the provider has to be active and offer all of them.
    pub fn plan_assign(
        &self,
        booking: &Booking,
        provider_id: ProviderId,
        prices: &PriceBook,
        actor: &Actor,
    ) -> Result<StatusUpdate, BookingError> {
        self.state_machine.gate().require(actor, Action::AssignProvider)?;

        if let Some(existing) = booking.provider_id() {
            return Err(BookingError::AlreadyAssigned {
                booking_id: booking.id(),
                provider_id: existing,
            });
        }
        if booking.status() != BookingStatus::Pending {
            return Err(BookingError::InvalidTransition {
                from: booking.status(),
                to: BookingStatus::Confirmed,
            });
        }

        if prices.provider(&provider_id).is_none() {
            return Err(BookingError::not_found("provider", provider_id));
        }
        if !prices.is_active_provider(&provider_id) {
            return Err(BookingError::validation(
                "provider_id",
                format!("provider {} is not active", provider_id),
            ));
        }
        if !prices.offers_all(&provider_id, &booking.test_ids()) {
            return Err(BookingError::validation(
                "provider_id",
                format!("provider {} does not offer every booked test", provider_id),
            ));
        }

        self.state_machine
            .plan_transition(booking, BookingStatus::Confirmed, actor, Some(provider_id))
    }

    /// Plans the admin-only reset `confirmed → pending` with the provider
    /// cleared.
    pub fn plan_unassign(&self, booking: &Booking, actor: &Actor) -> Result<StatusUpdate, BookingError> {
        self.state_machine.gate().require(actor, Action::UnassignProvider)?;

        if booking.status() != BookingStatus::Confirmed {
            return Err(BookingError::InvalidTransition {
                from: booking.status(),
                to: BookingStatus::Pending,
            });
        }
        if booking.provider_id().is_none() {
            return Err(BookingError::validation("provider_id", "booking has no provider to remove"));
        }

        Ok(StatusUpdate {
            booking_id: booking.id(),
            expected_status: BookingStatus::Confirmed,
            expected_provider: booking.provider_id(),
            new_status: BookingStatus::Pending,
            provider: ProviderChange::Clear,
            attachments: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::access::{Role, RolePermissionGate};
    use crate::domain::booking::aggregate::test_support::{booking_in, pending_booking};
    use crate::domain::catalog::{PriceEntry, Provider, ProviderKind};
    use crate::domain::foundation::{Money, UserId};

    fn coordinator() -> AssignmentCoordinator {
        AssignmentCoordinator::new(BookingStateMachine::new(RolePermissionGate::new()))
    }

    fn provider(active: bool) -> Provider {
        Provider {
            id: ProviderId::new(),
            name: "JFK Medical Center".to_string(),
            kind: ProviderKind::Hospital,
            location: "Sinkor".to_string(),
            phone: "+231770000002".to_string(),
            email: "lab@jfk.example".to_string(),
            is_active: active,
            rating: 4.2,
        }
    }

    fn book_for(booking: &Booking, provider: &Provider) -> PriceBook {
        let mut book = PriceBook::new();
        book.insert_provider(provider.clone());
        for test_id in booking.test_ids() {
            book.insert_price(PriceEntry {
                test_id,
                provider_id: provider.id,
                price_usd: Money::from_cents("price_usd", 1000).unwrap(),
                price_lrd: Money::from_cents("price_lrd", 190_000).unwrap(),
                is_available: true,
            });
        }
        book
    }

    fn sub_admin() -> Actor {
        Actor::sub_admin(UserId::new("sub-1").unwrap())
    }

    #[test]
    fn sub_admin_assigns_pending_booking() {
        let target = provider(true);
        let booking = pending_booking(target.id, &[1000, 1500]);
        let update = coordinator()
            .plan_assign(&booking, target.id, &book_for(&booking, &target), &sub_admin())
            .unwrap();

        let mut applied = booking.clone();
        applied.apply_update(&update);
        assert_eq!(applied.status(), BookingStatus::Confirmed);
        assert_eq!(applied.provider_id(), Some(target.id));
    }

    #[test]
    fn clinic_cannot_assign() {
        let target = provider(true);
        let booking = pending_booking(target.id, &[1000]);
        let actor = Actor::provider_staff(Role::Clinic, UserId::new("c-1").unwrap(), target.id);

        let err = coordinator()
            .plan_assign(&booking, target.id, &book_for(&booking, &target), &actor)
            .unwrap_err();
        assert_eq!(
            err,
            BookingError::Unauthorized { role: Role::Clinic, action: Action::AssignProvider }
        );
    }

    #[test]
    fn already_assigned_booking_is_rejected() {
        let target = provider(true);
        let booking = booking_in(BookingStatus::Confirmed, target.id);
        let err = coordinator()
            .plan_assign(&booking, target.id, &book_for(&booking, &target), &sub_admin())
            .unwrap_err();
        assert!(matches!(err, BookingError::AlreadyAssigned { .. }));
    }

    #[test]
    fn inactive_or_non_offering_provider_is_rejected() {
        let inactive = provider(false);
        let booking = pending_booking(inactive.id, &[1000]);
        let err = coordinator()
            .plan_assign(&booking, inactive.id, &book_for(&booking, &inactive), &sub_admin())
            .unwrap_err();
        assert!(matches!(err, BookingError::Validation { .. }));

        let bare = provider(true);
        let mut book = PriceBook::new();
        book.insert_provider(bare.clone());
        let err = coordinator()
            .plan_assign(&booking, bare.id, &book, &sub_admin())
            .unwrap_err();
        assert!(matches!(err, BookingError::Validation { .. }));
    }

    #[test]
    fn unknown_provider_is_not_found() {
        let booking = pending_booking(ProviderId::new(), &[1000]);
        let err = coordinator()
            .plan_assign(&booking, ProviderId::new(), &PriceBook::new(), &sub_admin())
            .unwrap_err();
        assert!(matches!(err, BookingError::NotFound { resource: "provider", .. }));
    }

    #[test]
    fn only_admin_unassigns_and_only_from_confirmed() {
        let target = provider(true);
        let confirmed = booking_in(BookingStatus::Confirmed, target.id);

        let err = coordinator().plan_unassign(&confirmed, &sub_admin()).unwrap_err();
        assert!(matches!(err, BookingError::Unauthorized { .. }));

        let admin = Actor::admin(UserId::new("admin-1").unwrap());
        let update = coordinator().plan_unassign(&confirmed, &admin).unwrap();
        assert_eq!(update.new_status, BookingStatus::Pending);
        assert_eq!(update.provider, ProviderChange::Clear);

        let collected = booking_in(BookingStatus::SampleCollected, target.id);
        assert!(matches!(
            coordinator().plan_unassign(&collected, &admin),
            Err(BookingError::InvalidTransition { .. })
        ));
    }
}
