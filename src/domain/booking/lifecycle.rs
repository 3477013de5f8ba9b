//! BookingStateMachine - plans status changes after consulting the gate.
//!
//! Planning is pure. The resulting `StatusUpdate` is handed to the booking
//! repository, which applies it only if the booking is still in
//! `expected_status`.

use super::{Booking, BookingError, BookingStatus, ResultAttachment};
use crate::domain::access::{Action, Actor, RolePermissionGate};
use crate::domain::foundation::{BookingId, ProviderId, StateMachine};

/// What happens to `provider_id` alongside a status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderChange {
    Keep,
    Set(ProviderId),
    Clear,
}

/// A conditional write: status, provider and attachments change together,
/// and only if the booking is still in `expected_status` with
/// `expected_provider` assigned.
///
/// The provider is part of the condition because `confirmed → pending`
/// followed by a reassignment brings the status back to where it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    pub booking_id: BookingId,
    pub expected_status: BookingStatus,
    pub expected_provider: Option<ProviderId>,
    pub new_status: BookingStatus,
    pub provider: ProviderChange,
    pub attachments: Vec<ResultAttachment>,
}

/// Owns the rules for moving a booking between statuses.
#[derive(Debug, Clone, Copy, Default)]
pub struct BookingStateMachine {
    gate: RolePermissionGate,
}

impl BookingStateMachine {
    pub fn new(gate: RolePermissionGate) -> Self {
        Self { gate }
    }

    pub fn gate(&self) -> &RolePermissionGate {
        &self.gate
    }

    /// Plans `booking → target` for `actor`, optionally assigning a provider
    /// in the same write.
    ///
    /// Order of checks: the role must hold `advance_status` at all, then the
    /// target must be a direct successor, then the booking must be in the
    /// actor's scope and the role must hold that specific edge.
    pub fn plan_transition(
        &self,
        booking: &Booking,
        target: BookingStatus,
        actor: &Actor,
        assign: Option<ProviderId>,
    ) -> Result<StatusUpdate, BookingError> {
        let from = booking.status();

        self.gate.require(actor, Action::AdvanceStatus)?;

        if !from.can_transition_to(&target) {
            return Err(BookingError::InvalidTransition { from, to: target });
        }

        // Pending bookings have no provider yet, so scope is checked against
        // the booking after assignment would apply.
        if from != BookingStatus::Pending {
            self.gate.check(actor, Action::AdvanceStatus, booking)?;
        }
        if !self.gate.permits_edge(actor.role, from, target) {
            return Err(BookingError::Unauthorized {
                role: actor.role,
                action: Action::AdvanceStatus,
            });
        }

        let provider = match assign {
            Some(provider_id) => {
                self.gate.require(actor, Action::AssignProvider)?;
                if let Some(existing) = booking.provider_id() {
                    return Err(BookingError::AlreadyAssigned {
                        booking_id: booking.id(),
                        provider_id: existing,
                    });
                }
                if target != BookingStatus::Confirmed {
                    return Err(BookingError::validation(
                        "provider_id",
                        "a provider can only be assigned when confirming",
                    ));
                }
                ProviderChange::Set(provider_id)
            }
            None => ProviderChange::Keep,
        };

        let resulting_provider = match provider {
            ProviderChange::Set(id) => Some(id),
            ProviderChange::Keep => booking.provider_id(),
            ProviderChange::Clear => None,
        };
        if target.requires_provider() && resulting_provider.is_none() {
            return Err(BookingError::validation(
                "provider_id",
                format!("a provider must be assigned before the booking is {}", target),
            ));
        }

        Ok(StatusUpdate {
            booking_id: booking.id(),
            expected_status: from,
            expected_provider: booking.provider_id(),
            new_status: target,
            provider,
            attachments: Vec::new(),
        })
    }

    /// Checks that `actor` may upload results for `booking` right now.
    pub fn authorize_results_upload(&self, booking: &Booking, actor: &Actor) -> Result<(), BookingError> {
        self.gate.check(actor, Action::UploadResults, booking)?;
        if booking.status() != BookingStatus::SampleCollected {
            return Err(BookingError::InvalidTransition {
                from: booking.status(),
                to: BookingStatus::ResultsReady,
            });
        }
        Ok(())
    }

    /// `sample_collected → results_ready` carrying the stored attachments.
    pub fn plan_results_ready(
        &self,
        booking: &Booking,
        actor: &Actor,
        attachments: Vec<ResultAttachment>,
    ) -> Result<StatusUpdate, BookingError> {
        self.authorize_results_upload(booking, actor)?;
        if attachments.is_empty() {
            return Err(BookingError::validation("files", "at least one result file is required"));
        }
        Ok(StatusUpdate {
            booking_id: booking.id(),
            expected_status: BookingStatus::SampleCollected,
            expected_provider: booking.provider_id(),
            new_status: BookingStatus::ResultsReady,
            provider: ProviderChange::Keep,
            attachments,
        })
    }
}
