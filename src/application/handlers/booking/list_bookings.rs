//! ListBookingsHandler - booking lists for the staff dashboards.

use std::sync::Arc;

use crate::domain::access::{Action, Actor, RolePermissionGate, ViewScope};
use crate::domain::booking::{Booking, BookingError, BookingStatus};
use crate::ports::{BookingFilter, BookingRepository, BookingScope};

#[derive(Debug, Clone, Copy, Default)]
pub struct ListBookingsQuery {
    pub status: Option<BookingStatus>,
}

pub struct ListBookingsHandler {
    repo: Arc<dyn BookingRepository>,
    gate: RolePermissionGate,
}

impl ListBookingsHandler {
    pub fn new(repo: Arc<dyn BookingRepository>, gate: RolePermissionGate) -> Self {
        Self { repo, gate }
    }

    /// Newest first. Admin and sub-admin see every booking, provider staff
    /// see those assigned to their provider.
    pub async fn handle(&self, query: ListBookingsQuery, actor: &Actor) -> Result<Vec<Booking>, BookingError> {
        let scope = match self.gate.view_scope(actor) {
            ViewScope::All => BookingScope::All,
            ViewScope::OwnProvider(provider_id) => BookingScope::AssignedTo(provider_id),
            ViewScope::Nothing => {
                return Err(BookingError::Unauthorized {
                    role: actor.role,
                    action: Action::ViewOwnBookings,
                })
            }
        };

        let bookings = self
            .repo
            .list(&BookingFilter {
                scope,
                status: query.status,
            })
            .await?;
        tracing::debug!(role = %actor.role, count = bookings.len(), "bookings listed");
        Ok(bookings)
    }
}
