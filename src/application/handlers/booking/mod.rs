//! Booking command and query handlers.
//!
//! Write handlers follow one shape: load the booking, let the domain plan
//! the change (gate and graph checks happen there, before any write), apply
//! the plan through the repository's conditional update, then publish
//! events.

// Command handlers
mod assign_provider;
mod change_status;
mod create_bookings;
mod delete_booking;
mod unassign_provider;
mod upload_results;

// Query handlers
mod booking_statistics;
mod get_booking;
mod list_bookings;

#[cfg(test)]
pub(crate) mod test_support;

pub use assign_provider::{AssignProviderCommand, AssignProviderHandler};
pub use booking_statistics::BookingStatisticsHandler;
pub use change_status::{ChangeStatusCommand, ChangeStatusHandler};
pub use create_bookings::{CreateBookingsCommand, CreateBookingsHandler};
pub use delete_booking::DeleteBookingHandler;
pub use get_booking::GetBookingHandler;
pub use list_bookings::{ListBookingsHandler, ListBookingsQuery};
pub use unassign_provider::UnassignProviderHandler;
pub use upload_results::{UploadResultsCommand, UploadResultsHandler};

use crate::domain::access::Actor;
use crate::domain::booking::{Booking, BookingError, BookingStatusChanged};
use crate::domain::foundation::{BookingId, EventEnvelope, EventId, SerializableDomainEvent};
use crate::ports::BookingRepository;

/// Loads a booking or fails with `NotFound`.
async fn load_booking(repo: &dyn BookingRepository, id: &BookingId) -> Result<Booking, BookingError> {
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| BookingError::not_found("booking", id))
}

/// `BookingStatusChanged` for a write that moved `before` to `after`.
fn status_changed(before: &Booking, after: &Booking, actor: &Actor) -> EventEnvelope {
    BookingStatusChanged {
        event_id: EventId::new(),
        booking_id: after.id(),
        booking_number: after.booking_number().clone(),
        from: before.status(),
        to: after.status(),
        changed_by: actor.audit_id(),
        changed_at: after.updated_at(),
    }
    .to_envelope()
    .with_user_id(actor.audit_id())
}

/// Logs a rejected write at the level its kind deserves.
fn log_rejection(err: &BookingError, booking_id: &BookingId, actor: &Actor, operation: &str) {
    match err {
        BookingError::Infrastructure(message) => tracing::error!(
            booking_id = %booking_id,
            operation,
            error = %message,
            "booking write failed"
        ),
        BookingError::Unauthorized { .. } | BookingError::Conflict { .. } => tracing::warn!(
            booking_id = %booking_id,
            role = %actor.role,
            operation,
            error = %err,
            "booking write rejected"
        ),
        _ => tracing::debug!(
            booking_id = %booking_id,
            role = %actor.role,
            operation,
            error = %err,
            "booking write rejected"
        ),
    }
}
