//! Booking repository port.
//!
//! The one place in the system where concurrent writers meet: two staff
//! members acting on the same booking. `update_status` is therefore a
//! conditional update, never read-then-write.

use async_trait::async_trait;

use crate::domain::booking::{Booking, BookingStatus, StatusUpdate};
use crate::domain::foundation::{BookingId, DomainError, ErrorCode, ProviderId};

/// Which bookings a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingScope {
    All,
    AssignedTo(ProviderId),
}

/// Listing filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingFilter {
    pub scope: BookingScope,
    pub status: Option<BookingStatus>,
}

impl BookingFilter {
    pub fn all() -> Self {
        Self {
            scope: BookingScope::All,
            status: None,
        }
    }

    pub fn matches(&self, booking: &Booking) -> bool {
        let in_scope = match self.scope {
            BookingScope::All => true,
            BookingScope::AssignedTo(provider_id) => booking.provider_id() == Some(provider_id),
        };
        in_scope && self.status.map(|s| booking.status() == s).unwrap_or(true)
    }
}

/// Persistence for booking aggregates.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Inserts every booking or none of them.
    ///
    /// # Errors
    ///
    /// - `AlreadyExists` if an id or booking number is taken
    /// - `DatabaseError` on persistence failure
    async fn create_all(&self, bookings: &[Booking]) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, DomainError>;

    /// Applies `update` only if the stored status equals
    /// `update.expected_status` and the stored provider equals
    /// `update.expected_provider`, and returns the booking as written.
    ///
    /// # Errors
    ///
    /// - `BookingNotFound` if the booking does not exist
    /// - `ConcurrencyConflict` (details `booking_id`, `expected`) if the
    ///   status or provider no longer matches
    async fn update_status(&self, update: &StatusUpdate) -> Result<Booking, DomainError>;

    /// Bookings matching the filter, newest first.
    async fn list(&self, filter: &BookingFilter) -> Result<Vec<Booking>, DomainError>;

    /// Hard delete. Returns whether a booking was removed.
    async fn delete(&self, id: &BookingId) -> Result<bool, DomainError>;
}

/// Builds the conflict error every adapter returns for a lost update.
pub fn conflict_error(update: &StatusUpdate) -> DomainError {
    DomainError::new(
        ErrorCode::ConcurrencyConflict,
        format!(
            "Booking {} is no longer {}",
            update.booking_id, update.expected_status
        ),
    )
    .with_detail("booking_id", update.booking_id.to_string())
    .with_detail("expected", update.expected_status.to_string())
}

/// Builds the not-found error for a missing booking.
pub fn booking_not_found(id: &BookingId) -> DomainError {
    DomainError::new(
        ErrorCode::BookingNotFound,
        format!("Booking not found: {}", id),
    )
    .with_detail("id", id.to_string())
}
