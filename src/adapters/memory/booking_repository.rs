//! In-memory BookingRepository.
//!
//! The write lock is held across the status and provider comparison and the
//! write, which gives the same compare-and-set semantics as the Postgres
//! `UPDATE ... WHERE status = $2 AND provider_id IS NOT DISTINCT FROM $8`.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::booking::{Booking, StatusUpdate};
use crate::domain::foundation::{BookingId, DomainError, ErrorCode};
use crate::ports::{booking_not_found, conflict_error, BookingFilter, BookingRepository};

#[derive(Debug, Clone, Default)]
pub struct InMemoryBookingRepository {
    bookings: Arc<RwLock<HashMap<BookingId, Booking>>>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored bookings.
    pub async fn len(&self) -> usize {
        self.bookings.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.bookings.read().await.is_empty()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn create_all(&self, bookings: &[Booking]) -> Result<(), DomainError> {
        let mut stored = self.bookings.write().await;

        // Validate the whole batch before inserting anything.
        for (index, booking) in bookings.iter().enumerate() {
            let duplicate_in_batch = bookings[..index].iter().any(|other| {
                other.id() == booking.id() || other.booking_number() == booking.booking_number()
            });
            let duplicate_stored = stored.contains_key(&booking.id())
                || stored
                    .values()
                    .any(|other| other.booking_number() == booking.booking_number());
            if duplicate_in_batch || duplicate_stored {
                return Err(DomainError::new(
                    ErrorCode::AlreadyExists,
                    format!("Booking {} already exists", booking.booking_number()),
                )
                .with_detail("id", booking.id().to_string()));
            }
        }

        for booking in bookings {
            stored.insert(booking.id(), booking.clone());
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, DomainError> {
        Ok(self.bookings.read().await.get(id).cloned())
    }

    async fn update_status(&self, update: &StatusUpdate) -> Result<Booking, DomainError> {
        let mut stored = self.bookings.write().await;
        let booking = stored
            .get_mut(&update.booking_id)
            .ok_or_else(|| booking_not_found(&update.booking_id))?;

        if booking.status() != update.expected_status
            || booking.provider_id() != update.expected_provider
        {
            return Err(conflict_error(update));
        }

        booking.apply_update(update);
        Ok(booking.clone())
    }

    async fn list(&self, filter: &BookingFilter) -> Result<Vec<Booking>, DomainError> {
        let stored = self.bookings.read().await;
        let mut bookings: Vec<Booking> = stored
            .values()
            .filter(|booking| filter.matches(booking))
            .cloned()
            .collect();
        bookings.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(bookings)
    }

    async fn delete(&self, id: &BookingId) -> Result<bool, DomainError> {
        Ok(self.bookings.write().await.remove(id).is_some())
    }
}
