//! ResultStorage port - hands result documents to the file-transport
//! collaborator and gets back references to attach to a booking.

use async_trait::async_trait;

use crate::domain::booking::ResultAttachment;
use crate::domain::foundation::{BookingId, DomainError};

/// A result document as received from provider staff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// External file store for medical results.
///
/// The core only accepts the final outcome: either every file is stored and
/// references come back, or an error is returned.
#[async_trait]
pub trait ResultStorage: Send + Sync {
    async fn store(&self, booking_id: &BookingId, files: Vec<ResultFile>) -> Result<Vec<ResultAttachment>, DomainError>;

    /// Removes files returned by an earlier `store` that never ended up
    /// referenced by the booking. Files already gone are not an error.
    async fn discard(&self, booking_id: &BookingId, attachments: &[ResultAttachment]) -> Result<(), DomainError>;
}
