//! Booking domain events.
//!
//! Published after the corresponding write has been persisted:
//! - `BookingCreated` - checkout produced a booking
//! - `BookingStatusChanged` - any status transition
//! - `ProviderAssigned` / `ProviderUnassigned` - assignment changes
//! - `ResultsUploaded` - result documents attached

use serde::{Deserialize, Serialize};

use super::BookingStatus;
use crate::domain::foundation::{
    domain_event, BookingId, Currency, EventId, Money, ProviderId, ReferenceNumber, TestId,
    Timestamp,
};

// ════════════════════════════════════════════════════════════════════════════
// BookingCreated
// ════════════════════════════════════════════════════════════════════════════

/// Published for each booking produced at checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCreated {
    pub event_id: EventId,
    pub booking_id: BookingId,
    pub booking_number: ReferenceNumber,
    pub requested_provider_id: ProviderId,
    pub test_ids: Vec<TestId>,
    pub currency: Currency,
    pub total_amount: Money,
    pub patient_phone: String,
    pub created_at: Timestamp,
}

domain_event!(
    BookingCreated,
    event_type = "booking.created.v1",
    aggregate_id = booking_id,
    aggregate_type = "Booking",
    occurred_at = created_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// BookingStatusChanged
// ════════════════════════════════════════════════════════════════════════════

/// Published for every successful transition, including assignment resets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingStatusChanged {
    pub event_id: EventId,
    pub booking_id: BookingId,
    pub booking_number: ReferenceNumber,
    pub from: BookingStatus,
    pub to: BookingStatus,
    pub changed_by: String,
    pub changed_at: Timestamp,
}

domain_event!(
    BookingStatusChanged,
    event_type = "booking.status_changed.v1",
    aggregate_id = booking_id,
    aggregate_type = "Booking",
    occurred_at = changed_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// ProviderAssigned
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderAssigned {
    pub event_id: EventId,
    pub booking_id: BookingId,
    pub provider_id: ProviderId,
    pub assigned_by: String,
    pub assigned_at: Timestamp,
}

domain_event!(
    ProviderAssigned,
    event_type = "booking.provider_assigned.v1",
    aggregate_id = booking_id,
    aggregate_type = "Booking",
    occurred_at = assigned_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// ProviderUnassigned
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderUnassigned {
    pub event_id: EventId,
    pub booking_id: BookingId,
    pub previous_provider_id: ProviderId,
    pub unassigned_by: String,
    pub unassigned_at: Timestamp,
}

domain_event!(
    ProviderUnassigned,
    event_type = "booking.provider_unassigned.v1",
    aggregate_id = booking_id,
    aggregate_type = "Booking",
    occurred_at = unassigned_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// ResultsUploaded
// ════════════════════════════════════════════════════════════════════════════

/// Triggers result delivery to the patient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsUploaded {
    pub event_id: EventId,
    pub booking_id: BookingId,
    pub booking_number: ReferenceNumber,
    pub file_count: usize,
    pub uploaded_by: String,
    pub uploaded_at: Timestamp,
}

domain_event!(
    ResultsUploaded,
    event_type = "booking.results_uploaded.v1",
    aggregate_id = booking_id,
    aggregate_type = "Booking",
    occurred_at = uploaded_at,
    event_id = event_id
);
