//! HTTP DTOs for booking endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::booking::{
    Booking, BookingDraft, BookingLine, BookingStatus, DeliveryMethod, DraftGroup, PatientDetails,
    ResultAttachment,
};
use crate::domain::cart::CompositeId;
use crate::domain::foundation::{BookingId, Currency, ProviderId, ReferenceNumber, Timestamp};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

fn default_delivery_method() -> DeliveryMethod {
    DeliveryMethod::Whatsapp
}

/// Checkout request: patient details plus the cart's composite keys.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBookingsRequest {
    pub patient_name: String,
    pub patient_phone: String,
    pub patient_location: String,
    #[serde(default)]
    pub patient_email: Option<String>,
    pub items: Vec<CompositeId>,
    #[serde(default)]
    pub preferred_currency: Currency,
    #[serde(default = "default_delivery_method")]
    pub delivery_method: DeliveryMethod,
    /// Minor units, charged once per booking.
    #[serde(default)]
    pub delivery_charge: i64,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CreateBookingsRequest {
    /// Groups cart keys by provider in first-seen order. A key repeated in
    /// the cart is booked once.
    pub fn into_draft(self) -> BookingDraft {
        let mut groups: Vec<DraftGroup> = Vec::new();
        for key in self.items {
            let provider_id = key.provider_id();
            let test_id = key.test_id();
            match groups.iter_mut().find(|g| g.provider_id == provider_id) {
                Some(group) if group.test_ids.contains(&test_id) => {}
                Some(group) => group.test_ids.push(test_id),
                None => groups.push(DraftGroup {
                    provider_id,
                    test_ids: vec![test_id],
                }),
            }
        }

        BookingDraft {
            patient_name: self.patient_name,
            patient_phone: self.patient_phone,
            patient_location: self.patient_location,
            patient_email: self.patient_email,
            groups,
            preferred_currency: self.preferred_currency,
            delivery_method: self.delivery_method,
            delivery_charge_cents: self.delivery_charge,
            notes: self.notes,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangeStatusRequest {
    pub status: BookingStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssignProviderRequest {
    pub provider_id: ProviderId,
}

/// Query string for `GET /api/bookings`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListBookingsParams {
    #[serde(default)]
    pub status: Option<BookingStatus>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Full booking view. Amounts are minor units of `preferred_currency`.
#[derive(Debug, Clone, Serialize)]
pub struct BookingResponse {
    pub id: BookingId,
    pub booking_number: ReferenceNumber,
    pub status: BookingStatus,
    pub patient: PatientDetails,
    pub lines: Vec<BookingLine>,
    pub requested_provider_id: ProviderId,
    pub provider_id: Option<ProviderId>,
    pub preferred_currency: Currency,
    pub delivery_method: DeliveryMethod,
    pub delivery_charge: i64,
    pub total_amount: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub result_attachments: Vec<ResultAttachment>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id(),
            booking_number: booking.booking_number().clone(),
            status: booking.status(),
            patient: booking.patient().clone(),
            lines: booking.lines().to_vec(),
            requested_provider_id: booking.requested_provider_id(),
            provider_id: booking.provider_id(),
            preferred_currency: booking.preferred_currency(),
            delivery_method: booking.delivery_method(),
            delivery_charge: booking.delivery_charge().cents(),
            total_amount: booking.total_amount().cents(),
            notes: booking.notes().map(str::to_owned),
            result_attachments: booking.result_attachments().to_vec(),
            created_at: booking.created_at(),
            updated_at: booking.updated_at(),
        }
    }
}

/// Checkout response: one booking per provider in the cart.
#[derive(Debug, Clone, Serialize)]
pub struct CreateBookingsResponse {
    pub bookings: Vec<BookingResponse>,
    pub count: usize,
}

impl From<Vec<Booking>> for CreateBookingsResponse {
    fn from(bookings: Vec<Booking>) -> Self {
        let bookings: Vec<BookingResponse> = bookings.into_iter().map(Into::into).collect();
        Self {
            count: bookings.len(),
            bookings,
        }
    }
}
