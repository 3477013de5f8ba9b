//! Booking aggregate.

use serde::{Deserialize, Serialize};

use super::{
    BookingError, BookingLine, BookingStatus, DeliveryMethod, PatientDetails, ProviderChange,
    ResultAttachment, StatusUpdate,
};
use crate::domain::foundation::{
    BookingId, Currency, Money, ProviderId, ReferenceNumber, TestId, Timestamp,
};

/// A patient's request for one or more tests from a single provider.
///
/// Status and assignment change only through `apply_update`, which takes a
/// `StatusUpdate` planned by the state machine or assignment coordinator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    id: BookingId,
    booking_number: ReferenceNumber,
    patient: PatientDetails,
    lines: Vec<BookingLine>,
    requested_provider_id: ProviderId,
    provider_id: Option<ProviderId>,
    status: BookingStatus,
    preferred_currency: Currency,
    delivery_method: DeliveryMethod,
    delivery_charge: Money,
    total_amount: Money,
    notes: Option<String>,
    result_attachments: Vec<ResultAttachment>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

/// Every stored field of a booking, used by repositories to rebuild one.
#[derive(Debug, Clone)]
pub struct BookingRecord {
    pub id: BookingId,
    pub booking_number: ReferenceNumber,
    pub patient: PatientDetails,
    pub lines: Vec<BookingLine>,
    pub requested_provider_id: ProviderId,
    pub provider_id: Option<ProviderId>,
    pub status: BookingStatus,
    pub preferred_currency: Currency,
    pub delivery_method: DeliveryMethod,
    pub delivery_charge: Money,
    pub total_amount: Money,
    pub notes: Option<String>,
    pub result_attachments: Vec<ResultAttachment>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Inputs for a new booking, already validated by the factory.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub booking_number: ReferenceNumber,
    pub patient: PatientDetails,
    pub requested_provider_id: ProviderId,
    pub lines: Vec<BookingLine>,
    pub preferred_currency: Currency,
    pub delivery_method: DeliveryMethod,
    pub delivery_charge: Money,
    pub notes: Option<String>,
}

impl Booking {
    /// Creates a pending, unassigned booking. The total is the sum of line
    /// prices plus the delivery charge.
    pub fn create(new: NewBooking) -> Result<Self, BookingError> {
        if new.lines.is_empty() {
            return Err(BookingError::validation("test_ids", "at least one test is required"));
        }
        let subtotal: Money = new.lines.iter().map(|line| line.unit_price).sum();
        let now = Timestamp::now();
        Ok(Self {
            id: BookingId::new(),
            booking_number: new.booking_number,
            patient: new.patient,
            lines: new.lines,
            requested_provider_id: new.requested_provider_id,
            provider_id: None,
            status: BookingStatus::Pending,
            preferred_currency: new.preferred_currency,
            delivery_method: new.delivery_method,
            delivery_charge: new.delivery_charge,
            total_amount: subtotal + new.delivery_charge,
            notes: new.notes.filter(|n| !n.trim().is_empty()),
            result_attachments: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuilds a booking from storage without re-running creation rules.
    pub fn restore(record: BookingRecord) -> Self {
        Self {
            id: record.id,
            booking_number: record.booking_number,
            patient: record.patient,
            lines: record.lines,
            requested_provider_id: record.requested_provider_id,
            provider_id: record.provider_id,
            status: record.status,
            preferred_currency: record.preferred_currency,
            delivery_method: record.delivery_method,
            delivery_charge: record.delivery_charge,
            total_amount: record.total_amount,
            notes: record.notes,
            result_attachments: record.result_attachments,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    /// Applies a planned update. Callers check the expected status first;
    /// repositories do so under the same lock or statement as the write.
    pub fn apply_update(&mut self, update: &StatusUpdate) {
        self.status = update.new_status;
        match update.provider {
            ProviderChange::Keep => {}
            ProviderChange::Set(provider_id) => self.provider_id = Some(provider_id),
            ProviderChange::Clear => self.provider_id = None,
        }
        self.result_attachments
            .extend(update.attachments.iter().cloned());
        self.updated_at = Timestamp::now();
    }

    // === Accessors ===

    pub fn id(&self) -> BookingId {
        self.id
    }

    pub fn booking_number(&self) -> &ReferenceNumber {
        &self.booking_number
    }

    pub fn patient(&self) -> &PatientDetails {
        &self.patient
    }

    pub fn lines(&self) -> &[BookingLine] {
        &self.lines
    }

    pub fn test_ids(&self) -> Vec<TestId> {
        self.lines.iter().map(|line| line.test_id).collect()
    }

    /// Provider whose prices were used when the booking was placed.
    pub fn requested_provider_id(&self) -> ProviderId {
        self.requested_provider_id
    }

    /// Provider assigned to fulfil the booking. `None` while pending.
    pub fn provider_id(&self) -> Option<ProviderId> {
        self.provider_id
    }

    pub fn status(&self) -> BookingStatus {
        self.status
    }

    pub fn preferred_currency(&self) -> Currency {
        self.preferred_currency
    }

    pub fn delivery_method(&self) -> DeliveryMethod {
        self.delivery_method
    }

    pub fn delivery_charge(&self) -> Money {
        self.delivery_charge
    }

    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn result_attachments(&self) -> &[ResultAttachment] {
        &self.result_attachments
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// A pending booking for `provider` with one line per price (in cents).
    pub fn pending_booking(provider: ProviderId, prices: &[i64]) -> Booking {
        Booking::create(NewBooking {
            booking_number: ReferenceNumber::generate("CHK"),
            patient: PatientDetails::new("Ada Doe", "+231770000001", "Sinkor", None).unwrap(),
            requested_provider_id: provider,
            lines: prices
                .iter()
                .map(|cents| BookingLine {
                    test_id: TestId::new(),
                    unit_price: Money::from_cents("price", *cents).unwrap(),
                })
                .collect(),
            preferred_currency: Currency::Usd,
            delivery_method: DeliveryMethod::Whatsapp,
            delivery_charge: Money::ZERO,
            notes: None,
        })
        .unwrap()
    }

    /// A booking forced into `status` with `provider` assigned where required.
    pub fn booking_in(status: BookingStatus, provider: ProviderId) -> Booking {
        let mut booking = pending_booking(provider, &[1000]);
        let assigned = if status.requires_provider() || status == BookingStatus::Cancelled {
            ProviderChange::Set(provider)
        } else {
            ProviderChange::Keep
        };
        booking.apply_update(&StatusUpdate {
            booking_id: booking.id(),
            expected_status: BookingStatus::Pending,
            expected_provider: None,
            new_status: status,
            provider: assigned,
            attachments: Vec::new(),
        });
        booking
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::pending_booking;
    use super::*;

    #[test]
    fn create_starts_pending_and_unassigned() {
        let provider = ProviderId::new();
        let booking = pending_booking(provider, &[1000, 1500]);

        assert_eq!(booking.status(), BookingStatus::Pending);
        assert_eq!(booking.provider_id(), None);
        assert_eq!(booking.requested_provider_id(), provider);
        assert_eq!(booking.total_amount().cents(), 2500);
        assert_eq!(booking.test_ids().len(), 2);
    }

    #[test]
    fn create_rejects_empty_lines() {
        let result = Booking::create(NewBooking {
            booking_number: ReferenceNumber::generate("CHK"),
            patient: PatientDetails::new("Ada", "0777", "Sinkor", None).unwrap(),
            requested_provider_id: ProviderId::new(),
            lines: vec![],
            preferred_currency: Currency::Usd,
            delivery_method: DeliveryMethod::Whatsapp,
            delivery_charge: Money::ZERO,
            notes: None,
        });
        assert!(matches!(result, Err(BookingError::Validation { .. })));
    }

    #[test]
    fn apply_update_sets_status_and_provider_together() {
        let provider = ProviderId::new();
        let mut booking = pending_booking(provider, &[1000]);
        booking.apply_update(&StatusUpdate {
            booking_id: booking.id(),
            expected_status: BookingStatus::Pending,
            expected_provider: None,
            new_status: BookingStatus::Confirmed,
            provider: ProviderChange::Set(provider),
            attachments: vec![],
        });

        assert_eq!(booking.status(), BookingStatus::Confirmed);
        assert_eq!(booking.provider_id(), Some(provider));
    }
}
