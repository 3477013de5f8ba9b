//! BookingFactory - turns a checkout draft into pending bookings.

use std::collections::HashSet;

use super::{Booking, BookingError, BookingLine, DeliveryMethod, NewBooking, PatientDetails};
use crate::domain::catalog::PriceBook;
use crate::domain::foundation::{Currency, Money, ProviderId, ReferenceNumber, TestId};

/// Tests picked from one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftGroup {
    pub provider_id: ProviderId,
    pub test_ids: Vec<TestId>,
}

/// Everything a patient submits at checkout.
#[derive(Debug, Clone)]
pub struct BookingDraft {
    pub patient_name: String,
    pub patient_phone: String,
    pub patient_location: String,
    pub patient_email: Option<String>,
    pub groups: Vec<DraftGroup>,
    pub preferred_currency: Currency,
    pub delivery_method: DeliveryMethod,
    /// Minor units; may be negative here so that it can be rejected.
    pub delivery_charge_cents: i64,
    pub notes: Option<String>,
}

/// Validates a draft and produces one pending booking per provider group.
///
/// Validation stops at the first failure and nothing is produced, so the
/// caller either persists every booking or none.
#[derive(Debug, Clone)]
pub struct BookingFactory {
    number_prefix: String,
}

impl BookingFactory {
    pub fn new(number_prefix: impl Into<String>) -> Self {
        Self {
            number_prefix: number_prefix.into(),
        }
    }

    pub fn build(&self, draft: BookingDraft, prices: &PriceBook) -> Result<Vec<Booking>, BookingError> {
        let patient = PatientDetails::new(
            draft.patient_name,
            draft.patient_phone,
            draft.patient_location,
            draft.patient_email,
        )?;

        let delivery_charge = validate_delivery(draft.delivery_method, draft.delivery_charge_cents)?;

        if draft.groups.is_empty() {
            return Err(BookingError::validation("groups", "at least one provider group is required"));
        }

        let mut seen_providers = HashSet::new();
        let mut priced_groups = Vec::with_capacity(draft.groups.len());
        for (index, group) in draft.groups.iter().enumerate() {
            if !seen_providers.insert(group.provider_id) {
                return Err(BookingError::validation(
                    format!("groups[{}].provider_id", index),
                    "provider appears in more than one group",
                ));
            }
            let lines = price_group(index, group, prices, draft.preferred_currency)?;
            priced_groups.push((group.provider_id, lines));
        }

        let mut numbers = HashSet::new();
        priced_groups
            .into_iter()
            .map(|(provider_id, lines)| {
                let booking_number = self.unique_number(&mut numbers);
                Booking::create(NewBooking {
                    booking_number,
                    patient: patient.clone(),
                    requested_provider_id: provider_id,
                    lines,
                    preferred_currency: draft.preferred_currency,
                    delivery_method: draft.delivery_method,
                    delivery_charge,
                    notes: draft.notes.clone(),
                })
            })
            .collect()
    }

    fn unique_number(&self, taken: &mut HashSet<ReferenceNumber>) -> ReferenceNumber {
        loop {
            let candidate = ReferenceNumber::generate(&self.number_prefix);
            if taken.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}

fn validate_delivery(method: DeliveryMethod, cents: i64) -> Result<Money, BookingError> {
    match method {
        DeliveryMethod::Whatsapp if cents != 0 => Err(BookingError::validation(
            "delivery_charge",
            "must be 0 for whatsapp delivery",
        )),
        _ if cents < 0 => Err(BookingError::validation(
            "delivery_charge",
            "must not be negative",
        )),
        _ => Ok(Money::from_cents("delivery_charge", cents)?),
    }
}

fn price_group(
    index: usize,
    group: &DraftGroup,
    prices: &PriceBook,
    currency: Currency,
) -> Result<Vec<BookingLine>, BookingError> {
    if group.test_ids.is_empty() {
        return Err(BookingError::validation(
            format!("groups[{}].test_ids", index),
            "at least one test is required",
        ));
    }
    if !prices.is_active_provider(&group.provider_id) {
        return Err(BookingError::validation(
            format!("groups[{}].provider_id", index),
            format!("provider {} is unknown or inactive", group.provider_id),
        ));
    }

    let mut seen_tests = HashSet::new();
    let mut lines = Vec::with_capacity(group.test_ids.len());
    for (position, test_id) in group.test_ids.iter().enumerate() {
        let field = format!("groups[{}].test_ids[{}]", index, position);
        if !seen_tests.insert(*test_id) {
            return Err(BookingError::validation(field, "test listed twice"));
        }
        let entry = prices
            .available_price(test_id, &group.provider_id)
            .ok_or_else(|| {
                BookingError::validation(
                    field,
                    format!("test {} has no available price at provider {}", test_id, group.provider_id),
                )
            })?;
        lines.push(BookingLine {
            test_id: *test_id,
            unit_price: entry.price_in(currency),
        });
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::BookingStatus;
    use crate::domain::catalog::{PriceEntry, Provider, ProviderKind};

    struct Fixture {
        prices: PriceBook,
        x: ProviderId,
        y: ProviderId,
        a: TestId,
        b: TestId,
    }

    fn provider(active: bool) -> Provider {
        Provider {
            id: ProviderId::new(),
            name: "Provider".to_string(),
            kind: ProviderKind::Clinic,
            location: "Monrovia".to_string(),
            phone: "+231770000003".to_string(),
            email: "p@example.org".to_string(),
            is_active: active,
            rating: 0.0,
        }
    }

    fn price(test_id: TestId, provider_id: ProviderId, usd: i64, lrd: i64, available: bool) -> PriceEntry {
        PriceEntry {
            test_id,
            provider_id,
            price_usd: Money::from_cents("price_usd", usd).unwrap(),
            price_lrd: Money::from_cents("price_lrd", lrd).unwrap(),
            is_available: available,
        }
    }

    fn fixture() -> Fixture {
        let (px, py) = (provider(true), provider(true));
        let (a, b) = (TestId::new(), TestId::new());
        let mut prices = PriceBook::new();
        prices.insert_price(price(a, px.id, 1000, 190_000, true));
        prices.insert_price(price(b, px.id, 1500, 285_000, true));
        prices.insert_price(price(a, py.id, 900, 170_000, true));
        prices.insert_price(price(b, py.id, 1400, 260_000, false));
        let (x, y) = (px.id, py.id);
        prices.insert_provider(px);
        prices.insert_provider(py);
        Fixture { prices, x, y, a, b }
    }

    fn draft(groups: Vec<DraftGroup>, method: DeliveryMethod, charge: i64) -> BookingDraft {
        BookingDraft {
            patient_name: "Ada Doe".to_string(),
            patient_phone: "+231770000004".to_string(),
            patient_location: "Congo Town".to_string(),
            patient_email: None,
            groups,
            preferred_currency: Currency::Usd,
            delivery_method: method,
            delivery_charge_cents: charge,
            notes: None,
        }
    }

    fn factory() -> BookingFactory {
        BookingFactory::new("CHK")
    }

    #[test]
    fn two_tests_from_one_provider_make_one_booking() {
        let f = fixture();
        let groups = vec![DraftGroup { provider_id: f.x, test_ids: vec![f.a, f.b] }];
        let bookings = factory()
            .build(draft(groups, DeliveryMethod::InPerson, 500), &f.prices)
            .unwrap();

        assert_eq!(bookings.len(), 1);
        let booking = &bookings[0];
        assert_eq!(booking.test_ids(), vec![f.a, f.b]);
        assert_eq!(booking.requested_provider_id(), f.x);
        assert_eq!(booking.provider_id(), None);
        assert_eq!(booking.status(), BookingStatus::Pending);
        assert_eq!(booking.total_amount().cents(), 2500 + 500);
        assert!(booking.booking_number().as_str().starts_with("CHK-"));
    }

    #[test]
    fn whatsapp_with_charge_fails_and_without_succeeds() {
        let f = fixture();
        let groups = vec![DraftGroup { provider_id: f.x, test_ids: vec![f.a] }];

        let err = factory()
            .build(draft(groups.clone(), DeliveryMethod::Whatsapp, 500), &f.prices)
            .unwrap_err();
        assert!(matches!(err, BookingError::Validation { ref field, .. } if field == "delivery_charge"));

        assert!(factory()
            .build(draft(groups, DeliveryMethod::Whatsapp, 0), &f.prices)
            .is_ok());
    }

    #[test]
    fn negative_in_person_charge_fails() {
        let f = fixture();
        let groups = vec![DraftGroup { provider_id: f.x, test_ids: vec![f.a] }];
        let err = factory()
            .build(draft(groups, DeliveryMethod::InPerson, -1), &f.prices)
            .unwrap_err();
        assert!(matches!(err, BookingError::Validation { ref field, .. } if field == "delivery_charge"));
    }

    #[test]
    fn patient_fields_are_checked_before_delivery() {
        let f = fixture();
        let mut d = draft(vec![], DeliveryMethod::Whatsapp, 500);
        d.patient_phone = String::new();
        let err = factory().build(d, &f.prices).unwrap_err();
        assert!(matches!(err, BookingError::Validation { ref field, .. } if field == "patient_phone"));
    }

    #[test]
    fn one_unavailable_price_fails_the_whole_request() {
        let f = fixture();
        let groups = vec![
            DraftGroup { provider_id: f.x, test_ids: vec![f.a] },
            DraftGroup { provider_id: f.y, test_ids: vec![f.a, f.b] },
        ];
        let err = factory()
            .build(draft(groups, DeliveryMethod::Whatsapp, 0), &f.prices)
            .unwrap_err();
        assert!(
            matches!(err, BookingError::Validation { ref field, .. } if field == "groups[1].test_ids[1]")
        );
    }

    #[test]
    fn multi_provider_draft_yields_booking_per_group_in_currency() {
        let f = fixture();
        let groups = vec![
            DraftGroup { provider_id: f.x, test_ids: vec![f.b] },
            DraftGroup { provider_id: f.y, test_ids: vec![f.a] },
        ];
        let mut d = draft(groups, DeliveryMethod::Whatsapp, 0);
        d.preferred_currency = Currency::Lrd;
        let bookings = factory().build(d, &f.prices).unwrap();

        assert_eq!(bookings.len(), 2);
        assert_eq!(bookings[0].requested_provider_id(), f.x);
        assert_eq!(bookings[0].total_amount().cents(), 285_000);
        assert_eq!(bookings[1].total_amount().cents(), 170_000);
        assert_ne!(bookings[0].booking_number(), bookings[1].booking_number());
    }

    #[test]
    fn inactive_provider_and_duplicate_tests_are_rejected() {
        let f = fixture();
        let mut prices = f.prices.clone();
        let inactive = provider(false);
        prices.insert_price(price(f.a, inactive.id, 100, 100, true));
        let inactive_id = inactive.id;
        prices.insert_provider(inactive);

        let err = factory()
            .build(
                draft(
                    vec![DraftGroup { provider_id: inactive_id, test_ids: vec![f.a] }],
                    DeliveryMethod::Whatsapp,
                    0,
                ),
                &prices,
            )
            .unwrap_err();
        assert!(matches!(err, BookingError::Validation { ref field, .. } if field == "groups[0].provider_id"));

        let err = factory()
            .build(
                draft(
                    vec![DraftGroup { provider_id: f.x, test_ids: vec![f.a, f.a] }],
                    DeliveryMethod::Whatsapp,
                    0,
                ),
                &prices,
            )
            .unwrap_err();
        assert!(matches!(err, BookingError::Validation { .. }));
    }
}
