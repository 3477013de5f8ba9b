//! Catalog module - read-only view of tests, providers and their prices.
//!
//! The catalog is owned by an external collaborator; this crate only reads it
//! through the `PricingCatalog` port. The types here are the snapshots that
//! flow into carts and bookings.

mod price_book;

pub use price_book::PriceBook;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Currency, Money, ProviderId, TestId};

/// A lab test offered on the marketplace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabTest {
    pub id: TestId,
    pub name: String,
    pub description: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preparation_instructions: Option<String>,
}

impl LabTest {
    /// Case-insensitive match on name, description or category.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [&self.name, &self.description, &self.category]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// What sort of organisation fulfils tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Clinic,
    Hospital,
    LabTechnician,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Clinic => "clinic",
            ProviderKind::Hospital => "hospital",
            ProviderKind::LabTechnician => "lab_technician",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "clinic" => Some(ProviderKind::Clinic),
            "hospital" => Some(ProviderKind::Hospital),
            "lab_technician" => Some(ProviderKind::LabTechnician),
            _ => None,
        }
    }
}

/// A clinic, hospital or lab technician offering priced tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub id: ProviderId,
    pub name: String,
    pub kind: ProviderKind,
    pub location: String,
    pub phone: String,
    pub email: String,
    pub is_active: bool,
    pub rating: f32,
}

/// Price of one test at one provider, in both currencies.
///
/// Unique per (test, provider) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceEntry {
    pub test_id: TestId,
    pub provider_id: ProviderId,
    pub price_usd: Money,
    pub price_lrd: Money,
    pub is_available: bool,
}

impl PriceEntry {
    /// Price in the requested currency.
    pub fn price_in(&self, currency: Currency) -> Money {
        match currency {
            Currency::Usd => self.price_usd,
            Currency::Lrd => self.price_lrd,
        }
    }
}

/// A provider together with its price for a particular test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderOffer {
    pub provider: Provider,
    pub price: PriceEntry,
}

/// A test together with its price at a particular provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestOffer {
    pub test: LabTest,
    pub price: PriceEntry,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cbc() -> LabTest {
        LabTest {
            id: TestId::new(),
            name: "Complete Blood Count".to_string(),
            description: "Full panel of blood cell counts".to_string(),
            category: "Hematology".to_string(),
            preparation_instructions: None,
        }
    }

    #[test]
    fn matches_is_case_insensitive_across_fields() {
        let test = cbc();
        assert!(test.matches("blood"));
        assert!(test.matches("HEMATO"));
        assert!(test.matches("  "));
        assert!(!test.matches("malaria"));
    }

    #[test]
    fn price_in_selects_currency() {
        let entry = PriceEntry {
            test_id: TestId::new(),
            provider_id: ProviderId::new(),
            price_usd: Money::from_cents("price_usd", 1000).unwrap(),
            price_lrd: Money::from_cents("price_lrd", 190_000).unwrap(),
            is_available: true,
        };
        assert_eq!(entry.price_in(Currency::Usd).cents(), 1000);
        assert_eq!(entry.price_in(Currency::Lrd).cents(), 190_000);
    }

    #[test]
    fn provider_kind_round_trips_through_str() {
        for kind in [ProviderKind::Clinic, ProviderKind::Hospital, ProviderKind::LabTechnician] {
            assert_eq!(ProviderKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(ProviderKind::parse("pharmacy"), None);
    }
}
