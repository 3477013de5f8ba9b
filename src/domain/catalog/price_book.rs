//! Point-in-time snapshot of the prices and providers a request touches.

use std::collections::HashMap;

use super::{PriceEntry, Provider};
use crate::domain::foundation::{ProviderId, TestId};

/// Prices and providers loaded from the catalog for one request.
///
/// Booking creation and provider assignment are pure functions over a
/// `PriceBook`; the application layer fills it from the `PricingCatalog` port
/// before calling into the domain.
#[derive(Debug, Clone, Default)]
pub struct PriceBook {
    entries: HashMap<(TestId, ProviderId), PriceEntry>,
    providers: HashMap<ProviderId, Provider>,
}

impl PriceBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_price(&mut self, entry: PriceEntry) {
        self.entries.insert((entry.test_id, entry.provider_id), entry);
    }

    pub fn insert_provider(&mut self, provider: Provider) {
        self.providers.insert(provider.id, provider);
    }

    pub fn price(&self, test_id: &TestId, provider_id: &ProviderId) -> Option<&PriceEntry> {
        self.entries.get(&(*test_id, *provider_id))
    }

    /// The entry for the pair, only if it is marked available.
    pub fn available_price(&self, test_id: &TestId, provider_id: &ProviderId) -> Option<&PriceEntry> {
        self.price(test_id, provider_id).filter(|entry| entry.is_available)
    }

    pub fn provider(&self, provider_id: &ProviderId) -> Option<&Provider> {
        self.providers.get(provider_id)
    }

    /// True when the provider exists and is active.
    pub fn is_active_provider(&self, provider_id: &ProviderId) -> bool {
        self.provider(provider_id).map(|p| p.is_active).unwrap_or(false)
    }

    /// True when the provider offers every listed test as available.
    pub fn offers_all(&self, provider_id: &ProviderId, test_ids: &[TestId]) -> bool {
        test_ids
            .iter()
            .all(|test_id| self.available_price(test_id, provider_id).is_some())
    }
}
