//! In-memory PricingCatalog.
//!
//! Backs tests and database-less runs. `demo()` seeds a small Monrovia
//! catalog so the HTTP surface is usable out of the box.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::catalog::{LabTest, PriceEntry, Provider, ProviderKind, ProviderOffer, TestOffer};
use crate::domain::foundation::{DomainError, Money, ProviderId, TestId};
use crate::ports::PricingCatalog;

#[derive(Debug, Default)]
struct CatalogData {
    tests: HashMap<TestId, LabTest>,
    providers: HashMap<ProviderId, Provider>,
    prices: HashMap<(TestId, ProviderId), PriceEntry>,
}

/// In-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPricingCatalog {
    data: Arc<RwLock<CatalogData>>,
}

impl InMemoryPricingCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from ready-made parts.
    pub fn from_parts(tests: Vec<LabTest>, providers: Vec<Provider>, prices: Vec<PriceEntry>) -> Self {
        let data = CatalogData {
            tests: tests.into_iter().map(|t| (t.id, t)).collect(),
            providers: providers.into_iter().map(|p| (p.id, p)).collect(),
            prices: prices
                .into_iter()
                .map(|e| ((e.test_id, e.provider_id), e))
                .collect(),
        };
        Self {
            data: Arc::new(RwLock::new(data)),
        }
    }

    pub async fn add_test(&self, test: LabTest) {
        self.data.write().await.tests.insert(test.id, test);
    }

    pub async fn add_provider(&self, provider: Provider) {
        self.data.write().await.providers.insert(provider.id, provider);
    }

    pub async fn set_price(&self, entry: PriceEntry) {
        self.data
            .write()
            .await
            .prices
            .insert((entry.test_id, entry.provider_id), entry);
    }

    /// A handful of common tests at two clinics, a hospital and a mobile
    /// lab technician.
    pub fn demo() -> Self {
        let test = |name: &str, description: &str, category: &str| LabTest {
            id: TestId::new(),
            name: name.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            preparation_instructions: None,
        };
        let provider = |name: &str, kind: ProviderKind, location: &str| Provider {
            id: ProviderId::new(),
            name: name.to_string(),
            kind,
            location: location.to_string(),
            phone: "+231770000000".to_string(),
            email: format!("{}@chekup.example", name.to_lowercase().replace(' ', ".")),
            is_active: true,
            rating: 0.0,
        };

        let tests = vec![
            test("Complete Blood Count", "Red cells, white cells and platelets", "Hematology"),
            test("Malaria Rapid Test", "Plasmodium antigen detection", "Infectious Disease"),
            test("Lipid Panel", "Cholesterol and triglycerides", "Chemistry"),
            test("Fasting Blood Sugar", "Glucose after an overnight fast", "Chemistry"),
        ];
        let providers = vec![
            provider("Sinkor Diagnostic Clinic", ProviderKind::Clinic, "Sinkor, Monrovia"),
            provider("Paynesville Family Clinic", ProviderKind::Clinic, "Paynesville"),
            provider("JFK Medical Center", ProviderKind::Hospital, "Sinkor, Monrovia"),
            provider("Home Sample Collection", ProviderKind::LabTechnician, "Greater Monrovia"),
        ];

        // USD cents per test, scaled by provider; LRD at a fixed 190 rate.
        let base_usd = [1500_i64, 800, 2500, 600];
        let mut prices = Vec::new();
        for (p_index, p) in providers.iter().enumerate() {
            for (t_index, t) in tests.iter().enumerate() {
                let usd = base_usd[t_index] + (p_index as i64) * 200;
                prices.push(PriceEntry {
                    test_id: t.id,
                    provider_id: p.id,
                    price_usd: Money::from_cents("price_usd", usd).unwrap_or(Money::ZERO),
                    price_lrd: Money::from_cents("price_lrd", usd * 190).unwrap_or(Money::ZERO),
                    is_available: true,
                });
            }
        }

        Self::from_parts(tests, providers, prices)
    }
}

fn by_name<T>(mut items: Vec<T>, name: impl Fn(&T) -> &str) -> Vec<T> {
    items.sort_by(|a, b| name(a).cmp(name(b)));
    items
}

#[async_trait]
impl PricingCatalog for InMemoryPricingCatalog {
    async fn list_tests(&self) -> Result<Vec<LabTest>, DomainError> {
        let data = self.data.read().await;
        Ok(by_name(data.tests.values().cloned().collect(), |t| &t.name))
    }

    async fn list_providers(&self) -> Result<Vec<Provider>, DomainError> {
        let data = self.data.read().await;
        Ok(by_name(data.providers.values().cloned().collect(), |p| &p.name))
    }

    async fn get_test(&self, test_id: &TestId) -> Result<Option<LabTest>, DomainError> {
        Ok(self.data.read().await.tests.get(test_id).cloned())
    }

    async fn get_provider(&self, provider_id: &ProviderId) -> Result<Option<Provider>, DomainError> {
        Ok(self.data.read().await.providers.get(provider_id).cloned())
    }

    async fn get_pricing(
        &self,
        test_id: &TestId,
        provider_id: &ProviderId,
    ) -> Result<Option<PriceEntry>, DomainError> {
        Ok(self.data.read().await.prices.get(&(*test_id, *provider_id)).copied())
    }

    async fn list_providers_for_test(&self, test_id: &TestId) -> Result<Vec<ProviderOffer>, DomainError> {
        let data = self.data.read().await;
        let offers = data
            .prices
            .values()
            .filter(|entry| entry.test_id == *test_id && entry.is_available)
            .filter_map(|entry| {
                data.providers
                    .get(&entry.provider_id)
                    .filter(|p| p.is_active)
                    .map(|p| ProviderOffer {
                        provider: p.clone(),
                        price: *entry,
                    })
            })
            .collect();
        Ok(by_name(offers, |o| &o.provider.name))
    }

    async fn list_tests_for_provider(&self, provider_id: &ProviderId) -> Result<Vec<TestOffer>, DomainError> {
        let data = self.data.read().await;
        let offers = data
            .prices
            .values()
            .filter(|entry| entry.provider_id == *provider_id && entry.is_available)
            .filter_map(|entry| {
                data.tests.get(&entry.test_id).map(|t| TestOffer {
                    test: t.clone(),
                    price: *entry,
                })
            })
            .collect();
        Ok(by_name(offers, |o| &o.test.name))
    }

    async fn search_tests(&self, query: &str) -> Result<Vec<LabTest>, DomainError> {
        let data = self.data.read().await;
        let hits = data.tests.values().filter(|t| t.matches(query)).cloned().collect();
        Ok(by_name(hits, |t| &t.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn demo_catalog_offers_every_test_everywhere() {
        let catalog = InMemoryPricingCatalog::demo();
        let tests = catalog.list_tests().await.unwrap();
        let providers = catalog.list_providers().await.unwrap();
        assert_eq!(tests.len(), 4);

        let offers = catalog.list_providers_for_test(&tests[0].id).await.unwrap();
        assert_eq!(offers.len(), providers.len());
    }

    #[tokio::test]
    async fn inactive_providers_and_unavailable_prices_are_filtered() {
        let catalog = InMemoryPricingCatalog::demo();
        let test_id = catalog.list_tests().await.unwrap()[0].id;
        let mut providers = catalog.list_providers().await.unwrap();

        let mut closed = providers.remove(0);
        closed.is_active = false;
        catalog.add_provider(closed).await;

        let mut entry = catalog
            .get_pricing(&test_id, &providers[0].id)
            .await
            .unwrap()
            .unwrap();
        entry.is_available = false;
        catalog.set_price(entry).await;

        let offers = catalog.list_providers_for_test(&test_id).await.unwrap();
        assert_eq!(offers.len(), providers.len() - 1);
    }

    #[tokio::test]
    async fn search_matches_category() {
        let catalog = InMemoryPricingCatalog::demo();
        let hits = catalog.search_tests("chemistry").await.unwrap();
        assert_eq!(hits.len(), 2);
        assert!(catalog.search_tests("xray").await.unwrap().is_empty());
    }
}
