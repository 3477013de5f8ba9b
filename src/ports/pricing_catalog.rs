//! PricingCatalog port - read-only queries against the catalog collaborator.

use async_trait::async_trait;

use crate::domain::catalog::{LabTest, PriceEntry, Provider, ProviderOffer, TestOffer};
use crate::domain::foundation::{DomainError, ProviderId, TestId};

/// Read-only view of tests, providers and (test, provider) prices.
///
/// Nothing in this crate writes to the catalog, so implementations need no
/// coordination with booking writes.
#[async_trait]
pub trait PricingCatalog: Send + Sync {
    /// All tests, ordered by name.
    async fn list_tests(&self) -> Result<Vec<LabTest>, DomainError>;

    /// All providers, ordered by name. Includes inactive ones.
    async fn list_providers(&self) -> Result<Vec<Provider>, DomainError>;

    async fn get_test(&self, test_id: &TestId) -> Result<Option<LabTest>, DomainError>;

    async fn get_provider(&self, provider_id: &ProviderId) -> Result<Option<Provider>, DomainError>;

    /// The price entry for a pair, available or not.
    async fn get_pricing(
        &self,
        test_id: &TestId,
        provider_id: &ProviderId,
    ) -> Result<Option<PriceEntry>, DomainError>;

    /// Active providers with an available price for the test.
    async fn list_providers_for_test(&self, test_id: &TestId) -> Result<Vec<ProviderOffer>, DomainError>;

    /// Tests the provider offers with an available price.
    async fn list_tests_for_provider(&self, provider_id: &ProviderId) -> Result<Vec<TestOffer>, DomainError>;

    /// Case-insensitive search over name, description and category.
    async fn search_tests(&self, query: &str) -> Result<Vec<LabTest>, DomainError>;
}
