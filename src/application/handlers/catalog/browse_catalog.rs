//! BrowseCatalogHandler - public read-only catalog queries.

use std::sync::Arc;

use crate::domain::booking::BookingError;
use crate::domain::catalog::{LabTest, Provider, ProviderOffer, TestOffer};
use crate::domain::foundation::{ProviderId, TestId};
use crate::ports::PricingCatalog;

/// Serves the anonymous catalog pages: tests, providers and who offers what
/// at which price.
pub struct BrowseCatalogHandler {
    catalog: Arc<dyn PricingCatalog>,
}

impl BrowseCatalogHandler {
    pub fn new(catalog: Arc<dyn PricingCatalog>) -> Self {
        Self { catalog }
    }

    pub async fn list_tests(&self) -> Result<Vec<LabTest>, BookingError> {
        Ok(self.catalog.list_tests().await?)
    }

    /// Active providers only; inactive ones cannot be booked.
    pub async fn list_providers(&self) -> Result<Vec<Provider>, BookingError> {
        let providers = self.catalog.list_providers().await?;
        Ok(providers.into_iter().filter(|p| p.is_active).collect())
    }

    /// Where a test can be booked and for how much.
    pub async fn providers_for_test(&self, test_id: TestId) -> Result<Vec<ProviderOffer>, BookingError> {
        if self.catalog.get_test(&test_id).await?.is_none() {
            return Err(BookingError::not_found("test", test_id));
        }
        Ok(self.catalog.list_providers_for_test(&test_id).await?)
    }

    /// A provider's price list.
    pub async fn tests_for_provider(&self, provider_id: ProviderId) -> Result<Vec<TestOffer>, BookingError> {
        match self.catalog.get_provider(&provider_id).await? {
            Some(provider) if provider.is_active => {
                Ok(self.catalog.list_tests_for_provider(&provider_id).await?)
            }
            _ => Err(BookingError::not_found("provider", provider_id)),
        }
    }

    /// Blank queries return the whole list.
    pub async fn search_tests(&self, query: &str) -> Result<Vec<LabTest>, BookingError> {
        let query = query.trim();
        if query.is_empty() {
            return self.list_tests().await;
        }
        Ok(self.catalog.search_tests(query).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryPricingCatalog;

    fn handler(catalog: &InMemoryPricingCatalog) -> BrowseCatalogHandler {
        BrowseCatalogHandler::new(Arc::new(catalog.clone()))
    }

    #[tokio::test]
    async fn unknown_test_is_not_found() {
        let catalog = InMemoryPricingCatalog::demo();
        let err = handler(&catalog)
            .providers_for_test(TestId::new())
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::NotFound { resource: "test", .. }));
    }

    #[tokio::test]
    async fn inactive_provider_is_hidden() {
        let catalog = InMemoryPricingCatalog::demo();
        let mut provider = catalog.list_providers().await.unwrap().remove(0);
        provider.is_active = false;
        catalog.add_provider(provider.clone()).await;

        let handler = handler(&catalog);
        assert_eq!(handler.list_providers().await.unwrap().len(), 3);
        assert!(handler.tests_for_provider(provider.id).await.is_err());
    }

    #[tokio::test]
    async fn blank_search_lists_everything() {
        let catalog = InMemoryPricingCatalog::demo();
        let handler = handler(&catalog);
        assert_eq!(handler.search_tests("  ").await.unwrap().len(), 4);
        assert_eq!(handler.search_tests("malaria").await.unwrap().len(), 1);
    }
}
