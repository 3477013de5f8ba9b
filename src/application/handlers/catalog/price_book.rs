//! Builds a `PriceBook` snapshot from the catalog for a set of
//! (provider, tests) selections.

use crate::domain::catalog::PriceBook;
use crate::domain::foundation::{DomainError, ProviderId, TestId};
use crate::ports::PricingCatalog;

/// Loads every provider named in `selections` and the price entries for the
/// tests selected at it. Unknown providers and missing prices are simply
/// absent from the book; the domain decides what that means.
pub async fn load_price_book(
    catalog: &dyn PricingCatalog,
    selections: &[(ProviderId, Vec<TestId>)],
) -> Result<PriceBook, DomainError> {
    let mut book = PriceBook::new();
    for (provider_id, test_ids) in selections {
        let Some(provider) = catalog.get_provider(provider_id).await? else {
            continue;
        };
        book.insert_provider(provider);
        for test_id in test_ids {
            if let Some(entry) = catalog.get_pricing(test_id, provider_id).await? {
                book.insert_price(entry);
            }
        }
    }
    Ok(book)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryPricingCatalog;

    #[tokio::test]
    async fn loads_selected_prices_and_skips_unknown_providers() {
        let catalog = InMemoryPricingCatalog::demo();
        let test_id = catalog.list_tests().await.unwrap()[0].id;
        let provider_id = catalog.list_providers().await.unwrap()[0].id;
        let stranger = ProviderId::new();

        let book = load_price_book(
            &catalog,
            &[(provider_id, vec![test_id]), (stranger, vec![test_id])],
        )
        .await
        .unwrap();

        assert!(book.is_active_provider(&provider_id));
        assert!(book.available_price(&test_id, &provider_id).is_some());
        assert!(book.provider(&stranger).is_none());
    }
}
