//! QuoteCartHandler - prices a client-held cart against the live catalog.
//!
//! The client keeps the cart (local storage in the web app). Before showing
//! totals or checking out it sends the selected `{test}_{provider}` keys and
//! gets back server-trusted prices, per-provider groups and both currency
//! totals.

use std::sync::Arc;

use crate::domain::booking::BookingError;
use crate::domain::cart::{AddOutcome, Cart, CartItem, CompositeId, ProviderGroup};
use crate::domain::foundation::{Currency, Money};
use crate::ports::PricingCatalog;

#[derive(Debug, Clone)]
pub struct QuoteCartCommand {
    pub items: Vec<CompositeId>,
}

/// A priced cart.
#[derive(Debug, Clone)]
pub struct CartQuote {
    pub items: Vec<CartItem>,
    pub groups: Vec<ProviderGroup>,
    pub total_usd: Money,
    pub total_lrd: Money,
    /// Keys submitted more than once; each counts once.
    pub duplicates_ignored: usize,
}

impl CartQuote {
    pub fn total(&self, currency: Currency) -> Money {
        match currency {
            Currency::Usd => self.total_usd,
            Currency::Lrd => self.total_lrd,
        }
    }
}

pub struct QuoteCartHandler {
    catalog: Arc<dyn PricingCatalog>,
    max_items: usize,
}

impl QuoteCartHandler {
    pub fn new(catalog: Arc<dyn PricingCatalog>, max_items: usize) -> Self {
        Self { catalog, max_items }
    }

    pub async fn handle(&self, cmd: QuoteCartCommand) -> Result<CartQuote, BookingError> {
        if cmd.items.is_empty() {
            return Err(BookingError::validation("items", "cart is empty"));
        }

        let mut cart = Cart::new(self.max_items);
        let mut duplicates_ignored = 0;
        for composite_id in cmd.items {
            if cart.contains(&composite_id) {
                duplicates_ignored += 1;
                continue;
            }
            let item = self.price_item(composite_id).await?;
            if cart.add(item)? == AddOutcome::AlreadyInCart {
                duplicates_ignored += 1;
            }
        }

        tracing::debug!(items = cart.len(), duplicates_ignored, "cart quoted");

        Ok(CartQuote {
            groups: cart.group_by_provider(),
            total_usd: cart.total(Currency::Usd),
            total_lrd: cart.total(Currency::Lrd),
            items: cart.items().to_vec(),
            duplicates_ignored,
        })
    }

    async fn price_item(&self, composite_id: CompositeId) -> Result<CartItem, BookingError> {
        let test = self
            .catalog
            .get_test(&composite_id.test_id())
            .await?
            .ok_or_else(|| BookingError::not_found("test", composite_id.test_id()))?;
        let provider = self
            .catalog
            .get_provider(&composite_id.provider_id())
            .await?
            .ok_or_else(|| BookingError::not_found("provider", composite_id.provider_id()))?;
        let price = self
            .catalog
            .get_pricing(&composite_id.test_id(), &composite_id.provider_id())
            .await?
            .ok_or_else(|| BookingError::not_found("pricing", composite_id))?;

        Ok(CartItem::new(test, provider, price)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryPricingCatalog;
    use crate::domain::foundation::{ProviderId, TestId};

    async fn keys(catalog: &InMemoryPricingCatalog) -> (Vec<TestId>, Vec<ProviderId>) {
        let tests = catalog.list_tests().await.unwrap().iter().map(|t| t.id).collect();
        let providers = catalog.list_providers().await.unwrap().iter().map(|p| p.id).collect();
        (tests, providers)
    }

    #[tokio::test]
    async fn quote_groups_by_provider_and_totals_both_currencies() {
        let catalog = InMemoryPricingCatalog::demo();
        let (tests, providers) = keys(&catalog).await;
        let handler = QuoteCartHandler::new(Arc::new(catalog.clone()), 50);

        let items = vec![
            CompositeId::new(tests[0], providers[0]),
            CompositeId::new(tests[1], providers[1]),
            CompositeId::new(tests[2], providers[0]),
            CompositeId::new(tests[0], providers[0]),
        ];
        let quote = handler.handle(QuoteCartCommand { items }).await.unwrap();

        assert_eq!(quote.items.len(), 3);
        assert_eq!(quote.duplicates_ignored, 1);
        assert_eq!(quote.groups.len(), 2);
        assert_eq!(quote.groups[0].provider_id, providers[0]);

        let mut expected_usd = 0;
        for item in &quote.items {
            let entry = catalog
                .get_pricing(&item.test.id, &item.provider.id)
                .await
                .unwrap()
                .unwrap();
            expected_usd += entry.price_usd.cents();
        }
        assert_eq!(quote.total(Currency::Usd).cents(), expected_usd);
        assert_eq!(quote.total_lrd.cents(), expected_usd * 190);
    }

    #[tokio::test]
    async fn unpriced_pair_is_missing_pricing() {
        let catalog = InMemoryPricingCatalog::demo();
        let (tests, providers) = keys(&catalog).await;
        let mut entry = catalog
            .get_pricing(&tests[0], &providers[0])
            .await
            .unwrap()
            .unwrap();
        entry.is_available = false;
        catalog.set_price(entry).await;

        let handler = QuoteCartHandler::new(Arc::new(catalog), 50);
        let err = handler
            .handle(QuoteCartCommand {
                items: vec![CompositeId::new(tests[0], providers[0])],
            })
            .await
            .unwrap_err();

        assert!(matches!(err, BookingError::NotFound { resource: "pricing", .. }));
    }

    #[tokio::test]
    async fn cart_limit_is_enforced() {
        let catalog = InMemoryPricingCatalog::demo();
        let (tests, providers) = keys(&catalog).await;
        let handler = QuoteCartHandler::new(Arc::new(catalog), 2);

        let items = tests
            .iter()
            .take(3)
            .map(|t| CompositeId::new(*t, providers[0]))
            .collect();
        let err = handler.handle(QuoteCartCommand { items }).await.unwrap_err();

        assert!(matches!(err, BookingError::Validation { ref field, .. } if field == "items"));
    }

    #[tokio::test]
    async fn empty_cart_is_rejected() {
        let handler = QuoteCartHandler::new(Arc::new(InMemoryPricingCatalog::demo()), 50);
        let err = handler.handle(QuoteCartCommand { items: vec![] }).await.unwrap_err();
        assert!(matches!(err, BookingError::Validation { .. }));
    }
}
