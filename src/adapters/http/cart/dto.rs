//! HTTP DTOs for cart quoting.

use serde::{Deserialize, Serialize};

use crate::application::handlers::CartQuote;
use crate::domain::cart::{CartItem, CompositeId, ProviderGroup};
use crate::domain::foundation::{Currency, ProviderId, TestId};

/// Request body for `POST /api/cart/quote`.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteCartRequest {
    /// `{test_id}_{provider_id}` keys as held by the client.
    pub items: Vec<CompositeId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CartItemResponse {
    pub composite_id: CompositeId,
    pub test_id: TestId,
    pub test_name: String,
    pub provider_id: ProviderId,
    pub provider_name: String,
    pub price_usd: i64,
    pub price_lrd: i64,
}

impl From<&CartItem> for CartItemResponse {
    fn from(item: &CartItem) -> Self {
        Self {
            composite_id: item.composite_id,
            test_id: item.test.id,
            test_name: item.test.name.clone(),
            provider_id: item.provider.id,
            provider_name: item.provider.name.clone(),
            price_usd: item.price_in(Currency::Usd).cents(),
            price_lrd: item.price_in(Currency::Lrd).cents(),
        }
    }
}

/// Items from one provider; checkout turns each group into a booking.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderGroupResponse {
    pub provider_id: ProviderId,
    pub provider_name: String,
    pub test_ids: Vec<TestId>,
    pub subtotal_usd: i64,
    pub subtotal_lrd: i64,
}

impl From<&ProviderGroup> for ProviderGroupResponse {
    fn from(group: &ProviderGroup) -> Self {
        Self {
            provider_id: group.provider_id,
            provider_name: group
                .items
                .first()
                .map(|item| item.provider.name.clone())
                .unwrap_or_default(),
            test_ids: group.test_ids(),
            subtotal_usd: group.subtotal(Currency::Usd).cents(),
            subtotal_lrd: group.subtotal(Currency::Lrd).cents(),
        }
    }
}

/// Response for `POST /api/cart/quote`. Amounts are minor units.
#[derive(Debug, Clone, Serialize)]
pub struct CartQuoteResponse {
    pub items: Vec<CartItemResponse>,
    pub groups: Vec<ProviderGroupResponse>,
    pub item_count: usize,
    pub total_usd: i64,
    pub total_lrd: i64,
    pub duplicates_ignored: usize,
}

impl From<CartQuote> for CartQuoteResponse {
    fn from(quote: CartQuote) -> Self {
        Self {
            items: quote.items.iter().map(Into::into).collect(),
            groups: quote.groups.iter().map(Into::into).collect(),
            item_count: quote.items.len(),
            total_usd: quote.total_usd.cents(),
            total_lrd: quote.total_lrd.cents(),
            duplicates_ignored: quote.duplicates_ignored,
        }
    }
}
