//! HTTP DTOs for catalog endpoints.
//!
//! Tests and providers serialize as-is. Offers are flattened so clients get
//! the cart key and both prices on one object.

use serde::{Deserialize, Serialize};

use crate::domain::cart::CompositeId;
use crate::domain::catalog::{LabTest, Provider, ProviderOffer, TestOffer};

/// Query string for `GET /api/public/tests/search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: Option<String>,
}

/// One provider's price for a test. Amounts are minor units.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderOfferResponse {
    pub composite_id: CompositeId,
    pub provider: Provider,
    pub price_usd: i64,
    pub price_lrd: i64,
}

impl From<ProviderOffer> for ProviderOfferResponse {
    fn from(offer: ProviderOffer) -> Self {
        Self {
            composite_id: CompositeId::new(offer.price.test_id, offer.price.provider_id),
            provider: offer.provider,
            price_usd: offer.price.price_usd.cents(),
            price_lrd: offer.price.price_lrd.cents(),
        }
    }
}

/// One test as offered by a given provider.
#[derive(Debug, Clone, Serialize)]
pub struct TestOfferResponse {
    pub composite_id: CompositeId,
    pub test: LabTest,
    pub price_usd: i64,
    pub price_lrd: i64,
}

impl From<TestOffer> for TestOfferResponse {
    fn from(offer: TestOffer) -> Self {
        Self {
            composite_id: CompositeId::new(offer.price.test_id, offer.price.provider_id),
            test: offer.test,
            price_usd: offer.price.price_usd.cents(),
            price_lrd: offer.price.price_lrd.cents(),
        }
    }
}
