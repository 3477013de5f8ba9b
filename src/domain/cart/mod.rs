//! Cart module - multi-provider, multi-currency selection prior to checkout.
//!
//! The cart lives with the client. The server rebuilds one from the client's
//! submitted selection to quote it and to split it into provider groups at
//! checkout.

mod aggregate;
mod composite_id;
mod observer;

pub use aggregate::{AddOutcome, Cart, CartItem, ProviderGroup, StoredCart};
pub use composite_id::CompositeId;
pub use observer::{CartChange, CartObserver, SubscriptionId};

use thiserror::Error;

use crate::domain::foundation::{ProviderId, TestId};

/// Errors raised by cart operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("Price entry does not belong to test {test_id} at provider {provider_id}")]
    PriceMismatch { test_id: TestId, provider_id: ProviderId },

    #[error("Test {test_id} is not available from provider {provider_id}")]
    Unavailable { test_id: TestId, provider_id: ProviderId },

    #[error("Cart cannot hold more than {max_items} items")]
    CartFull { max_items: usize },

    #[error("Cart could not be (de)serialized: {0}")]
    Serialization(String),
}
