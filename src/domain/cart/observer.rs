//! Subscription interface for cart changes (badge counters and the like).

use std::fmt;

use super::CompositeId;

/// Handle returned by `Cart::subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// A mutation that happened to a cart, with the item count after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartChange {
    Added { composite_id: CompositeId, item_count: usize },
    Removed { composite_id: CompositeId, item_count: usize },
    Cleared,
}

impl CartChange {
    pub fn item_count(&self) -> usize {
        match self {
            CartChange::Added { item_count, .. } | CartChange::Removed { item_count, .. } => {
                *item_count
            }
            CartChange::Cleared => 0,
        }
    }
}

/// Receives cart changes synchronously, after the state change is applied.
pub trait CartObserver: Send + Sync {
    fn on_cart_changed(&self, change: &CartChange);
}
