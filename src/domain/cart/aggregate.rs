//! Cart aggregate - an ordered, de-duplicated selection of priced tests.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use super::{CartChange, CartError, CartObserver, CompositeId, SubscriptionId};
use crate::domain::catalog::{LabTest, PriceEntry, Provider};
use crate::domain::foundation::{Currency, Money, ProviderId, TestId};

/// One (test, provider) selection with the price captured when it was added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub composite_id: CompositeId,
    pub test: LabTest,
    pub provider: Provider,
    pub price: PriceEntry,
}

impl CartItem {
    /// Builds an item, checking that the price belongs to the pair and is
    /// currently offered.
    pub fn new(test: LabTest, provider: Provider, price: PriceEntry) -> Result<Self, CartError> {
        if price.test_id != test.id || price.provider_id != provider.id {
            return Err(CartError::PriceMismatch {
                test_id: test.id,
                provider_id: provider.id,
            });
        }
        if !price.is_available || !provider.is_active {
            return Err(CartError::Unavailable {
                test_id: test.id,
                provider_id: provider.id,
            });
        }
        Ok(Self {
            composite_id: CompositeId::new(test.id, provider.id),
            test,
            provider,
            price,
        })
    }

    pub fn price_in(&self, currency: Currency) -> Money {
        self.price.price_in(currency)
    }
}

/// Result of `Cart::add`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyInCart,
}

/// Items from one provider, in the order they were added.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderGroup {
    pub provider_id: ProviderId,
    pub items: Vec<CartItem>,
}

impl ProviderGroup {
    pub fn test_ids(&self) -> Vec<TestId> {
        self.items.iter().map(|item| item.test.id).collect()
    }

    pub fn subtotal(&self, currency: Currency) -> Money {
        self.items.iter().map(|item| item.price_in(currency)).sum()
    }
}

/// Serialized form of a cart, kept by the client between page loads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoredCart {
    pub items: Vec<CartItem>,
}

/// Client-held cart keyed by composite id.
///
/// Every mutation notifies subscribed observers before returning, so an
/// observer always sees the cart in its new state.
pub struct Cart {
    items: Vec<CartItem>,
    max_items: usize,
    observers: Vec<(SubscriptionId, Arc<dyn CartObserver>)>,
    next_subscription: u64,
}

impl Cart {
    pub fn new(max_items: usize) -> Self {
        Self {
            items: Vec::new(),
            max_items,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, composite_id: &CompositeId) -> bool {
        self.items.iter().any(|item| &item.composite_id == composite_id)
    }

    /// Adds an item. Adding a pair that is already present changes nothing.
    pub fn add(&mut self, item: CartItem) -> Result<AddOutcome, CartError> {
        if self.contains(&item.composite_id) {
            return Ok(AddOutcome::AlreadyInCart);
        }
        if self.items.len() >= self.max_items {
            return Err(CartError::CartFull {
                max_items: self.max_items,
            });
        }

        let composite_id = item.composite_id;
        self.items.push(item);
        self.notify(&CartChange::Added {
            composite_id,
            item_count: self.items.len(),
        });
        Ok(AddOutcome::Added)
    }

    /// Removes an item if present. Returns whether anything was removed.
    pub fn remove(&mut self, composite_id: &CompositeId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.composite_id != composite_id);
        if self.items.len() == before {
            return false;
        }
        self.notify(&CartChange::Removed {
            composite_id: *composite_id,
            item_count: self.items.len(),
        });
        true
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.notify(&CartChange::Cleared);
    }

    /// Sum of item prices in the given currency. Zero for an empty cart.
    pub fn total(&self, currency: Currency) -> Money {
        self.items.iter().map(|item| item.price_in(currency)).sum()
    }

    /// Items grouped by provider, groups ordered by first appearance.
    pub fn group_by_provider(&self) -> Vec<ProviderGroup> {
        let mut groups: Vec<ProviderGroup> = Vec::new();
        for item in &self.items {
            match groups.iter_mut().find(|g| g.provider_id == item.provider.id) {
                Some(group) => group.items.push(item.clone()),
                None => groups.push(ProviderGroup {
                    provider_id: item.provider.id,
                    items: vec![item.clone()],
                }),
            }
        }
        groups
    }

    pub fn subscribe(&mut self, observer: Arc<dyn CartObserver>) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId::new(self.next_subscription);
        self.observers.push((id, observer));
        id
    }

    /// Returns false if the subscription was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    pub fn to_stored(&self) -> StoredCart {
        StoredCart {
            items: self.items.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, CartError> {
        serde_json::to_string(&self.to_stored()).map_err(|e| CartError::Serialization(e.to_string()))
    }

    /// Rebuilds a cart from its stored form. Duplicate keys keep the first
    /// occurrence; prices are not re-checked against the catalog.
    pub fn from_stored(stored: StoredCart, max_items: usize) -> Result<Self, CartError> {
        let mut cart = Cart::new(max_items);
        for item in stored.items {
            if cart.contains(&item.composite_id) {
                continue;
            }
            if cart.items.len() >= max_items {
                return Err(CartError::CartFull { max_items });
            }
            cart.items.push(item);
        }
        Ok(cart)
    }

    pub fn from_json(json: &str, max_items: usize) -> Result<Self, CartError> {
        let stored: StoredCart =
            serde_json::from_str(json).map_err(|e| CartError::Serialization(e.to_string()))?;
        Self::from_stored(stored, max_items)
    }

    fn notify(&self, change: &CartChange) {
        for (_, observer) in &self.observers {
            observer.on_cart_changed(change);
        }
    }
}

impl fmt::Debug for Cart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cart")
            .field("items", &self.items)
            .field("max_items", &self.max_items)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::ProviderKind;
    use proptest::prelude::*;
    use std::sync::Mutex;

    fn provider() -> Provider {
        Provider {
            id: ProviderId::new(),
            name: "Provider X".to_string(),
            kind: ProviderKind::Clinic,
            location: "Sinkor".to_string(),
            phone: "+231777000000".to_string(),
            email: "x@example.org".to_string(),
            is_active: true,
            rating: 4.0,
        }
    }

    fn lab_test(name: &str) -> LabTest {
        LabTest {
            id: TestId::new(),
            name: name.to_string(),
            description: format!("{} test", name),
            category: "General".to_string(),
            preparation_instructions: None,
        }
    }

    fn item(test: &LabTest, provider: &Provider, usd: i64, lrd: i64) -> CartItem {
        let price = PriceEntry {
            test_id: test.id,
            provider_id: provider.id,
            price_usd: Money::from_cents("price_usd", usd).unwrap(),
            price_lrd: Money::from_cents("price_lrd", lrd).unwrap(),
            is_available: true,
        };
        CartItem::new(test.clone(), provider.clone(), price).unwrap()
    }

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<CartChange>>,
    }

    impl CartObserver for Recorder {
        fn on_cart_changed(&self, change: &CartChange) {
            self.seen.lock().unwrap().push(change.clone());
        }
    }

    #[test]
    fn scenario_two_tests_same_provider_totals_25_usd() {
        let x = provider();
        let mut cart = Cart::new(50);
        cart.add(item(&lab_test("A"), &x, 1000, 0)).unwrap();
        cart.add(item(&lab_test("B"), &x, 1500, 0)).unwrap();

        assert_eq!(cart.total(Currency::Usd).cents(), 2500);
        let groups = cart.group_by_provider();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].test_ids().len(), 2);
    }

    #[test]
    fn adding_same_pair_twice_is_idempotent() {
        let x = provider();
        let a = lab_test("A");
        let mut cart = Cart::new(50);

        assert_eq!(cart.add(item(&a, &x, 1000, 0)).unwrap(), AddOutcome::Added);
        assert_eq!(cart.add(item(&a, &x, 1000, 0)).unwrap(), AddOutcome::AlreadyInCart);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn removing_absent_item_is_a_noop() {
        let mut cart = Cart::new(50);
        let missing = CompositeId::new(TestId::new(), ProviderId::new());
        assert!(!cart.remove(&missing));
        assert!(cart.is_empty());
    }

    #[test]
    fn cart_full_rejects_new_pairs() {
        let x = provider();
        let mut cart = Cart::new(1);
        cart.add(item(&lab_test("A"), &x, 100, 100)).unwrap();
        let err = cart.add(item(&lab_test("B"), &x, 100, 100)).unwrap_err();
        assert_eq!(err, CartError::CartFull { max_items: 1 });
    }

    #[test]
    fn unavailable_price_cannot_become_an_item() {
        let x = provider();
        let a = lab_test("A");
        let price = PriceEntry {
            test_id: a.id,
            provider_id: x.id,
            price_usd: Money::ZERO,
            price_lrd: Money::ZERO,
            is_available: false,
        };
        assert!(matches!(
            CartItem::new(a, x, price),
            Err(CartError::Unavailable { .. })
        ));
    }

    #[test]
    fn groups_follow_first_encounter_order() {
        let (x, y) = (provider(), provider());
        let mut cart = Cart::new(50);
        cart.add(item(&lab_test("A"), &y, 100, 0)).unwrap();
        cart.add(item(&lab_test("B"), &x, 200, 0)).unwrap();
        cart.add(item(&lab_test("C"), &y, 300, 0)).unwrap();

        let groups = cart.group_by_provider();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].provider_id, y.id);
        assert_eq!(groups[0].subtotal(Currency::Usd).cents(), 400);
        assert_eq!(groups[1].provider_id, x.id);
    }

    #[test]
    fn observers_see_each_mutation_with_new_count() {
        let x = provider();
        let a = item(&lab_test("A"), &x, 100, 0);
        let key = a.composite_id;
        let recorder = Arc::new(Recorder::default());
        let mut cart = Cart::new(50);
        let sub = cart.subscribe(recorder.clone());

        cart.add(a.clone()).unwrap();
        cart.add(a).unwrap();
        cart.remove(&key);
        cart.clear();
        assert!(cart.unsubscribe(sub));
        cart.clear();

        let seen = recorder.seen.lock().unwrap().clone();
        assert_eq!(
            seen,
            vec![
                CartChange::Added { composite_id: key, item_count: 1 },
                CartChange::Removed { composite_id: key, item_count: 0 },
                CartChange::Cleared,
            ]
        );
        assert!(!cart.unsubscribe(sub));
    }

    #[test]
    fn json_survives_reload() {
        let x = provider();
        let mut cart = Cart::new(50);
        cart.add(item(&lab_test("A"), &x, 1234, 5678)).unwrap();

        let restored = Cart::from_json(&cart.to_json().unwrap(), 50).unwrap();
        assert_eq!(restored.items(), cart.items());
        assert_eq!(restored.total(Currency::Lrd).cents(), 5678);
    }

    proptest! {
        #[test]
        fn total_is_sum_of_item_prices(prices in prop::collection::vec((0i64..1_000_000, 0i64..100_000_000), 0..20)) {
            let x = provider();
            let mut cart = Cart::new(50);
            for (usd, lrd) in &prices {
                cart.add(item(&lab_test("T"), &x, *usd, *lrd)).unwrap();
            }

            let usd: i64 = prices.iter().map(|(u, _)| u).sum();
            let lrd: i64 = prices.iter().map(|(_, l)| l).sum();
            prop_assert_eq!(cart.total(Currency::Usd).cents(), usd);
            prop_assert_eq!(cart.total(Currency::Lrd).cents(), lrd);

            let keys: Vec<CompositeId> = cart.items().iter().map(|i| i.composite_id).collect();
            for key in keys {
                cart.remove(&key);
            }
            prop_assert!(cart.total(Currency::Usd).is_zero());
        }
    }
}
