//! Persisted cart store.
//!
//! [`CartStore`] owns the shopper's [`Cart`] and the storage key it is
//! persisted under. Views get read-only access through `&CartStore`; every
//! change goes through the store's mutators, each of which ends by writing
//! the new state (or deleting the key once the cart is empty).

use std::ops::{Deref, DerefMut};

use fishmarket_cache::{Cache, CacheError, KvStore};

use crate::cart::{Cart, LineItem, ProductDescriptor};
use crate::checkout::OrderItem;
use crate::error::CommerceError;
use crate::ids::LineItemId;
use crate::money::{Currency, Money};

/// Storage key used when none is configured.
pub const DEFAULT_CART_KEY: &str = "cart";

/// The single owner of the shopper's cart.
///
/// Mutations never fail: unknown ids and non-positive quantities degrade to
/// no-ops, and storage write failures are logged and retried on the next
/// commit. Use [`CartStore::flush`] to surface a storage error.
///
/// Two stores over the same key do not see each other's writes until
/// [`CartStore::reload`] is called; the last writer wins.
#[derive(Debug)]
pub struct CartStore<S: KvStore> {
    cache: Cache<S>,
    key: String,
    currency: Currency,
    cart: Cart,
    synced: bool,
}

impl<S: KvStore> CartStore<S> {
    /// Open the store, hydrating the cart persisted under `key`.
    ///
    /// A missing or unreadable value yields an empty cart. Nothing is
    /// written to storage.
    pub fn open(store: S, key: impl Into<String>, currency: Currency) -> Self {
        let cache = Cache::new(store);
        let key = key.into();
        let cart = hydrate(&cache, &key, currency);
        Self {
            cache,
            key,
            currency,
            cart,
            synced: true,
        }
    }

    /// Open the store under [`DEFAULT_CART_KEY`] in the default currency.
    pub fn open_default(store: S) -> Self {
        Self::open(store, DEFAULT_CART_KEY, Currency::default())
    }

    /// Replace the in-memory cart with whatever storage currently holds.
    ///
    /// Hosts that observe storage changes made elsewhere call this to pick
    /// them up.
    pub fn reload(&mut self) {
        self.cart = hydrate(&self.cache, &self.key, self.currency);
        self.synced = true;
    }

    /// Add `quantity` of a product.
    ///
    /// Accumulates into the existing line for the same product (whose price
    /// is kept) or appends a new line. Returns the affected line's id, or
    /// `None` if the quantity was not positive, the price is negative, or
    /// the price is in a currency other than the store's.
    pub fn add_item(&mut self, descriptor: ProductDescriptor, quantity: i64) -> Option<LineItemId> {
        if descriptor.price.is_negative() {
            tracing::warn!(
                key = %self.key,
                product_id = %descriptor.product_id,
                price = descriptor.price.amount_cents,
                "ignoring product with a negative price"
            );
            return None;
        }
        if descriptor.price.currency != self.currency {
            tracing::warn!(
                key = %self.key,
                product_id = %descriptor.product_id,
                currency = %descriptor.price.currency,
                expected = %self.currency,
                "ignoring product priced in another currency"
            );
            return None;
        }

        let product_id = descriptor.product_id.clone();
        let line_id = self.edit().add_item(descriptor, quantity);
        tracing::debug!(
            key = %self.key,
            %product_id,
            quantity,
            line_id = ?line_id.as_ref().map(LineItemId::as_str),
            "add to cart"
        );
        line_id
    }

    /// Remove the line with the given local id. Unknown ids are ignored.
    pub fn remove_item(&mut self, line_item_id: &LineItemId) -> bool {
        let removed = self.edit().remove_item(line_item_id);
        tracing::debug!(key = %self.key, %line_item_id, removed, "remove from cart");
        removed
    }

    /// Set a line's quantity; `quantity <= 0` removes the line.
    pub fn update_quantity(&mut self, line_item_id: &LineItemId, quantity: i64) -> bool {
        let changed = self.edit().update_quantity(line_item_id, quantity);
        tracing::debug!(key = %self.key, %line_item_id, quantity, changed, "update cart quantity");
        changed
    }

    /// Empty the cart and delete its storage key.
    pub fn clear(&mut self) {
        self.edit().clear();
        tracing::debug!(key = %self.key, "clear cart");
    }

    /// Project the cart into order records, in cart order.
    pub fn export_for_order(&self) -> Vec<OrderItem> {
        self.cart.items().iter().map(OrderItem::from).collect()
    }

    /// Read-only view of the cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Line items in cart order.
    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    /// Sum of all quantities.
    pub fn count(&self) -> i64 {
        self.cart.item_count()
    }

    /// Sum of price times quantity.
    pub fn total(&self) -> Money {
        self.cart.total(self.currency)
    }

    /// Sum of savings against reference prices.
    pub fn savings(&self) -> Money {
        self.cart.savings(self.currency)
    }

    /// Currency every line is priced in.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Key the cart is persisted under.
    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// Whether the last commit reached storage.
    pub fn is_synced(&self) -> bool {
        self.synced
    }

    /// Write the current cart to storage, returning any storage error.
    pub fn flush(&mut self) -> Result<(), CommerceError> {
        let result = self.commit();
        self.synced = result.is_ok();
        result.map_err(CommerceError::from)
    }

    /// Borrow the cart for one mutation; the change is committed when the
    /// returned guard is dropped.
    fn edit(&mut self) -> CartEdit<'_, S> {
        CartEdit { store: self }
    }

    fn commit(&self) -> Result<(), CacheError> {
        if self.cart.is_empty() {
            self.cache.delete(&self.key)
        } else {
            self.cache.set(&self.key, &self.cart)
        }
    }
}

/// Scoped mutable access to a store's cart.
struct CartEdit<'a, S: KvStore> {
    store: &'a mut CartStore<S>,
}

impl<S: KvStore> Deref for CartEdit<'_, S> {
    type Target = Cart;

    fn deref(&self) -> &Cart {
        &self.store.cart
    }
}

impl<S: KvStore> DerefMut for CartEdit<'_, S> {
    fn deref_mut(&mut self) -> &mut Cart {
        &mut self.store.cart
    }
}

impl<S: KvStore> Drop for CartEdit<'_, S> {
    fn drop(&mut self) {
        match self.store.commit() {
            Ok(()) => self.store.synced = true,
            Err(error) => {
                self.store.synced = false;
                tracing::warn!(key = %self.store.key, %error, "failed to persist cart");
            }
        }
    }
}

fn hydrate<S: KvStore>(cache: &Cache<S>, key: &str, currency: Currency) -> Cart {
    let items: Vec<LineItem> = match cache.get(key) {
        Ok(Some(items)) => items,
        Ok(None) => return Cart::new(),
        Err(error) => {
            tracing::warn!(key, %error, "discarding unreadable persisted cart");
            return Cart::new();
        }
    };

    let stored = items.len();
    let items: Vec<LineItem> = items
        .into_iter()
        .filter(|item| item.price.currency == currency)
        .collect();
    let foreign = stored - items.len();

    let (cart, adjusted) = Cart::from_items(items);
    if foreign + adjusted > 0 {
        tracing::warn!(key, foreign, adjusted, "normalized persisted cart");
    }
    tracing::debug!(key, lines = cart.unique_item_count(), "hydrated cart");
    cart
}

#[cfg(test)]
mod tests {
    use super::*;
    use fishmarket_cache::MemoryStore;

    fn cod() -> ProductDescriptor {
        ProductDescriptor::new("cod", "Cod loin", Money::from_major(10, Currency::USD))
    }

    /// Backend whose writes always fail.
    #[derive(Debug, Default)]
    struct ReadOnlyStore {
        inner: MemoryStore,
    }

    impl KvStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
            self.inner.get(key)
        }

        fn set(&self, _key: &str, _value: &[u8]) -> Result<(), CacheError> {
            Err(CacheError::StoreError("read-only".into()))
        }

        fn delete(&self, _key: &str) -> Result<(), CacheError> {
            Err(CacheError::StoreError("read-only".into()))
        }
    }

    #[test]
    fn test_open_empty_store() {
        let backend = MemoryStore::new();
        let store = CartStore::open_default(backend.clone());
        assert!(store.cart().is_empty());
        assert!(store.is_synced());
        assert!(backend.is_empty());
    }

    #[test]
    fn test_mutation_commits() {
        let backend = MemoryStore::new();
        let mut store = CartStore::open_default(backend.clone());

        store.add_item(cod(), 2);
        let raw = backend.get(DEFAULT_CART_KEY).unwrap().unwrap();
        let persisted: Vec<LineItem> = serde_json::from_slice(&raw).unwrap();
        assert_eq!(persisted, store.items());
    }

    #[test]
    fn test_emptying_cart_deletes_key() {
        let backend = MemoryStore::new();
        let mut store = CartStore::open_default(backend.clone());

        let id = store.add_item(cod(), 1).unwrap();
        assert!(backend.exists(DEFAULT_CART_KEY).unwrap());
        store.remove_item(&id);
        assert!(!backend.exists(DEFAULT_CART_KEY).unwrap());
    }

    #[test]
    fn test_malformed_storage_recovers_empty() {
        let backend = MemoryStore::new();
        backend.set(DEFAULT_CART_KEY, b"{\"items\": oops").unwrap();

        let store = CartStore::open_default(backend.clone());
        assert!(store.cart().is_empty());
        // Initialization is read-only.
        assert!(backend.exists(DEFAULT_CART_KEY).unwrap());
    }

    #[test]
    fn test_foreign_currency_rejected() {
        let mut store = CartStore::open(MemoryStore::new(), "cart", Currency::NOK);
        assert!(store.add_item(cod(), 1).is_none());
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_negative_price_rejected() {
        let backend = MemoryStore::new();
        let mut store = CartStore::open_default(backend.clone());

        let refund = ProductDescriptor::new("refund", "Refund", Money::new(-500, Currency::USD));
        assert!(store.add_item(refund, 2).is_none());
        assert!(store.cart().is_empty());
        assert!(store.total().is_zero());
        assert!(backend.is_empty());
    }

    #[test]
    fn test_negative_price_dropped_on_hydrate() {
        let backend = MemoryStore::new();
        let raw = serde_json::json!([
            {"id": "li_a", "productId": "cod", "name": "Cod loin", "image": "",
             "price": {"amountCents": 1000, "currency": "USD"}, "quantity": 1},
            {"id": "li_b", "productId": "refund", "name": "Refund", "image": "",
             "price": {"amountCents": -500, "currency": "USD"}, "quantity": 2}
        ]);
        backend
            .set(DEFAULT_CART_KEY, &serde_json::to_vec(&raw).unwrap())
            .unwrap();

        let store = CartStore::open_default(backend);
        assert_eq!(store.count(), 1);
        assert_eq!(store.total(), Money::from_major(10, Currency::USD));
    }

    #[test]
    fn test_foreign_currency_dropped_on_hydrate() {
        let backend = MemoryStore::new();
        let mut usd = CartStore::open(backend.clone(), "cart", Currency::USD);
        usd.add_item(cod(), 1);

        let nok = CartStore::open(backend, "cart", Currency::NOK);
        assert!(nok.cart().is_empty());
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let mut store = CartStore::open_default(ReadOnlyStore::default());

        let id = store.add_item(cod(), 3).unwrap();
        assert!(!store.is_synced());
        assert_eq!(store.cart().get_item(&id).unwrap().quantity, 3);
        assert!(matches!(store.flush(), Err(CommerceError::CacheError(_))));
    }

    #[test]
    fn test_reload_picks_up_other_writer() {
        let backend = MemoryStore::new();
        let mut tab_a = CartStore::open_default(backend.clone());
        let mut tab_b = CartStore::open_default(backend);

        tab_a.add_item(cod(), 2);
        assert!(tab_b.cart().is_empty());

        tab_b.reload();
        assert_eq!(tab_b.count(), 2);
    }
}
