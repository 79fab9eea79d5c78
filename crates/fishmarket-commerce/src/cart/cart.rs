//! Cart and line item types.

use crate::ids::{LineItemId, ProductId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Catalog data for a product being added to the cart.
///
/// This is a line item without its quantity or local id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductDescriptor {
    /// Catalog product identifier.
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Image URL or path.
    #[serde(default)]
    pub image: String,
    /// Current unit price.
    pub price: Money,
    /// Pre-discount reference price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Money>,
}

impl ProductDescriptor {
    /// Describe a product with no image and no reference price.
    pub fn new(product_id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            image: String::new(),
            price,
            original_price: None,
        }
    }

    /// Set the image.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Set the pre-discount reference price.
    pub fn with_original_price(mut self, original_price: Money) -> Self {
        self.original_price = Some(original_price);
        self
    }
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Cart-local identifier, distinct from the product id.
    pub id: LineItemId,
    /// Catalog product identifier; at most one line per product.
    pub product_id: ProductId,
    /// Product name.
    pub name: String,
    /// Image URL or path.
    #[serde(default)]
    pub image: String,
    /// Unit price captured when the product was first added.
    pub price: Money,
    /// Pre-discount reference price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Money>,
    /// Quantity, always positive inside a cart.
    pub quantity: i64,
}

impl LineItem {
    /// Create a line item with a fresh local id.
    pub fn new(descriptor: ProductDescriptor, quantity: i64) -> Self {
        Self {
            id: LineItemId::generate(),
            product_id: descriptor.product_id,
            name: descriptor.name,
            image: descriptor.image,
            price: descriptor.price,
            original_price: descriptor.original_price,
            quantity,
        }
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.price.saturating_mul(self.quantity)
    }

    /// Discount against the reference price for the whole line.
    ///
    /// Zero when there is no reference price or it is not above the price.
    pub fn savings(&self) -> Money {
        self.original_price
            .and_then(|original| original.try_subtract(&self.price))
            .filter(|per_unit| per_unit.amount_cents > 0)
            .map(|per_unit| per_unit.saturating_mul(self.quantity))
            .unwrap_or_else(|| Money::zero(self.price.currency))
    }
}

/// An ordered collection of line items, unique by product.
///
/// Serializes as a plain JSON array of line items.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from raw items, restoring the cart invariants.
    ///
    /// Lines with a non-positive quantity or a negative price are dropped,
    /// lines for a product already seen are merged into the first one, and a
    /// line reusing a local id gets a fresh one. Returns the cart and the
    /// number of lines that had to be changed or dropped.
    pub fn from_items(items: Vec<LineItem>) -> (Self, usize) {
        let mut cart = Self::new();
        let mut seen_ids = HashSet::new();
        let mut adjusted = 0;

        for mut item in items {
            if item.quantity <= 0 || item.price.is_negative() {
                adjusted += 1;
                continue;
            }
            if let Some(existing) = cart
                .items
                .iter_mut()
                .find(|i| i.product_id == item.product_id)
            {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
                adjusted += 1;
                continue;
            }
            if !seen_ids.insert(item.id.clone()) {
                item.id = LineItemId::generate();
                seen_ids.insert(item.id.clone());
                adjusted += 1;
            }
            cart.items.push(item);
        }

        (cart, adjusted)
    }

    /// Add a product to the cart.
    ///
    /// If a line for the same product exists its quantity grows and its
    /// price, name and image are kept; otherwise a new line is appended.
    /// Returns the id of the affected line, or `None` when `quantity` is not
    /// positive and nothing changed.
    pub fn add_item(&mut self, descriptor: ProductDescriptor, quantity: i64) -> Option<LineItemId> {
        if quantity <= 0 {
            return None;
        }

        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|i| i.product_id == descriptor.product_id)
        {
            existing.quantity = existing.quantity.saturating_add(quantity);
            return Some(existing.id.clone());
        }

        let item = LineItem::new(descriptor, quantity);
        let id = item.id.clone();
        self.items.push(item);
        Some(id)
    }

    /// Remove an item from the cart.
    ///
    /// Returns whether a line was removed.
    pub fn remove_item(&mut self, line_item_id: &LineItemId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != line_item_id);
        self.items.len() < len_before
    }

    /// Update item quantity.
    ///
    /// If quantity is <= 0, removes the item. Returns whether a line changed.
    pub fn update_quantity(&mut self, line_item_id: &LineItemId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(line_item_id);
        }

        match self.items.iter_mut().find(|i| &i.id == line_item_id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0_i64, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Get number of unique items.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Get an item by ID.
    pub fn get_item(&self, line_item_id: &LineItemId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.id == line_item_id)
    }

    /// Get an item by product ID.
    pub fn get_item_by_product(&self, product_id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.product_id == product_id)
    }

    /// Sum of price times quantity over lines priced in `currency`.
    pub fn total(&self, currency: Currency) -> Money {
        sum_in(currency, self.items.iter().map(LineItem::line_total))
    }

    /// Sum of line savings over lines priced in `currency`.
    pub fn savings(&self, currency: Currency) -> Money {
        sum_in(currency, self.items.iter().map(LineItem::savings))
    }
}

fn sum_in(currency: Currency, amounts: impl Iterator<Item = Money>) -> Money {
    amounts
        .filter(|m| m.currency == currency)
        .fold(Money::zero(currency), |acc, m| {
            Money::new(acc.amount_cents.saturating_add(m.amount_cents), currency)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, major: i64) -> ProductDescriptor {
        ProductDescriptor::new(id, format!("Product {}", id), Money::from_major(major, Currency::USD))
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert!(cart.total(Currency::USD).is_zero());
    }

    #[test]
    fn test_add_item() {
        let mut cart = Cart::new();
        let id = cart.add_item(product("cod", 10), 2).unwrap();

        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.get_item(&id).unwrap().product_id.as_str(), "cod");
    }

    #[test]
    fn test_add_same_item_increases_quantity() {
        let mut cart = Cart::new();
        let first = cart.add_item(product("cod", 10), 2).unwrap();
        let second = cart.add_item(product("cod", 10), 3).unwrap();

        assert_eq!(first, second);
        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_first_price_wins() {
        let mut cart = Cart::new();
        cart.add_item(product("cod", 10), 1);
        cart.add_item(
            product("cod", 20).with_image("/img/cod-new.jpg"),
            1,
        );

        let item = cart.get_item_by_product(&ProductId::new("cod")).unwrap();
        assert_eq!(item.price, Money::from_major(10, Currency::USD));
        assert_eq!(item.image, "");
    }

    #[test]
    fn test_add_non_positive_quantity_is_noop() {
        let mut cart = Cart::new();
        assert!(cart.add_item(product("cod", 10), 0).is_none());
        assert!(cart.add_item(product("cod", 10), -1).is_none());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_large_quantities_are_stored_exactly() {
        let mut cart = Cart::new();
        let id = cart.add_item(product("cod", 10), 15_000).unwrap();
        cart.add_item(product("cod", 10), 5);
        assert_eq!(cart.get_item(&id).unwrap().quantity, 15_005);

        assert!(cart.update_quantity(&id, 20_000));
        assert_eq!(cart.get_item(&id).unwrap().quantity, 20_000);
        assert_eq!(cart.total(Currency::USD), Money::from_major(200_000, Currency::USD));
    }

    #[test]
    fn test_count_and_total_saturate() {
        let mut cart = Cart::new();
        cart.add_item(product("cod", 10), i64::MAX);
        cart.add_item(product("eel", 4), 1);

        assert_eq!(cart.item_count(), i64::MAX);
        assert_eq!(cart.total(Currency::USD).amount_cents, i64::MAX);
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = Cart::new();
        let id = cart.add_item(product("cod", 10), 1).unwrap();

        assert!(cart.update_quantity(&id, 5));
        assert_eq!(cart.item_count(), 5);
        assert!(!cart.update_quantity(&LineItemId::new("missing"), 5));
    }

    #[test]
    fn test_update_quantity_to_zero_removes() {
        let mut cart = Cart::new();
        let a = cart.add_item(product("cod", 10), 1).unwrap();
        let b = cart.add_item(product("haddock", 12), 1).unwrap();

        assert!(cart.update_quantity(&a, 0));
        assert!(cart.update_quantity(&b, -5));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        let id = cart.add_item(product("cod", 10), 1).unwrap();

        assert!(!cart.remove_item(&LineItemId::new("missing")));
        assert!(cart.remove_item(&id));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::new();
        cart.add_item(product("cod", 10), 2);
        cart.add_item(product("shrimp", 5), 3);

        assert_eq!(cart.item_count(), 5);
        assert_eq!(cart.total(Currency::USD), Money::from_major(35, Currency::USD));
    }

    #[test]
    fn test_savings() {
        let mut cart = Cart::new();
        cart.add_item(
            product("salmon", 8).with_original_price(Money::from_major(10, Currency::USD)),
            3,
        );
        // Reference price below the price does not count as savings.
        cart.add_item(
            product("trout", 8).with_original_price(Money::from_major(6, Currency::USD)),
            1,
        );

        assert_eq!(cart.savings(Currency::USD), Money::from_major(6, Currency::USD));
    }

    #[test]
    fn test_from_items_restores_invariants() {
        let mut a = LineItem::new(product("cod", 10), 2);
        a.id = LineItemId::new("li_a");
        let b = LineItem::new(product("cod", 10), 3);
        let zero = LineItem::new(product("eel", 4), 0);
        let huge = LineItem::new(product("tuna", 30), 12_000);
        let mut negative = LineItem::new(product("crab", 1), 2);
        negative.price = Money::new(-500, Currency::USD);

        let (cart, adjusted) = Cart::from_items(vec![a, zero, b, huge, negative]);

        assert_eq!(adjusted, 3);
        assert_eq!(cart.unique_item_count(), 2);
        let cod = cart.get_item(&LineItemId::new("li_a")).unwrap();
        assert_eq!(cod.quantity, 5);
        assert_eq!(cart.items()[1].quantity, 12_000);
        assert!(cart.get_item_by_product(&ProductId::new("crab")).is_none());
    }

    #[test]
    fn test_from_items_reassigns_duplicate_line_ids() {
        let mut cod = LineItem::new(product("cod", 10), 1);
        cod.id = LineItemId::new("li_x");
        let mut eel = LineItem::new(product("eel", 4), 2);
        eel.id = LineItemId::new("li_x");

        let (mut cart, adjusted) = Cart::from_items(vec![cod, eel]);

        assert_eq!(adjusted, 1);
        assert_eq!(cart.unique_item_count(), 2);
        assert_eq!(cart.items()[0].id.as_str(), "li_x");
        assert_ne!(cart.items()[1].id.as_str(), "li_x");

        assert!(cart.remove_item(&LineItemId::new("li_x")));
        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.items()[0].product_id.as_str(), "eel");
    }

    #[test]
    fn test_serializes_as_array_with_camel_case() {
        let mut cart = Cart::new();
        cart.add_item(product("cod", 10).with_image("/img/cod.jpg"), 1);

        let json = serde_json::to_value(&cart).unwrap();
        let line = &json.as_array().unwrap()[0];
        assert_eq!(line["productId"], "cod");
        assert_eq!(line["image"], "/img/cod.jpg");
        assert!(line.get("originalPrice").is_none());
    }
}
