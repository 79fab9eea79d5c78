//! Shopping cart module.
//!
//! Contains the cart aggregate, its line items, and the persisted store
//! that owns a shopper's cart.

mod cart;
mod store;

pub use cart::{Cart, LineItem, ProductDescriptor};
pub use store::{CartStore, DEFAULT_CART_KEY};
