//! Shopping cart and checkout hand-off for the fishmarket storefront.
//!
//! - **Cart**: line items aggregated by product, and the persisted
//!   [`CartStore`](cart::CartStore) that owns a shopper's cart
//! - **Checkout**: the order-submission projection and the flow that
//!   clears the cart once an order is accepted
//!
//! # Example
//!
//! ```
//! use fishmarket_cache::MemoryStore;
//! use fishmarket_commerce::prelude::*;
//!
//! let mut store = CartStore::open_default(MemoryStore::new());
//!
//! let cod = ProductDescriptor::new("cod", "Cod loin", Money::from_major(10, Currency::USD));
//! let line = store.add_item(cod.clone(), 2).unwrap();
//! store.add_item(cod, 1);
//!
//! assert_eq!(store.count(), 3);
//! assert_eq!(store.total().display(), "$30.00");
//!
//! store.update_quantity(&line, 0);
//! assert!(store.cart().is_empty());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod checkout;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Cart
    pub use crate::cart::{
        Cart, CartStore, LineItem, ProductDescriptor, DEFAULT_CART_KEY,
    };

    // Checkout
    pub use crate::checkout::{
        build_order, place_order, Customer, OrderGateway, OrderItem, OrderReceipt, OrderRequest,
    };
}
