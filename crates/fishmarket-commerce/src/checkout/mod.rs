//! Checkout module.
//!
//! Contains the order submission records and the hand-off that turns a
//! cart into a submitted order.

mod flow;
mod order;

pub use flow::{build_order, place_order, OrderGateway};
pub use order::{Customer, OrderItem, OrderReceipt, OrderRequest};
