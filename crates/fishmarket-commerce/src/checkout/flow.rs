//! Checkout hand-off: export the cart, submit it, clear on success.

use fishmarket_cache::KvStore;

use crate::cart::CartStore;
use crate::checkout::{Customer, OrderReceipt, OrderRequest};
use crate::CommerceError;

/// Order-creation backend.
pub trait OrderGateway {
    /// Submit an order, returning the backend's receipt.
    fn submit(&self, order: &OrderRequest) -> Result<OrderReceipt, CommerceError>;
}

impl<G: OrderGateway + ?Sized> OrderGateway for &G {
    fn submit(&self, order: &OrderRequest) -> Result<OrderReceipt, CommerceError> {
        (**self).submit(order)
    }
}

/// Build the submission payload for the store's current cart.
///
/// Does not modify the cart.
pub fn build_order<S: KvStore>(store: &CartStore<S>, customer: Customer) -> OrderRequest {
    OrderRequest {
        customer,
        items: store.export_for_order(),
        total: store.total(),
        placed_at: current_timestamp(),
    }
}

/// Place an order for everything in the cart.
///
/// The cart is cleared only after the gateway accepts the order; on any
/// error it is left exactly as it was.
pub fn place_order<S, G>(
    store: &mut CartStore<S>,
    gateway: &G,
    customer: Customer,
) -> Result<OrderReceipt, CommerceError>
where
    S: KvStore,
    G: OrderGateway + ?Sized,
{
    customer.validate()?;
    if store.cart().is_empty() {
        return Err(CommerceError::EmptyCart);
    }

    let order = build_order(store, customer);
    let receipt = gateway.submit(&order).map_err(|error| {
        tracing::warn!(key = store.storage_key(), %error, "order submission failed");
        error
    })?;

    tracing::info!(
        order_id = %receipt.order_id,
        lines = order.items.len(),
        total = %order.total,
        "order placed"
    );
    store.clear();
    Ok(receipt)
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
