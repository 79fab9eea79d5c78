//! Checkout command.

use anyhow::Result;
use dialoguer::Confirm;
use fishmarket_commerce::checkout::{place_order, Customer};
use fishmarket_commerce::CommerceError;

use super::CheckoutArgs;
use crate::context::Context;

/// Run the checkout command.
pub fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_cart()?;
    let gateway = ctx.order_gateway();

    let customer = Customer {
        name: args.name,
        phone: args.phone,
        email: args.email,
        address: args.address,
        note: args.note,
    };

    ctx.output.header("Checkout");
    ctx.output.kv("customer", &customer.name);
    ctx.output.kv("deliver to", &customer.address);
    super::cart::print_summary(&store, ctx);

    if !args.yes && !store.cart().is_empty() {
        ctx.output.info("");
        let confirmed = Confirm::new()
            .with_prompt("Place this order?")
            .default(true)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Checkout cancelled");
            return Ok(());
        }
    }

    match place_order(&mut store, &gateway, customer) {
        Ok(receipt) => {
            if ctx.output.is_json() {
                ctx.output.json(&receipt)?;
            }
            ctx.output
                .success(&format!("Order {} placed", receipt.order_id));
            ctx.output.kv("outbox", &gateway.dir().display().to_string());
            Ok(())
        }
        Err(CommerceError::EmptyCart) => {
            ctx.output.info("Cart is empty; nothing to order.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
