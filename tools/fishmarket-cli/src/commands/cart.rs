//! Cart commands.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use fishmarket_commerce::cart::{LineItem, ProductDescriptor};
use fishmarket_commerce::{Currency, LineItemId, Money};
use serde::Serialize;

use super::{AddArgs, ClearArgs, RemoveArgs, SetArgs};
use crate::context::{CliCartStore, Context};

/// Cart summary printed by `show` in JSON mode.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CartView<'a> {
    key: &'a str,
    items: &'a [LineItem],
    count: i64,
    total: Money,
    savings: Money,
}

/// Run the add command.
pub fn add(args: AddArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_cart()?;
    let currency = store.currency();

    let mut descriptor = ProductDescriptor::new(
        args.product_id.as_str(),
        args.name,
        parse_price(args.price, currency, "price")?,
    )
    .with_image(args.image);
    if let Some(original) = args.original_price {
        descriptor = descriptor.with_original_price(parse_price(original, currency, "original price")?);
    }

    match store.add_item(descriptor, args.qty) {
        Some(line_id) => {
            let quantity = store
                .cart()
                .get_item(&line_id)
                .map(|i| i.quantity)
                .unwrap_or_default();
            ctx.output.success(&format!(
                "{} x{} in cart (line {})",
                args.product_id, quantity, line_id
            ));
        }
        None => ctx.output.warn("Nothing added: quantity must be positive"),
    }

    report_sync(&store, ctx);
    print_summary(&store, ctx);
    Ok(())
}

/// Run the remove command.
pub fn remove(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_cart()?;

    if store.remove_item(&LineItemId::new(args.line_id.as_str())) {
        ctx.output.success(&format!("Removed line {}", args.line_id));
    } else {
        ctx.output.info(&format!("No line {} in cart", args.line_id));
    }

    report_sync(&store, ctx);
    print_summary(&store, ctx);
    Ok(())
}

/// Run the set command.
pub fn set(args: SetArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_cart()?;
    let line_id = LineItemId::new(args.line_id.as_str());

    if !store.update_quantity(&line_id, args.qty) {
        ctx.output.info(&format!("No line {} in cart", args.line_id));
    } else if args.qty <= 0 {
        ctx.output.success(&format!("Removed line {}", args.line_id));
    } else {
        ctx.output
            .success(&format!("Line {} quantity set to {}", args.line_id, args.qty));
    }

    report_sync(&store, ctx);
    print_summary(&store, ctx);
    Ok(())
}

/// Run the show command.
pub fn show(ctx: &Context) -> Result<()> {
    let store = ctx.open_cart()?;

    if ctx.output.is_json() {
        return ctx.output.json(&CartView {
            key: store.storage_key(),
            items: store.items(),
            count: store.count(),
            total: store.total(),
            savings: store.savings(),
        });
    }

    ctx.output.header(&format!("Cart ({})", store.storage_key()));

    if store.cart().is_empty() {
        ctx.output.info("Cart is empty.");
        return Ok(());
    }

    ctx.output.cart_table(store.items());
    print_summary(&store, ctx);
    Ok(())
}

/// Run the export command.
pub fn export(ctx: &Context) -> Result<()> {
    let store = ctx.open_cart()?;
    ctx.output.json(&store.export_for_order())
}

/// Run the clear command.
pub fn clear(args: ClearArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_cart()?;

    if store.cart().is_empty() {
        ctx.output.info("Cart is already empty.");
        return Ok(());
    }

    if !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove all {} items from the cart?", store.count()))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Clear cancelled");
            return Ok(());
        }
    }

    store.clear();
    report_sync(&store, ctx);
    ctx.output.success("Cart cleared");
    Ok(())
}

/// Convert a major-unit amount from the command line.
fn parse_price(amount: f64, currency: Currency, what: &str) -> Result<Money> {
    if !amount.is_finite() || amount < 0.0 {
        bail!("{} must be a non-negative number, got {}", what, amount);
    }
    Ok(Money::from_decimal(amount, currency))
}

fn report_sync(store: &CliCartStore, ctx: &Context) {
    if !store.is_synced() {
        ctx.output
            .warn("Cart change could not be saved; it will be lost when this command exits");
    }
}

pub(crate) fn print_summary(store: &CliCartStore, ctx: &Context) {
    ctx.output
        .cart_summary(store.count(), &store.total(), &store.savings());
}
