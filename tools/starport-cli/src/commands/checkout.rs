//! Cart and checkout command.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use starport_commerce::cart::{AddOutcome, OrderSummary};
use starport_commerce::ProductId;
use starport_executor::Storefront;

use super::CheckoutArgs;
use crate::context::Context;
use crate::output::format_credits;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront()?;
    let tax_rate = args.tax_rate.unwrap_or(ctx.config.checkout.tax_rate);

    let spinner = ctx.output.spinner("Fetching starships...");
    storefront.fetcher().fetch_initial().await;
    spinner.finish_and_clear();
    if let Some(error) = storefront.with_catalog(|c| c.primary_error().map(str::to_string)) {
        ctx.output.warn(&error);
    }

    for name in &args.names {
        add_by_name(&storefront, name.trim(), ctx).await;
    }

    storefront.with_cart(|cart| cart.set_payment_method(args.payment));
    let summary = storefront.with_cart(|cart| cart.order_summary(tax_rate))?;
    if summary.is_empty() {
        bail!("Cart is empty; nothing to order");
    }

    if args.dry_run {
        if ctx.output.is_json() {
            ctx.output.json(&summary);
        } else {
            render_summary(&summary, ctx);
        }
        return Ok(());
    }

    if !ctx.output.is_json() {
        render_summary(&summary, ctx);
    }

    if !args.yes && !ctx.output.is_json() {
        ctx.output.info("");
        let confirmed = Confirm::new()
            .with_prompt("Place order?")
            .default(true)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Order cancelled");
            return Ok(());
        }
    }

    let Some(receipt) = storefront.with_cart(|cart| cart.place_order(tax_rate))? else {
        bail!("Cart is empty; nothing to order");
    };

    if ctx.output.is_json() {
        ctx.output.json(&receipt);
    } else {
        ctx.output.success(&format!(
            "Order placed at {} for {}",
            receipt.placed_at.format("%Y-%m-%d %H:%M:%S UTC"),
            format_credits(receipt.summary.grand_total)
        ));
    }
    Ok(())
}

/// Add one unit of a starship, searching for it if it is not on the first page.
async fn add_by_name(storefront: &Storefront, name: &str, ctx: &Context) {
    let id = ProductId::new(name);
    let image_ref = &ctx.config.checkout.image_ref;

    let outcome = match storefront.add_product(&id, image_ref) {
        Some(outcome) => Some(outcome),
        None => {
            ctx.output.debug(&format!("{} not listed yet, searching", id));
            storefront.fetcher().search_now(name).await;
            storefront.add_product(&id, image_ref)
        }
    };

    match outcome {
        Some(AddOutcome::Inserted | AddOutcome::Incremented) => {
            let quantity = storefront.with_cart(|cart| cart.quantity_of(&id));
            ctx.output.success(&format!("Added {} (x{})", id, quantity));
        }
        Some(AddOutcome::AtCap) => {
            let cap = storefront.with_catalog(|c| c.cap_for(&id));
            ctx.output.warn(&format!("{} is limited to {} per order", id, cap));
        }
        Some(AddOutcome::Unavailable) => {
            ctx.output.warn(&format!("{} has no listed price", id));
        }
        None => ctx.output.warn(&format!("No starship named {:?}", name)),
    }
}

fn render_summary(summary: &OrderSummary, ctx: &Context) {
    const WIDTHS: [usize; 4] = [32, 4, 20, 22];

    ctx.output.header("Order summary");
    ctx.output.table_row(&["STARSHIP", "QTY", "UNIT", "SUBTOTAL"], &WIDTHS);
    for line in &summary.lines {
        ctx.output.table_row(
            &[
                line.product_id.as_str(),
                &line.quantity.to_string(),
                &format_credits(line.unit_price),
                &format_credits(line.subtotal),
            ],
            &WIDTHS,
        );
    }

    ctx.output.info("");
    ctx.output.kv("items", &summary.item_count.to_string());
    ctx.output.kv("subtotal", &format_credits(summary.subtotal));
    ctx.output.kv(
        &format!("tax ({:.1}%)", summary.tax_rate * 100.0),
        &format_credits(summary.tax),
    );
    ctx.output.kv("total", &format_credits(summary.grand_total));
    ctx.output.kv("payment", summary.payment_method.display_name());
}
