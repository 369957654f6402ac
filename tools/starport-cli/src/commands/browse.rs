//! Listing browse command.

use anyhow::{bail, Result};
use starport_commerce::catalog::ListingPage;

use super::BrowseArgs;
use crate::context::Context;
use crate::output::format_credits;

/// Run the browse command.
pub async fn run(args: BrowseArgs, ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront()?;
    let fetcher = storefront.fetcher();

    let spinner = ctx.output.spinner("Fetching starships...");
    fetcher.fetch_initial().await;
    let mut loaded = 1;
    while loaded < args.pages {
        spinner.set_message(format!("Loading page {}...", loaded + 1));
        if fetcher.load_more_if_available().await.is_none() {
            break;
        }
        loaded += 1;
    }
    spinner.finish_and_clear();

    let snapshot = storefront.catalog_snapshot();
    if ctx.output.is_json() {
        ctx.output.json(&snapshot);
        return Ok(());
    }

    let Some(page) = snapshot.primary_page.as_ref() else {
        bail!(
            "{}",
            snapshot
                .primary_error
                .as_deref()
                .unwrap_or("No starships loaded")
        );
    };
    if let Some(error) = &snapshot.primary_error {
        ctx.output.warn(error);
    }

    ctx.output.header(&format!(
        "Starships ({} of {})",
        page.len(),
        page.total_count
    ));
    ctx.output.products(
        page.items
            .iter()
            .map(|p| (p, snapshot.quantity_caps.get(&p.id).copied().unwrap_or_default())),
    );

    summarize(page, ctx);
    Ok(())
}

fn summarize(page: &ListingPage, ctx: &Context) {
    let priced: Vec<f64> = page.items.iter().filter_map(|p| p.price.credits()).collect();
    if let Some(cheapest) = priced.iter().copied().reduce(f64::min) {
        ctx.output.kv("cheapest", &format_credits(cheapest));
    }
    ctx.output.kv("unpriced", &(page.len() - priced.len()).to_string());

    if page.has_more() {
        ctx.output.info("More starships available; use --pages to load them.");
    }
}
