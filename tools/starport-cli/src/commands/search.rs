//! Debounced search command.

use std::time::Duration;

use anyhow::{bail, Result};

use super::SearchArgs;
use crate::context::Context;

/// Run the search command.
///
/// Each keystroke is fed to the debounced search in turn, as a search box
/// would, so only queries that stay put for the debounce delay are sent.
pub async fn run(args: SearchArgs, ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront()?;
    let fetcher = storefront.fetcher();
    let interval = Duration::from_millis(args.interval_ms);

    for (i, keystroke) in args.keystrokes.iter().enumerate() {
        ctx.output.debug(&format!("typed {:?}", keystroke));
        fetcher.search(keystroke);
        if i + 1 < args.keystrokes.len() {
            tokio::time::sleep(interval).await;
        }
    }

    let spinner = ctx.output.spinner("Searching...");
    fetcher.settle_search().await;
    spinner.finish_and_clear();

    let snapshot = storefront.catalog_snapshot();
    if ctx.output.is_json() {
        ctx.output.json(&snapshot);
        return Ok(());
    }

    if let Some(error) = &snapshot.search_error {
        bail!("{}", error);
    }

    let query = args.keystrokes.last().map(|q| q.trim()).unwrap_or_default();
    let Some(results) = snapshot.search_page.as_ref() else {
        ctx.output.info("Search cleared.");
        return Ok(());
    };

    if results.is_empty() {
        ctx.output.info(&format!("No starships match {:?}.", query));
        return Ok(());
    }

    ctx.output.header(&format!("Results for {:?} ({})", query, results.total_count));
    ctx.output.products(
        results
            .items
            .iter()
            .map(|p| (p, snapshot.quantity_caps.get(&p.id).copied().unwrap_or_default())),
    );
    Ok(())
}
