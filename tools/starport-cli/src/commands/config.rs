//! Configuration management commands.

use anyhow::{bail, Result};
use dialoguer::Confirm;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { path, force } => init_config(path.as_deref(), force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let config = &ctx.config;

    ctx.output.info("");
    ctx.output.info("[listing]");
    ctx.output.kv("base_url", &config.listing.base_url);
    ctx.output.kv("resource", &config.listing.resource);
    ctx.output.kv("timeout_ms", &config.listing.timeout_ms.to_string());
    ctx.output
        .kv("connect_timeout_ms", &config.listing.connect_timeout_ms.to_string());

    ctx.output.info("");
    ctx.output.info("[engine]");
    ctx.output
        .kv("search_debounce_ms", &config.engine.search_debounce_ms.to_string());
    ctx.output
        .kv("max_quantity_cap", &config.engine.max_quantity_cap.to_string());
    ctx.output.kv(
        "default_quantity_cap",
        &config.engine.default_quantity_cap.to_string(),
    );
    if let Some(seed) = config.engine.cap_seed {
        ctx.output.kv("cap_seed", &seed.to_string());
    }

    ctx.output.info("");
    ctx.output.info("[checkout]");
    ctx.output.kv("tax_rate", &config.checkout.tax_rate.to_string());
    ctx.output.kv("image_ref", &config.checkout.image_ref);

    ctx.output.info("");
    ctx.output.info("[logging]");
    ctx.output.kv("level", &config.logging.level.to_string());
    ctx.output.kv("format", &format!("{:?}", config.logging.format).to_lowercase());

    Ok(())
}

fn init_config(path: Option<&str>, force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.resolve_path(path.unwrap_or("starport.toml"));

    if config_path.exists() && !force {
        if ctx.output.is_json() {
            bail!(
                "Config file already exists: {}. Use --force to overwrite.",
                config_path.display()
            );
        }
        let overwrite = Confirm::new()
            .with_prompt(format!("Overwrite {}?", config_path.display()))
            .default(false)
            .interact()?;
        if !overwrite {
            ctx.output.warn("Config unchanged");
            return Ok(());
        }
    }

    if config_path.extension().is_some_and(|e| e == "json") {
        CliConfig::default().save(&config_path)?;
    } else {
        std::fs::write(&config_path, generate_default_config())?;
    }
    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}
