//! Starport CLI - Command line storefront for the Starport commerce engine.
//!
//! Commands:
//! - `starport browse` - List starships, page by page
//! - `starport search` - Replay keystrokes through the debounced search
//! - `starport checkout` - Fill a cart and place an order
//! - `starport config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use starport_observability::LogLevel;

use commands::{BrowseArgs, CheckoutArgs, ConfigArgs, SearchArgs};

/// Starport CLI - Browse, search and buy starships
#[derive(Parser)]
#[command(name = "starport")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List starships from the listing service
    Browse(BrowseArgs),

    /// Search starships as if typing the given keystrokes
    Search(SearchArgs),

    /// Add starships to the cart and place an order
    Checkout(CheckoutArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);
    let ctx = match context::Context::load(cli.config.as_deref(), output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let mut logging = ctx.config.logging.clone();
    if cli.verbose && logging.level > LogLevel::Debug {
        logging.level = LogLevel::Debug;
    }
    if let Err(e) = starport_observability::init(&logging) {
        ctx.output.warn(&e.to_string());
    }

    let result = match cli.command {
        Commands::Browse(args) => commands::browse::run(args, &ctx).await,
        Commands::Search(args) => commands::search::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
