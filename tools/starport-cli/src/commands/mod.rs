//! CLI command implementations.

pub mod browse;
pub mod checkout;
pub mod config;
pub mod search;

use clap::{Args, Subcommand};
use starport_commerce::cart::PaymentMethod;

/// Arguments for the browse command.
#[derive(Args)]
pub struct BrowseArgs {
    /// Number of pages to load.
    #[arg(short, long, default_value = "1")]
    pub pages: usize,
}

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Successive contents of the search box, e.g. `x x- x-w x-wing`.
    #[arg(required = true, num_args = 1..)]
    pub keystrokes: Vec<String>,

    /// Delay between keystrokes in milliseconds.
    #[arg(long, default_value = "150")]
    pub interval_ms: u64,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Starship names to add, one unit per occurrence.
    #[arg(required = true, num_args = 1..)]
    pub names: Vec<String>,

    /// Payment method (net_banking or cash_on_delivery).
    #[arg(short, long, default_value = "cash_on_delivery")]
    pub payment: PaymentMethod,

    /// Tax rate override (0.05 = 5%).
    #[arg(long)]
    pub tax_rate: Option<f64>,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,

    /// Print the order summary without placing the order.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Output path (default: starport.toml).
        #[arg(short, long)]
        path: Option<String>,

        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
