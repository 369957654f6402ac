//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use starport_commerce::cart::DEFAULT_TAX_RATE;
use starport_data::ListingConfig;
use starport_executor::EngineConfig;
use starport_observability::{LogConfig, LogLevel};
use thiserror::Error;

/// Overrides the listing service root.
pub const ENV_BASE_URL: &str = "STARPORT_BASE_URL";

/// Overrides the log level.
pub const ENV_LOG: &str = "STARPORT_LOG";

/// Configuration errors not tied to reading a file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnv { var: &'static str, reason: String },

    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),
}

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Listing service endpoint.
    #[serde(default)]
    pub listing: ListingConfig,

    /// Fetch engine tunables.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Checkout defaults.
    #[serde(default)]
    pub checkout: CheckoutConfig,

    /// Logging.
    #[serde(default)]
    pub logging: LogConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        match Format::of(path)? {
            Format::Json => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display())),
            Format::Toml => toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display())),
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Apply `STARPORT_*` environment overrides.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|var| std::env::var(var).ok())
    }

    fn apply_overrides(
        &mut self,
        lookup: impl Fn(&'static str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(url) = lookup(ENV_BASE_URL).filter(|u| !u.trim().is_empty()) {
            self.listing.base_url = url.trim().to_string();
        }

        if let Some(level) = lookup(ENV_LOG) {
            self.logging.level = level
                .parse::<LogLevel>()
                .map_err(|e| ConfigError::InvalidEnv {
                    var: ENV_LOG,
                    reason: e.to_string(),
                })?;
        }

        Ok(())
    }
}

enum Format {
    Toml,
    Json,
}

impl Format {
    fn of(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") | None => Ok(Self::Toml),
            Some(other) => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Checkout defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Tax rate applied to the subtotal (0.05 = 5%).
    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,

    /// Image reference stored on cart lines.
    #[serde(default = "default_image_ref")]
    pub image_ref: String,
}

fn default_tax_rate() -> f64 {
    DEFAULT_TAX_RATE
}

fn default_image_ref() -> String {
    "https://picsum.photos/300/200".to_string()
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            tax_rate: default_tax_rate(),
            image_ref: default_image_ref(),
        }
    }
}

/// Generate a default starport.toml config file.
pub fn generate_default_config() -> String {
    r#"# Starport storefront configuration

[listing]
base_url = "https://swapi.dev/api"
resource = "starships"
timeout_ms = 10000
connect_timeout_ms = 3000

[engine]
search_debounce_ms = 500
max_quantity_cap = 10
default_quantity_cap = 10
# cap_seed = 42

[checkout]
tax_rate = 0.05
image_ref = "https://picsum.photos/300/200"

[logging]
level = "info"
format = "human"
"#
    .to_string()
}
