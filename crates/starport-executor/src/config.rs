//! Engine configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use starport_commerce::catalog::{QuantityCaps, DEFAULT_QUANTITY_CAP, MAX_QUANTITY_CAP};
use starport_commerce::CommerceError;

/// Tunables for the fetch engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Quiet period before a search query is sent.
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    /// Upper bound for randomly drawn quantity caps.
    #[serde(default = "default_max_quantity_cap")]
    pub max_quantity_cap: u32,

    /// Cap used for products that have not been listed yet.
    #[serde(default = "default_quantity_cap")]
    pub default_quantity_cap: u32,

    /// Fixed seed for cap draws. `None` seeds from the OS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cap_seed: Option<u64>,
}

fn default_search_debounce_ms() -> u64 {
    500
}

fn default_max_quantity_cap() -> u32 {
    MAX_QUANTITY_CAP
}

fn default_quantity_cap() -> u32 {
    DEFAULT_QUANTITY_CAP
}

impl EngineConfig {
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Set the cap seed.
    pub fn with_cap_seed(mut self, seed: u64) -> Self {
        self.cap_seed = Some(seed);
        self
    }

    /// Build the cap table described by this config.
    pub fn build_caps(&self) -> Result<QuantityCaps, CommerceError> {
        let caps = match self.cap_seed {
            Some(seed) => QuantityCaps::seeded(seed),
            None => QuantityCaps::new(),
        };
        caps.with_bounds(self.max_quantity_cap, self.default_quantity_cap)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_debounce_ms: default_search_debounce_ms(),
            max_quantity_cap: default_max_quantity_cap(),
            default_quantity_cap: default_quantity_cap(),
            cap_seed: None,
        }
    }
}
