//! Listing endpoint configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::timeout::TimeoutConfig;

/// Where and how to reach the listing service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingConfig {
    /// API root, e.g. `https://swapi.dev/api`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Listed resource under the API root.
    #[serde(default = "default_resource")]
    pub resource: String,

    /// Total request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Connection timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

fn default_base_url() -> String {
    "https://swapi.dev/api".to_string()
}

fn default_resource() -> String {
    "starships".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_connect_timeout_ms() -> u64 {
    3_000
}

impl ListingConfig {
    /// Create a config for an API root with default timeouts.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set the listed resource.
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = resource.into();
        self
    }

    /// Set the timeouts.
    pub fn with_timeouts(mut self, timeouts: TimeoutConfig) -> Self {
        self.timeout_ms = timeouts.total.as_millis() as u64;
        self.connect_timeout_ms = timeouts.connect.as_millis() as u64;
        self
    }

    /// Timeouts as durations.
    pub fn timeouts(&self) -> TimeoutConfig {
        TimeoutConfig::new(
            Duration::from_millis(self.connect_timeout_ms),
            Duration::from_millis(self.timeout_ms),
        )
    }

    /// URL of the first listing page.
    pub fn listing_url(&self) -> String {
        format!(
            "{}/{}/",
            self.base_url.trim_end_matches('/'),
            self.resource.trim_matches('/')
        )
    }
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            resource: default_resource(),
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}
