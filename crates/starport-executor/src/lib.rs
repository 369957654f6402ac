//! Fetch orchestration for the Starport storefront.
//!
//! This crate drives the catalog through the listing service:
//! - `FetchOrchestrator` - Initial fetch, load-more and debounced search
//! - `Debouncer` - Cancellable delayed execution
//! - `Storefront` - Shared cart and catalog handle for presentation
//! - `EngineConfig` - Debounce delay and quantity cap bounds

mod config;
mod debounce;
mod error;
mod orchestrator;
mod storefront;

pub use config::*;
pub use debounce::*;
pub use error::*;
pub use orchestrator::*;
pub use storefront::*;
