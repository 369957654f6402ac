//! Observability for the Starport storefront engine.
//!
//! This crate provides:
//! - `LogConfig` - Level and output format
//! - `init` - Global `tracing` subscriber installation

mod logging;

pub use logging::*;
