//! Listing service access for the Starport engine.
//!
//! This crate provides:
//! - `ListingService` - The three listing calls the engine makes
//! - `HttpListingService` - reqwest implementation with timeouts
//! - `ListingConfig` / `TimeoutConfig` - Endpoint and timeout settings
//! - `ListingResponse` - Wire format of a listing page

mod client;
mod config;
mod error;
mod service;
mod timeout;
mod wire;

pub use client::*;
pub use config::*;
pub use error::*;
pub use service::*;
pub use timeout::*;
pub use wire::*;
