//! Commerce error types.

use thiserror::Error;

/// Errors that can occur when interpreting commerce input.
///
/// Store transitions never fail; these errors only surface when parsing
/// values that come from outside the engine (configuration, CLI flags).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Unknown payment method name.
    #[error("Unknown payment method: {0}")]
    UnknownPaymentMethod(String),

    /// Invalid quantity cap configuration.
    #[error("Invalid quantity cap {cap}: must be between 1 and {max}")]
    InvalidQuantityCap { cap: u32, max: u32 },

    /// Invalid tax rate.
    #[error("Invalid tax rate: {0}")]
    InvalidTaxRate(f64),
}
