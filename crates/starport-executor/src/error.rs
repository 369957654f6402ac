//! Engine construction errors.

use starport_commerce::CommerceError;
use starport_data::FetchError;
use thiserror::Error;

/// Errors raised while assembling the engine.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid engine configuration: {0}")]
    Config(#[from] CommerceError),

    #[error("failed to create listing client: {0}")]
    Client(#[from] FetchError),
}
