//! Unified error types for liftoff.

use crate::config::ConfigError;

/// Unified error type shared by the server and CLI.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., a malformed preferences body).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Configuration could not be loaded or failed validation.
    #[error("CONFIG_ERROR: {0}")]
    Config(#[from] ConfigError),

    /// Every fetch attempt against the news API failed.
    #[error("FETCH_FAILED: {0}")]
    FetchFailed(String),
}

impl Error {
    /// Stable machine-readable code for the error variant.
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidInput(_) => "INVALID_INPUT",
            Error::Config(_) => "CONFIG_ERROR",
            Error::FetchFailed(_) => "FETCH_FAILED",
        }
    }
}
