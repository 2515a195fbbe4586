//! Bindu terminal — error types.

use bindu_core::error::DomainError;
use thiserror::Error;

/// Startup and runtime errors for the terminal.
#[derive(Debug, Error)]
pub enum AppError {
    /// A configuration variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// A domain invariant failed.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// The view could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Terminal I/O error.
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
}
