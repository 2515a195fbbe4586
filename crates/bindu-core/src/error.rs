//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The identity holder declined (or failed) to sign a message.
    #[error("signature rejected: {0}")]
    SignatureRejected(String),

    /// The identity capability is not connected.
    #[error("identity not connected")]
    NotConnected,

    /// Creating an ephemeral token failed.
    #[error("token issuance failed: {0}")]
    Issuance(String),

    /// Destroying an ephemeral token failed.
    #[error("token destruction failed: {0}")]
    Destruction(String),

    /// The narrative store was built without any entries.
    #[error("narrative store must contain at least one entry")]
    EmptyNarrativeStore,

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// The session runtime has stopped and no longer accepts input.
    #[error("session closed")]
    SessionClosed,

    /// An infrastructure error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
