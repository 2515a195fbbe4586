//! Ephemeral token issuer capability.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Opaque handle to an issued ephemeral token (for example a mint address).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenHandle(String);

impl TokenHandle {
    /// Wraps a raw handle.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the handle as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Context passed to the issuer when creating a token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueRequest {
    /// Display name of the collectible.
    pub name: String,
    /// Ticker symbol of the collectible.
    pub symbol: String,
    /// Off-chain metadata URI.
    pub uri: String,
    /// Free-form metadata (revelation text, owner, timestamps).
    pub metadata: serde_json::Value,
}

/// Capability trait for the external token issuer.
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    /// Creates a token tied to the session's identity.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Issuance` on network or chain failure.
    async fn issue(&self, request: IssueRequest) -> Result<TokenHandle, DomainError>;

    /// Destroys a previously issued token.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Destruction` on network or chain failure.
    async fn destroy(&self, handle: &TokenHandle) -> Result<(), DomainError>;
}
