//! Identity provider capability.
//!
//! The identity provider is an external wallet: it reports whether an
//! identity is connected, exposes that identity's public identifier, and
//! signs messages on request. The session observes connection changes
//! through a [`watch`] channel.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::error::DomainError;

/// Public identifier of a connected identity (for example a base58 wallet key).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicIdentifier(String);

impl PublicIdentifier {
    /// Wraps a raw identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PublicIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque signature bytes returned by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature(pub Vec<u8>);

/// Connection status reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum IdentityStatus {
    /// No identity is connected.
    #[default]
    Disconnected,
    /// An identity is connected with the given public identifier.
    Connected(PublicIdentifier),
}

impl IdentityStatus {
    /// Returns `true` when an identity is connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected(_))
    }

    /// Returns the connected identifier, if any.
    #[must_use]
    pub fn public_identifier(&self) -> Option<&PublicIdentifier> {
        match self {
            Self::Connected(id) => Some(id),
            Self::Disconnected => None,
        }
    }
}

/// Capability trait for the external identity (wallet) provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Subscribes to connection status changes. The receiver starts at the
    /// current status.
    fn subscribe(&self) -> watch::Receiver<IdentityStatus>;

    /// Requests a signature over `message`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SignatureRejected` when the holder declines and
    /// `DomainError::NotConnected` when no identity is connected.
    async fn sign_message(&self, message: &[u8]) -> Result<Signature, DomainError>;
}
