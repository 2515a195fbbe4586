//! Local wallet identity provider.
//!
//! Stands in for a browser wallet: the terminal user connects, disconnects
//! and approves or declines signature requests with meta commands.

use std::fmt::Write as _;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use bindu_core::error::DomainError;
use bindu_core::identity::{IdentityProvider, IdentityStatus, PublicIdentifier, Signature};
use sha2::{Digest, Sha256};
use tokio::sync::watch;
use tracing::info;

/// Identity provider driven from the terminal.
#[derive(Debug)]
pub struct LocalWallet {
    status: watch::Sender<IdentityStatus>,
    approve: AtomicBool,
}

impl LocalWallet {
    /// Creates a disconnected wallet that approves signature requests.
    #[must_use]
    pub fn new() -> Self {
        let (status, _) = watch::channel(IdentityStatus::Disconnected);
        Self {
            status,
            approve: AtomicBool::new(true),
        }
    }

    /// Connects as `id`. Connecting again with another identifier replaces
    /// the current one.
    pub fn connect(&self, id: &str) {
        info!(public_identifier = id, "wallet connected");
        self.status
            .send_replace(IdentityStatus::Connected(PublicIdentifier::new(id)));
    }

    /// Disconnects the wallet.
    pub fn disconnect(&self) {
        info!("wallet disconnected");
        self.status.send_replace(IdentityStatus::Disconnected);
    }

    /// Sets whether later signature requests are approved.
    pub fn set_approve(&self, approve: bool) {
        self.approve.store(approve, Ordering::SeqCst);
    }

    /// Whether signature requests are currently approved.
    #[must_use]
    pub fn approves(&self) -> bool {
        self.approve.load(Ordering::SeqCst)
    }

    /// Current connection status.
    #[must_use]
    pub fn status(&self) -> IdentityStatus {
        self.status.borrow().clone()
    }
}

impl Default for LocalWallet {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for LocalWallet {
    fn subscribe(&self) -> watch::Receiver<IdentityStatus> {
        self.status.subscribe()
    }

    async fn sign_message(&self, message: &[u8]) -> Result<Signature, DomainError> {
        let connected = self.status.borrow().public_identifier().cloned();
        let Some(id) = connected else {
            return Err(DomainError::NotConnected);
        };
        if !self.approves() {
            return Err(DomainError::SignatureRejected(
                "signature declined in the local wallet".to_owned(),
            ));
        }

        let mut hasher = Sha256::new();
        hasher.update(id.as_str().as_bytes());
        hasher.update(message);
        let digest = hasher.finalize();
        info!(public_identifier = %id, signature = %to_hex(&digest), "message signed");
        Ok(Signature(digest.to_vec()))
    }
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut out, b| {
        let _ = write!(out, "{b:02x}");
        out
    })
}
