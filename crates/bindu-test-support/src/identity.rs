//! Scripted identity provider for driving connection changes in tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use bindu_core::error::DomainError;
use bindu_core::identity::{IdentityProvider, IdentityStatus, PublicIdentifier, Signature};
use tokio::sync::watch;

/// An identity provider whose connection status is pushed by the test and
/// whose signature requests are approved or declined on a switch. Every
/// message passed to `sign_message` is recorded.
#[derive(Debug)]
pub struct ScriptedIdentity {
    status: watch::Sender<IdentityStatus>,
    approve: AtomicBool,
    signed: Mutex<Vec<Vec<u8>>>,
}

impl ScriptedIdentity {
    /// Creates a disconnected identity that approves signatures.
    #[must_use]
    pub fn new() -> Self {
        let (status, _) = watch::channel(IdentityStatus::Disconnected);
        Self {
            status,
            approve: AtomicBool::new(true),
            signed: Mutex::new(Vec::new()),
        }
    }

    /// Reports the identity as connected with `id`.
    pub fn connect(&self, id: &str) {
        self.status
            .send_replace(IdentityStatus::Connected(PublicIdentifier::new(id)));
    }

    /// Reports the identity as disconnected.
    pub fn disconnect(&self) {
        self.status.send_replace(IdentityStatus::Disconnected);
    }

    /// Sets whether subsequent signature requests are approved.
    pub fn set_approve(&self, approve: bool) {
        self.approve.store(approve, Ordering::SeqCst);
    }

    /// Returns a snapshot of every message that was submitted for signing.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn signed_messages(&self) -> Vec<Vec<u8>> {
        self.signed.lock().unwrap().clone()
    }
}

impl Default for ScriptedIdentity {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for ScriptedIdentity {
    fn subscribe(&self) -> watch::Receiver<IdentityStatus> {
        self.status.subscribe()
    }

    async fn sign_message(&self, message: &[u8]) -> Result<Signature, DomainError> {
        self.signed.lock().unwrap().push(message.to_vec());
        if !self.status.borrow().is_connected() {
            return Err(DomainError::NotConnected);
        }
        if self.approve.load(Ordering::SeqCst) {
            Ok(Signature(message.iter().rev().copied().collect()))
        } else {
            Err(DomainError::SignatureRejected("user declined".into()))
        }
    }
}
