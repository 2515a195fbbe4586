//! Test issuers — mock `TokenIssuer` implementations for tests.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use bindu_core::error::DomainError;
use bindu_core::issuer::{IssueRequest, TokenHandle, TokenIssuer};

/// A token issuer that records all `issue` and `destroy` calls. Issued
/// handles are numbered `token-1`, `token-2`, ... An optional latency is
/// awaited (with tokio's clock, so paused-time tests stay exact) before each
/// issue completes.
#[derive(Debug, Default)]
pub struct RecordingTokenIssuer {
    latency: Option<Duration>,
    issued: Mutex<Vec<IssueRequest>>,
    destroyed: Mutex<Vec<TokenHandle>>,
}

impl RecordingTokenIssuer {
    /// Create an issuer that completes immediately.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an issuer that takes `latency` to complete each issue.
    #[must_use]
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
            ..Self::default()
        }
    }

    /// Returns a snapshot of all issue requests.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn issued_requests(&self) -> Vec<IssueRequest> {
        self.issued.lock().unwrap().clone()
    }

    /// Returns a snapshot of all destroyed handles.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn destroyed_handles(&self) -> Vec<TokenHandle> {
        self.destroyed.lock().unwrap().clone()
    }
}

#[async_trait]
impl TokenIssuer for RecordingTokenIssuer {
    async fn issue(&self, request: IssueRequest) -> Result<TokenHandle, DomainError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        let mut issued = self.issued.lock().unwrap();
        issued.push(request);
        Ok(TokenHandle::new(format!("token-{}", issued.len())))
    }

    async fn destroy(&self, handle: &TokenHandle) -> Result<(), DomainError> {
        self.destroyed.lock().unwrap().push(handle.clone());
        Ok(())
    }
}

/// A token issuer that mints `token-1`, `token-2`, ... but can never destroy
/// them. Every destroy attempt is recorded before it fails.
#[derive(Debug, Default)]
pub struct UndestroyableTokenIssuer {
    issued: Mutex<usize>,
    destroy_attempts: Mutex<Vec<TokenHandle>>,
}

impl UndestroyableTokenIssuer {
    /// Returns a snapshot of every handle passed to `destroy`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn destroy_attempts(&self) -> Vec<TokenHandle> {
        self.destroy_attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TokenIssuer for UndestroyableTokenIssuer {
    async fn issue(&self, _request: IssueRequest) -> Result<TokenHandle, DomainError> {
        let mut issued = self.issued.lock().unwrap();
        *issued += 1;
        Ok(TokenHandle::new(format!("token-{issued}")))
    }

    async fn destroy(&self, handle: &TokenHandle) -> Result<(), DomainError> {
        self.destroy_attempts.lock().unwrap().push(handle.clone());
        Err(DomainError::Destruction(format!("burn of {handle} rejected")))
    }
}

/// A token issuer whose calls always fail. Useful for testing the
/// creation-failure path.
#[derive(Debug, Default)]
pub struct FailingTokenIssuer {
    destroy_calls: Mutex<usize>,
}

impl FailingTokenIssuer {
    /// Number of times `destroy` was invoked.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn destroy_calls(&self) -> usize {
        *self.destroy_calls.lock().unwrap()
    }
}

#[async_trait]
impl TokenIssuer for FailingTokenIssuer {
    async fn issue(&self, _request: IssueRequest) -> Result<TokenHandle, DomainError> {
        Err(DomainError::Issuance("rpc endpoint unreachable".into()))
    }

    async fn destroy(&self, _handle: &TokenHandle) -> Result<(), DomainError> {
        *self.destroy_calls.lock().unwrap() += 1;
        Err(DomainError::Destruction("rpc endpoint unreachable".into()))
    }
}
