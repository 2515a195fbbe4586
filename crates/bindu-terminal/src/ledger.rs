//! In-memory token ledger.
//!
//! Mints ephemeral tokens into a process-local map instead of a chain.
//! Latency and failure are configurable so the terminal can exercise the
//! slow and failing issuance paths.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bindu_core::error::DomainError;
use bindu_core::issuer::{IssueRequest, TokenHandle, TokenIssuer};
use tracing::{info, instrument};
use uuid::Uuid;

/// Token issuer backed by a `HashMap` of live tokens.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    tokens: Mutex<HashMap<TokenHandle, IssueRequest>>,
    latency: Duration,
    fail_issues: AtomicBool,
}

impl InMemoryLedger {
    /// Creates an empty ledger whose issue calls take `latency`.
    #[must_use]
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    /// Sets whether later issue calls fail.
    pub fn set_fail_issues(&self, fail: bool) {
        self.fail_issues.store(fail, Ordering::SeqCst);
    }

    /// Number of tokens minted and not yet destroyed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the ledger lock is poisoned.
    pub fn live_tokens(&self) -> Result<usize, DomainError> {
        Ok(self.lock()?.len())
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<TokenHandle, IssueRequest>>, DomainError> {
        self.tokens
            .lock()
            .map_err(|e| DomainError::Infrastructure(format!("ledger lock poisoned: {e}")))
    }
}

#[async_trait]
impl TokenIssuer for InMemoryLedger {
    #[instrument(skip_all, fields(name = %request.name))]
    async fn issue(&self, request: IssueRequest) -> Result<TokenHandle, DomainError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.fail_issues.load(Ordering::SeqCst) {
            return Err(DomainError::Issuance("ledger refused the mint".to_owned()));
        }

        let handle = TokenHandle::new(Uuid::new_v4().to_string());
        self.lock()?.insert(handle.clone(), request);
        info!(%handle, "token minted");
        Ok(handle)
    }

    async fn destroy(&self, handle: &TokenHandle) -> Result<(), DomainError> {
        match self.lock()?.remove(handle) {
            Some(_) => Ok(()),
            None => Err(DomainError::Destruction(format!("unknown token {handle}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tokio::time::Instant;

    use super::*;

    fn request() -> IssueRequest {
        IssueRequest {
            name: "Écho de Bindu".into(),
            symbol: "BINDU".into(),
            uri: "https://example.invalid/bindu.json".into(),
            metadata: json!({ "narrative_id": "MYTHE_CODEUR" }),
        }
    }

    #[tokio::test]
    async fn test_issue_then_destroy_removes_token() {
        // Arrange
        let ledger = InMemoryLedger::default();

        // Act
        let handle = ledger.issue(request()).await.unwrap();
        assert_eq!(ledger.live_tokens().unwrap(), 1);
        ledger.destroy(&handle).await.unwrap();

        // Assert
        assert_eq!(ledger.live_tokens().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_handles_are_unique() {
        let ledger = InMemoryLedger::default();

        let first = ledger.issue(request()).await.unwrap();
        let second = ledger.issue(request()).await.unwrap();

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_destroying_unknown_handle_fails() {
        let ledger = InMemoryLedger::default();

        let result = ledger.destroy(&TokenHandle::new("nope")).await;

        assert!(matches!(result, Err(DomainError::Destruction(_))));
    }

    #[tokio::test]
    async fn test_second_destroy_of_same_handle_fails() {
        let ledger = InMemoryLedger::default();
        let handle = ledger.issue(request()).await.unwrap();
        ledger.destroy(&handle).await.unwrap();

        let result = ledger.destroy(&handle).await;

        assert!(matches!(result, Err(DomainError::Destruction(_))));
    }

    #[tokio::test]
    async fn test_failing_ledger_mints_nothing() {
        let ledger = InMemoryLedger::default();
        ledger.set_fail_issues(true);

        let result = ledger.issue(request()).await;

        assert!(matches!(result, Err(DomainError::Issuance(_))));
        assert_eq!(ledger.live_tokens().unwrap(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_issue_waits_for_configured_latency() {
        let ledger = InMemoryLedger::new(Duration::from_secs(4));
        let started = Instant::now();

        ledger.issue(request()).await.unwrap();

        assert!(started.elapsed() >= Duration::from_secs(4));
    }
}
