//! Environment configuration for the terminal.

use std::time::Duration;

use bindu_session::domain::timings::SessionTimings;
use uuid::Uuid;

use crate::error::AppError;

/// Runtime configuration read from `BINDU_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalConfig {
    /// Public identifier the local wallet connects with.
    pub identity: String,
    /// Connect the wallet at startup.
    pub autoconnect: bool,
    /// Seed for narrative selection; random when absent.
    pub seed: Option<u64>,
    /// Simulated latency of the token ledger.
    pub issue_latency: Duration,
    /// Whether the ledger refuses every mint.
    pub issue_fails: bool,
    /// Session timer configuration.
    pub timings: SessionTimings,
}

impl TerminalConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let mut timings = SessionTimings::default();
        if let Some(seconds) = parse::<u32>(&lookup, "BINDU_HIATUS_SECONDS")? {
            timings.hiatus_countdown = seconds;
        }
        if let Some(millis) = parse::<u64>(&lookup, "BINDU_TOKEN_LIFETIME_MS")? {
            timings.token_lifetime = Duration::from_millis(millis);
        }
        timings
            .validate()
            .map_err(|e| AppError::Config(e.to_string()))?;

        Ok(Self {
            identity: lookup("BINDU_IDENTITY")
                .map(|id| id.trim().to_owned())
                .filter(|id| !id.is_empty())
                .unwrap_or_else(generated_identity),
            autoconnect: parse_flag(&lookup, "BINDU_AUTOCONNECT")?.unwrap_or(true),
            seed: parse::<u64>(&lookup, "BINDU_SEED")?,
            issue_latency: Duration::from_millis(
                parse::<u64>(&lookup, "BINDU_ISSUE_LATENCY_MS")?.unwrap_or(0),
            ),
            issue_fails: parse_flag(&lookup, "BINDU_ISSUE_FAILS")?.unwrap_or(false),
            timings,
        })
    }
}

fn generated_identity() -> String {
    let suffix: String = Uuid::new_v4().simple().to_string().chars().take(12).collect();
    format!("initie-{suffix}")
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| AppError::Config(format!("{key} is invalid: {e}")))
        })
        .transpose()
}

fn parse_flag(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<bool>, AppError> {
    lookup(key)
        .map(|raw| match raw.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(AppError::Config(format!(
                "{key} must be a boolean, got {other:?}"
            ))),
        })
        .transpose()
}
