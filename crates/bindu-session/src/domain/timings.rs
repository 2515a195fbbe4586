//! Timing and token configuration for a session.

use std::time::Duration;

use bindu_core::error::DomainError;

/// Delays and periods driving the session timers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTimings {
    /// How long the glitch flag stays raised after a choice.
    pub glitch_flash: Duration,
    /// Delay from choice receipt to entering the hiatus.
    pub hiatus_delay: Duration,
    /// Period of the hiatus countdown tick.
    pub hiatus_tick: Duration,
    /// Lifetime of an issued token before it is destroyed.
    pub token_lifetime: Duration,
    /// Countdown value the hiatus starts from.
    pub hiatus_countdown: u32,
}

impl Default for SessionTimings {
    fn default() -> Self {
        Self {
            glitch_flash: Duration::from_millis(500),
            hiatus_delay: Duration::from_millis(3000),
            hiatus_tick: Duration::from_millis(1000),
            token_lifetime: Duration::from_millis(20_000),
            hiatus_countdown: 20,
        }
    }
}

impl SessionTimings {
    /// Checks that the timings can drive a session.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` for a zero countdown or a zero tick
    /// period.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.hiatus_countdown == 0 {
            return Err(DomainError::Validation(
                "hiatus countdown must be at least 1".to_owned(),
            ));
        }
        if self.hiatus_tick.is_zero() {
            return Err(DomainError::Validation(
                "hiatus tick period must be non-zero".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Fixed descriptive fields of every issued token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenTemplate {
    /// Collectible name.
    pub name: String,
    /// Collectible symbol.
    pub symbol: String,
    /// Off-chain metadata URI.
    pub uri: String,
    /// Royalty in basis points.
    pub seller_fee_basis_points: u16,
}

impl Default for TokenTemplate {
    fn default() -> Self {
        Self {
            name: "Écho de Bindu".to_owned(),
            symbol: "BINDU".to_owned(),
            uri: "https://arweave.net/e1hZcOJ5-nGFs1-H22v8gPS9-r2_3-K2y-1".to_owned(),
            seller_fee_basis_points: 0,
        }
    }
}
