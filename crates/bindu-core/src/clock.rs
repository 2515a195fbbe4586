//! Wall-clock time, injected so issue timestamps are reproducible in tests.
//!
//! Session timers do not read this clock; they run on tokio time.

use chrono::{DateTime, SecondsFormat, Utc};

/// Source of wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Current time as an RFC 3339 UTC timestamp with second precision,
    /// the form stored in token metadata.
    fn timestamp(&self) -> String {
        self.now().to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// Clock backed by the system time.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
