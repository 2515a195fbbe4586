//! Frozen wall clock for tests that assert issue timestamps.

use bindu_core::clock::Clock;
use chrono::{DateTime, TimeZone, Utc};

/// A clock stopped at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Stops the clock at the given UTC calendar time.
    ///
    /// # Panics
    ///
    /// Panics if the fields do not form a valid date and time.
    #[must_use]
    pub fn at(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Self {
        Self(
            Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
                .single()
                .expect("valid calendar time"),
        )
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
