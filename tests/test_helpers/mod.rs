//! Shared clock and fixtures for integration tests.

use chrono::{DateTime, Local, NaiveDateTime, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use std::sync::{Mutex, PoisonError};

/// Clock frozen at a local date-time until a test advances it.
pub struct FixedClock {
    now: Mutex<NaiveDateTime>,
}

impl FixedClock {
    /// Creates a clock reading `now`.
    pub const fn at(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Creates a clock from `YYYY-MM-DDTHH:MM:SS` text.
    ///
    /// # Errors
    ///
    /// Returns an error when the text is not a valid date-time.
    pub fn parse(text: &str) -> Result<Self, chrono::ParseError> {
        local_datetime(text).map(Self::at)
    }

    /// Moves the clock forward.
    pub fn advance(&self, delta: TimeDelta) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += delta;
    }

    fn naive(&self) -> NaiveDateTime {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        let naive = self.naive();
        Local
            .from_local_datetime(&naive)
            .earliest()
            .unwrap_or_else(|| Local.from_utc_datetime(&naive))
    }

    fn utc(&self) -> DateTime<Utc> {
        self.local().with_timezone(&Utc)
    }
}

/// Parses `YYYY-MM-DDTHH:MM:SS` text as a naive local date-time.
///
/// # Errors
///
/// Returns an error when the text is not a valid date-time.
pub fn local_datetime(text: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S")
}
