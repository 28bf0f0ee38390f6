//! Execution time between task creation and completion.

use super::{TaskDomainError, Timestamp};
use chrono::TimeDelta;
use std::fmt;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;

/// Elapsed time broken down into whole days, hours, and minutes.
///
/// Seconds are discarded. A negative span keeps a negative day count with a
/// non-negative hour and minute remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElapsedTime {
    days: i64,
    hours: i64,
    minutes: i64,
}

impl ElapsedTime {
    /// Computes the time from `created_at` to `completed_at`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTimestamp`] when either timestamp
    /// cannot be parsed.
    pub fn between(
        created_at: &Timestamp,
        completed_at: &Timestamp,
    ) -> Result<Self, TaskDomainError> {
        let start = created_at.parse()?;
        let end = completed_at.parse()?;
        Ok(Self::from_delta(end - start))
    }

    /// Breaks a time span down into days, hours, and minutes.
    #[must_use]
    pub fn from_delta(delta: TimeDelta) -> Self {
        let total = delta.num_seconds();
        let remainder = total.rem_euclid(SECONDS_PER_DAY);
        Self {
            days: total.div_euclid(SECONDS_PER_DAY),
            hours: remainder.div_euclid(SECONDS_PER_HOUR),
            minutes: remainder
                .rem_euclid(SECONDS_PER_HOUR)
                .div_euclid(SECONDS_PER_MINUTE),
        }
    }

    /// Returns the whole days.
    #[must_use]
    pub const fn days(self) -> i64 {
        self.days
    }

    /// Returns the whole hours left after removing days.
    #[must_use]
    pub const fn hours(self) -> i64 {
        self.hours
    }

    /// Returns the whole minutes left after removing hours.
    #[must_use]
    pub const fn minutes(self) -> i64 {
        self.minutes
    }
}

impl fmt::Display for ElapsedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} days, {}h{}m", self.days, self.hours, self.minutes)
    }
}
