//! Local timestamps as stored with each task.

use super::TaskDomainError;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

const WRITE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

const READ_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// ISO-8601 local date-time text attached to a task.
///
/// The text is kept exactly as stored. A malformed value therefore only
/// surfaces as [`TaskDomainError::InvalidTimestamp`] when something needs the
/// instant it denotes, rather than rejecting the whole task file on load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    /// Formats a local date-time with microsecond precision.
    #[must_use]
    pub fn from_datetime(value: NaiveDateTime) -> Self {
        Self(value.format(WRITE_FORMAT).to_string())
    }

    /// Wraps stored text without validating it.
    #[must_use]
    pub fn from_raw(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the stored text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the stored text as a local date-time.
    ///
    /// Accepts date-times with `T` or space separators, optional seconds and
    /// fractional seconds, RFC 3339 values with an offset (converted to local
    /// time), and bare dates (taken as midnight).
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTimestamp`] when no accepted format
    /// matches.
    pub fn parse(&self) -> Result<NaiveDateTime, TaskDomainError> {
        let text = self.0.trim();
        READ_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
            .or_else(|| {
                DateTime::parse_from_rfc3339(text)
                    .ok()
                    .map(|value| value.with_timezone(&Local).naive_local())
            })
            .or_else(|| {
                NaiveDate::parse_from_str(text, "%Y-%m-%d")
                    .ok()
                    .map(|date| date.and_time(NaiveTime::MIN))
            })
            .ok_or_else(|| TaskDomainError::InvalidTimestamp(self.0.clone()))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
