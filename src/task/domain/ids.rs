//! Identifier type for the task domain.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Positive integer identifier of a task.
///
/// Identifiers are unique across the active set and the archive and are never
/// reassigned, so a persisted zero is rejected at deserialisation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct TaskId(u64);

impl TaskId {
    /// Identifier handed to the first task of an empty tracker.
    pub const FIRST: Self = Self(1);

    /// Creates a validated task identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTaskId`] when the value is zero.
    pub const fn new(value: u64) -> Result<Self, TaskDomainError> {
        if value == 0 {
            return Err(TaskDomainError::InvalidTaskId(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Returns the identifier that follows this one, or `None` once the
    /// numeric range is exhausted.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }
}

impl TryFrom<u64> for TaskId {
    type Error = TaskDomainError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskId> for u64 {
    fn from(id: TaskId) -> Self {
        id.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
