//! Error types for task domain validation and parsing.

use super::{TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task identifier is not a positive integer.
    #[error("invalid task identifier {0}, expected a positive integer")]
    InvalidTaskId(u64),

    /// Every identifier has been handed out.
    #[error("no task identifiers left")]
    IdsExhausted,

    /// A stored timestamp could not be parsed as an ISO-8601 date-time.
    #[error("invalid timestamp '{0}'")]
    InvalidTimestamp(String),

    /// The requested status change is not permitted by the lifecycle.
    #[error("task {task_id} cannot move from {from} to {to}")]
    InvalidStateTransition {
        /// Task whose transition was rejected.
        task_id: TaskId,
        /// Current status.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
    },
}

/// Error returned when a priority, status, or origin label is not recognised.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct ParseLabelError {
    /// Name of the enumeration being parsed.
    pub kind: &'static str,
    /// Rejected input.
    pub value: String,
}
