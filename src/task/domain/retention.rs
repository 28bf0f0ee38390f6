//! Archive eligibility rules applied by the archiving sweep.

use super::{Task, TaskDomainError, TaskStatus};
use chrono::{NaiveDateTime, TimeDelta};

/// Number of days a done task stays in the active set by default.
pub const DEFAULT_RETENTION_DAYS: u32 = 7;

/// Outcome of assessing one active task during a sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveDecision {
    /// The task stays in the active set.
    Keep,
    /// The task is done and its retention window has passed; it is archived
    /// with status [`TaskStatus::Archived`].
    Expired,
    /// The task was logically deleted; it is archived with its status intact.
    Discarded,
    /// The task already carries [`TaskStatus::Archived`] and is moved out
    /// unchanged.
    AlreadyArchived,
    /// The task is done but its completion timestamp cannot be parsed, so it
    /// is kept.
    InvalidCompletion(TaskDomainError),
}

impl ArchiveDecision {
    /// Returns whether the task leaves the active set.
    #[must_use]
    pub const fn leaves_active_set(&self) -> bool {
        matches!(self, Self::Expired | Self::Discarded | Self::AlreadyArchived)
    }
}

/// How long completed tasks remain in the active set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    window: TimeDelta,
}

impl RetentionPolicy {
    /// Creates a policy from an explicit window.
    #[must_use]
    pub const fn new(window: TimeDelta) -> Self {
        Self { window }
    }

    /// Creates a policy keeping done tasks for `days` days.
    #[must_use]
    pub fn from_days(days: u32) -> Self {
        Self::new(TimeDelta::days(i64::from(days)))
    }

    /// Returns the retention window.
    #[must_use]
    pub const fn window(&self) -> TimeDelta {
        self.window
    }

    /// Decides whether `task` leaves the active set at `now`.
    ///
    /// A done task expires only when strictly more than the window has
    /// passed since completion.
    #[must_use]
    pub fn assess(&self, task: &Task, now: NaiveDateTime) -> ArchiveDecision {
        match task.status() {
            TaskStatus::Pending | TaskStatus::InProgress => ArchiveDecision::Keep,
            TaskStatus::Deleted => ArchiveDecision::Discarded,
            TaskStatus::Archived => ArchiveDecision::AlreadyArchived,
            TaskStatus::Done => {
                let Some(completed_at) = task.completed_at() else {
                    return ArchiveDecision::Keep;
                };
                match completed_at.parse() {
                    Ok(completed) if now - completed > self.window => ArchiveDecision::Expired,
                    Ok(_) => ArchiveDecision::Keep,
                    Err(err) => ArchiveDecision::InvalidCompletion(err),
                }
            }
        }
    }
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self::from_days(DEFAULT_RETENTION_DAYS)
    }
}
