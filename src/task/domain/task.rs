//! Task aggregate root.

use super::{
    ElapsedTime, TaskDomainError, TaskId, TaskOrigin, TaskPriority, TaskStatus, Timestamp,
};

/// Validated user-supplied details of a task about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetails {
    title: String,
    description: String,
    priority: TaskPriority,
    origin: TaskOrigin,
}

impl TaskDetails {
    /// Creates task details with an empty description.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank.
    pub fn new(
        title: impl Into<String>,
        priority: TaskPriority,
        origin: TaskOrigin,
    ) -> Result<Self, TaskDomainError> {
        let raw_title = title.into();
        let trimmed = raw_title.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }

        Ok(Self {
            title: trimmed.to_owned(),
            description: String::new(),
            priority,
            origin,
        })
    }

    /// Sets the free-form description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    priority: TaskPriority,
    status: TaskStatus,
    origin: TaskOrigin,
    created_at: Timestamp,
    completed_at: Option<Timestamp>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description, possibly empty.
    pub description: String,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted origin.
    pub origin: TaskOrigin,
    /// Persisted creation timestamp.
    pub created_at: Timestamp,
    /// Persisted completion timestamp, if the task was ever completed.
    pub completed_at: Option<Timestamp>,
}

impl Task {
    /// Creates a pending task.
    #[must_use]
    pub fn new(id: TaskId, details: TaskDetails, created_at: Timestamp) -> Self {
        Self {
            id,
            title: details.title,
            description: details.description,
            priority: details.priority,
            status: TaskStatus::Pending,
            origin: details.origin,
            created_at,
            completed_at: None,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            priority: data.priority,
            status: data.status,
            origin: data.origin,
            created_at: data.created_at,
            completed_at: data.completed_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, empty when none was given.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the origin.
    #[must_use]
    pub const fn origin(&self) -> TaskOrigin {
        self.origin
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns the completion timestamp, if the task was ever completed.
    #[must_use]
    pub const fn completed_at(&self) -> Option<&Timestamp> {
        self.completed_at.as_ref()
    }

    /// Returns the execution time when the task has a completion timestamp.
    #[must_use]
    pub fn elapsed(&self) -> Option<Result<ElapsedTime, TaskDomainError>> {
        self.completed_at
            .as_ref()
            .map(|completed_at| ElapsedTime::between(&self.created_at, completed_at))
    }

    /// Replaces the priority. Allowed in every status.
    pub const fn set_priority(&mut self, priority: TaskPriority) {
        self.priority = priority;
    }

    /// Moves the task to [`TaskStatus::InProgress`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStateTransition`] unless the task is
    /// pending.
    pub fn start(&mut self) -> Result<(), TaskDomainError> {
        self.transition_to(TaskStatus::InProgress)
    }

    /// Marks the task done and returns its completion timestamp.
    ///
    /// The completion timestamp is only recorded when absent, so a task
    /// completed once keeps its original completion time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStateTransition`] when the current
    /// status cannot move to [`TaskStatus::Done`], including when the task is
    /// already done.
    pub fn complete(&mut self, now: Timestamp) -> Result<Timestamp, TaskDomainError> {
        self.ensure_transition(TaskStatus::Done)?;
        let completed_at = self.completed_at.get_or_insert(now).clone();
        self.status = TaskStatus::Done;
        Ok(completed_at)
    }

    /// Logically deletes the task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStateTransition`] when the task has
    /// already been archived.
    pub fn mark_deleted(&mut self) -> Result<(), TaskDomainError> {
        self.transition_to(TaskStatus::Deleted)
    }

    /// Marks a done task as archived.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStateTransition`] unless the task is
    /// done.
    pub fn archive(&mut self) -> Result<(), TaskDomainError> {
        self.transition_to(TaskStatus::Archived)
    }

    fn transition_to(&mut self, target: TaskStatus) -> Result<(), TaskDomainError> {
        self.ensure_transition(target)?;
        self.status = target;
        Ok(())
    }

    const fn ensure_transition(&self, target: TaskStatus) -> Result<(), TaskDomainError> {
        if self.status.can_transition_to(target) {
            Ok(())
        } else {
            Err(TaskDomainError::InvalidStateTransition {
                task_id: self.id,
                from: self.status,
                to: target,
            })
        }
    }
}
