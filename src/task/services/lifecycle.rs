//! Service layer driving the task lifecycle over an explicit registry.

use crate::task::{
    domain::{
        ArchiveDecision, ElapsedTime, RetentionPolicy, Task, TaskDetails, TaskDomainError, TaskId,
        TaskOrigin, TaskPriority, TaskRegistry, TaskStatus, Timestamp,
    },
    ports::{LoadSource, LoadedTasks, TaskStore, TaskStoreError},
};
use chrono::NaiveDateTime;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    priority: TaskPriority,
    origin: TaskOrigin,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(title: impl Into<String>, priority: TaskPriority, origin: TaskOrigin) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority,
            origin,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Result of asking for the next task to work on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskSelection {
    /// The returned task moved from pending to in progress.
    Started(Task),
    /// Another task is already in progress; nothing changed.
    AlreadyInProgress(Task),
    /// No pending task exists at any priority.
    NoneAvailable,
}

/// Result of completing a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskCompletion {
    /// The task is now done.
    Completed {
        /// Task after completion.
        task: Task,
        /// Time from creation to completion, or the timestamp error that
        /// prevented computing it.
        elapsed: Result<ElapsedTime, TaskDomainError>,
    },
    /// The task was already done; nothing changed.
    AlreadyDone(Task),
}

/// Summary of an archiving sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepSummary {
    archived: Vec<TaskId>,
    kept_with_invalid_completion: Vec<TaskId>,
}

impl SweepSummary {
    /// Returns the identifiers moved to the archive, in active-set order.
    #[must_use]
    pub fn archived(&self) -> &[TaskId] {
        &self.archived
    }

    /// Returns done tasks kept because their completion date is malformed.
    #[must_use]
    pub fn kept_with_invalid_completion(&self) -> &[TaskId] {
        &self.kept_with_invalid_completion
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// No active task has the identifier.
    #[error("task {0} not found in the active list")]
    NotFound(TaskId),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The task store failed.
    #[error(transparent)]
    Store(#[from] TaskStoreError),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
///
/// The service owns the store and clock; the active set is a
/// [`TaskRegistry`] owned by the caller and passed to each operation.
pub struct TaskLifecycleService<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
    retention: RetentionPolicy,
}

impl<S, C> Clone for TaskLifecycleService<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
            retention: self.retention,
        }
    }
}

impl<S, C> TaskLifecycleService<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    /// Creates a service with the default retention policy.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            store,
            clock,
            retention: RetentionPolicy::default(),
        }
    }

    /// Replaces the retention policy used by [`Self::archive_sweep`].
    #[must_use]
    pub const fn with_retention(mut self, retention: RetentionPolicy) -> Self {
        self.retention = retention;
        self
    }

    /// Returns the retention policy.
    #[must_use]
    pub const fn retention(&self) -> RetentionPolicy {
        self.retention
    }

    /// Initialises the store and loads the active set into a new registry.
    ///
    /// Missing or malformed collections are logged and treated as empty.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Store`] when storage cannot be accessed.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn load_registry(&self) -> TaskLifecycleResult<TaskRegistry> {
        self.store.initialize()?;
        let active = self.store.load_active()?;
        log_degradation("active", &active);
        let archive = self.store.load_archive()?;
        log_degradation("archive", &archive);

        let registry = TaskRegistry::from_tasks(active.into_tasks(), archive.tasks());
        tracing::info!(
            active = registry.len(),
            next_id = ?registry.next_id(),
            "loaded task registry"
        );
        Ok(registry)
    }

    /// Creates a pending task with a fresh identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the title is blank or no
    /// identifier is left to hand out.
    #[tracing::instrument(level = "debug", skip(self, registry))]
    pub fn create_task(
        &self,
        registry: &mut TaskRegistry,
        request: CreateTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let mut details = TaskDetails::new(request.title, request.priority, request.origin)?;
        if let Some(description) = request.description {
            details = details.with_description(description);
        }

        let task = Task::new(registry.allocate_id()?, details, self.timestamp());
        registry.insert(task.clone());
        tracing::info!(task_id = %task.id(), priority = %task.priority(), "created task");
        Ok(task)
    }

    /// Starts the most urgent pending task unless one is already in progress.
    ///
    /// Priorities are scanned from urgent to low; within a priority the
    /// earliest inserted pending task wins.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] if the selected task refuses to
    /// start, which cannot happen for a pending task.
    #[tracing::instrument(level = "debug", skip(self, registry))]
    pub fn select_next_by_urgency(
        &self,
        registry: &mut TaskRegistry,
    ) -> TaskLifecycleResult<TaskSelection> {
        if let Some(active) = registry.in_progress() {
            tracing::info!(task_id = %active.id(), "a task is already in progress");
            return Ok(TaskSelection::AlreadyInProgress(active.clone()));
        }

        let candidate = TaskPriority::BY_URGENCY.iter().find_map(|priority| {
            registry
                .tasks()
                .iter()
                .find(|task| task.priority() == *priority && task.status() == TaskStatus::Pending)
                .map(Task::id)
        });
        let Some(task) = candidate.and_then(|id| registry.get_mut(id)) else {
            tracing::info!("no pending task available");
            return Ok(TaskSelection::NoneAvailable);
        };

        task.start()?;
        tracing::info!(task_id = %task.id(), priority = %task.priority(), "started task");
        Ok(TaskSelection::Started(task.clone()))
    }

    /// Replaces the priority of an active task, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when no active task has `id`.
    #[tracing::instrument(level = "debug", skip(self, registry))]
    pub fn update_priority(
        &self,
        registry: &mut TaskRegistry,
        id: TaskId,
        priority: TaskPriority,
    ) -> TaskLifecycleResult<Task> {
        let task = registry
            .get_mut(id)
            .ok_or(TaskLifecycleError::NotFound(id))?;
        task.set_priority(priority);
        tracing::info!(task_id = %id, %priority, "updated task priority");
        Ok(task.clone())
    }

    /// Marks an active task done and reports its execution time.
    ///
    /// Completing a task that is already done changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when no active task has `id`.
    #[tracing::instrument(level = "debug", skip(self, registry))]
    pub fn complete_task(
        &self,
        registry: &mut TaskRegistry,
        id: TaskId,
    ) -> TaskLifecycleResult<TaskCompletion> {
        let now = self.timestamp();
        let task = registry
            .get_mut(id)
            .ok_or(TaskLifecycleError::NotFound(id))?;
        if task.status() == TaskStatus::Done {
            tracing::info!(task_id = %id, "task already done");
            return Ok(TaskCompletion::AlreadyDone(task.clone()));
        }

        let completed_at = task.complete(now)?;
        let elapsed = ElapsedTime::between(task.created_at(), &completed_at);
        match &elapsed {
            Ok(duration) => {
                tracing::info!(task_id = %id, elapsed = %duration, "completed task");
            }
            Err(err) => {
                tracing::warn!(
                    task_id = %id,
                    error = %err,
                    "completed task with unreadable timestamps"
                );
            }
        }
        Ok(TaskCompletion::Completed {
            task: task.clone(),
            elapsed,
        })
    }

    /// Logically deletes an active task, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when no active task has `id`.
    #[tracing::instrument(level = "debug", skip(self, registry))]
    pub fn delete_task(
        &self,
        registry: &mut TaskRegistry,
        id: TaskId,
    ) -> TaskLifecycleResult<Task> {
        let task = registry
            .get_mut(id)
            .ok_or(TaskLifecycleError::NotFound(id))?;
        task.mark_deleted()?;
        tracing::info!(task_id = %id, "deleted task");
        Ok(task.clone())
    }

    /// Moves expired done tasks and deleted tasks into the archive.
    ///
    /// Expired done tasks are archived with status [`TaskStatus::Archived`];
    /// deleted tasks keep [`TaskStatus::Deleted`]. The registry is only
    /// updated after the archive write succeeds, and the archive is not
    /// touched at all when nothing is eligible.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Store`] when the archive cannot be
    /// written; the registry is then left unchanged.
    #[tracing::instrument(level = "debug", skip(self, registry))]
    pub fn archive_sweep(&self, registry: &mut TaskRegistry) -> TaskLifecycleResult<SweepSummary> {
        let now = self.now();
        let mut to_archive = Vec::new();
        let mut to_keep = Vec::new();
        let mut summary = SweepSummary::default();

        for task in registry.tasks() {
            let decision = self.retention.assess(task, now);
            if let ArchiveDecision::InvalidCompletion(err) = &decision {
                tracing::warn!(
                    task_id = %task.id(),
                    error = %err,
                    "keeping done task with malformed completion date"
                );
                summary.kept_with_invalid_completion.push(task.id());
            }
            if !decision.leaves_active_set() {
                to_keep.push(task.clone());
                continue;
            }

            let mut leaving = task.clone();
            if decision == ArchiveDecision::Expired {
                leaving.archive()?;
            }
            to_archive.push(leaving);
        }

        if to_archive.is_empty() {
            tracing::info!("no tasks to archive");
            return Ok(summary);
        }

        self.store.append_archive(&to_archive)?;
        summary.archived = to_archive.iter().map(Task::id).collect();
        registry.replace_all(to_keep);
        tracing::info!(archived = summary.archived.len(), "archived tasks");
        Ok(summary)
    }

    /// Writes the registry to the store as the new active set.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Store`] when the write fails.
    #[tracing::instrument(level = "debug", skip(self, registry))]
    pub fn save(&self, registry: &TaskRegistry) -> TaskLifecycleResult<()> {
        self.store.save_active(registry.tasks())?;
        tracing::info!(count = registry.len(), "saved active tasks");
        Ok(())
    }

    /// Returns active tasks for reporting, excluding deleted and archived ones.
    #[must_use]
    pub fn active_tasks(&self, registry: &TaskRegistry) -> Vec<Task> {
        registry
            .tasks()
            .iter()
            .filter(|task| !matches!(task.status(), TaskStatus::Archived | TaskStatus::Deleted))
            .cloned()
            .collect()
    }

    /// Returns archived tasks for reporting.
    ///
    /// Deleted tasks that were swept into the archive stay in storage but are
    /// left out.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Store`] when the archive cannot be read.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn archived_tasks(&self) -> TaskLifecycleResult<Vec<Task>> {
        let archive = self.store.load_archive()?;
        log_degradation("archive", &archive);
        Ok(archive
            .into_tasks()
            .into_iter()
            .filter(|task| task.status() == TaskStatus::Archived)
            .collect())
    }

    fn now(&self) -> NaiveDateTime {
        self.clock.local().naive_local()
    }

    fn timestamp(&self) -> Timestamp {
        Timestamp::from_datetime(self.now())
    }
}

fn log_degradation(collection: &str, loaded: &LoadedTasks) {
    match loaded.source() {
        LoadSource::Stored => {}
        LoadSource::Missing => {
            tracing::warn!(collection, "task collection not found; starting empty");
        }
        LoadSource::Malformed(reason) => {
            tracing::warn!(collection, %reason, "task collection is malformed; starting empty");
        }
    }
}
