//! In-memory registry of active tasks.

use super::{Task, TaskDomainError, TaskId, TaskStatus};

/// Active tasks in insertion order, plus the next identifier to hand out.
///
/// Once the highest possible identifier is in use no further identifier is
/// available; creation then fails rather than reusing one.
///
/// The registry is owned by the caller and passed explicitly into lifecycle
/// operations; only the lifecycle service mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRegistry {
    tasks: Vec<Task>,
    next_id: Option<TaskId>,
}

impl TaskRegistry {
    /// Creates an empty registry whose first task gets [`TaskId::FIRST`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: Some(TaskId::FIRST),
        }
    }

    /// Builds a registry from loaded active tasks.
    ///
    /// Archived tasks only contribute to identifier allocation so that an
    /// identifier is never reused after its task left the active set.
    #[must_use]
    pub fn from_tasks(active: Vec<Task>, archived: &[Task]) -> Self {
        let next_id = active
            .iter()
            .chain(archived)
            .map(Task::id)
            .max()
            .map_or(Some(TaskId::FIRST), TaskId::next);
        Self {
            tasks: active,
            next_id,
        }
    }

    /// Returns the active tasks in insertion order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the number of active tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns whether the registry holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Returns the identifier the next created task will receive, or `None`
    /// when identifiers are exhausted.
    #[must_use]
    pub const fn next_id(&self) -> Option<TaskId> {
        self.next_id
    }

    /// Finds an active task by identifier.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Returns the task currently in progress, if any.
    #[must_use]
    pub fn in_progress(&self) -> Option<&Task> {
        self.tasks
            .iter()
            .find(|task| task.status() == TaskStatus::InProgress)
    }

    pub(crate) fn get_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id() == id)
    }

    pub(crate) fn allocate_id(&mut self) -> Result<TaskId, TaskDomainError> {
        let id = self.next_id.ok_or(TaskDomainError::IdsExhausted)?;
        self.next_id = id.next();
        Ok(id)
    }

    pub(crate) fn insert(&mut self, task: Task) {
        let id = task.id();
        if self.next_id.is_some_and(|next| id >= next) {
            self.next_id = id.next();
        }
        self.tasks.push(task);
    }

    pub(crate) fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }
}

impl Default for TaskRegistry {
    fn default() -> Self {
        Self::new()
    }
}
