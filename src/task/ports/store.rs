//! Store port for the active task set and the archive.

use crate::task::domain::Task;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Persistence contract for the two task collections.
///
/// Loading never fails because a collection is absent or malformed; those
/// conditions degrade to an empty collection described by [`LoadSource`].
/// Only genuine I/O failures surface as [`TaskStoreError`].
pub trait TaskStore: Send + Sync {
    /// Creates both collections empty when they do not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Unavailable`] when the backing storage cannot
    /// be inspected or written.
    fn initialize(&self) -> TaskStoreResult<()>;

    /// Loads the active task set.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Unavailable`] when the collection exists but
    /// cannot be read.
    fn load_active(&self) -> TaskStoreResult<LoadedTasks>;

    /// Loads the archive.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Unavailable`] when the collection exists but
    /// cannot be read.
    fn load_archive(&self) -> TaskStoreResult<LoadedTasks>;

    /// Replaces the active task set with `tasks`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError`] when the snapshot cannot be encoded or
    /// written; the previous collection is left in place.
    fn save_active(&self, tasks: &[Task]) -> TaskStoreResult<()>;

    /// Appends `tasks` to the archive, after the entries already stored.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError`] when the archive cannot be read, encoded, or
    /// written.
    fn append_archive(&self, tasks: &[Task]) -> TaskStoreResult<()>;
}

/// Where a loaded collection came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadSource {
    /// Read from storage.
    Stored,
    /// The collection did not exist; treated as empty.
    Missing,
    /// The collection had the wrong shape; treated as empty.
    Malformed(String),
}

/// Tasks returned by a load together with their provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedTasks {
    tasks: Vec<Task>,
    source: LoadSource,
}

impl LoadedTasks {
    /// Wraps tasks read from storage.
    #[must_use]
    pub const fn stored(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            source: LoadSource::Stored,
        }
    }

    /// Describes a collection that does not exist.
    #[must_use]
    pub const fn missing() -> Self {
        Self {
            tasks: Vec::new(),
            source: LoadSource::Missing,
        }
    }

    /// Describes a collection that could not be decoded.
    #[must_use]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self {
            tasks: Vec::new(),
            source: LoadSource::Malformed(reason.into()),
        }
    }

    /// Returns the loaded tasks.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Consumes the result and returns the loaded tasks.
    #[must_use]
    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }

    /// Returns where the tasks came from.
    #[must_use]
    pub const fn source(&self) -> &LoadSource {
        &self.source
    }

    /// Returns whether the load fell back to an empty collection.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        !matches!(self.source, LoadSource::Stored)
    }
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// Storage could not be read or written.
    #[error("task storage unavailable at {location}: {cause}")]
    Unavailable {
        /// Path or name of the collection involved.
        location: String,
        /// Underlying I/O failure.
        cause: Arc<std::io::Error>,
    },

    /// A task collection could not be encoded.
    #[error("failed to encode task collection: {0}")]
    Encoding(String),
}

impl TaskStoreError {
    /// Wraps an I/O failure for `location`.
    #[must_use]
    pub fn unavailable(location: impl Into<String>, cause: std::io::Error) -> Self {
        Self::Unavailable {
            location: location.into(),
            cause: Arc::new(cause),
        }
    }
}
