//! In-memory task store for tests and embedding.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::Task,
    ports::{LoadedTasks, TaskStore, TaskStoreError, TaskStoreResult},
};

const LOCATION: &str = "in-memory task store";

/// Thread-safe in-memory task store.
///
/// A collection that was never initialised or written loads as
/// [`LoadedTasks::missing`], mirroring a file that does not exist.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    active: Option<Vec<Task>>,
    archive: Option<Vec<Task>>,
    archive_writes: usize,
}

impl InMemoryTaskStore {
    /// Creates a store with neither collection present.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with both collections.
    #[must_use]
    pub fn with_collections(active: Vec<Task>, archive: Vec<Task>) -> Self {
        let state = InMemoryTaskState {
            active: Some(active),
            archive: Some(archive),
            archive_writes: 0,
        };
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Returns the stored active set, empty when never written.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Unavailable`] when the state lock is poisoned.
    pub fn active_snapshot(&self) -> TaskStoreResult<Vec<Task>> {
        Ok(self.read_state()?.active.clone().unwrap_or_default())
    }

    /// Returns the stored archive, empty when never written.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Unavailable`] when the state lock is poisoned.
    pub fn archive_snapshot(&self) -> TaskStoreResult<Vec<Task>> {
        Ok(self.read_state()?.archive.clone().unwrap_or_default())
    }

    /// Returns how many times the archive has been appended to.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Unavailable`] when the state lock is poisoned.
    pub fn archive_writes(&self) -> TaskStoreResult<usize> {
        Ok(self.read_state()?.archive_writes)
    }

    fn read_state(&self) -> TaskStoreResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskStoreError::unavailable(LOCATION, std::io::Error::other(err.to_string()))
        })
    }

    fn write_state(&self) -> TaskStoreResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskStoreError::unavailable(LOCATION, std::io::Error::other(err.to_string()))
        })
    }
}

fn load(collection: Option<&[Task]>) -> LoadedTasks {
    collection.map_or_else(LoadedTasks::missing, |tasks| {
        LoadedTasks::stored(tasks.to_vec())
    })
}

impl TaskStore for InMemoryTaskStore {
    fn initialize(&self) -> TaskStoreResult<()> {
        let mut state = self.write_state()?;
        state.active.get_or_insert_with(Vec::new);
        state.archive.get_or_insert_with(Vec::new);
        Ok(())
    }

    fn load_active(&self) -> TaskStoreResult<LoadedTasks> {
        Ok(load(self.read_state()?.active.as_deref()))
    }

    fn load_archive(&self) -> TaskStoreResult<LoadedTasks> {
        Ok(load(self.read_state()?.archive.as_deref()))
    }

    fn save_active(&self, tasks: &[Task]) -> TaskStoreResult<()> {
        self.write_state()?.active = Some(tasks.to_vec());
        Ok(())
    }

    fn append_archive(&self, tasks: &[Task]) -> TaskStoreResult<()> {
        let mut state = self.write_state()?;
        state
            .archive
            .get_or_insert_with(Vec::new)
            .extend_from_slice(tasks);
        state.archive_writes += 1;
        Ok(())
    }
}
