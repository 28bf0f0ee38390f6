//! Shared world state for archiving sweep BDD scenarios.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::test_helpers::FixedClock;
use chrono::NaiveDateTime;
use rstest::fixture;
use taskkeeper::task::{
    adapters::memory::InMemoryTaskStore,
    domain::{Task, TaskId, TaskRegistry},
    ports::{LoadedTasks, TaskStore, TaskStoreError, TaskStoreResult},
    services::{SweepSummary, TaskLifecycleError, TaskLifecycleService},
};

/// In-memory store whose archive writes can be made to fail.
#[derive(Clone, Default)]
pub struct ScenarioStore {
    inner: InMemoryTaskStore,
    archive_broken: Arc<AtomicBool>,
}

impl ScenarioStore {
    /// Makes every following archive write fail.
    pub fn break_archive(&self) {
        self.archive_broken.store(true, Ordering::SeqCst);
    }

    /// Returns the archived tasks.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory state is poisoned.
    pub fn archive(&self) -> TaskStoreResult<Vec<Task>> {
        self.inner.archive_snapshot()
    }
}

impl TaskStore for ScenarioStore {
    fn initialize(&self) -> TaskStoreResult<()> {
        self.inner.initialize()
    }

    fn load_active(&self) -> TaskStoreResult<LoadedTasks> {
        self.inner.load_active()
    }

    fn load_archive(&self) -> TaskStoreResult<LoadedTasks> {
        self.inner.load_archive()
    }

    fn save_active(&self, tasks: &[Task]) -> TaskStoreResult<()> {
        self.inner.save_active(tasks)
    }

    fn append_archive(&self, tasks: &[Task]) -> TaskStoreResult<()> {
        if self.archive_broken.load(Ordering::SeqCst) {
            return Err(TaskStoreError::unavailable(
                "scenario archive",
                io::Error::new(io::ErrorKind::PermissionDenied, "archive is read-only"),
            ));
        }
        self.inner.append_archive(tasks)
    }
}

/// Service type used by the BDD world.
pub type ScenarioService = TaskLifecycleService<ScenarioStore, FixedClock>;

/// Scenario world for archiving sweep behaviour tests.
pub struct ArchiveSweepWorld {
    pub store: ScenarioStore,
    pub clock: Arc<FixedClock>,
    pub service: ScenarioService,
    pub registry: TaskRegistry,
    pub last_task: Option<TaskId>,
    pub last_sweep: Option<Result<SweepSummary, TaskLifecycleError>>,
}

impl Default for ArchiveSweepWorld {
    fn default() -> Self {
        let store = ScenarioStore::default();
        let clock = Arc::new(FixedClock::at(NaiveDateTime::default()));
        let service = TaskLifecycleService::new(Arc::new(store.clone()), Arc::clone(&clock));

        Self {
            store,
            clock,
            service,
            registry: TaskRegistry::new(),
            last_task: None,
            last_sweep: None,
        }
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ArchiveSweepWorld {
    ArchiveSweepWorld::default()
}
