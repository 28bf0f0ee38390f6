//! JSON file task store.

use camino::Utf8PathBuf;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::io::ErrorKind;

use super::record::TaskRecord;
use crate::task::{
    domain::Task,
    ports::{LoadSource, LoadedTasks, TaskStore, TaskStoreError, TaskStoreResult},
};

/// Default file name of the active task set.
pub const DEFAULT_ACTIVE_FILE: &str = "tarefas.json";

/// Default file name of the archive.
pub const DEFAULT_ARCHIVE_FILE: &str = "tarefas_arquivadas.json";

const INDENT: &[u8] = b"    ";

/// Location of the task files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFileLayout {
    /// Directory holding both files.
    pub data_dir: Utf8PathBuf,
    /// File name of the active task set, relative to `data_dir`.
    pub active_file: String,
    /// File name of the archive, relative to `data_dir`.
    pub archive_file: String,
}

impl TaskFileLayout {
    /// Creates a layout using the default file names inside `data_dir`.
    #[must_use]
    pub fn in_dir(data_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            active_file: DEFAULT_ACTIVE_FILE.to_owned(),
            archive_file: DEFAULT_ARCHIVE_FILE.to_owned(),
        }
    }
}

impl Default for TaskFileLayout {
    fn default() -> Self {
        Self::in_dir(".")
    }
}

/// Task store keeping each collection in a pretty-printed JSON array file.
///
/// Writes go to a sibling `.tmp` file that is then renamed over the target,
/// so a failed write leaves the previous contents in place.
#[derive(Debug)]
pub struct JsonFileTaskStore {
    dir: Dir,
    layout: TaskFileLayout,
}

impl JsonFileTaskStore {
    /// Opens the data directory, creating it when missing.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Unavailable`] when the directory cannot be
    /// created or opened.
    pub fn open(layout: TaskFileLayout) -> TaskStoreResult<Self> {
        let data_dir = layout.data_dir.as_path();
        Dir::create_ambient_dir_all(data_dir, ambient_authority())
            .map_err(|err| TaskStoreError::unavailable(data_dir.as_str(), err))?;
        let dir = Dir::open_ambient_dir(data_dir, ambient_authority())
            .map_err(|err| TaskStoreError::unavailable(data_dir.as_str(), err))?;
        Ok(Self { dir, layout })
    }

    /// Returns the file layout in use.
    #[must_use]
    pub const fn layout(&self) -> &TaskFileLayout {
        &self.layout
    }

    fn location(&self, file: &str) -> String {
        self.layout.data_dir.join(file).into_string()
    }

    fn ensure_exists(&self, file: &str) -> TaskStoreResult<()> {
        match self.dir.metadata(file) {
            Ok(_) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::info!(file = %self.location(file), "creating empty task file");
                self.write_collection(file, &[])
            }
            Err(err) => Err(TaskStoreError::unavailable(self.location(file), err)),
        }
    }

    fn read_collection(&self, file: &str) -> TaskStoreResult<LoadedTasks> {
        tracing::debug!(file = %self.location(file), "reading task file");
        let contents = match self.dir.read_to_string(file) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(LoadedTasks::missing()),
            Err(err) => return Err(TaskStoreError::unavailable(self.location(file), err)),
        };

        match serde_json::from_str::<Vec<TaskRecord>>(&contents) {
            Ok(records) => Ok(LoadedTasks::stored(
                records.into_iter().map(Task::from).collect(),
            )),
            Err(err) => Ok(LoadedTasks::malformed(err.to_string())),
        }
    }

    fn write_collection(&self, file: &str, tasks: &[Task]) -> TaskStoreResult<()> {
        let records: Vec<TaskRecord> = tasks.iter().map(TaskRecord::from).collect();
        let encoded = encode_pretty(&records)?;
        let staging = format!("{file}.tmp");

        self.dir
            .write(&staging, encoded)
            .map_err(|err| TaskStoreError::unavailable(self.location(&staging), err))?;
        self.dir
            .rename(&staging, &self.dir, file)
            .map_err(|err| TaskStoreError::unavailable(self.location(file), err))?;
        tracing::debug!(file = %self.location(file), count = tasks.len(), "wrote task file");
        Ok(())
    }
}

fn encode_pretty(records: &[TaskRecord]) -> TaskStoreResult<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(INDENT));
    records
        .serialize(&mut serializer)
        .map_err(|err| TaskStoreError::Encoding(err.to_string()))?;
    Ok(buffer)
}

impl TaskStore for JsonFileTaskStore {
    fn initialize(&self) -> TaskStoreResult<()> {
        self.ensure_exists(&self.layout.active_file)?;
        self.ensure_exists(&self.layout.archive_file)
    }

    fn load_active(&self) -> TaskStoreResult<LoadedTasks> {
        self.read_collection(&self.layout.active_file)
    }

    fn load_archive(&self) -> TaskStoreResult<LoadedTasks> {
        self.read_collection(&self.layout.archive_file)
    }

    fn save_active(&self, tasks: &[Task]) -> TaskStoreResult<()> {
        self.write_collection(&self.layout.active_file, tasks)
    }

    fn append_archive(&self, tasks: &[Task]) -> TaskStoreResult<()> {
        let file = self.layout.archive_file.as_str();
        let existing = self.read_collection(file)?;
        if let LoadSource::Malformed(reason) = existing.source() {
            tracing::warn!(
                file = %self.location(file),
                %reason,
                "archive file is malformed; rewriting it with the new entries only"
            );
        }

        let mut history = existing.into_tasks();
        history.extend_from_slice(tasks);
        self.write_collection(file, &history)
    }
}
