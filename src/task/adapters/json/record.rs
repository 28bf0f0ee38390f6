//! Serde record model for task files.

use serde::{Deserialize, Serialize};

use crate::task::domain::{
    PersistedTaskData, Task, TaskId, TaskOrigin, TaskPriority, TaskStatus, Timestamp,
};

/// One task as written to the active-set and archive files.
///
/// Field names and enumeration labels follow the established file format so
/// existing task files keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Task identifier.
    #[serde(rename = "ID")]
    pub id: TaskId,
    /// Title.
    #[serde(rename = "Título")]
    pub title: String,
    /// Description, possibly empty.
    #[serde(rename = "Descrição", default)]
    pub description: String,
    /// Priority label.
    #[serde(rename = "Prioridade")]
    pub priority: TaskPriority,
    /// Status label.
    #[serde(rename = "Status")]
    pub status: TaskStatus,
    /// Origin label.
    #[serde(rename = "Origem")]
    pub origin: TaskOrigin,
    /// ISO-8601 creation timestamp.
    #[serde(rename = "Data de Criação")]
    pub created_at: Timestamp,
    /// ISO-8601 completion timestamp, `null` until completed.
    #[serde(rename = "Data de Conclusão", default)]
    pub completed_at: Option<Timestamp>,
}

impl From<&Task> for TaskRecord {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id(),
            title: task.title().to_owned(),
            description: task.description().to_owned(),
            priority: task.priority(),
            status: task.status(),
            origin: task.origin(),
            created_at: task.created_at().clone(),
            completed_at: task.completed_at().cloned(),
        }
    }
}

impl From<TaskRecord> for Task {
    fn from(record: TaskRecord) -> Self {
        Self::from_persisted(PersistedTaskData {
            id: record.id,
            title: record.title,
            description: record.description,
            priority: record.priority,
            status: record.status,
            origin: record.origin,
            created_at: record.created_at,
            completed_at: record.completed_at,
        })
    }
}
