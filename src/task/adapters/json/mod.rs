//! JSON file adapters for task persistence.

mod record;
mod store;

pub use record::TaskRecord;
pub use store::{DEFAULT_ACTIVE_FILE, DEFAULT_ARCHIVE_FILE, JsonFileTaskStore, TaskFileLayout};
