//! Port contracts for task lifecycle management.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod store;

pub use store::{LoadSource, LoadedTasks, TaskStore, TaskStoreError, TaskStoreResult};
