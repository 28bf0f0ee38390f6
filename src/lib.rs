//! Taskkeeper: a single-user task tracker.
//!
//! Tasks move through a prioritised lifecycle (pending, in progress, done)
//! with at most one task in progress at a time. Completed tasks stay in the
//! active set for a retention window before an archiving sweep moves them,
//! together with logically deleted tasks, to an append-only archive.
//!
//! # Architecture
//!
//! Taskkeeper follows hexagonal architecture principles:
//!
//! - **Domain**: task aggregate, state machine, and retention rules
//! - **Ports**: the storage contract for the active set and the archive
//! - **Adapters**: JSON file and in-memory stores
//!
//! # Modules
//!
//! - [`task`]: task lifecycle domain, storage, and orchestration
//! - [`report`]: text reports over the active set and the archive
//! - [`console`]: interactive menu front end
//! - [`config`]: command-line and environment configuration

pub mod config;
pub mod console;
pub mod report;
pub mod task;
