//! Task lifecycle management for Taskkeeper.
//!
//! This module covers creating tasks, starting the most urgent pending task,
//! updating priorities, completing and logically deleting tasks, and sweeping
//! expired or deleted tasks into the archive. The active set lives in an
//! explicit [`domain::TaskRegistry`] owned by the caller, and every status
//! change goes through the domain state machine. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
