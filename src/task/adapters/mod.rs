//! Adapter implementations for task lifecycle ports.
//!
//! - [`json`] persists both collections as JSON files in a data directory.
//! - [`memory`] keeps them in process memory.

pub mod json;
pub mod memory;
