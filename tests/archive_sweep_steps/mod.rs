//! Step definitions for archiving sweep scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
