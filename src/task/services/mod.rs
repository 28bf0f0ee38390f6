//! Application services for task lifecycle orchestration.

mod lifecycle;

pub use lifecycle::{
    CreateTaskRequest, SweepSummary, TaskCompletion, TaskLifecycleError, TaskLifecycleResult,
    TaskLifecycleService, TaskSelection,
};
