//! Domain model for the task lifecycle.
//!
//! The domain covers the task aggregate, its status state machine, elapsed
//! time computation, archive eligibility, and the in-memory registry of
//! active tasks. Persistence concerns stay outside of the domain boundary.

mod elapsed;
mod error;
mod ids;
mod registry;
mod retention;
mod status;
mod task;
mod timestamp;

pub use elapsed::ElapsedTime;
pub use error::{ParseLabelError, TaskDomainError};
pub use ids::TaskId;
pub use registry::TaskRegistry;
pub use retention::{ArchiveDecision, DEFAULT_RETENTION_DAYS, RetentionPolicy};
pub use status::{TaskOrigin, TaskPriority, TaskStatus};
pub use task::{PersistedTaskData, Task, TaskDetails};
pub use timestamp::Timestamp;
