//! Interactive console front end.
//!
//! The console shows a numbered menu, validates every answer before handing
//! it to [`crate::task::services::TaskLifecycleService`], and prints reports
//! rendered by [`crate::report`]. Diagnostics go through `tracing`; only
//! user-facing text is written to the output stream.

mod command;
mod prompt;
mod session;

pub use command::MenuCommand;
pub use prompt::{PromptError, PromptResult, Prompter};
pub use session::{Flow, Session, SessionError};
