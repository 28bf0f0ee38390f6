//! Plain-text reports over the active set and the archive.
//!
//! Reports show calendar dates only, the execution time of tasks that carry a
//! completion date, and a placeholder wherever a stored timestamp cannot be
//! read.

use crate::task::domain::{Task, Timestamp};
use minijinja::Environment;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Text shown in place of a date or execution time that cannot be read.
pub const INVALID_TIMESTAMP_TEXT: &str = "invalid date";

const BANNER: &str = "==================================================";
const RULE: &str = "--------------------------------------------------";
const EMPTY_TEXT: &str = "No tasks to show.";

const REPORT_TEMPLATE: &str = "\
{{ banner }}
{{ heading }}
{{ banner }}
{% for task in tasks %}
ID: {{ task.id }}
Title: {{ task.title }}
Priority: {{ task.priority }}
Status: {{ task.status }}
Origin: {{ task.origin }}
{% if task.elapsed %}
Execution time: {{ task.elapsed }}
{% endif %}
Created: {{ task.created }}
{% if task.completed %}
Completed: {{ task.completed }}
{% endif %}
{% if task.description %}
Description: {{ task.description }}
{% endif %}
{{ rule }}
{% else %}
{{ empty }}
{% endfor %}
";

/// Which collection a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Tasks still in the active set.
    Active,
    /// Tasks moved to the archive after completion.
    Archived,
}

impl ReportKind {
    /// Returns the report heading.
    #[must_use]
    pub const fn heading(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE TASKS",
            Self::Archived => "ARCHIVED TASKS",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => f.write_str("active"),
            Self::Archived => f.write_str("archived"),
        }
    }
}

/// One task as presented in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    /// Task identifier.
    pub id: u64,
    /// Title.
    pub title: String,
    /// Priority display label.
    pub priority: String,
    /// Status display label.
    pub status: String,
    /// Origin display label.
    pub origin: String,
    /// Execution time, present once the task has a completion date.
    pub elapsed: Option<String>,
    /// Creation date.
    pub created: String,
    /// Completion date, if any.
    pub completed: Option<String>,
    /// Description, omitted when empty.
    pub description: Option<String>,
}

impl From<&Task> for ReportEntry {
    fn from(task: &Task) -> Self {
        let elapsed = task.elapsed().map(|result| {
            result.map_or_else(|_| INVALID_TIMESTAMP_TEXT.to_owned(), |time| time.to_string())
        });
        let description = Some(task.description())
            .filter(|text| !text.trim().is_empty())
            .map(str::to_owned);

        Self {
            id: task.id().value(),
            title: task.title().to_owned(),
            priority: task.priority().to_string(),
            status: task.status().to_string(),
            origin: task.origin().to_string(),
            elapsed,
            created: calendar_date(task.created_at()),
            completed: task.completed_at().map(calendar_date),
            description,
        }
    }
}

fn calendar_date(timestamp: &Timestamp) -> String {
    timestamp.parse().map_or_else(
        |_| INVALID_TIMESTAMP_TEXT.to_owned(),
        |value| value.date().to_string(),
    )
}

/// Errors raised while rendering a report.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("failed to render {kind} report: {reason}")]
pub struct ReportError {
    /// Report being rendered.
    pub kind: ReportKind,
    /// Template engine failure.
    pub reason: String,
}

#[derive(Serialize)]
struct ReportContext<'a> {
    banner: &'static str,
    rule: &'static str,
    empty: &'static str,
    heading: &'static str,
    tasks: &'a [ReportEntry],
}

/// A report ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskReport {
    kind: ReportKind,
    entries: Vec<ReportEntry>,
}

impl TaskReport {
    /// Builds a report over active tasks.
    #[must_use]
    pub fn active(tasks: &[Task]) -> Self {
        Self::new(ReportKind::Active, tasks)
    }

    /// Builds a report over archived tasks.
    #[must_use]
    pub fn archived(tasks: &[Task]) -> Self {
        Self::new(ReportKind::Archived, tasks)
    }

    fn new(kind: ReportKind, tasks: &[Task]) -> Self {
        Self {
            kind,
            entries: tasks.iter().map(ReportEntry::from).collect(),
        }
    }

    /// Returns the report kind.
    #[must_use]
    pub const fn kind(&self) -> ReportKind {
        self.kind
    }

    /// Returns the report entries in display order.
    #[must_use]
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// Renders the report as text.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] when the template cannot be rendered.
    pub fn render(&self) -> Result<String, ReportError> {
        let mut environment = Environment::new();
        environment.set_trim_blocks(true);
        environment.set_lstrip_blocks(true);
        let context = ReportContext {
            banner: BANNER,
            rule: RULE,
            empty: EMPTY_TEXT,
            heading: self.kind.heading(),
            tasks: &self.entries,
        };
        environment
            .render_str(REPORT_TEMPLATE, context)
            .map_err(|error| ReportError {
                kind: self.kind,
                reason: error.to_string(),
            })
    }
}
