//! Command-line and environment configuration.

use crate::task::{
    adapters::json::{DEFAULT_ACTIVE_FILE, DEFAULT_ARCHIVE_FILE, TaskFileLayout},
    domain::{DEFAULT_RETENTION_DAYS, RetentionPolicy},
};
use camino::Utf8PathBuf;
use clap::Parser;
use thiserror::Error;

/// Single-user task tracker with a prioritised lifecycle.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "taskkeeper", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the task files.
    #[arg(long, env = "TASKKEEPER_DATA_DIR", default_value = ".")]
    pub data_dir: Utf8PathBuf,

    /// File name of the active task set inside the data directory.
    #[arg(long, env = "TASKKEEPER_ACTIVE_FILE", default_value = DEFAULT_ACTIVE_FILE)]
    pub active_file: String,

    /// File name of the archive inside the data directory.
    #[arg(long, env = "TASKKEEPER_ARCHIVE_FILE", default_value = DEFAULT_ARCHIVE_FILE)]
    pub archive_file: String,

    /// Days a completed task stays active before the sweep archives it.
    #[arg(long, env = "TASKKEEPER_RETENTION_DAYS", default_value_t = DEFAULT_RETENTION_DAYS)]
    pub retention_days: u32,
}

/// Errors raised while validating configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The retention window is zero days.
    #[error("retention must be at least one day")]
    ZeroRetention,
    /// A task file name is empty.
    #[error("the {0} file name must not be empty")]
    EmptyFileName(&'static str),
    /// A task file name points outside the data directory.
    #[error("the {kind} file name '{name}' must not contain path separators")]
    NestedFileName {
        /// Which file was misconfigured.
        kind: &'static str,
        /// Offending name.
        name: String,
    },
    /// Both collections would share one file.
    #[error("the active and archive files must differ, both are '{0}'")]
    SharedFile(String),
}

/// Validated tracker configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    layout: TaskFileLayout,
    retention_days: u32,
}

impl TrackerConfig {
    /// Returns where the task files live.
    #[must_use]
    pub const fn layout(&self) -> &TaskFileLayout {
        &self.layout
    }

    /// Returns the configured retention window in days.
    #[must_use]
    pub const fn retention_days(&self) -> u32 {
        self.retention_days
    }

    /// Returns the retention policy for archiving sweeps.
    #[must_use]
    pub fn retention(&self) -> RetentionPolicy {
        RetentionPolicy::from_days(self.retention_days)
    }
}

impl TryFrom<Cli> for TrackerConfig {
    type Error = ConfigError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        if cli.retention_days == 0 {
            return Err(ConfigError::ZeroRetention);
        }
        let active_file = validate_file_name("active", &cli.active_file)?;
        let archive_file = validate_file_name("archive", &cli.archive_file)?;
        if active_file == archive_file {
            return Err(ConfigError::SharedFile(active_file));
        }

        Ok(Self {
            layout: TaskFileLayout {
                data_dir: cli.data_dir,
                active_file,
                archive_file,
            },
            retention_days: cli.retention_days,
        })
    }
}

fn validate_file_name(kind: &'static str, name: &str) -> Result<String, ConfigError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyFileName(kind));
    }
    if trimmed.contains(['/', '\\']) || trimmed == ".." || trimmed == "." {
        return Err(ConfigError::NestedFileName {
            kind,
            name: trimmed.to_owned(),
        });
    }
    Ok(trimmed.to_owned())
}
