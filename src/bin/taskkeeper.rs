//! Interactive entry point for the task tracker.
//!
//! Usage:
//!
//! ```text
//! taskkeeper [--data-dir <dir>] [--active-file <name>] [--archive-file <name>]
//!            [--retention-days <days>]
//! ```
//!
//! Every option can also be set through the matching `TASKKEEPER_*`
//! environment variable. Diagnostics are written to stderr and filtered with
//! `RUST_LOG` (default `warn`), so the menu on stdout stays readable.

use clap::Parser;
use mockable::DefaultClock;
use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use taskkeeper::config::{Cli, TrackerConfig};
use taskkeeper::console::Session;
use taskkeeper::task::{adapters::json::JsonFileTaskStore, services::TaskLifecycleService};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Boxed error type for the fallible part of `main`.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report_fatal(&err),
    }
}

fn run() -> Result<(), BoxError> {
    let config = TrackerConfig::try_from(Cli::parse())?;
    tracing::debug!(?config, "loaded configuration");

    let store = JsonFileTaskStore::open(config.layout().clone())?;
    let service = TaskLifecycleService::new(Arc::new(store), Arc::new(DefaultClock))
        .with_retention(config.retention());
    let registry = service.load_registry()?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(service, registry, stdin.lock(), stdout.lock());
    session.run()?;
    Ok(())
}

#[expect(clippy::print_stderr, reason = "the last error line is addressed to the user")]
fn report_fatal(err: &BoxError) -> ExitCode {
    tracing::error!(error = %err, "taskkeeper stopped");
    eprintln!("Error: {err}");
    ExitCode::FAILURE
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
