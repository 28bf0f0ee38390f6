//! Then steps for archiving sweep BDD scenarios.

use super::world::ArchiveSweepWorld;
use rstest_bdd_macros::then;
use taskkeeper::task::{domain::TaskStatus, ports::TaskStoreError, services::TaskLifecycleError};

#[then("the archive size is {count:usize}")]
fn archive_size_is(world: &ArchiveSweepWorld, count: usize) -> Result<(), eyre::Report> {
    let archived = world.store.archive()?;
    if archived.len() != count {
        return Err(eyre::eyre!(
            "expected {count} archived tasks, found {}",
            archived.len()
        ));
    }
    Ok(())
}

#[then("the active list size is {count:usize}")]
fn active_size_is(world: &ArchiveSweepWorld, count: usize) -> Result<(), eyre::Report> {
    if world.registry.len() != count {
        return Err(eyre::eyre!(
            "expected {count} active tasks, found {}",
            world.registry.len()
        ));
    }
    Ok(())
}

#[then(r#"the archived task has status "{status}""#)]
fn archived_task_status(world: &ArchiveSweepWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let archived = world.store.archive()?;
    let task = archived
        .last()
        .ok_or_else(|| eyre::eyre!("archive is empty"))?;

    if task.status() != expected {
        return Err(eyre::eyre!(
            "expected status {expected}, found {}",
            task.status()
        ));
    }
    Ok(())
}

#[then("the sweep fails with a storage error")]
fn sweep_fails_with_storage_error(world: &ArchiveSweepWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_sweep
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing sweep result"))?;

    if !matches!(
        result,
        Err(TaskLifecycleError::Store(TaskStoreError::Unavailable { .. }))
    ) {
        return Err(eyre::eyre!("expected a storage error, got {result:?}"));
    }
    Ok(())
}
