//! In-memory integration tests for task lifecycle operations.

use super::helpers::{Tracker, tracker};
use chrono::TimeDelta;
use eyre::{bail, ensure};
use rstest::rstest;
use taskkeeper::task::{
    domain::{TaskPriority, TaskStatus},
    services::{TaskCompletion, TaskLifecycleError, TaskSelection},
};

#[rstest]
fn work_through_tasks_by_urgency(tracker: eyre::Result<Tracker>) -> eyre::Result<()> {
    let tracker = tracker?;
    let mut registry = tracker.service.load_registry()?;
    let low = tracker.create(&mut registry, "Tidy wiki", TaskPriority::Low)?;
    let high = tracker.create(&mut registry, "Review contract", TaskPriority::High)?;
    let urgent = tracker.create(&mut registry, "Restore backups", TaskPriority::Urgent)?;

    let mut order = Vec::new();
    for _ in 0..3 {
        let TaskSelection::Started(task) = tracker.service.select_next_by_urgency(&mut registry)?
        else {
            bail!("expected a task to start");
        };
        tracker.clock.advance(TimeDelta::hours(2));
        tracker.service.complete_task(&mut registry, task.id())?;
        order.push(task.id());
    }

    ensure!(order == vec![urgent, high, low]);
    ensure!(
        tracker.service.select_next_by_urgency(&mut registry)? == TaskSelection::NoneAvailable
    );
    ensure!(
        registry
            .tasks()
            .iter()
            .all(|task| task.status() == TaskStatus::Done)
    );
    Ok(())
}

#[rstest]
fn reprioritised_task_is_selected_first(tracker: eyre::Result<Tracker>) -> eyre::Result<()> {
    let tracker = tracker?;
    let mut registry = tracker.service.load_registry()?;
    tracker.create(&mut registry, "Plan sprint", TaskPriority::High)?;
    let escalated = tracker.create(&mut registry, "Answer auditor", TaskPriority::Low)?;

    tracker
        .service
        .update_priority(&mut registry, escalated, TaskPriority::Urgent)?;
    let selection = tracker.service.select_next_by_urgency(&mut registry)?;

    match selection {
        TaskSelection::Started(task) => ensure!(task.id() == escalated),
        other => bail!("expected the escalated task, got {other:?}"),
    }
    Ok(())
}

#[rstest]
fn completing_the_running_task_frees_the_slot(tracker: eyre::Result<Tracker>) -> eyre::Result<()> {
    let tracker = tracker?;
    let mut registry = tracker.service.load_registry()?;
    let first = tracker.create(&mut registry, "First", TaskPriority::Medium)?;
    let second = tracker.create(&mut registry, "Second", TaskPriority::Medium)?;
    tracker.service.select_next_by_urgency(&mut registry)?;

    let blocked = tracker.service.select_next_by_urgency(&mut registry)?;
    tracker.service.complete_task(&mut registry, first)?;
    let next = tracker.service.select_next_by_urgency(&mut registry)?;

    ensure!(matches!(blocked, TaskSelection::AlreadyInProgress(ref task) if task.id() == first));
    ensure!(matches!(next, TaskSelection::Started(ref task) if task.id() == second));
    Ok(())
}

#[rstest]
fn deleted_pending_task_is_never_selected(tracker: eyre::Result<Tracker>) -> eyre::Result<()> {
    let tracker = tracker?;
    let mut registry = tracker.service.load_registry()?;
    let id = tracker.create(&mut registry, "Cancelled", TaskPriority::Urgent)?;
    tracker.service.delete_task(&mut registry, id)?;

    let selection = tracker.service.select_next_by_urgency(&mut registry)?;

    ensure!(selection == TaskSelection::NoneAvailable);
    ensure!(tracker.service.active_tasks(&registry).is_empty());
    Ok(())
}

#[rstest]
fn completing_twice_keeps_the_first_completion(tracker: eyre::Result<Tracker>) -> eyre::Result<()> {
    let tracker = tracker?;
    let mut registry = tracker.service.load_registry()?;
    let id = tracker.create(&mut registry, "Ship release", TaskPriority::High)?;
    tracker.clock.advance(TimeDelta::minutes(45));
    let TaskCompletion::Completed { task: first, .. } =
        tracker.service.complete_task(&mut registry, id)?
    else {
        bail!("first completion should complete the task");
    };
    tracker.wait_days(1);

    let second = tracker.service.complete_task(&mut registry, id)?;

    match second {
        TaskCompletion::AlreadyDone(task) => {
            ensure!(task.completed_at() == first.completed_at());
        }
        TaskCompletion::Completed { .. } => bail!("second completion must not complete again"),
    }
    Ok(())
}

#[rstest]
fn operations_on_unknown_ids_fail_without_changes(
    tracker: eyre::Result<Tracker>,
) -> eyre::Result<()> {
    let tracker = tracker?;
    let mut registry = tracker.service.load_registry()?;
    let id = tracker.create(&mut registry, "Existing", TaskPriority::Low)?;
    let Some(missing) = id.next() else {
        bail!("identifier range exhausted");
    };
    let before = registry.clone();

    let update = tracker
        .service
        .update_priority(&mut registry, missing, TaskPriority::High);
    let complete = tracker.service.complete_task(&mut registry, missing);
    let delete = tracker.service.delete_task(&mut registry, missing);

    ensure!(matches!(update, Err(TaskLifecycleError::NotFound(found)) if found == missing));
    ensure!(matches!(complete, Err(TaskLifecycleError::NotFound(_))));
    ensure!(matches!(delete, Err(TaskLifecycleError::NotFound(_))));
    ensure!(registry == before);
    Ok(())
}
