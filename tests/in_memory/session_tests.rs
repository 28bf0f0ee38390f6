//! Console sessions driven end to end over the in-memory store.

use super::helpers::{Tracker, tracker};
use eyre::{WrapErr, ensure};
use rstest::rstest;
use std::io::Cursor;
use taskkeeper::{
    console::{Session, SessionError},
    task::{
        domain::{TaskPriority, TaskStatus},
        ports::TaskStore,
    },
};

fn run_script(tracker: &Tracker, script: &str) -> eyre::Result<String> {
    let registry = tracker.service.load_registry()?;
    let mut session = Session::new(
        tracker.service.clone(),
        registry,
        Cursor::new(script),
        Vec::new(),
    );
    session.run().wrap_err("session run")?;
    let (_, output) = session.into_parts();
    Ok(String::from_utf8(output)?)
}

#[rstest]
fn menu_is_shown_with_all_nine_commands(tracker: eyre::Result<Tracker>) -> eyre::Result<()> {
    let tracker = tracker?;

    let output = run_script(&tracker, "9\n")?;

    for line in [
        "1. Create task",
        "2. Work on the next task by urgency",
        "3. Update task priority",
        "4. Complete task",
        "5. Delete task",
        "6. Archive old and deleted tasks",
        "7. Report active tasks",
        "8. Report archived tasks",
        "9. Save and exit",
    ] {
        ensure!(output.contains(line), "menu line {line:?} missing");
    }
    Ok(())
}

#[rstest]
fn scripted_day_of_work(tracker: eyre::Result<Tracker>) -> eyre::Result<()> {
    let tracker = tracker?;
    let script = concat!(
        "1\nPatch servers\nKernel update\nurgente\ne-mail\n",
        "1\nOrder toner\n\nbaixa\ntelefone\n",
        "2\n",
        "2\n",
        "3\n2\nalta\n",
        "4\n1\n",
        "5\n2\n",
        "6\n",
        "7\n",
        "8\n",
        "9\n",
    );

    let output = run_script(&tracker, script)?;

    for expected in [
        "Task 1 created: Patch servers.",
        "Task 2 created: Order toner.",
        "Now working on task 1: Patch servers (Urgent priority).",
        "Task 1 is already in progress: Patch servers.",
        "Task 2 priority set to High.",
        "Task 1 completed. Execution time: 0 days, 0h0m.",
        "Task 2 marked as deleted.",
        "1 task(s) moved to the archive.",
        "ACTIVE TASKS",
        "ARCHIVED TASKS",
        "No tasks to show.",
        "Tasks saved. Goodbye.",
    ] {
        ensure!(output.contains(expected), "expected {expected:?} in output");
    }

    let active = tracker.store.load_active()?.into_tasks();
    ensure!(active.len() == 1);
    ensure!(
        active
            .first()
            .is_some_and(|task| task.status() == TaskStatus::Done)
    );
    let archive = tracker.store.archive_snapshot()?;
    ensure!(
        archive
            .first()
            .is_some_and(|task| task.status() == TaskStatus::Deleted
                && task.priority() == TaskPriority::High)
    );
    Ok(())
}

#[rstest]
fn invalid_answers_are_reprompted(tracker: eyre::Result<Tracker>) -> eyre::Result<()> {
    let tracker = tracker?;
    let script = "1\n\nWrite minutes\n\nsometime\nmedium\npigeon\nemail\n4\nfirst\n1\n9\n";

    let output = run_script(&tracker, script)?;

    ensure!(output.contains("This field cannot be empty."));
    ensure!(output.contains("Invalid option. Choose one of: Urgent/High/Medium/Low."));
    ensure!(output.contains("Invalid option. Choose one of: Email/Phone/System ticket."));
    ensure!(output.contains("Please enter a valid task ID."));
    ensure!(output.contains("Task 1 completed."));
    Ok(())
}

#[rstest]
fn tasks_persist_between_sessions(tracker: eyre::Result<Tracker>) -> eyre::Result<()> {
    let tracker = tracker?;
    run_script(&tracker, "1\nCarry over\n\nmedium\nemail\n9\n")?;

    let restarted = tracker.restart()?;
    let output = run_script(&restarted, "7\n1\nNext one\n\nlow\nphone\n9\n")?;

    ensure!(output.contains("Title: Carry over"));
    ensure!(output.contains("Task 2 created: Next one."));
    Ok(())
}

#[rstest]
fn closing_input_saves_pending_work(tracker: eyre::Result<Tracker>) -> eyre::Result<()> {
    let tracker = tracker?;

    run_script(&tracker, "1\nUnsaved\n\nhigh\nemail\n")?;

    let active = tracker.store.load_active()?.into_tasks();
    ensure!(active.iter().map(|task| task.title()).eq(["Unsaved"]));
    Ok(())
}

#[rstest]
fn closed_input_error_reads_plainly() {
    let error = SessionError::Prompt(taskkeeper::console::PromptError::Closed);

    assert_eq!(error.to_string(), "input closed");
}
