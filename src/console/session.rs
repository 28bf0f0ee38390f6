//! Interactive menu loop.

use super::{MenuCommand, PromptError, Prompter};
use crate::report::{INVALID_TIMESTAMP_TEXT, ReportError, TaskReport};
use crate::task::{
    domain::{TaskId, TaskOrigin, TaskPriority, TaskRegistry},
    ports::TaskStore,
    services::{
        CreateTaskRequest, TaskCompletion, TaskLifecycleError, TaskLifecycleService,
        TaskSelection,
    },
};
use mockable::Clock;
use std::io::{BufRead, Write};
use thiserror::Error;

/// Errors that end a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Talking to the user failed.
    #[error(transparent)]
    Prompt(#[from] PromptError),
    /// A report could not be rendered.
    #[error(transparent)]
    Report(#[from] ReportError),
    /// The session stopped and the active set could not be saved.
    #[error("failed to save tasks before exiting: {0}")]
    FinalSave(#[source] TaskLifecycleError),
}

/// Whether the menu loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Show the menu again.
    Continue,
    /// Leave the loop.
    Exit,
}

/// One interactive run of the tracker over a loaded registry.
pub struct Session<S, C, R, W>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    service: TaskLifecycleService<S, C>,
    registry: TaskRegistry,
    prompter: Prompter<R, W>,
}

impl<S, C, R, W> Session<S, C, R, W>
where
    S: TaskStore,
    C: Clock + Send + Sync,
    R: BufRead,
    W: Write,
{
    /// Creates a session reading commands from `input`.
    #[must_use]
    pub const fn new(
        service: TaskLifecycleService<S, C>,
        registry: TaskRegistry,
        input: R,
        output: W,
    ) -> Self {
        Self {
            service,
            registry,
            prompter: Prompter::new(input, output),
        }
    }

    /// Returns the registry as the session currently holds it.
    #[must_use]
    pub const fn registry(&self) -> &TaskRegistry {
        &self.registry
    }

    /// Consumes the session, returning the registry and output stream.
    #[must_use]
    pub fn into_parts(self) -> (TaskRegistry, W) {
        (self.registry, self.prompter.into_output())
    }

    /// Runs the menu until the user exits or input ends.
    ///
    /// Leaving through the exit command saves the active set once; a failed
    /// save is reported and the menu continues. When input ends or the
    /// console fails, a final save is attempted before returning.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::FinalSave`] when the final save fails, and the
    /// console error itself when the console fails but the save succeeds.
    pub fn run(&mut self) -> Result<(), SessionError> {
        loop {
            match self.step() {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => return Ok(()),
                Err(SessionError::Prompt(PromptError::Closed)) => return self.finish_on_close(),
                Err(err) => return self.abandon(err),
            }
        }
    }

    /// Shows the menu, reads one selection, and executes it.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] when the console fails or input ends.
    pub fn step(&mut self) -> Result<Flow, SessionError> {
        self.show_menu()?;
        let command = self.prompter.ask_menu_choice()?;
        tracing::debug!(?command, "menu selection");
        self.execute(command)
    }

    /// Executes one command.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] when the console fails or input ends.
    pub fn execute(&mut self, command: MenuCommand) -> Result<Flow, SessionError> {
        match command {
            MenuCommand::CreateTask => self.create_task()?,
            MenuCommand::SelectNext => self.select_next()?,
            MenuCommand::UpdatePriority => self.update_priority()?,
            MenuCommand::CompleteTask => self.complete_task()?,
            MenuCommand::DeleteTask => self.delete_task()?,
            MenuCommand::ArchiveSweep => self.archive_sweep()?,
            MenuCommand::ActiveReport => self.active_report()?,
            MenuCommand::ArchiveReport => self.archive_report()?,
            MenuCommand::Exit => return self.exit(),
        }
        Ok(Flow::Continue)
    }

    fn show_menu(&mut self) -> Result<(), SessionError> {
        self.prompter.say("")?;
        self.prompter.say("=== TASK TRACKER ===")?;
        for command in MenuCommand::ALL {
            self.prompter.say(command)?;
        }
        Ok(())
    }

    fn create_task(&mut self) -> Result<(), SessionError> {
        let title = self.prompter.ask_non_empty("Title:")?;
        let description = self.prompter.ask("Description (optional):")?;
        let priority = self
            .prompter
            .ask_choice("Priority", &TaskPriority::BY_URGENCY)?;
        let origin = self.prompter.ask_choice("Origin", &TaskOrigin::ALL)?;

        let request = CreateTaskRequest::new(title, priority, origin)
            .with_description(description.trim());
        match self.service.create_task(&mut self.registry, request) {
            Ok(task) => self
                .prompter
                .say(format!("Task {} created: {}.", task.id(), task.title()))?,
            Err(err) => self.report_failure(&err)?,
        }
        Ok(())
    }

    fn select_next(&mut self) -> Result<(), SessionError> {
        let message = match self.service.select_next_by_urgency(&mut self.registry) {
            Ok(TaskSelection::Started(task)) => format!(
                "Now working on task {}: {} ({} priority).",
                task.id(),
                task.title(),
                task.priority()
            ),
            Ok(TaskSelection::AlreadyInProgress(task)) => format!(
                "Task {} is already in progress: {}. Complete it before starting another.",
                task.id(),
                task.title()
            ),
            Ok(TaskSelection::NoneAvailable) => "No pending tasks available.".to_owned(),
            Err(err) => return self.report_failure(&err),
        };
        self.prompter.say(message)?;
        Ok(())
    }

    fn update_priority(&mut self) -> Result<(), SessionError> {
        let Some(id) = self.ask_existing_id("Task ID to update:")? else {
            return Ok(());
        };
        let priority = self
            .prompter
            .ask_choice("New priority", &TaskPriority::BY_URGENCY)?;
        match self.service.update_priority(&mut self.registry, id, priority) {
            Ok(task) => self.prompter.say(format!(
                "Task {} priority set to {}.",
                task.id(),
                task.priority()
            ))?,
            Err(err) => self.report_failure(&err)?,
        }
        Ok(())
    }

    fn complete_task(&mut self) -> Result<(), SessionError> {
        let Some(id) = self.ask_id("Task ID to complete:")? else {
            return Ok(());
        };
        let message = match self.service.complete_task(&mut self.registry, id) {
            Ok(TaskCompletion::Completed { task, elapsed }) => match elapsed {
                Ok(time) => format!("Task {} completed. Execution time: {time}.", task.id()),
                Err(_) => format!(
                    "Task {} completed. Execution time: {INVALID_TIMESTAMP_TEXT}.",
                    task.id()
                ),
            },
            Ok(TaskCompletion::AlreadyDone(task)) => {
                format!("Task {} is already done.", task.id())
            }
            Err(err) => return self.report_failure(&err),
        };
        self.prompter.say(message)?;
        Ok(())
    }

    fn delete_task(&mut self) -> Result<(), SessionError> {
        let Some(id) = self.ask_id("Task ID to delete:")? else {
            return Ok(());
        };
        match self.service.delete_task(&mut self.registry, id) {
            Ok(task) => self
                .prompter
                .say(format!("Task {} marked as deleted.", task.id()))?,
            Err(err) => self.report_failure(&err)?,
        }
        Ok(())
    }

    fn archive_sweep(&mut self) -> Result<(), SessionError> {
        let summary = match self.service.archive_sweep(&mut self.registry) {
            Ok(summary) => summary,
            Err(err) => return self.report_failure(&err),
        };
        for id in summary.kept_with_invalid_completion() {
            self.prompter.say(format!(
                "Task {id} kept: its completion date cannot be read."
            ))?;
        }
        let archived = summary.archived().len();
        if archived == 0 {
            self.prompter.say("No tasks to archive.")?;
        } else {
            self.prompter
                .say(format!("{archived} task(s) moved to the archive."))?;
        }
        Ok(())
    }

    fn active_report(&mut self) -> Result<(), SessionError> {
        let tasks = self.service.active_tasks(&self.registry);
        let rendered = TaskReport::active(&tasks).render()?;
        self.prompter.say(rendered.trim_end())?;
        Ok(())
    }

    fn archive_report(&mut self) -> Result<(), SessionError> {
        let tasks = match self.service.archived_tasks() {
            Ok(tasks) => tasks,
            Err(err) => return self.report_failure(&err),
        };
        let rendered = TaskReport::archived(&tasks).render()?;
        self.prompter.say(rendered.trim_end())?;
        Ok(())
    }

    fn exit(&mut self) -> Result<Flow, SessionError> {
        match self.service.save(&self.registry) {
            Ok(()) => {
                self.prompter.say("Tasks saved. Goodbye.")?;
                Ok(Flow::Exit)
            }
            Err(err) => {
                self.report_failure(&err)?;
                Ok(Flow::Continue)
            }
        }
    }

    fn finish_on_close(&mut self) -> Result<(), SessionError> {
        tracing::info!("input closed; saving tasks");
        self.service
            .save(&self.registry)
            .map_err(SessionError::FinalSave)
    }

    fn abandon(&self, err: SessionError) -> Result<(), SessionError> {
        tracing::error!(error = %err, "console failed; saving tasks before stopping");
        self.service
            .save(&self.registry)
            .map_err(SessionError::FinalSave)?;
        Err(err)
    }

    fn ask_id(&mut self, question: &str) -> Result<Option<TaskId>, SessionError> {
        if self.registry.is_empty() {
            self.prompter.say("No tasks registered.")?;
            return Ok(None);
        }
        Ok(Some(self.prompter.ask_task_id(question)?))
    }

    fn ask_existing_id(&mut self, question: &str) -> Result<Option<TaskId>, SessionError> {
        let Some(id) = self.ask_id(question)? else {
            return Ok(None);
        };
        if self.registry.get(id).is_some() {
            return Ok(Some(id));
        }
        self.report_failure(&TaskLifecycleError::NotFound(id))?;
        Ok(None)
    }

    fn report_failure(&mut self, err: &TaskLifecycleError) -> Result<(), SessionError> {
        tracing::warn!(error = %err, "operation failed");
        self.prompter.say(format!("Error: {err}"))?;
        Ok(())
    }
}
