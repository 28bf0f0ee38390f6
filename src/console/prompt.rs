//! Line-oriented prompting with validation loops.

use super::MenuCommand;
use crate::task::domain::TaskId;
use std::fmt;
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Errors raised while talking to the user.
#[derive(Debug, Error)]
pub enum PromptError {
    /// Reading input or writing output failed.
    #[error("console I/O failed: {0}")]
    Io(#[from] io::Error),
    /// The input stream ended.
    #[error("input closed")]
    Closed,
}

/// Result type for prompt operations.
pub type PromptResult<T> = Result<T, PromptError>;

/// Asks questions on `output` and reads answers from `input`.
///
/// Every `ask_*` method keeps asking until the answer is valid or input ends.
#[derive(Debug)]
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R, W> Prompter<R, W>
where
    R: BufRead,
    W: Write,
{
    /// Creates a prompter over the given streams.
    #[must_use]
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes one line of output.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::Io`] when writing fails.
    pub fn say(&mut self, text: impl fmt::Display) -> PromptResult<()> {
        writeln!(self.output, "{text}")?;
        self.output.flush()?;
        Ok(())
    }

    /// Asks a question and returns the answer without its line ending.
    ///
    /// Lines that are not valid UTF-8 are rejected and the question is asked
    /// again.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::Closed`] at end of input and
    /// [`PromptError::Io`] when reading or writing fails.
    pub fn ask(&mut self, question: &str) -> PromptResult<String> {
        loop {
            write!(self.output, "{question} ")?;
            self.output.flush()?;

            let mut bytes = Vec::new();
            if self.input.read_until(b'\n', &mut bytes)? == 0 {
                return Err(PromptError::Closed);
            }
            if let Ok(line) = String::from_utf8(bytes) {
                return Ok(line.trim_end_matches(['\r', '\n']).to_owned());
            }
            tracing::warn!("discarded input line that is not valid UTF-8");
            self.say("Input could not be read as text. Please try again.")?;
        }
    }

    /// Asks until the trimmed answer is not empty.
    ///
    /// # Errors
    ///
    /// See [`Self::ask`].
    pub fn ask_non_empty(&mut self, question: &str) -> PromptResult<String> {
        loop {
            let answer = self.ask(question)?;
            let trimmed = answer.trim();
            if !trimmed.is_empty() {
                return Ok(trimmed.to_owned());
            }
            self.say("This field cannot be empty.")?;
        }
    }

    /// Asks for a main menu selection.
    ///
    /// # Errors
    ///
    /// See [`Self::ask`].
    pub fn ask_menu_choice(&mut self) -> PromptResult<MenuCommand> {
        loop {
            let answer = self.ask("Choose an option:")?;
            if let Some(command) = MenuCommand::parse(&answer) {
                return Ok(command);
            }
            self.say("Invalid option. Enter a number from 1 to 9.")?;
        }
    }

    /// Asks for one of `options`, accepting any label `T` can parse.
    ///
    /// # Errors
    ///
    /// See [`Self::ask`].
    pub fn ask_choice<T>(&mut self, question: &str, options: &[T]) -> PromptResult<T>
    where
        T: Copy + fmt::Display + for<'a> TryFrom<&'a str>,
    {
        let listed = options
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("/");
        let full_question = format!("{question} ({listed}):");
        loop {
            let answer = self.ask(&full_question)?;
            if let Ok(choice) = T::try_from(answer.as_str()) {
                return Ok(choice);
            }
            self.say(format!("Invalid option. Choose one of: {listed}."))?;
        }
    }

    /// Asks for a task identifier.
    ///
    /// # Errors
    ///
    /// See [`Self::ask`].
    pub fn ask_task_id(&mut self, question: &str) -> PromptResult<TaskId> {
        loop {
            let answer = self.ask(question)?;
            let parsed = answer.trim().parse::<u64>().ok().map(TaskId::new);
            if let Some(Ok(id)) = parsed {
                return Ok(id);
            }
            self.say("Please enter a valid task ID.")?;
        }
    }

    /// Consumes the prompter and returns the output stream.
    #[must_use]
    pub fn into_output(self) -> W {
        self.output
    }
}
