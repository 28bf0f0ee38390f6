//! Main menu commands.

use std::fmt;

/// Entries of the numbered main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuCommand {
    /// Create a pending task.
    CreateTask,
    /// Start the most urgent pending task.
    SelectNext,
    /// Change the priority of a task.
    UpdatePriority,
    /// Mark a task done.
    CompleteTask,
    /// Logically delete a task.
    DeleteTask,
    /// Move expired done tasks and deleted tasks to the archive.
    ArchiveSweep,
    /// Show the active tasks.
    ActiveReport,
    /// Show the archived tasks.
    ArchiveReport,
    /// Save and leave.
    Exit,
}

impl MenuCommand {
    /// Commands in menu order.
    pub const ALL: [Self; 9] = [
        Self::CreateTask,
        Self::SelectNext,
        Self::UpdatePriority,
        Self::CompleteTask,
        Self::DeleteTask,
        Self::ArchiveSweep,
        Self::ActiveReport,
        Self::ArchiveReport,
        Self::Exit,
    ];

    /// Returns the menu number of the command.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::CreateTask => 1,
            Self::SelectNext => 2,
            Self::UpdatePriority => 3,
            Self::CompleteTask => 4,
            Self::DeleteTask => 5,
            Self::ArchiveSweep => 6,
            Self::ActiveReport => 7,
            Self::ArchiveReport => 8,
            Self::Exit => 9,
        }
    }

    /// Returns the menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CreateTask => "Create task",
            Self::SelectNext => "Work on the next task by urgency",
            Self::UpdatePriority => "Update task priority",
            Self::CompleteTask => "Complete task",
            Self::DeleteTask => "Delete task",
            Self::ArchiveSweep => "Archive old and deleted tasks",
            Self::ActiveReport => "Report active tasks",
            Self::ArchiveReport => "Report archived tasks",
            Self::Exit => "Save and exit",
        }
    }

    /// Looks a command up by its menu number.
    #[must_use]
    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::CreateTask),
            2 => Some(Self::SelectNext),
            3 => Some(Self::UpdatePriority),
            4 => Some(Self::CompleteTask),
            5 => Some(Self::DeleteTask),
            6 => Some(Self::ArchiveSweep),
            7 => Some(Self::ActiveReport),
            8 => Some(Self::ArchiveReport),
            9 => Some(Self::Exit),
            _ => None,
        }
    }

    /// Parses a menu selection typed by the user.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        input.trim().parse().ok().and_then(Self::from_number)
    }
}

impl fmt::Display for MenuCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.label())
    }
}
