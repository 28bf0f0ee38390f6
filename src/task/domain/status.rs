//! Enumerations describing a task: lifecycle status, priority, and origin.
//!
//! Each enumeration has an English display label and the label written to
//! the task files. Parsing accepts either, ignoring case, whitespace, and
//! punctuation, so `"e-mail"`, `"Email"`, and `"E-mail"` all name the same
//! origin.

use super::ParseLabelError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Task is waiting to be selected.
    #[serde(rename = "Pendente")]
    Pending,
    /// Task is being worked on. At most one task holds this status.
    #[serde(rename = "Fazendo")]
    InProgress,
    /// Task has been completed.
    #[serde(rename = "Concluída")]
    Done,
    /// Task was completed long enough ago to leave the active set.
    #[serde(rename = "Arquivado")]
    Archived,
    /// Task was logically deleted.
    #[serde(rename = "Excluída")]
    Deleted,
}

impl TaskStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::InProgress,
        Self::Done,
        Self::Archived,
        Self::Deleted,
    ];

    /// Returns the display label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In progress",
            Self::Done => "Done",
            Self::Archived => "Archived",
            Self::Deleted => "Deleted",
        }
    }

    /// Returns the label written to the task files.
    #[must_use]
    pub const fn stored_label(self) -> &'static str {
        match self {
            Self::Pending => "Pendente",
            Self::InProgress => "Fazendo",
            Self::Done => "Concluída",
            Self::Archived => "Arquivado",
            Self::Deleted => "Excluída",
        }
    }

    /// Returns whether a task in this status may move to `target`.
    ///
    /// Completion is accepted from any active status other than `Done`
    /// itself, deletion from any active status, and archival only from
    /// `Done`. A deleted task leaves the active set with its status intact,
    /// so `Deleted` never moves to `Archived`.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        !self.is_terminal()
            && matches!(
                (self, target),
                (Self::Pending, Self::InProgress | Self::Done | Self::Deleted)
                    | (Self::InProgress, Self::Done | Self::Deleted)
                    | (Self::Done, Self::Deleted | Self::Archived)
                    | (Self::Deleted, Self::Done | Self::Deleted)
            )
    }

    /// Returns whether the status is terminal. Terminal tasks accept no
    /// transition at all.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Archived)
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseLabelError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        parse_label(value, "task status", &Self::ALL, |status| {
            [status.as_str(), status.stored_label()]
        })
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task priority, ordered from most to least urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TaskPriority {
    /// Must be handled before anything else.
    #[serde(rename = "Urgente")]
    Urgent,
    /// High priority.
    #[serde(rename = "Alta")]
    High,
    /// Medium priority.
    #[serde(rename = "Média")]
    Medium,
    /// Low priority.
    #[serde(rename = "Baixa")]
    Low,
}

impl TaskPriority {
    /// Priorities in the order the selection scan visits them.
    pub const BY_URGENCY: [Self; 4] = [Self::Urgent, Self::High, Self::Medium, Self::Low];

    /// Returns the display label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Urgent => "Urgent",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    /// Returns the label written to the task files.
    #[must_use]
    pub const fn stored_label(self) -> &'static str {
        match self {
            Self::Urgent => "Urgente",
            Self::High => "Alta",
            Self::Medium => "Média",
            Self::Low => "Baixa",
        }
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParseLabelError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        parse_label(value, "task priority", &Self::BY_URGENCY, |priority| {
            [priority.as_str(), priority.stored_label()]
        })
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Channel through which a task arrived. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskOrigin {
    /// Requested by email.
    #[serde(rename = "E-mail")]
    Email,
    /// Requested by phone.
    #[serde(rename = "Telefone")]
    Phone,
    /// Raised as a ticket in another system.
    #[serde(rename = "Chamado do Sistema")]
    SystemTicket,
}

impl TaskOrigin {
    /// All origins.
    pub const ALL: [Self; 3] = [Self::Email, Self::Phone, Self::SystemTicket];

    /// Returns the display label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::SystemTicket => "System ticket",
        }
    }

    /// Returns the label written to the task files.
    #[must_use]
    pub const fn stored_label(self) -> &'static str {
        match self {
            Self::Email => "E-mail",
            Self::Phone => "Telefone",
            Self::SystemTicket => "Chamado do Sistema",
        }
    }
}

impl TryFrom<&str> for TaskOrigin {
    type Error = ParseLabelError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        parse_label(value, "task origin", &Self::ALL, |origin| {
            [origin.as_str(), origin.stored_label()]
        })
    }
}

impl fmt::Display for TaskOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn parse_label<T: Copy>(
    value: &str,
    kind: &'static str,
    candidates: &[T],
    labels: impl Fn(T) -> [&'static str; 2],
) -> Result<T, ParseLabelError> {
    let wanted = normalize(value);
    candidates
        .iter()
        .copied()
        .find(|candidate| {
            labels(*candidate)
                .iter()
                .any(|label| normalize(label) == wanted)
        })
        .ok_or_else(|| ParseLabelError {
            kind,
            value: value.to_owned(),
        })
}

fn normalize(value: &str) -> String {
    value
        .chars()
        .filter(|ch| ch.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}
