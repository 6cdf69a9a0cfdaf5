//! Task wire types for the task-creation endpoint.
//!
//! The backend speaks JSON: requests carry the draft with its due date
//! already converted to UTC ISO-8601, responses carry the created record
//! wrapped in a confirmation message.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Status of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started yet.
    #[default]
    Pending,
    /// Actively being worked on.
    InProgress,
    /// Finished.
    Completed,
}

/// Selectable statuses in display order, paired with their labels.
///
/// Both the editable selector and the read-only badge read from this table.
pub const STATUS_OPTIONS: [(TaskStatus, &str); 3] = [
    (TaskStatus::Pending, "Pending"),
    (TaskStatus::InProgress, "In Progress"),
    (TaskStatus::Completed, "Completed"),
];

/// Error returned when a string does not name a known [`TaskStatus`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown task status: {0}")]
pub struct UnknownStatus(pub String);

impl TaskStatus {
    /// Wire name of this status (`pending`, `in_progress`, `completed`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    /// Human-readable label from [`STATUS_OPTIONS`].
    #[must_use]
    pub const fn label(self) -> &'static str {
        STATUS_OPTIONS[self.position()].1
    }

    /// The next option in [`STATUS_OPTIONS`], wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        STATUS_OPTIONS[(self.position() + 1) % STATUS_OPTIONS.len()].0
    }

    /// The previous option in [`STATUS_OPTIONS`], wrapping around.
    #[must_use]
    pub const fn previous(self) -> Self {
        STATUS_OPTIONS[(self.position() + STATUS_OPTIONS.len() - 1) % STATUS_OPTIONS.len()].0
    }

    const fn position(self) -> usize {
        match self {
            Self::Pending => 0,
            Self::InProgress => 1,
            Self::Completed => 2,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        STATUS_OPTIONS
            .iter()
            .map(|(status, _)| *status)
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Body of `POST /tasks/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    /// Task title.
    pub title: String,
    /// Free-form description, possibly empty.
    pub description: String,
    /// Initial status.
    pub status: TaskStatus,
    /// UTC ISO-8601 due date, or empty when the user left it blank.
    pub due_date: String,
}

/// A task record as created by the backend.
///
/// `status` and the timestamps are kept exactly as the server sent them so
/// that an unexpected value never makes the whole response unreadable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Server-assigned identifier.
    pub id: u64,
    /// Task title.
    pub title: String,
    /// Description, empty when none was provided.
    #[serde(default)]
    pub description: String,
    /// Raw status string.
    pub status: String,
    /// Due date (ISO-8601, UTC).
    pub due_date: String,
    /// Creation timestamp (ISO-8601, UTC).
    pub created_at: String,
    /// Last update timestamp (ISO-8601, UTC).
    pub updated_at: String,
}

impl Task {
    /// Parsed status, or `None` if the server sent something unrecognized.
    #[must_use]
    pub fn parsed_status(&self) -> Option<TaskStatus> {
        self.status.parse().ok()
    }
}

/// Success body of `POST /tasks/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTaskResponse {
    /// Confirmation message from the server.
    pub message: String,
    /// The created task.
    pub task: Task,
}
