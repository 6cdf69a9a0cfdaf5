//! Read-only view model for a created task.

use std::fmt;

use chrono::{Local, TimeZone};
use taskdesk_proto::{Task, TaskStatus};

use crate::datetime;

/// Heading of the confirmation view.
pub const HEADING: &str = "Task created successfully!";

/// Line under the heading.
pub const SUBHEADING: &str = "Your task has been added to the system.";

/// Shown in place of an empty description.
pub const NO_DESCRIPTION: &str = "No description provided";

/// The single action offered on the confirmation view.
pub const CREATE_ANOTHER: &str = "Create Another Task";

/// Description line: the text, or a placeholder rendered differently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptionText {
    /// The description as created.
    Text(String),
    /// Nothing was entered.
    Placeholder,
}

impl DescriptionText {
    /// Text to render.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Placeholder => NO_DESCRIPTION,
        }
    }
}

/// Status badge looked up from the status options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBadge {
    /// Status whose presentation is used.
    pub status: TaskStatus,
    /// Badge text.
    pub label: &'static str,
}

impl StatusBadge {
    /// Badge for a task's status. Unknown values look like `pending`.
    #[must_use]
    pub fn for_task(task: &Task) -> Self {
        let status = task.parsed_status().unwrap_or_else(|| {
            tracing::warn!(status = %task.status, "unrecognized task status, showing as pending");
            TaskStatus::Pending
        });
        Self {
            status,
            label: status.label(),
        }
    }
}

/// Everything the confirmation view shows about one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    /// `#<id>`.
    pub id_label: String,
    /// Title verbatim.
    pub title: String,
    /// Description or placeholder.
    pub description: DescriptionText,
    /// Status badge.
    pub badge: StatusBadge,
    /// Long-form due date, or the invalid-date fallback.
    pub due: String,
    /// Long-form creation time, or the invalid-date fallback.
    pub created: String,
}

impl Confirmation {
    /// Builds the view model in the local timezone.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self::from_task_in(&Local, task)
    }

    /// [`from_task`](Self::from_task) with an explicit timezone.
    #[must_use]
    pub fn from_task_in<Tz>(tz: &Tz, task: &Task) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let description = if task.description.is_empty() {
            DescriptionText::Placeholder
        } else {
            DescriptionText::Text(task.description.clone())
        };
        Self {
            id_label: format!("#{}", task.id),
            title: task.title.clone(),
            description,
            badge: StatusBadge::for_task(task),
            due: datetime::display_or_fallback_in(tz, &task.due_date),
            created: datetime::display_or_fallback_in(tz, &task.created_at),
        }
    }
}
