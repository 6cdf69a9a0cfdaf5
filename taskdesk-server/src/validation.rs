//! Request validation for task creation.
//!
//! Every field is checked and all problems are collected into one
//! [`FieldErrors`] so the client can show them side by side.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use taskdesk_proto::{FieldErrors, TaskStatus};

/// Maximum title length in characters.
pub const MAX_TITLE_LENGTH: usize = 255;

const REQUIRED: &str = "This field is required.";
const BLANK: &str = "This field may not be blank.";
const DATETIME_FORMAT: &str = "Datetime has wrong format. Use one of these formats instead: \
     YYYY-MM-DDThh:mm[:ss[.uuuuuu]][+HH:MM|-HH:MM|Z].";

/// Raw creation payload; every field may be absent.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NewTaskInput {
    /// Requested title.
    pub title: Option<String>,
    /// Requested description.
    pub description: Option<String>,
    /// Requested status as sent on the wire.
    pub status: Option<String>,
    /// Requested due date (RFC 3339).
    pub due_date: Option<String>,
}

/// A validated creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Trimmed, non-empty title.
    pub title: String,
    /// Description, empty if none given.
    pub description: String,
    /// Initial status.
    pub status: TaskStatus,
    /// Due date normalized to UTC.
    pub due_date: DateTime<Utc>,
}

/// Validates a raw payload.
///
/// # Errors
///
/// Returns the per-field messages if any field is missing or invalid.
pub fn validate(input: NewTaskInput) -> Result<NewTask, FieldErrors> {
    let mut errors = FieldErrors::new();

    let title = match input.title.as_deref().map(str::trim) {
        None => {
            errors.push("title", REQUIRED);
            None
        }
        Some("") => {
            errors.push("title", BLANK);
            None
        }
        Some(t) if t.chars().count() > MAX_TITLE_LENGTH => {
            errors.push(
                "title",
                format!("Ensure this field has no more than {MAX_TITLE_LENGTH} characters."),
            );
            None
        }
        Some(t) => Some(t.to_string()),
    };

    let status = match input.status.as_deref() {
        None => Some(TaskStatus::default()),
        Some(raw) => match raw.parse::<TaskStatus>() {
            Ok(status) => Some(status),
            Err(_) => {
                errors.push("status", format!("\"{raw}\" is not a valid choice."));
                None
            }
        },
    };

    let due_date = match input.due_date.as_deref() {
        None => {
            errors.push("due_date", REQUIRED);
            None
        }
        Some(raw) => match DateTime::parse_from_rfc3339(raw.trim()) {
            Ok(parsed) => Some(parsed.with_timezone(&Utc)),
            Err(_) => {
                errors.push("due_date", DATETIME_FORMAT);
                None
            }
        },
    };

    match (title, status, due_date) {
        (Some(title), Some(status), Some(due_date)) if errors.is_empty() => Ok(NewTask {
            title,
            description: input.description.unwrap_or_default(),
            status,
            due_date,
        }),
        _ => Err(errors),
    }
}
