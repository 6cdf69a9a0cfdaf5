//! The editable fields of a task draft.

use taskdesk_proto::TaskStatus;

/// One editable control of the creation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Single-line title.
    Title,
    /// Multi-line description.
    Description,
    /// Status selector.
    Status,
    /// Local date-time editor.
    DueDate,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Self; 4] = [Self::Title, Self::Description, Self::Status, Self::DueDate];

    /// Wire name, also the key used in [`FieldErrors`](taskdesk_proto::FieldErrors).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Status => "status",
            Self::DueDate => "due_date",
        }
    }

    /// Label shown next to the control.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Description => "Description",
            Self::Status => "Status",
            Self::DueDate => "Due Date",
        }
    }

    /// Whether the backend requires a value.
    #[must_use]
    pub const fn is_required(self) -> bool {
        !matches!(self, Self::Description)
    }

    /// Hint rendered while the field is empty.
    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Title => "Enter task title",
            Self::Description => "Enter task description (optional)",
            Self::Status => "",
            Self::DueDate => "YYYY-MM-DDTHH:MM",
        }
    }

    /// Looks a field up by its wire name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

/// The in-progress task before submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    /// Title as typed.
    pub title: String,
    /// Description, possibly empty.
    pub description: String,
    /// Selected status.
    pub status: TaskStatus,
    /// Local date-time as typed, without timezone.
    pub due_date: String,
}

impl TaskDraft {
    /// Text content of a free-text field, `None` for the status selector.
    #[must_use]
    pub fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::Title => Some(&self.title),
            Field::Description => Some(&self.description),
            Field::DueDate => Some(&self.due_date),
            Field::Status => None,
        }
    }

    /// Mutable text content of a free-text field.
    pub(crate) const fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Title => Some(&mut self.title),
            Field::Description => Some(&mut self.description),
            Field::DueDate => Some(&mut self.due_date),
            Field::Status => None,
        }
    }
}
