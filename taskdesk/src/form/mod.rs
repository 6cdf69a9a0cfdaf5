//! Form controller: owns the draft, applies edits, and builds the
//! submission payload.
//!
//! Errors are not stored here. The session owns them and the renderer asks
//! [`field_error`] / [`general_error`] what to show.

pub mod field;

use chrono::{Local, TimeZone};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use taskdesk_proto::task::UnknownStatus;
use taskdesk_proto::{CreateTaskRequest, FieldErrors};

use crate::datetime::{self, DateError};

pub use field::{Field, TaskDraft};

/// Submit control label while idle.
pub const SUBMIT_LABEL: &str = "Create Task";

/// Submit control label while a request is in flight.
pub const SUBMITTING_LABEL: &str = "Creating...";

/// Errors from programmatic field edits.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// A status value outside the known options.
    #[error(transparent)]
    UnknownStatus(#[from] UnknownStatus),
}

/// Which control has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// One of the editable fields.
    Field(Field),
    /// The submit control.
    Submit,
}

impl Focus {
    const ORDER: [Self; 5] = [
        Self::Field(Field::Title),
        Self::Field(Field::Description),
        Self::Field(Field::Status),
        Self::Field(Field::DueDate),
        Self::Submit,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    fn previous(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// What the caller should do after a key was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    /// Nothing beyond a redraw.
    None,
    /// The user asked to submit the draft.
    Submit,
}

/// Editing state for one draft.
#[derive(Debug, Clone)]
pub struct FormController {
    draft: TaskDraft,
    focus: Focus,
    /// Cursor position in the focused text field (character index).
    cursor: usize,
}

impl Default for FormController {
    fn default() -> Self {
        Self::new()
    }
}

impl FormController {
    /// A controller over the empty draft with the title focused.
    #[must_use]
    pub fn new() -> Self {
        Self {
            draft: TaskDraft::default(),
            focus: Focus::Field(Field::Title),
            cursor: 0,
        }
    }

    /// The current draft.
    #[must_use]
    pub const fn draft(&self) -> &TaskDraft {
        &self.draft
    }

    /// The focused control.
    #[must_use]
    pub const fn focus(&self) -> Focus {
        self.focus
    }

    /// Cursor position in the focused text field, in characters.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replaces exactly one field of the draft.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownStatus`] if `field` is the status and
    /// `value` is not a known option. The draft is left untouched.
    pub fn on_field_change(&mut self, field: Field, value: &str) -> Result<(), FormError> {
        if field == Field::Status {
            self.draft.status = value.parse()?;
        } else if let Some(text) = self.draft.text_mut(field) {
            value.clone_into(text);
        }
        if self.focus == Focus::Field(field) {
            self.cursor = self.cursor.min(value.chars().count());
        }
        Ok(())
    }

    /// Moves focus to `focus`, placing the cursor at the end of its text.
    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.cursor = self.focused_text().map_or(0, |t| t.chars().count());
    }

    /// Applies a key press.
    ///
    /// Submission requests are swallowed while `is_loading`.
    pub fn handle_key(&mut self, key: KeyEvent, is_loading: bool) -> FormAction {
        let submit = if is_loading {
            FormAction::None
        } else {
            FormAction::Submit
        };

        match (key.code, key.modifiers) {
            (KeyCode::Char('s'), KeyModifiers::CONTROL) => return submit,
            (KeyCode::BackTab, _) | (KeyCode::Tab, KeyModifiers::SHIFT) => {
                self.set_focus(self.focus.previous());
                return FormAction::None;
            }
            (KeyCode::Tab, _) => {
                self.set_focus(self.focus.next());
                return FormAction::None;
            }
            _ => {}
        }

        match self.focus {
            Focus::Submit => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => submit,
                _ => FormAction::None,
            },
            Focus::Field(Field::Status) => {
                match key.code {
                    KeyCode::Enter => return submit,
                    KeyCode::Left | KeyCode::Char('h') => {
                        self.draft.status = self.draft.status.previous();
                    }
                    KeyCode::Right | KeyCode::Char('l' | ' ') => {
                        self.draft.status = self.draft.status.next();
                    }
                    _ => {}
                }
                FormAction::None
            }
            Focus::Field(field) => self.handle_text_key(field, key, submit),
        }
    }

    fn handle_text_key(&mut self, field: Field, key: KeyEvent, submit: FormAction) -> FormAction {
        match key.code {
            KeyCode::Enter if field == Field::Description => self.insert_char('\n'),
            KeyCode::Enter => return submit,
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert_char(c);
            }
            KeyCode::Backspace => self.delete_before_cursor(),
            KeyCode::Delete => self.delete_at_cursor(),
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => {
                let len = self.focused_text().map_or(0, |t| t.chars().count());
                self.cursor = (self.cursor + 1).min(len);
            }
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.focused_text().map_or(0, |t| t.chars().count()),
            _ => {}
        }
        FormAction::None
    }

    fn focused_text(&self) -> Option<&str> {
        match self.focus {
            Focus::Field(field) => self.draft.text(field),
            Focus::Submit => None,
        }
    }

    fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Focus::Field(field) => self.draft.text_mut(field),
            Focus::Submit => None,
        }
    }

    fn insert_char(&mut self, c: char) {
        let cursor = self.cursor;
        if let Some(text) = self.focused_text_mut() {
            let at = byte_index(text, cursor);
            text.insert(at, c);
            self.cursor += 1;
        }
    }

    fn delete_before_cursor(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let cursor = self.cursor - 1;
        if let Some(text) = self.focused_text_mut() {
            let at = byte_index(text, cursor);
            text.remove(at);
            self.cursor = cursor;
        }
    }

    fn delete_at_cursor(&mut self) {
        let cursor = self.cursor;
        if let Some(text) = self.focused_text_mut()
            && cursor < text.chars().count()
        {
            let at = byte_index(text, cursor);
            text.remove(at);
        }
    }

    /// Builds the creation payload using the local timezone.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::InvalidDate`] if a non-empty due date cannot be
    /// parsed. No request should be sent in that case.
    pub fn on_submit(&self) -> Result<CreateTaskRequest, DateError> {
        self.on_submit_in(&Local)
    }

    /// [`on_submit`](Self::on_submit) with an explicit timezone.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::InvalidDate`] if a non-empty due date cannot be
    /// parsed.
    pub fn on_submit_in<Tz: TimeZone>(&self, tz: &Tz) -> Result<CreateTaskRequest, DateError> {
        Ok(CreateTaskRequest {
            title: self.draft.title.clone(),
            description: self.draft.description.clone(),
            status: self.draft.status,
            due_date: datetime::to_wire_format_in(tz, &self.draft.due_date)?,
        })
    }

    /// Restores the empty draft and focuses the title.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Byte offset of the `char_index`-th character, or the end of `text`.
fn byte_index(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map_or(text.len(), |(i, _)| i)
}

/// First error message for `field`, if any.
#[must_use]
pub fn field_error(errors: &FieldErrors, field: Field) -> Option<&str> {
    errors.first(field.name())
}

/// The banner message for non-field errors, if any.
#[must_use]
pub fn general_error(errors: &FieldErrors) -> Option<&str> {
    errors.general()
}

/// Label of the submit control.
#[must_use]
pub const fn submit_label(is_loading: bool) -> &'static str {
    if is_loading {
        SUBMITTING_LABEL
    } else {
        SUBMIT_LABEL
    }
}
