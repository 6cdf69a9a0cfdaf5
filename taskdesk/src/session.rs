//! Submission lifecycle: editing, submitting, showing a confirmation.

use taskdesk_proto::{FieldErrors, Task};

static NO_ERRORS: FieldErrors = FieldErrors::new();

/// Where the user is in the create-task flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Editing the form, with the errors of the last attempt.
    Idle(FieldErrors),
    /// A request is in flight.
    Submitting,
    /// The backend created a task.
    Created(Task),
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Idle(FieldErrors::new())
    }
}

/// Illegal session transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// A submission is already in flight.
    #[error("a submission is already in progress")]
    AlreadySubmitting,
    /// The form is not being edited (a confirmation is showing).
    #[error("the form is not being edited")]
    NotEditing,
    /// No submission is in flight.
    #[error("no submission is in progress")]
    NotSubmitting,
    /// No task has been created yet.
    #[error("no task has been created")]
    NotCreated,
}

/// Owner of the [`SessionState`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    state: SessionState,
}

impl Session {
    /// A session in `Idle` with no errors.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// Errors to render. Empty outside `Idle`.
    #[must_use]
    pub fn errors(&self) -> &FieldErrors {
        match &self.state {
            SessionState::Idle(errors) => errors,
            SessionState::Submitting | SessionState::Created(_) => &NO_ERRORS,
        }
    }

    /// Whether a request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.state, SessionState::Submitting)
    }

    /// The created task, when showing a confirmation.
    #[must_use]
    pub const fn created(&self) -> Option<&Task> {
        match &self.state {
            SessionState::Created(task) => Some(task),
            SessionState::Idle(_) | SessionState::Submitting => None,
        }
    }

    /// `Idle -> Submitting`, clearing prior errors.
    ///
    /// # Errors
    ///
    /// [`SessionError::AlreadySubmitting`] while a request is in flight;
    /// [`SessionError::NotEditing`] while a confirmation is showing.
    pub fn begin_submit(&mut self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Idle(_) => {
                self.state = SessionState::Submitting;
                Ok(())
            }
            SessionState::Submitting => Err(SessionError::AlreadySubmitting),
            SessionState::Created(_) => Err(SessionError::NotEditing),
        }
    }

    /// Applies the gateway outcome: `Submitting -> Created | Idle(errors)`.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotSubmitting`] if no request is in flight. The state
    /// is unchanged.
    pub fn complete(&mut self, outcome: Result<Task, FieldErrors>) -> Result<(), SessionError> {
        if !self.is_loading() {
            tracing::warn!(ok = outcome.is_ok(), "ignoring completion outside a submission");
            return Err(SessionError::NotSubmitting);
        }
        self.state = match outcome {
            Ok(task) => SessionState::Created(task),
            Err(errors) => SessionState::Idle(errors),
        };
        Ok(())
    }

    /// Records locally detected draft problems: `Idle -> Idle(errors)`.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotEditing`] outside `Idle`.
    pub fn reject(&mut self, errors: FieldErrors) -> Result<(), SessionError> {
        match self.state {
            SessionState::Idle(_) => {
                self.state = SessionState::Idle(errors);
                Ok(())
            }
            SessionState::Submitting | SessionState::Created(_) => Err(SessionError::NotEditing),
        }
    }

    /// `Created -> Idle` with no errors.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotCreated`] if no confirmation is showing.
    pub fn create_another(&mut self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Created(_) => {
                self.state = SessionState::default();
                Ok(())
            }
            SessionState::Idle(_) | SessionState::Submitting => Err(SessionError::NotCreated),
        }
    }
}
