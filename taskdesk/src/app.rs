//! Application state and event handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use taskdesk_proto::{CreateTaskRequest, FieldErrors, Task};

use crate::confirmation::Confirmation;
use crate::form::{Field, FormAction, FormController};
use crate::session::Session;

/// Field error shown when the due date cannot be read as a date-time.
pub const INVALID_DUE_DATE: &str = "Enter a valid date and time (YYYY-MM-DDTHH:MM).";

/// Main application state.
#[derive(Debug)]
pub struct App {
    /// Submission lifecycle.
    pub session: Session,
    /// Draft editing.
    pub form: FormController,
    /// Endpoint requests go to, for the status bar.
    pub endpoint: String,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl App {
    /// Creates an app editing an empty draft.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            session: Session::new(),
            form: FormController::new(),
            endpoint: endpoint.into(),
            should_quit: false,
        }
    }

    /// Handles a key event.
    ///
    /// Returns the payload to dispatch when the key started a submission.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<CreateTaskRequest> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Esc, _) => {
                self.should_quit = true;
                return None;
            }
            _ => {}
        }

        if self.session.created().is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Char('n')) {
                self.create_another();
            }
            return None;
        }

        match self.form.handle_key(key, self.session.is_loading()) {
            FormAction::Submit => self.submit(),
            FormAction::None => None,
        }
    }

    /// Starts a submission of the current draft.
    ///
    /// Returns `None` without sending anything when a submission is already
    /// in flight or the due date cannot be read.
    pub fn submit(&mut self) -> Option<CreateTaskRequest> {
        let request = match self.form.on_submit() {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!(error = %e, "due date rejected before submission");
                let errors = FieldErrors::single(Field::DueDate.name(), INVALID_DUE_DATE);
                if let Err(e) = self.session.reject(errors) {
                    tracing::debug!(error = %e, "cannot record draft errors");
                }
                return None;
            }
        };

        match self.session.begin_submit() {
            Ok(()) => {
                tracing::info!(title = %request.title, status = %request.status, "submitting task");
                Some(request)
            }
            Err(e) => {
                tracing::debug!(error = %e, "submission refused");
                None
            }
        }
    }

    /// Applies a gateway outcome.
    pub fn apply_outcome(&mut self, outcome: Result<Task, FieldErrors>) {
        if let Err(e) = self.session.complete(outcome) {
            tracing::debug!(error = %e, "outcome dropped");
        }
    }

    /// Records that a payload could not be handed to the worker.
    pub fn dispatch_failed(&mut self) {
        tracing::warn!("submission worker unavailable");
        self.apply_outcome(Err(FieldErrors::unexpected()));
    }

    /// Leaves the confirmation and starts a fresh draft.
    pub fn create_another(&mut self) {
        match self.session.create_another() {
            Ok(()) => {
                self.form.reset();
            }
            Err(e) => tracing::debug!(error = %e, "create another ignored"),
        }
    }

    /// View model of the created task, while the confirmation is showing.
    #[must_use]
    pub fn confirmation(&self) -> Option<Confirmation> {
        self.session.created().map(Confirmation::from_task)
    }

    /// Whether a request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.session.is_loading()
    }
}
