//! Integration tests for the create-task flow.
//!
//! Drives `App` the way the TUI loop does: key events in, payloads out
//! through the submission worker, outcomes drained back into the app.
//!
//! These tests validate:
//! - A filled form creates a task and shows its confirmation
//! - Server validation errors land on the form with the draft intact
//! - "Create another" returns to an empty form
//! - A second submit while one is in flight sends nothing
//! - An unreadable due date never reaches the network

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use parking_lot::Mutex;
use taskdesk::app::{App, INVALID_DUE_DATE};
use taskdesk::form::{Field, Focus};
use taskdesk::gateway::{GatewayConfig, HttpGateway, TaskGateway};
use taskdesk::net::{self, DEFAULT_CHANNEL_CAPACITY, SubmitCommand, SubmitEvent};
use taskdesk_proto::{CreateTaskRequest, FieldErrors, Task, TaskStatus};
use tokio::sync::mpsc;

/// Start the task backend in-process and return a gateway pointing at it.
async fn start_backend() -> (HttpGateway, tokio::task::JoinHandle<()>) {
    let (addr, handle) = taskdesk_server::server::start_server("127.0.0.1:0")
        .await
        .expect("failed to start backend");
    let gateway =
        HttpGateway::new(&GatewayConfig::new(format!("http://{addr}/api"))).expect("gateway");
    (gateway, handle)
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        assert!(app.handle_key_event(key(KeyCode::Char(c))).is_none());
    }
}

/// Press Enter, forward the payload to the worker, and apply the outcome.
async fn submit_and_wait(
    app: &mut App,
    cmd_tx: &mpsc::Sender<SubmitCommand>,
    evt_rx: &mut mpsc::Receiver<SubmitEvent>,
) {
    let request = app
        .handle_key_event(key(KeyCode::Enter))
        .expect("Enter should start a submission");
    assert!(app.is_loading());
    cmd_tx
        .send(SubmitCommand::Create(request))
        .await
        .expect("worker alive");

    let SubmitEvent::Finished(outcome) = tokio::time::timeout(Duration::from_secs(5), evt_rx.recv())
        .await
        .expect("timeout waiting for outcome")
        .expect("worker stopped");
    app.apply_outcome(outcome);
}

// =============================================================================
// Against the real backend
// =============================================================================

#[tokio::test]
async fn filled_form_creates_task_and_shows_confirmation() {
    let (gateway, _handle) = start_backend().await;
    let mut app = App::new(gateway.endpoint());
    let (cmd_tx, mut evt_rx) = net::spawn_submitter(gateway, DEFAULT_CHANNEL_CAPACITY);

    type_text(&mut app, "Review case");
    app.handle_key_event(key(KeyCode::Tab));
    type_text(&mut app, "Call the applicant");
    app.handle_key_event(key(KeyCode::Tab));
    app.handle_key_event(key(KeyCode::Right));
    app.handle_key_event(key(KeyCode::Tab));
    type_text(&mut app, "2024-12-31T17:00");
    assert_eq!(app.form.focus(), Focus::Field(Field::DueDate));
    assert_eq!(app.form.draft().status, TaskStatus::InProgress);

    submit_and_wait(&mut app, &cmd_tx, &mut evt_rx).await;

    let task = app.session.created().expect("task created");
    assert_eq!(task.id, 1);
    assert_eq!(task.title, "Review case");
    assert_eq!(task.status, "in_progress");

    let view = app.confirmation().expect("confirmation shown");
    assert_eq!(view.id_label, "#1");
    assert_eq!(view.description.as_str(), "Call the applicant");
    assert_eq!(view.badge.label, "In Progress");
    assert!(view.due.contains("2024") || view.due.contains("2025"), "{}", view.due);
}

#[tokio::test]
async fn validation_errors_keep_the_draft() {
    let (gateway, _handle) = start_backend().await;
    let mut app = App::new(gateway.endpoint());
    let (cmd_tx, mut evt_rx) = net::spawn_submitter(gateway, DEFAULT_CHANNEL_CAPACITY);

    app.form
        .on_field_change(Field::Description, "No title yet")
        .expect("text field");
    submit_and_wait(&mut app, &cmd_tx, &mut evt_rx).await;

    assert!(!app.is_loading());
    assert!(app.confirmation().is_none());
    let errors = app.session.errors();
    assert_eq!(errors.first("title"), Some("This field may not be blank."));
    assert!(errors.contains("due_date"));
    assert_eq!(app.form.draft().description, "No title yet");

    // Fixing the draft and resubmitting succeeds and clears the errors.
    app.form
        .on_field_change(Field::Title, "Review case")
        .expect("text field");
    app.form
        .on_field_change(Field::DueDate, "2024-12-31T17:00")
        .expect("text field");
    submit_and_wait(&mut app, &cmd_tx, &mut evt_rx).await;

    assert!(app.session.errors().is_empty());
    assert_eq!(app.session.created().map(|t| t.id), Some(1));
}

#[tokio::test]
async fn create_another_returns_to_empty_form() {
    let (gateway, _handle) = start_backend().await;
    let mut app = App::new(gateway.endpoint());
    let (cmd_tx, mut evt_rx) = net::spawn_submitter(gateway, DEFAULT_CHANNEL_CAPACITY);

    type_text(&mut app, "First");
    app.form
        .on_field_change(Field::DueDate, "2024-12-31T17:00")
        .expect("text field");
    submit_and_wait(&mut app, &cmd_tx, &mut evt_rx).await;
    assert!(app.confirmation().is_some());

    assert!(app.handle_key_event(key(KeyCode::Enter)).is_none());
    assert!(app.confirmation().is_none());
    assert_eq!(app.form.draft().title, "");
    assert!(app.session.errors().is_empty());

    type_text(&mut app, "Second");
    app.form
        .on_field_change(Field::DueDate, "2025-01-15T09:30")
        .expect("text field");
    submit_and_wait(&mut app, &cmd_tx, &mut evt_rx).await;
    assert_eq!(app.session.created().map(|t| t.id), Some(2));
}

#[tokio::test]
async fn unreachable_backend_shows_general_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let gateway =
        HttpGateway::new(&GatewayConfig::new(format!("http://{addr}/api"))).expect("gateway");
    let mut app = App::new(gateway.endpoint());
    let (cmd_tx, mut evt_rx) = net::spawn_submitter(gateway, DEFAULT_CHANNEL_CAPACITY);

    type_text(&mut app, "Review case");
    submit_and_wait(&mut app, &cmd_tx, &mut evt_rx).await;

    assert_eq!(app.session.errors(), &FieldErrors::unexpected());
    assert_eq!(app.form.draft().title, "Review case");
}

// =============================================================================
// Against a recording gateway
// =============================================================================

/// Records every request and answers with a fixed task.
#[derive(Clone, Default)]
struct RecordingGateway {
    requests: Arc<Mutex<Vec<CreateTaskRequest>>>,
}

impl TaskGateway for RecordingGateway {
    async fn create_task(&self, request: CreateTaskRequest) -> Result<Task, FieldErrors> {
        self.requests.lock().push(request.clone());
        Ok(Task {
            id: 99,
            title: request.title,
            description: request.description,
            status: request.status.as_str().to_string(),
            due_date: request.due_date,
            created_at: "2024-12-15T12:00:00Z".to_string(),
            updated_at: "2024-12-15T12:00:00Z".to_string(),
        })
    }
}

#[tokio::test]
async fn double_submit_sends_one_request() {
    let gateway = RecordingGateway::default();
    let requests = Arc::clone(&gateway.requests);
    let mut app = App::new("recording");
    let (cmd_tx, mut evt_rx) = net::spawn_submitter(gateway, DEFAULT_CHANNEL_CAPACITY);

    type_text(&mut app, "Review case");
    let first = app.handle_key_event(key(KeyCode::Enter));
    let second = app.handle_key_event(key(KeyCode::Enter));
    let ctrl_s = app.handle_key_event(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
    assert!(first.is_some());
    assert!(second.is_none());
    assert!(ctrl_s.is_none());

    cmd_tx
        .send(SubmitCommand::Create(first.expect("first request")))
        .await
        .expect("worker alive");
    let SubmitEvent::Finished(outcome) = tokio::time::timeout(Duration::from_secs(5), evt_rx.recv())
        .await
        .expect("timeout")
        .expect("worker stopped");
    app.apply_outcome(outcome);

    assert_eq!(requests.lock().len(), 1);
    assert_eq!(app.session.created().map(|t| t.id), Some(99));
}

#[tokio::test]
async fn unreadable_due_date_is_never_sent() {
    let gateway = RecordingGateway::default();
    let requests = Arc::clone(&gateway.requests);
    let mut app = App::new("recording");
    let (_cmd_tx, _evt_rx) = net::spawn_submitter(gateway, DEFAULT_CHANNEL_CAPACITY);

    type_text(&mut app, "Review case");
    app.form
        .on_field_change(Field::DueDate, "end of the month")
        .expect("text field");

    assert!(app.handle_key_event(key(KeyCode::Enter)).is_none());
    assert!(!app.is_loading());
    assert_eq!(app.session.errors().first("due_date"), Some(INVALID_DUE_DATE));
    assert!(requests.lock().is_empty());
}
