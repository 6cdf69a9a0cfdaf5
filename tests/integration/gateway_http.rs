//! Integration tests for the HTTP submission gateway.
//!
//! Drives the real `HttpGateway` against the in-process backend and against
//! ad hoc axum routers that misbehave in specific ways. Every failure must
//! come back as `FieldErrors`, never as a panic or transport error.

use std::sync::Arc;
use std::time::Duration;

use axum::Json;
use axum::body::Bytes;
use axum::http::{HeaderMap, StatusCode, header::CONTENT_TYPE};
use axum::response::Html;
use axum::routing::post;
use parking_lot::Mutex;
use taskdesk::gateway::{GatewayConfig, HttpGateway, TaskGateway};
use taskdesk_proto::errors::GENERAL;
use taskdesk_proto::{CreateTaskRequest, FieldErrors, TaskStatus};

/// Start the task backend in-process and return its API base URL.
async fn start_backend() -> (String, tokio::task::JoinHandle<()>) {
    let (addr, handle) = taskdesk_server::server::start_server("127.0.0.1:0")
        .await
        .expect("failed to start backend");
    (format!("http://{addr}/api"), handle)
}

/// Serve an arbitrary router and return its API base URL.
async fn serve(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    format!("http://{addr}/api")
}

fn gateway(base_url: &str) -> HttpGateway {
    HttpGateway::new(&GatewayConfig::new(base_url)).expect("gateway")
}

fn request(title: &str) -> CreateTaskRequest {
    CreateTaskRequest {
        title: title.to_string(),
        description: "Call the applicant".to_string(),
        status: TaskStatus::InProgress,
        due_date: "2024-12-31T17:00:00.000Z".to_string(),
    }
}

// =============================================================================
// Against the real backend
// =============================================================================

#[tokio::test]
async fn creates_task_on_backend() {
    let (url, _handle) = start_backend().await;
    let task = gateway(&url)
        .create_task(request("Review case"))
        .await
        .expect("task should be created");

    assert_eq!(task.id, 1);
    assert_eq!(task.title, "Review case");
    assert_eq!(task.description, "Call the applicant");
    assert_eq!(task.status, "in_progress");
    assert_eq!(task.due_date, "2024-12-31T17:00:00Z");
    assert_eq!(task.created_at, task.updated_at);
}

#[tokio::test]
async fn backend_validation_errors_are_forwarded() {
    let (url, _handle) = start_backend().await;
    let mut bad = request("   ");
    bad.due_date = String::new();

    let errors = gateway(&url)
        .create_task(bad)
        .await
        .expect_err("blank title must be rejected");

    assert_eq!(errors.first("title"), Some("This field may not be blank."));
    assert!(
        errors
            .first("due_date")
            .is_some_and(|m| m.starts_with("Datetime has wrong format")),
        "{errors:?}"
    );
    assert!(!errors.contains(GENERAL));
}

#[tokio::test]
async fn concurrent_submissions_create_two_tasks() {
    let (url, _handle) = start_backend().await;
    let gateway = gateway(&url);

    let (a, b) = tokio::join!(
        gateway.create_task(request("Review case")),
        gateway.create_task(request("Review case")),
    );

    let mut ids = vec![a.expect("first").id, b.expect("second").id];
    ids.sort_unstable();
    assert_eq!(ids, [1, 2]);
}

// =============================================================================
// Against misbehaving servers
// =============================================================================

#[tokio::test]
async fn sends_json_to_tasks_endpoint() {
    let seen: Arc<Mutex<Vec<(Option<String>, serde_json::Value)>>> = Arc::default();
    let recorder = Arc::clone(&seen);
    let router = axum::Router::new().route(
        "/api/tasks/",
        post(move |headers: HeaderMap, body: Bytes| {
            let recorder = Arc::clone(&recorder);
            async move {
                let content_type = headers
                    .get(CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                let json: serde_json::Value = serde_json::from_slice(&body).unwrap_or_default();
                recorder.lock().push((content_type, json));
                (StatusCode::BAD_REQUEST, Json(serde_json::json!({"errors": {"title": ["x"]}})))
            }
        }),
    );
    let url = serve(router).await;

    let _ = gateway(&url).create_task(request("Review case")).await;

    let seen = seen.lock();
    assert_eq!(seen.len(), 1, "exactly one request per submission");
    let (content_type, body) = &seen[0];
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(
        body,
        &serde_json::json!({
            "title": "Review case",
            "description": "Call the applicant",
            "status": "in_progress",
            "due_date": "2024-12-31T17:00:00.000Z",
        })
    );
}

#[tokio::test]
async fn structured_error_body_is_passed_through() {
    let router = axum::Router::new().route(
        "/api/tasks/",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({
                    "errors": {
                        "title": ["Title is required", "Title too short"],
                        "due_date": ["Invalid date format"],
                    }
                })),
            )
        }),
    );
    let url = serve(router).await;

    let errors = gateway(&url)
        .create_task(request(""))
        .await
        .expect_err("should fail");
    assert_eq!(errors.messages("title").len(), 2);
    assert_eq!(errors.first("title"), Some("Title is required"));
    assert_eq!(errors.first("due_date"), Some("Invalid date format"));
}

#[tokio::test]
async fn server_error_page_is_unexpected() {
    let router = axum::Router::new().route(
        "/api/tasks/",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Html("<h1>Server Error</h1>")) }),
    );
    let url = serve(router).await;

    let errors = gateway(&url)
        .create_task(request("Review case"))
        .await
        .expect_err("should fail");
    assert_eq!(errors, FieldErrors::unexpected());
}

#[tokio::test]
async fn malformed_success_body_is_unexpected() {
    let router = axum::Router::new().route(
        "/api/tasks/",
        post(|| async { (StatusCode::CREATED, Json(serde_json::json!({"message": "ok"}))) }),
    );
    let url = serve(router).await;

    let errors = gateway(&url)
        .create_task(request("Review case"))
        .await
        .expect_err("should fail");
    assert_eq!(errors, FieldErrors::unexpected());
}

#[tokio::test]
async fn connection_refused_is_unexpected() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let errors = gateway(&format!("http://{addr}/api"))
        .create_task(request("Review case"))
        .await
        .expect_err("should fail");
    assert_eq!(errors, FieldErrors::unexpected());
}

#[tokio::test]
async fn timeout_is_unexpected() {
    let router = axum::Router::new().route(
        "/api/tasks/",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            StatusCode::CREATED
        }),
    );
    let url = serve(router).await;
    let gateway = HttpGateway::new(
        &GatewayConfig::new(url).with_timeout(Duration::from_millis(200)),
    )
    .expect("gateway");

    let errors = tokio::time::timeout(
        Duration::from_secs(3),
        gateway.create_task(request("Review case")),
    )
    .await
    .expect("gateway should give up on its own")
    .expect_err("should fail");
    assert_eq!(errors, FieldErrors::unexpected());
}
