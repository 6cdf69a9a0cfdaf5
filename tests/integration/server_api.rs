//! Integration tests for the task-creation endpoint.
//!
//! Starts the backend in-process and speaks raw HTTP/JSON to it, so the
//! wire contract is checked independently of the client gateway.

use serde_json::{Value, json};

/// Start the backend in-process and return the endpoint URL.
async fn start_backend() -> (String, tokio::task::JoinHandle<()>) {
    let (addr, handle) = taskdesk_server::server::start_server("127.0.0.1:0")
        .await
        .expect("failed to start backend");
    (format!("http://{addr}/api/tasks/"), handle)
}

async fn post(url: &str, body: impl Into<reqwest::Body>) -> (u16, Value) {
    let response = reqwest::Client::new()
        .post(url)
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body(body)
        .send()
        .await
        .expect("request failed");
    let status = response.status().as_u16();
    let json = response.json().await.expect("JSON body");
    (status, json)
}

#[tokio::test]
async fn valid_payload_is_created() {
    let (url, _handle) = start_backend().await;
    let (status, body) = post(
        &url,
        json!({
            "title": "  Review case  ",
            "description": "Call the applicant",
            "status": "completed",
            "due_date": "2024-12-31T17:00:00.000Z",
        })
        .to_string(),
    )
    .await;

    assert_eq!(status, 201);
    assert_eq!(body["message"], "Task created successfully");
    let task = &body["task"];
    assert_eq!(task["id"], 1);
    assert_eq!(task["title"], "Review case");
    assert_eq!(task["description"], "Call the applicant");
    assert_eq!(task["status"], "completed");
    assert_eq!(task["due_date"], "2024-12-31T17:00:00Z");
    assert_eq!(task["created_at"], task["updated_at"]);
}

#[tokio::test]
async fn ids_increase_and_status_defaults_to_pending() {
    let (url, _handle) = start_backend().await;
    let payload = json!({"title": "Review case", "due_date": "2024-12-31T17:00:00+01:00"}).to_string();

    let (_, first) = post(&url, payload.clone()).await;
    let (_, second) = post(&url, payload).await;

    assert_eq!(first["task"]["id"], 1);
    assert_eq!(second["task"]["id"], 2);
    assert_eq!(first["task"]["status"], "pending");
    assert_eq!(first["task"]["description"], "");
    assert_eq!(first["task"]["due_date"], "2024-12-31T16:00:00Z");
}

#[tokio::test]
async fn missing_fields_are_all_reported() {
    let (url, _handle) = start_backend().await;
    let (status, body) = post(&url, "{}").await;

    assert_eq!(status, 400);
    assert_eq!(body["errors"]["title"][0], "This field is required.");
    assert_eq!(body["errors"]["due_date"][0], "This field is required.");
    assert!(body["errors"].get("status").is_none());
}

#[tokio::test]
async fn invalid_values_name_their_fields() {
    let (url, _handle) = start_backend().await;
    let (status, body) = post(
        &url,
        json!({
            "title": "x".repeat(256),
            "status": "archived",
            "due_date": "31/12/2024",
        })
        .to_string(),
    )
    .await;

    assert_eq!(status, 400);
    let errors = &body["errors"];
    assert_eq!(
        errors["title"][0],
        "Ensure this field has no more than 255 characters."
    );
    assert_eq!(errors["status"][0], "\"archived\" is not a valid choice.");
    assert!(
        errors["due_date"][0]
            .as_str()
            .is_some_and(|m| m.starts_with("Datetime has wrong format"))
    );
}

#[tokio::test]
async fn malformed_json_is_a_general_error() {
    let (url, _handle) = start_backend().await;
    let (status, body) = post(&url, "{not json").await;

    assert_eq!(status, 400);
    assert_eq!(body["errors"]["general"][0], "Malformed JSON request body.");
}
