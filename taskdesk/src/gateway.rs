//! Submission gateway: the one network call that creates a task.
//!
//! Every failure mode (connection refused, timeout, unreadable body,
//! validation rejection) leaves this module as a [`FieldErrors`] value.
//! Callers never see transport errors and never need to know why a
//! submission failed.
//!
//! Each call sends exactly one request. There is no retry, caching or
//! deduplication: two overlapping calls create two tasks.

use std::future::Future;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use taskdesk_proto::{CreateTaskRequest, FieldErrors, Task, codec};

/// Backend base URL used when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Path of the creation endpoint relative to the base URL.
const TASKS_PATH: &str = "tasks/";

/// Settings injected into the gateway at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Base URL of the API, e.g. `http://localhost:8000/api`.
    pub base_url: String,
    /// Whole-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl GatewayConfig {
    /// Config for `base_url` with no timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    /// Sets a whole-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Full URL of the creation endpoint.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/{TASKS_PATH}", self.base_url.trim_end_matches('/'))
    }
}

/// Errors constructing a gateway.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Creates tasks on the backend.
pub trait TaskGateway: Send + Sync {
    /// Submits one creation request.
    ///
    /// Resolves with the created task, or with the normalized errors.
    fn create_task(
        &self,
        request: CreateTaskRequest,
    ) -> impl Future<Output = Result<Task, FieldErrors>> + Send;
}

/// Maps a failed response body to the errors shown to the user.
///
/// A body shaped `{ "errors": { field: [messages] } }` with at least one
/// field is forwarded as-is. Everything else, including no body at all,
/// becomes the single general "unexpected error" message.
#[must_use]
pub fn normalize_failure(body: Option<&[u8]>) -> FieldErrors {
    body.and_then(|bytes| codec::decode_error_body(bytes).ok())
        .map(|parsed| parsed.errors)
        .filter(|errors| !errors.is_empty())
        .unwrap_or_else(FieldErrors::unexpected)
}

/// [`TaskGateway`] over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpGateway {
    /// Builds a gateway for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Client`] if the HTTP client cannot be built.
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint: config.endpoint(),
        })
    }

    /// The URL requests are sent to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl TaskGateway for HttpGateway {
    async fn create_task(&self, request: CreateTaskRequest) -> Result<Task, FieldErrors> {
        let payload = codec::encode(&request).map_err(|e| {
            tracing::error!(error = %e, "failed to encode creation request");
            normalize_failure(None)
        })?;

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(endpoint = %self.endpoint, error = %e, "task creation request failed");
                normalize_failure(None)
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            tracing::warn!(%status, error = %e, "failed to read creation response body");
            normalize_failure(None)
        })?;

        if !status.is_success() {
            tracing::warn!(%status, "task creation rejected");
            return Err(normalize_failure(Some(body.as_ref())));
        }

        match codec::decode_created(&body) {
            Ok(created) => {
                tracing::debug!(id = created.task.id, message = %created.message, "task created");
                Ok(created.task)
            }
            Err(e) => {
                tracing::warn!(%status, error = %e, "malformed creation response");
                Err(normalize_failure(Some(body.as_ref())))
            }
        }
    }
}
