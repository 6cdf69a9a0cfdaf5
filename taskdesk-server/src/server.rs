//! HTTP surface: router, task-creation handler, and server startup.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use taskdesk_proto::{CreateTaskResponse, ErrorBody, FieldErrors, codec, errors::GENERAL};

use crate::store::TaskStore;
use crate::validation::{self, NewTaskInput};

/// Message returned alongside a created task.
pub const CREATED_MESSAGE: &str = "Task created successfully";

/// Errors starting the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The listener could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Requested address.
        addr: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Shared server state.
#[derive(Debug, Default)]
pub struct ServerState {
    /// Created tasks.
    pub store: TaskStore,
}

impl ServerState {
    /// Creates a state with an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Builds the API router.
pub fn router(state: Arc<ServerState>) -> axum::Router {
    axum::Router::new()
        .route("/api/tasks/", axum::routing::post(create_task))
        .with_state(state)
}

async fn create_task(State(state): State<Arc<ServerState>>, body: Bytes) -> Response {
    let input: NewTaskInput = match codec::decode(&body) {
        Ok(input) => input,
        Err(e) => {
            tracing::debug!(error = %e, "rejecting malformed request body");
            return bad_request(FieldErrors::single(GENERAL, "Malformed JSON request body."));
        }
    };

    match validation::validate(input) {
        Ok(new_task) => {
            let task = state.store.insert(new_task).await;
            tracing::info!(id = task.id, title = %task.title, "task created");
            (
                StatusCode::CREATED,
                Json(CreateTaskResponse {
                    message: CREATED_MESSAGE.to_string(),
                    task,
                }),
            )
                .into_response()
        }
        Err(errors) => {
            tracing::debug!(fields = ?errors.fields().collect::<Vec<_>>(), "validation failed");
            bad_request(errors)
        }
    }
}

fn bad_request(errors: FieldErrors) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorBody { errors })).into_response()
}

/// Starts the server on `addr` with a fresh state.
///
/// # Errors
///
/// Returns [`ServerError::Bind`] if the listener cannot bind to `addr`.
pub async fn start_server(
    addr: &str,
) -> Result<(std::net::SocketAddr, tokio::task::JoinHandle<()>), ServerError> {
    start_server_with_state(addr, Arc::new(ServerState::new())).await
}

/// Starts the server with a pre-built [`ServerState`].
///
/// Returns the bound address (useful with port `0`) and the serving task.
///
/// # Errors
///
/// Returns [`ServerError::Bind`] if the listener cannot bind to `addr`.
pub async fn start_server_with_state(
    addr: &str,
    state: Arc<ServerState>,
) -> Result<(std::net::SocketAddr, tokio::task::JoinHandle<()>), ServerError> {
    let app = router(state);

    let bind_err = |source| ServerError::Bind {
        addr: addr.to_string(),
        source,
    };
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(bind_err)?;
    let bound_addr = listener.local_addr().map_err(bind_err)?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "server error");
        }
    });

    Ok((bound_addr, handle))
}
