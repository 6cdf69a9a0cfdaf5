//! Submission worker bridging the TUI loop and the async gateway.
//!
//! ```text
//! TUI (main thread)  <-- SubmitEvent ---  tokio background tasks
//!                     --- SubmitCommand ->
//! ```
//!
//! The main thread sends [`SubmitCommand`]s and drains [`SubmitEvent`]s on
//! each tick of the poll-based event loop. Each creation request runs on
//! its own task so the worker never blocks on a slow backend.

use std::sync::Arc;

use taskdesk_proto::{CreateTaskRequest, FieldErrors, Task};
use tokio::sync::mpsc;

use crate::gateway::TaskGateway;

/// Default capacity of the command and event channels.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 16;

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum SubmitCommand {
    /// Send one creation request.
    Create(CreateTaskRequest),
    /// Stop accepting commands.
    Shutdown,
}

/// Events sent from the worker back to the TUI.
#[derive(Debug)]
pub enum SubmitEvent {
    /// A creation request finished.
    Finished(Result<Task, FieldErrors>),
}

/// Spawns the submission worker and returns its channel handles.
///
/// Must be called from within a tokio runtime.
pub fn spawn_submitter<G>(
    gateway: G,
    capacity: usize,
) -> (mpsc::Sender<SubmitCommand>, mpsc::Receiver<SubmitEvent>)
where
    G: TaskGateway + 'static,
{
    let capacity = capacity.max(1);
    let (cmd_tx, cmd_rx) = mpsc::channel(capacity);
    let (evt_tx, evt_rx) = mpsc::channel(capacity);

    tokio::spawn(command_handler(Arc::new(gateway), cmd_rx, evt_tx));

    (cmd_tx, evt_rx)
}

async fn command_handler<G>(
    gateway: Arc<G>,
    mut cmd_rx: mpsc::Receiver<SubmitCommand>,
    evt_tx: mpsc::Sender<SubmitEvent>,
) where
    G: TaskGateway + 'static,
{
    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            SubmitCommand::Create(request) => {
                let gateway = Arc::clone(&gateway);
                let evt_tx = evt_tx.clone();
                tokio::spawn(async move {
                    let outcome = gateway.create_task(request).await;
                    if evt_tx.send(SubmitEvent::Finished(outcome)).await.is_err() {
                        tracing::debug!("submission finished after the UI went away");
                    }
                });
            }
            SubmitCommand::Shutdown => {
                tracing::info!("submission worker shutting down");
                break;
            }
        }
    }
}
