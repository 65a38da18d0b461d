use tokio::sync::{mpsc, oneshot, watch};

use crate::executor::ExecutionOutcome;
use crate::session::SessionStatus;

/// Request sent to the controller task
pub(crate) enum ControlCommand {
    Start {
        done: oneshot::Sender<()>,
    },
    Stop {
        done: oneshot::Sender<()>,
    },
    Toggle {
        done: oneshot::Sender<()>,
    },
    Transcript {
        text: String,
        reply: oneshot::Sender<ExecutionOutcome>,
    },
    Dispose {
        done: oneshot::Sender<()>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControllerError {
    #[error("recognition controller has shut down")]
    Closed,
}

/// Cloneable handle to a running controller
///
/// This is the only way to drive the engine: start/stop/toggle requests are
/// serialized through the controller task.
#[derive(Clone)]
pub struct ControllerHandle {
    commands: mpsc::Sender<ControlCommand>,
    status: watch::Receiver<SessionStatus>,
}

impl ControllerHandle {
    pub(crate) fn new(
        commands: mpsc::Sender<ControlCommand>,
        status: watch::Receiver<SessionStatus>,
    ) -> Self {
        Self { commands, status }
    }

    /// Ask the engine to listen; no-op when already listening
    ///
    /// Control requests resolve once the controller has processed them.
    pub async fn start(&self) -> Result<(), ControllerError> {
        self.request(|done| ControlCommand::Start { done }).await
    }

    /// Stop listening and disable automatic restarts
    pub async fn stop(&self) -> Result<(), ControllerError> {
        self.request(|done| ControlCommand::Stop { done }).await
    }

    /// Explicit user toggle; re-probes permission after a denial
    pub async fn toggle(&self) -> Result<(), ControllerError> {
        self.request(|done| ControlCommand::Toggle { done }).await
    }

    /// Run a finalized transcript through the command executor
    pub async fn submit_transcript(
        &self,
        text: impl Into<String>,
    ) -> Result<ExecutionOutcome, ControllerError> {
        let (reply, rx) = oneshot::channel();
        self.send(ControlCommand::Transcript {
            text: text.into(),
            reply,
        })
        .await?;
        rx.await.map_err(|_| ControllerError::Closed)
    }

    /// Cancel any pending restart, stop the engine and end the controller task
    pub async fn dispose(&self) -> Result<(), ControllerError> {
        self.request(|done| ControlCommand::Dispose { done }).await
    }

    /// Current session snapshot
    pub fn status(&self) -> SessionStatus {
        self.status.borrow().clone()
    }

    /// Observe session snapshots as they change
    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.status.clone()
    }

    async fn request<F>(&self, command: F) -> Result<(), ControllerError>
    where
        F: FnOnce(oneshot::Sender<()>) -> ControlCommand,
    {
        let (done, rx) = oneshot::channel();
        self.send(command(done)).await?;
        rx.await.map_err(|_| ControllerError::Closed)
    }

    async fn send(&self, command: ControlCommand) -> Result<(), ControllerError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| ControllerError::Closed)
    }
}
