use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, Sleep};
use tracing::{debug, error, info, warn};

use super::handle::{ControlCommand, ControllerHandle};
use super::state::RecognitionState;
use super::{ABORT_WARNING_MESSAGE, ABORT_WARNING_TITLE};
use crate::engine::{
    EngineError, EngineErrorKind, EngineEvent, EngineProvider, EventSink, PermissionStatus,
    RecognitionEngine,
};
use crate::executor::{CommandExecutor, Feedback};
use crate::session::{RecognitionSession, SessionConfig, SessionStatus};

/// Recognition lifecycle controller
///
/// Runs as a single task; engine callbacks, control requests and the restart
/// timer are handled one at a time, so no state is shared across threads.
pub struct RecognitionController {
    provider: Arc<dyn EngineProvider>,
    feedback: Arc<dyn Feedback>,
    executor: CommandExecutor,
    config: SessionConfig,
    session: RecognitionSession,
    state: RecognitionState,

    /// Whether the user wants the engine listening
    enabled: bool,

    /// The single engine handle
    engine: Option<Box<dyn RecognitionEngine>>,

    /// Generation of the live engine handle; older events are stale
    generation: u64,

    events_tx: mpsc::UnboundedSender<(u64, EngineEvent)>,
    events_rx: mpsc::UnboundedReceiver<(u64, EngineEvent)>,

    /// The single pending restart, if any
    restart: Option<Pin<Box<Sleep>>>,

    status_tx: watch::Sender<SessionStatus>,
}

impl RecognitionController {
    /// Mount a controller on its own task
    ///
    /// The controller probes support and permission immediately and starts
    /// listening when both succeed. Dropping every handle disposes it.
    pub fn spawn(
        provider: Arc<dyn EngineProvider>,
        feedback: Arc<dyn Feedback>,
        config: SessionConfig,
    ) -> (ControllerHandle, JoinHandle<()>) {
        let (commands_tx, commands_rx) = mpsc::channel(32);
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let executor = CommandExecutor::new(Arc::clone(&feedback), config.debounce);
        let initial = SessionStatus {
            state: RecognitionState::Uninitialized,
            enabled: false,
            is_active: false,
            consecutive_abort_count: 0,
            permission_denied: false,
            last_error_at: None,
            restart_pending: false,
            engine: provider.name().to_string(),
        };
        let (status_tx, status_rx) = watch::channel(initial);

        let controller = Self {
            provider,
            feedback,
            executor,
            config,
            session: RecognitionSession::new(),
            state: RecognitionState::Uninitialized,
            enabled: false,
            engine: None,
            generation: 0,
            events_tx,
            events_rx,
            restart: None,
            status_tx,
        };

        let task = tokio::spawn(controller.run(commands_rx));

        (ControllerHandle::new(commands_tx, status_rx), task)
    }

    async fn run(mut self, mut commands: mpsc::Receiver<ControlCommand>) {
        self.mount().await;
        self.publish_status();

        loop {
            tokio::select! {
                biased;

                command = commands.recv() => {
                    let Some(command) = command else {
                        self.dispose().await;
                        break;
                    };
                    if !self.handle_command(command).await {
                        break;
                    }
                }

                Some((generation, event)) = self.events_rx.recv() => {
                    self.handle_event(generation, event).await;
                }

                _ = restart_elapsed(&mut self.restart) => {
                    self.restart = None;
                    self.on_restart_timer().await;
                }
            }

            self.publish_status();
        }

        info!("Recognition controller stopped");
    }

    // ========================================================================
    // Control requests
    // ========================================================================

    /// Returns false once the controller has been disposed
    async fn handle_command(&mut self, command: ControlCommand) -> bool {
        match command {
            ControlCommand::Start { done } => {
                self.request_start().await;
                self.acknowledge(done);
            }
            ControlCommand::Stop { done } => {
                self.request_stop().await;
                self.acknowledge(done);
            }
            ControlCommand::Toggle { done } => {
                let recovering = matches!(
                    self.state,
                    RecognitionState::PermissionDenied | RecognitionState::Unsupported
                );
                if self.enabled && !recovering {
                    self.request_stop().await;
                } else {
                    self.request_start().await;
                }
                self.acknowledge(done);
            }
            ControlCommand::Transcript { text, reply } => {
                let outcome = self.executor.execute(&text);
                let _ = reply.send(outcome);
            }
            ControlCommand::Dispose { done } => {
                self.dispose().await;
                let _ = done.send(());
                return false;
            }
        }
        true
    }

    /// Publish the new status before releasing the caller
    fn acknowledge(&self, done: oneshot::Sender<()>) {
        self.publish_status();
        let _ = done.send(());
    }

    async fn mount(&mut self) {
        if !self.provider.is_supported() {
            warn!(
                "Speech recognition not supported by {} provider, voice commands disabled",
                self.provider.name()
            );
            self.state = RecognitionState::Unsupported;
            return;
        }

        info!("Mounting recognition controller ({} engine)", self.provider.name());
        self.enabled = true;
        self.probe_and_start().await;
    }

    async fn request_start(&mut self) {
        match self.state {
            RecognitionState::Unsupported => {
                info!("Start ignored: speech recognition is not supported");
                return;
            }
            RecognitionState::PermissionDenied => {
                info!("Re-probing microphone permission");
                self.enabled = true;
                self.probe_and_start().await;
                return;
            }
            _ => {}
        }

        self.enabled = true;
        if self.session.is_active {
            debug!("Start ignored: recognition already active");
            return;
        }
        self.start_engine().await;
    }

    async fn request_stop(&mut self) {
        self.enabled = false;
        self.cancel_restart();

        if !self.session.is_active {
            if matches!(self.state, RecognitionState::Faulted(_)) {
                self.state = RecognitionState::Stopped;
            }
            debug!("Stop ignored: recognition not active");
            return;
        }

        info!("Stopping speech recognition");
        self.session.is_active = false;
        self.state = RecognitionState::Stopped;

        // The end callback of this run must not reach a later start
        self.teardown_engine().await;
    }

    async fn dispose(&mut self) {
        self.cancel_restart();
        self.enabled = false;
        self.session.is_active = false;
        self.teardown_engine().await;
        self.state = RecognitionState::Uninitialized;
        self.publish_status();

        info!("Recognition controller disposed");
    }

    // ========================================================================
    // Engine lifecycle
    // ========================================================================

    async fn probe_and_start(&mut self) {
        match self.provider.probe_permission().await {
            PermissionStatus::Granted => {
                self.session.permission_denied = false;
                self.start_engine().await;
            }
            PermissionStatus::Denied => {
                warn!("Microphone permission denied");
                self.deny_permission().await;
            }
        }
    }

    async fn start_engine(&mut self) {
        if self.session.is_active {
            debug!("Engine already active, not starting again");
            return;
        }

        self.cancel_restart();
        self.session.is_active = true;
        self.state = RecognitionState::Starting;

        if self.engine.is_none() {
            if let Err(e) = self.create_engine().await {
                self.start_failed(format!("{:#}", e));
                return;
            }
        }

        match self.try_start().await {
            Ok(()) => debug!("Engine start issued"),
            Err(EngineError::AlreadyStarted) => self.assume_listening(),
            Err(e) => {
                warn!("Engine failed to start ({}), recreating handle", e);
                self.teardown_engine().await;
                self.state = RecognitionState::Uninitialized;

                if let Err(e) = self.create_engine().await {
                    self.start_failed(format!("{:#}", e));
                    return;
                }
                self.state = RecognitionState::Starting;

                match self.try_start().await {
                    Ok(()) => debug!("Engine start issued on fresh handle"),
                    Err(EngineError::AlreadyStarted) => self.assume_listening(),
                    Err(e) => self.start_failed(e.to_string()),
                }
            }
        }
    }

    async fn try_start(&mut self) -> Result<(), EngineError> {
        match self.engine.as_mut() {
            Some(engine) => engine.start().await,
            None => Err(EngineError::Failed("no engine handle".to_string())),
        }
    }

    // TODO: confirm the engine is really listening instead of trusting
    // AlreadyStarted; a leaked duplicate handle would look the same.
    fn assume_listening(&mut self) {
        warn!("Engine reports it is already started, treating as listening");
        self.state = RecognitionState::Listening;
    }

    fn start_failed(&mut self, reason: String) {
        error!("Unable to start speech recognition: {}", reason);
        self.session.is_active = false;
        self.session.record_error(Instant::now());
        self.state = RecognitionState::Faulted(EngineErrorKind::Other(reason));
        self.schedule_restart(self.config.fault_delay);
    }

    async fn create_engine(&mut self) -> anyhow::Result<()> {
        self.generation += 1;
        let sink = EventSink::new(self.generation, self.events_tx.clone());
        let engine = self.provider.create(sink).await?;

        info!(
            "Created {} engine handle (generation {})",
            engine.name(),
            self.generation
        );
        self.engine = Some(engine);

        Ok(())
    }

    async fn teardown_engine(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            match engine.stop().await {
                Ok(()) | Err(EngineError::NotActive) => {}
                Err(e) => debug!("Ignoring stop failure during teardown: {}", e),
            }
            debug!("Tore down {} engine handle", engine.name());
        }
        // Anything still queued from the old handle is stale from here on
        self.generation += 1;
    }

    async fn deny_permission(&mut self) {
        self.cancel_restart();
        self.session.is_active = false;
        self.session.permission_denied = true;
        self.teardown_engine().await;
        self.state = RecognitionState::PermissionDenied;
    }

    // ========================================================================
    // Engine callbacks
    // ========================================================================

    async fn handle_event(&mut self, generation: u64, event: EngineEvent) {
        if generation != self.generation {
            debug!("Ignoring {:?} from stale engine handle", event);
            return;
        }

        match event {
            EngineEvent::Started => self.on_started(),
            EngineEvent::Ended => self.on_ended(),
            EngineEvent::Error(kind) => self.on_error(kind).await,
            EngineEvent::Result {
                transcript,
                is_final: true,
            } => {
                self.executor.execute(&transcript);
            }
            EngineEvent::Result {
                transcript,
                is_final: false,
            } => debug!("Interim transcript: {}", transcript),
        }
    }

    fn on_started(&mut self) {
        if !self.state.is_engine_live() {
            debug!("Ignoring start acknowledgement in state {:?}", self.state);
            return;
        }

        self.session.is_active = true;
        self.session
            .acknowledge_start(Instant::now(), &self.config);
        if self.state != RecognitionState::Listening {
            info!("Speech recognition listening");
        }
        self.state = RecognitionState::Listening;
    }

    fn on_ended(&mut self) {
        // An error already moved us out of a live state for this failure
        if !self.state.is_engine_live() {
            debug!("Ignoring end in state {:?}", self.state);
            return;
        }

        self.session.is_active = false;
        self.state = RecognitionState::Stopped;

        if self.enabled {
            let delay = self.session.end_delay(&self.config);
            debug!("Recognition ended, restarting in {:?}", delay);
            self.schedule_restart(delay);
        }
    }

    async fn on_error(&mut self, kind: EngineErrorKind) {
        if !self.state.is_engine_live() {
            debug!("Ignoring {} error in state {:?}", kind, self.state);
            return;
        }

        let now = Instant::now();
        self.session.is_active = false;
        self.session.record_error(now);

        match kind {
            EngineErrorKind::NotAllowed => {
                warn!("Engine reported not-allowed, automatic restarts disabled");
                self.deny_permission().await;
            }
            EngineErrorKind::Aborted => {
                let record = self.session.record_abort(now, &self.config);
                warn!("Recognition aborted ({} in current burst)", record.count);
                if record.warn {
                    self.feedback
                        .notify(ABORT_WARNING_TITLE, ABORT_WARNING_MESSAGE);
                }
                let delay = self.session.abort_backoff(&self.config);
                self.fault(EngineErrorKind::Aborted, delay).await;
            }
            EngineErrorKind::Network => {
                warn!("Recognition network error");
                self.fault(EngineErrorKind::Network, self.config.network_delay)
                    .await;
            }
            EngineErrorKind::Other(code) => {
                warn!("Recognition error: {}", code);
                self.fault(EngineErrorKind::Other(code), self.config.fault_delay)
                    .await;
            }
        }
    }

    /// Drop the failed handle and schedule a restart on a fresh one
    ///
    /// An engine usually follows an error with an end callback, possibly
    /// after the restart delay. Tearing the handle down makes that callback
    /// stale instead of letting it end the next run.
    async fn fault(&mut self, kind: EngineErrorKind, delay: Duration) {
        self.teardown_engine().await;
        self.state = RecognitionState::Faulted(kind);
        self.schedule_restart(delay);
    }

    // ========================================================================
    // Restart timer
    // ========================================================================

    async fn on_restart_timer(&mut self) {
        if !self.enabled {
            return;
        }
        if matches!(
            self.state,
            RecognitionState::PermissionDenied
                | RecognitionState::Unsupported
                | RecognitionState::Uninitialized
        ) {
            debug!("Restart skipped in state {:?}", self.state);
            return;
        }

        info!("Restarting speech recognition");
        self.start_engine().await;
    }

    /// Replaces any pending restart
    fn schedule_restart(&mut self, delay: Duration) {
        if self.restart.is_some() {
            debug!("Replacing pending restart");
        }
        debug!("Restart scheduled in {:?}", delay);
        self.restart = Some(Box::pin(tokio::time::sleep(delay)));
    }

    fn cancel_restart(&mut self) {
        if self.restart.take().is_some() {
            debug!("Cancelled pending restart");
        }
    }

    fn publish_status(&self) {
        self.status_tx.send_replace(SessionStatus {
            state: self.state.clone(),
            enabled: self.enabled,
            is_active: self.session.is_active,
            consecutive_abort_count: self.session.consecutive_abort_count(),
            permission_denied: self.session.permission_denied,
            last_error_at: self.session.last_error_wall(),
            restart_pending: self.restart.is_some(),
            engine: self.provider.name().to_string(),
        });
    }
}

async fn restart_elapsed(timer: &mut Option<Pin<Box<Sleep>>>) {
    match timer.as_mut() {
        Some(sleep) => sleep.as_mut().await,
        None => std::future::pending().await,
    }
}
