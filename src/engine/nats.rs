// NATS-backed engine: transcripts and recognition errors come from the STT
// service; the capture side answers permission probes.

use futures::stream::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::backend::{
    EngineError, EngineErrorKind, EngineEvent, EngineProvider, EventSink, PermissionStatus,
    RecognitionEngine,
};
use crate::nats::{EngineErrorMessage, NatsClient, TranscriptMessage};

/// One message seen by the transcript listener
#[derive(Debug, Clone, Copy)]
pub enum BusMessage<'a> {
    /// Payload from the transcript subject
    Transcript(&'a [u8]),
    /// Payload from the engine error subject
    Error(&'a [u8]),
    /// One of the subscriptions ended
    Closed,
}

/// Engine events for one bus message, and whether the listener is done
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ListenerStep {
    pub events: Vec<EngineEvent>,
    pub finished: bool,
}

impl ListenerStep {
    /// Map a bus message to engine callbacks for `session_id`
    ///
    /// Messages for other sessions and malformed payloads produce nothing.
    /// An error report ends the run, as does a closed subscription.
    pub fn translate(message: BusMessage<'_>, session_id: &str) -> Self {
        match message {
            BusMessage::Transcript(payload) => {
                match serde_json::from_slice::<TranscriptMessage>(payload) {
                    Ok(transcript) if transcript.session_id == session_id => Self {
                        events: vec![EngineEvent::Result {
                            transcript: transcript.text,
                            is_final: !transcript.partial,
                        }],
                        finished: false,
                    },
                    Ok(_) => Self::default(),
                    Err(e) => {
                        warn!("Failed to parse transcript message: {}", e);
                        Self::default()
                    }
                }
            }
            BusMessage::Error(payload) => {
                match serde_json::from_slice::<EngineErrorMessage>(payload) {
                    Ok(report) if report.session_id == session_id => Self {
                        events: vec![
                            EngineEvent::Error(EngineErrorKind::classify(&report.error)),
                            EngineEvent::Ended,
                        ],
                        finished: true,
                    },
                    Ok(_) => Self::default(),
                    Err(e) => {
                        warn!("Failed to parse engine error message: {}", e);
                        Self::default()
                    }
                }
            }
            BusMessage::Closed => Self {
                events: vec![EngineEvent::Ended],
                finished: true,
            },
        }
    }
}

pub struct NatsEngineProvider {
    client: NatsClient,
    probe_timeout: Duration,
}

impl NatsEngineProvider {
    pub fn new(client: NatsClient, probe_timeout: Duration) -> Self {
        Self {
            client,
            probe_timeout,
        }
    }
}

#[async_trait::async_trait]
impl EngineProvider for NatsEngineProvider {
    fn is_supported(&self) -> bool {
        true
    }

    async fn probe_permission(&self) -> PermissionStatus {
        match self.client.probe_permission(self.probe_timeout).await {
            Ok(true) => PermissionStatus::Granted,
            Ok(false) => PermissionStatus::Denied,
            Err(e) => {
                // The engine's own not-allowed error stays authoritative
                warn!("Permission probe unanswered, assuming granted: {:#}", e);
                PermissionStatus::Granted
            }
        }
    }

    async fn create(&self, sink: EventSink) -> anyhow::Result<Box<dyn RecognitionEngine>> {
        Ok(Box::new(NatsEngine {
            client: self.client.clone(),
            sink,
            listener: None,
        }))
    }

    fn name(&self) -> &str {
        "nats"
    }
}

pub struct NatsEngine {
    client: NatsClient,
    sink: EventSink,
    listener: Option<JoinHandle<()>>,
}

impl NatsEngine {
    fn is_listening(&self) -> bool {
        self.listener.as_ref().is_some_and(|task| !task.is_finished())
    }
}

#[async_trait::async_trait]
impl RecognitionEngine for NatsEngine {
    async fn start(&mut self) -> Result<(), EngineError> {
        if self.is_listening() {
            return Err(EngineError::AlreadyStarted);
        }

        let mut transcripts = self
            .client
            .subscribe_transcripts()
            .await
            .map_err(|e| EngineError::Failed(format!("{:#}", e)))?;
        let mut errors = self
            .client
            .subscribe_engine_errors()
            .await
            .map_err(|e| EngineError::Failed(format!("{:#}", e)))?;

        let sink = self.sink.clone();
        let session_id = self.client.session_id().to_string();

        self.listener = Some(tokio::spawn(async move {
            info!("Transcript listener started for session {}", session_id);
            sink.emit(EngineEvent::Started);

            loop {
                let step = tokio::select! {
                    msg = transcripts.next() => match msg {
                        Some(msg) => ListenerStep::translate(
                            BusMessage::Transcript(&msg.payload[..]),
                            &session_id,
                        ),
                        None => ListenerStep::translate(BusMessage::Closed, &session_id),
                    },
                    msg = errors.next() => match msg {
                        Some(msg) => ListenerStep::translate(
                            BusMessage::Error(&msg.payload[..]),
                            &session_id,
                        ),
                        None => ListenerStep::translate(BusMessage::Closed, &session_id),
                    },
                };

                for event in step.events {
                    sink.emit(event);
                }
                if step.finished {
                    break;
                }
            }

            debug!("Transcript listener stopped for session {}", session_id);
        }));

        Ok(())
    }

    async fn stop(&mut self) -> Result<(), EngineError> {
        if !self.is_listening() {
            return Err(EngineError::NotActive);
        }

        // Dropping the task drops both subscriptions
        if let Some(listener) = self.listener.take() {
            listener.abort();
        }
        self.sink.emit(EngineEvent::Ended);

        Ok(())
    }

    fn name(&self) -> &str {
        "nats"
    }
}
