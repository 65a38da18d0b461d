use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::mpsc;

/// Error kind reported by a speech recognition engine
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EngineErrorKind {
    /// Recognition was aborted (transient, counted towards abort bursts)
    Aborted,
    /// Network failure between engine and recognizer (transient)
    Network,
    /// Microphone permission denied (terminal until the user acts)
    NotAllowed,
    /// Any other engine error code (transient)
    Other(String),
}

impl EngineErrorKind {
    /// Classify a raw engine error code
    pub fn classify(code: &str) -> Self {
        match code.trim() {
            "aborted" => EngineErrorKind::Aborted,
            "network" => EngineErrorKind::Network,
            "not-allowed" => EngineErrorKind::NotAllowed,
            other => EngineErrorKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            EngineErrorKind::Aborted => "aborted",
            EngineErrorKind::Network => "network",
            EngineErrorKind::NotAllowed => "not-allowed",
            EngineErrorKind::Other(code) => code,
        }
    }

    /// Terminal errors are never retried automatically
    pub fn is_terminal(&self) -> bool {
        matches!(self, EngineErrorKind::NotAllowed)
    }
}

impl fmt::Display for EngineErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by engine control calls
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("recognition already started")]
    AlreadyStarted,

    #[error("recognition is not active")]
    NotActive,

    #[error("engine failure: {0}")]
    Failed(String),
}

/// Event emitted by an engine handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// The engine acknowledged `start()` and is listening
    Started,
    /// The engine stopped listening
    Ended,
    /// The engine reported an error; usually followed by `Ended`
    Error(EngineErrorKind),
    /// A transcript, interim or final
    Result { transcript: String, is_final: bool },
}

/// Callback set attached to one engine handle
///
/// Every event is tagged with the generation of the handle that produced it,
/// so events from a torn-down handle can be told apart from the live one.
#[derive(Debug, Clone)]
pub struct EventSink {
    generation: u64,
    tx: mpsc::UnboundedSender<(u64, EngineEvent)>,
}

impl EventSink {
    pub(crate) fn new(generation: u64, tx: mpsc::UnboundedSender<(u64, EngineEvent)>) -> Self {
        Self { generation, tx }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Deliver an event; silently dropped once the controller is gone
    pub fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send((self.generation, event));
    }
}

/// Microphone permission as reported by a probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// Speech recognition engine handle
///
/// Implementations:
/// - Stdin: typed lines act as final transcripts (development)
/// - NATS: transcripts streamed from the STT service
#[async_trait::async_trait]
pub trait RecognitionEngine: Send {
    /// Begin listening
    ///
    /// Must fail with `EngineError::AlreadyStarted` when already listening.
    async fn start(&mut self) -> Result<(), EngineError>;

    /// Stop listening
    ///
    /// Fails with `EngineError::NotActive` when not listening.
    async fn stop(&mut self) -> Result<(), EngineError>;

    /// Engine name for logging
    fn name(&self) -> &str;
}

/// Capability-detecting factory for engine handles
#[async_trait::async_trait]
pub trait EngineProvider: Send + Sync {
    /// Whether this environment can run the engine at all
    fn is_supported(&self) -> bool;

    /// Probe microphone permission
    async fn probe_permission(&self) -> PermissionStatus;

    /// Construct a fresh engine handle reporting through `sink`
    async fn create(&self, sink: EventSink) -> anyhow::Result<Box<dyn RecognitionEngine>>;

    /// Provider name for logging
    fn name(&self) -> &str;
}

/// Provider for environments without any recognition engine
#[derive(Debug, Default)]
pub struct UnsupportedProvider;

#[async_trait::async_trait]
impl EngineProvider for UnsupportedProvider {
    fn is_supported(&self) -> bool {
        false
    }

    async fn probe_permission(&self) -> PermissionStatus {
        PermissionStatus::Denied
    }

    async fn create(&self, _sink: EventSink) -> anyhow::Result<Box<dyn RecognitionEngine>> {
        anyhow::bail!("Speech recognition is not supported in this environment")
    }

    fn name(&self) -> &str {
        "unsupported"
    }
}
