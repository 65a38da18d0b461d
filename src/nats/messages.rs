use serde::{Deserialize, Serialize};

/// Transcript message received from STT service
#[derive(Debug, Serialize, Deserialize)]
pub struct TranscriptMessage {
    pub session_id: String,
    pub text: String,
    pub partial: bool,
    pub timestamp: String,
    #[serde(default)]
    pub confidence: Option<f32>,
}

/// Recognition error reported by the STT service
#[derive(Debug, Serialize, Deserialize)]
pub struct EngineErrorMessage {
    pub session_id: String,
    /// Raw error code ("aborted", "network", "not-allowed", ...)
    pub error: String,
}

/// Reply to a microphone permission probe
#[derive(Debug, Serialize, Deserialize)]
pub struct PermissionProbeReply {
    pub granted: bool,
}

/// Route change request for the UI client
#[derive(Debug, Serialize, Deserialize)]
pub struct NavigateMessage {
    pub session_id: String,
    pub route: String,
    pub timestamp: String,  // RFC3339 timestamp
}

/// Speech synthesis request for the UI client
#[derive(Debug, Serialize, Deserialize)]
pub struct SpeakMessage {
    pub session_id: String,
    pub text: String,
    pub timestamp: String,
}

/// Toast notification for the UI client
#[derive(Debug, Serialize, Deserialize)]
pub struct ToastMessage {
    pub session_id: String,
    pub title: String,
    pub description: String,
    pub timestamp: String,
}
