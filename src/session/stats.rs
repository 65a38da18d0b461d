use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::controller::RecognitionState;

/// Snapshot of the recognition session, published on every change
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionStatus {
    /// Lifecycle state of the controller
    pub state: RecognitionState,

    /// Whether the user wants the engine listening
    pub enabled: bool,

    /// Whether the engine is believed to be listening (or starting)
    pub is_active: bool,

    /// Aborts in the current burst
    pub consecutive_abort_count: u32,

    /// Whether microphone access was denied
    pub permission_denied: bool,

    /// When the last engine error was reported
    pub last_error_at: Option<DateTime<Utc>>,

    /// Whether an automatic restart is scheduled
    pub restart_pending: bool,

    /// Engine provider name
    pub engine: String,
}
