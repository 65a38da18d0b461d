use serde::Serialize;

use crate::engine::EngineErrorKind;

/// Lifecycle state of the recognition controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "error", rename_all = "snake_case")]
pub enum RecognitionState {
    /// No engine handle exists
    Uninitialized,
    /// `start()` issued, waiting for the engine acknowledgement
    Starting,
    /// Engine is listening
    Listening,
    /// Engine ended; a restart may be pending
    Stopped,
    /// Microphone access denied; only a user toggle leaves this state
    PermissionDenied,
    /// Engine reported a transient error; a restart is pending
    Faulted(EngineErrorKind),
    /// No engine available in this environment
    Unsupported,
}

impl RecognitionState {
    /// Returns a human-readable description of the state
    pub fn description(&self) -> &'static str {
        match self {
            RecognitionState::Uninitialized => "Not initialized",
            RecognitionState::Starting => "Starting speech recognition",
            RecognitionState::Listening => "Listening for commands",
            RecognitionState::Stopped => "Not listening",
            RecognitionState::PermissionDenied => "Microphone access denied, click to retry",
            RecognitionState::Faulted(_) => "Recovering from a recognition error",
            RecognitionState::Unsupported => "Voice commands are not supported",
        }
    }

    /// States in which engine callbacks for the live handle are expected
    pub fn is_engine_live(&self) -> bool {
        matches!(self, RecognitionState::Starting | RecognitionState::Listening)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_live_states() {
        assert!(RecognitionState::Starting.is_engine_live());
        assert!(RecognitionState::Listening.is_engine_live());
        assert!(!RecognitionState::Stopped.is_engine_live());
        assert!(!RecognitionState::PermissionDenied.is_engine_live());
        assert!(!RecognitionState::Faulted(EngineErrorKind::Network).is_engine_live());
    }

    #[test]
    fn test_state_serialization() {
        let json = serde_json::to_value(RecognitionState::Listening).unwrap();
        assert_eq!(json["state"], "listening");

        let json = serde_json::to_value(RecognitionState::Faulted(EngineErrorKind::Aborted)).unwrap();
        assert_eq!(json["state"], "faulted");
        assert_eq!(json["error"], "aborted");
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(RecognitionState::Listening.description(), "Listening for commands");
        assert_eq!(
            RecognitionState::Unsupported.description(),
            "Voice commands are not supported"
        );
    }
}
