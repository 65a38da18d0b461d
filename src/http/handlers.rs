use super::state::AppState;
use crate::commands::{command_table, CommandEntry};
use crate::controller::ControllerError;
use crate::executor::ExecutionOutcome;
use crate::session::SessionStatus;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct TranscriptRequest {
    /// Finalized transcript text
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    #[serde(flatten)]
    pub outcome: ExecutionOutcome,
    /// Route navigated to, when a command matched
    pub route: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn controller_unavailable(e: ControllerError) -> Response {
    error!("Controller request failed: {}", e);
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
        .into_response()
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /health
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "hacknhost-voice",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /voice/status
pub async fn get_status(State(state): State<AppState>) -> Json<SessionStatus> {
    Json(state.controller.status())
}

/// POST /voice/start
pub async fn start_listening(State(state): State<AppState>) -> Response {
    info!("Start requested over HTTP");
    match state.controller.start().await {
        Ok(()) => Json(state.controller.status()).into_response(),
        Err(e) => controller_unavailable(e),
    }
}

/// POST /voice/stop
pub async fn stop_listening(State(state): State<AppState>) -> Response {
    info!("Stop requested over HTTP");
    match state.controller.stop().await {
        Ok(()) => Json(state.controller.status()).into_response(),
        Err(e) => controller_unavailable(e),
    }
}

/// POST /voice/toggle
/// Explicit user action; the only way out of a permission denial
pub async fn toggle_listening(State(state): State<AppState>) -> Response {
    info!("Toggle requested over HTTP");
    match state.controller.toggle().await {
        Ok(()) => Json(state.controller.status()).into_response(),
        Err(e) => controller_unavailable(e),
    }
}

/// POST /voice/transcript
/// Run a finalized transcript through the command executor
pub async fn submit_transcript(
    State(state): State<AppState>,
    Json(req): Json<TranscriptRequest>,
) -> Response {
    if req.text.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Transcript text must not be empty".to_string(),
            }),
        )
            .into_response();
    }

    match state.controller.submit_transcript(req.text).await {
        Ok(outcome) => {
            let route = match outcome {
                ExecutionOutcome::Executed(action) => Some(action.route()),
                _ => None,
            };
            Json(TranscriptResponse { outcome, route }).into_response()
        }
        Err(e) => controller_unavailable(e),
    }
}

/// GET /voice/commands
pub async fn list_commands() -> Json<Vec<CommandEntry>> {
    Json(command_table())
}
