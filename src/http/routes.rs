use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Recognition control
        .route("/voice/status", get(handlers::get_status))
        .route("/voice/start", post(handlers::start_listening))
        .route("/voice/stop", post(handlers::stop_listening))
        .route("/voice/toggle", post(handlers::toggle_listening))
        // Commands
        .route("/voice/transcript", post(handlers::submit_transcript))
        .route("/voice/commands", get(handlers::list_commands))
        // The web client runs on its own origin
        .layer(CorsLayer::permissive())
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
