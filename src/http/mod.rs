//! HTTP control surface for the voice dispatcher
//!
//! - GET /health - Health check
//! - GET /voice/status - Current recognition session snapshot
//! - POST /voice/start - Start listening
//! - POST /voice/stop - Stop listening
//! - POST /voice/toggle - User toggle (re-probes permission after a denial)
//! - POST /voice/transcript - Execute a finalized transcript
//! - GET /voice/commands - Command table

mod handlers;
mod routes;
mod state;

pub use handlers::{TranscriptRequest, TranscriptResponse};
pub use routes::create_router;
pub use state::AppState;
