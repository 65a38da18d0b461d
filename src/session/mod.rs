//! Recognition session state
//!
//! This module holds the data the lifecycle controller keeps about one
//! logical attempt to keep the engine listening:
//! - Restart and backoff timings (`SessionConfig`)
//! - Controller-private flags and abort-burst bookkeeping (`RecognitionSession`)
//! - The serializable snapshot published to observers (`SessionStatus`)

mod config;
mod session;
mod stats;

pub use config::SessionConfig;
pub use session::{AbortRecord, RecognitionSession};
pub use stats::SessionStatus;
