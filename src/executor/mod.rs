//! Command execution
//!
//! Turns finalized transcripts into navigation plus spoken and visual
//! feedback, with a debounce window between accepted commands.

mod executor;
mod feedback;

pub use executor::{CommandExecutor, ExecutionOutcome, DEFAULT_DEBOUNCE};
pub use feedback::{Feedback, LogFeedback, NOTIFICATION_TITLE};
