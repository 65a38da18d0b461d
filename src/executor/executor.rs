use super::feedback::{Feedback, NOTIFICATION_TITLE};
use crate::commands::{self, Action};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

/// Minimum quiet interval between two processed commands
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_secs(1);

/// What the executor did with a transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "action", rename_all = "snake_case")]
pub enum ExecutionOutcome {
    /// Matched an action; navigation and feedback were emitted
    Executed(Action),
    /// Passed the debounce gate but matched nothing
    NoMatch,
    /// Arrived inside the debounce window and was dropped
    Debounced,
}

/// Executes finalized transcripts against the command table
pub struct CommandExecutor {
    feedback: Arc<dyn Feedback>,
    debounce: Duration,
    last_processed: Option<Instant>,
}

impl CommandExecutor {
    pub fn new(feedback: Arc<dyn Feedback>, debounce: Duration) -> Self {
        Self {
            feedback,
            debounce,
            last_processed: None,
        }
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Execute a finalized transcript now
    pub fn execute(&mut self, transcript: &str) -> ExecutionOutcome {
        self.execute_at(transcript, Instant::now())
    }

    /// Execute a finalized transcript as if received at `now`
    ///
    /// Transcripts arriving less than the debounce interval after the last
    /// processed one are dropped, not queued. The window restarts on every
    /// processed transcript, matched or not.
    pub fn execute_at(&mut self, transcript: &str, now: Instant) -> ExecutionOutcome {
        if let Some(last) = self.last_processed {
            if now.saturating_duration_since(last) < self.debounce {
                debug!("Dropping command inside debounce window: {:?}", transcript);
                return ExecutionOutcome::Debounced;
            }
        }
        self.last_processed = Some(now);

        let Some(action) = commands::resolve(transcript) else {
            debug!("No command matched transcript: {:?}", transcript);
            return ExecutionOutcome::NoMatch;
        };

        let confirmation = action.confirmation();
        info!(
            "Voice command {} matched, navigating to {}",
            action.name(),
            action.route()
        );

        self.feedback.navigate(action.route());
        self.feedback.speak(&confirmation);
        self.feedback.notify(NOTIFICATION_TITLE, &confirmation);

        ExecutionOutcome::Executed(action)
    }
}
