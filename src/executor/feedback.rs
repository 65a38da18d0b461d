use tracing::info;

/// Title used for command confirmation toasts
pub const NOTIFICATION_TITLE: &str = "Voice Command";

/// User-facing side effects of the voice dispatcher
///
/// All operations are fire-and-forget: implementations must not block and
/// never report failure back to the caller.
pub trait Feedback: Send + Sync {
    /// Perform a client-side route change
    fn navigate(&self, route: &str);

    /// Speak a short confirmation
    fn speak(&self, text: &str);

    /// Surface a transient notification
    fn notify(&self, title: &str, description: &str);
}

/// Feedback sink that only emits tracing events
///
/// Used by the CLI when no UI client is attached.
#[derive(Debug, Default, Clone)]
pub struct LogFeedback;

impl Feedback for LogFeedback {
    fn navigate(&self, route: &str) {
        info!(route, "navigate");
    }

    fn speak(&self, text: &str) {
        info!(text, "speak");
    }

    fn notify(&self, title: &str, description: &str) {
        info!(title, description, "notify");
    }
}
