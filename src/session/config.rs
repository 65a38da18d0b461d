use std::time::Duration;

/// Timings for a recognition session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Minimum quiet interval between two processed commands
    /// Default: 1 second
    pub debounce: Duration,

    /// Restart delay after a natural end
    pub natural_end_delay: Duration,

    /// Restart delay after a natural end once the abort count exceeds the threshold
    pub degraded_end_delay: Duration,

    /// Restart delay after an unclassified engine error
    pub fault_delay: Duration,

    /// Restart delay after a network error
    pub network_delay: Duration,

    /// First restart delay after an `aborted` error; doubles per consecutive abort
    pub abort_base_delay: Duration,

    /// Cap for the abort backoff
    pub abort_max_delay: Duration,

    /// Aborts further apart than this start a new burst
    pub abort_window: Duration,

    /// Abort count that triggers the user-facing warning
    pub abort_warning_threshold: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_secs(1),
            natural_end_delay: Duration::from_millis(300),
            degraded_end_delay: Duration::from_millis(2000),
            fault_delay: Duration::from_millis(500),
            network_delay: Duration::from_millis(500),
            abort_base_delay: Duration::from_millis(500),
            abort_max_delay: Duration::from_secs(5),
            abort_window: Duration::from_secs(5),
            abort_warning_threshold: 3,
        }
    }
}
