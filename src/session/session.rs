use super::config::SessionConfig;
use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio::time::Instant;

/// Result of recording an `aborted` error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbortRecord {
    /// Aborts in the current burst, including this one
    pub count: u32,
    /// Whether this abort completes a burst and the user must be warned
    pub warn: bool,
}

/// Controller-private state of one recognition session
#[derive(Debug, Default)]
pub struct RecognitionSession {
    /// Whether the engine is believed to be listening (or starting)
    pub is_active: bool,

    /// Whether microphone access was denied
    pub permission_denied: bool,

    consecutive_abort_count: u32,
    last_abort_at: Option<Instant>,
    last_error_at: Option<Instant>,
    last_error_wall: Option<DateTime<Utc>>,
}

impl RecognitionSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn consecutive_abort_count(&self) -> u32 {
        self.consecutive_abort_count
    }

    pub fn last_error_at(&self) -> Option<Instant> {
        self.last_error_at
    }

    pub fn last_error_wall(&self) -> Option<DateTime<Utc>> {
        self.last_error_wall
    }

    /// Note any engine error
    pub fn record_error(&mut self, now: Instant) {
        self.last_error_at = Some(now);
        self.last_error_wall = Some(Utc::now());
    }

    /// Count an `aborted` error towards the current burst
    ///
    /// An abort within the window of the previous one extends the burst;
    /// otherwise it starts a new burst at 1. The warning fires only when the
    /// count reaches the threshold, so once per burst.
    pub fn record_abort(&mut self, now: Instant, config: &SessionConfig) -> AbortRecord {
        let in_burst = self
            .last_abort_at
            .is_some_and(|last| now.saturating_duration_since(last) <= config.abort_window);

        self.consecutive_abort_count = if in_burst {
            self.consecutive_abort_count.saturating_add(1)
        } else {
            1
        };
        self.last_abort_at = Some(now);

        AbortRecord {
            count: self.consecutive_abort_count,
            warn: self.consecutive_abort_count == config.abort_warning_threshold,
        }
    }

    /// Engine acknowledged a start
    ///
    /// The abort count is cleared once the burst window has passed; inside
    /// the window the burst is still being counted.
    pub fn acknowledge_start(&mut self, now: Instant, config: &SessionConfig) {
        let quiet = self
            .last_abort_at
            .map_or(true, |last| now.saturating_duration_since(last) > config.abort_window);

        if quiet {
            self.consecutive_abort_count = 0;
            self.last_abort_at = None;
        }
    }

    /// Restart delay after an `aborted` error
    pub fn abort_backoff(&self, config: &SessionConfig) -> Duration {
        let exponent = self.consecutive_abort_count.saturating_sub(1).min(16);
        config
            .abort_base_delay
            .saturating_mul(1u32 << exponent)
            .min(config.abort_max_delay)
    }

    /// Restart delay after a natural end
    pub fn end_delay(&self, config: &SessionConfig) -> Duration {
        if self.consecutive_abort_count > config.abort_warning_threshold {
            config.degraded_end_delay
        } else {
            config.natural_end_delay
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_three_rapid_aborts_warn_once() {
        let config = SessionConfig::default();
        let mut session = RecognitionSession::new();
        let t0 = Instant::now();

        assert_eq!(session.record_abort(t0, &config), AbortRecord { count: 1, warn: false });
        assert_eq!(
            session.record_abort(t0 + ms(1500), &config),
            AbortRecord { count: 2, warn: false }
        );
        assert_eq!(
            session.record_abort(t0 + ms(3000), &config),
            AbortRecord { count: 3, warn: true }
        );
        assert_eq!(
            session.record_abort(t0 + ms(3500), &config),
            AbortRecord { count: 4, warn: false }
        );
    }

    #[test]
    fn test_gap_longer_than_window_resets_burst() {
        let config = SessionConfig::default();
        let mut session = RecognitionSession::new();
        let t0 = Instant::now();

        session.record_abort(t0, &config);
        session.record_abort(t0 + ms(1000), &config);
        session.record_abort(t0 + ms(2000), &config);

        let record = session.record_abort(t0 + ms(8000), &config);
        assert_eq!(record, AbortRecord { count: 1, warn: false });
    }

    #[test]
    fn test_abort_backoff_doubles_and_caps() {
        let config = SessionConfig::default();
        let mut session = RecognitionSession::new();
        let t0 = Instant::now();

        let mut delays = Vec::new();
        for i in 0..6 {
            session.record_abort(t0 + ms(i * 100), &config);
            delays.push(session.abort_backoff(&config));
        }

        assert_eq!(delays, vec![ms(500), ms(1000), ms(2000), ms(4000), ms(5000), ms(5000)]);
    }

    #[test]
    fn test_end_delay_degrades_after_threshold() {
        let config = SessionConfig::default();
        let mut session = RecognitionSession::new();
        let t0 = Instant::now();

        for i in 0..3 {
            session.record_abort(t0 + ms(i * 100), &config);
        }
        assert_eq!(session.end_delay(&config), ms(300));

        session.record_abort(t0 + ms(400), &config);
        assert_eq!(session.end_delay(&config), ms(2000));
    }

    #[test]
    fn test_start_ack_clears_count_only_after_window() {
        let config = SessionConfig::default();
        let mut session = RecognitionSession::new();
        let t0 = Instant::now();

        session.record_abort(t0, &config);
        session.record_abort(t0 + ms(500), &config);

        session.acknowledge_start(t0 + ms(1000), &config);
        assert_eq!(session.consecutive_abort_count(), 2);

        session.acknowledge_start(t0 + ms(6000), &config);
        assert_eq!(session.consecutive_abort_count(), 0);
    }

    #[test]
    fn test_record_error_sets_timestamps() {
        let mut session = RecognitionSession::new();
        assert!(session.last_error_at().is_none());

        let now = Instant::now();
        session.record_error(now);
        assert_eq!(session.last_error_at(), Some(now));
        assert!(session.last_error_wall().is_some());
    }
}
