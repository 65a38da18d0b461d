use anyhow::{Context, Result};
use serde::Deserialize;

use crate::session::SessionConfig;
use std::time::Duration;

/// Environment variable prefix for overrides (e.g. `HACKNHOST__SERVICE__HTTP__PORT`)
pub const ENV_PREFIX: &str = "HACKNHOST";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    #[serde(default)]
    pub voice: VoiceConfig,
    #[serde(default)]
    pub nats: NatsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

/// Which recognition engine to drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EngineKind {
    #[default]
    Stdin,
    Nats,
    /// No engine available; the controller stays disabled
    None,
}

/// Where command feedback goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    #[default]
    Log,
    Nats,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    pub engine: EngineKind,
    pub feedback: FeedbackKind,
    pub debounce_ms: u64,
    pub restart: RestartConfig,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            engine: EngineKind::default(),
            feedback: FeedbackKind::default(),
            debounce_ms: 1000,
            restart: RestartConfig::default(),
        }
    }
}

/// Restart and backoff timings, all in milliseconds
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RestartConfig {
    pub natural_end_delay_ms: u64,
    pub degraded_end_delay_ms: u64,
    pub fault_delay_ms: u64,
    pub network_delay_ms: u64,
    pub abort_base_delay_ms: u64,
    pub abort_max_delay_ms: u64,
    pub abort_window_ms: u64,
    pub abort_warning_threshold: u32,
}

impl Default for RestartConfig {
    fn default() -> Self {
        Self {
            natural_end_delay_ms: 300,
            degraded_end_delay_ms: 2000,
            fault_delay_ms: 500,
            network_delay_ms: 500,
            abort_base_delay_ms: 500,
            abort_max_delay_ms: 5000,
            abort_window_ms: 5000,
            abort_warning_threshold: 3,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NatsConfig {
    pub url: String,
    pub session_id: String,
    pub probe_timeout_ms: u64,
}

impl Default for NatsConfig {
    fn default() -> Self {
        Self {
            url: "nats://localhost:4222".to_string(),
            session_id: format!("voice-{}", uuid::Uuid::new_v4()),
            probe_timeout_ms: 2000,
        }
    }
}

impl Config {
    /// Load configuration from a file (extension optional) plus environment overrides
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .with_context(|| format!("Failed to read config from {}", path))?;

        settings
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Whether the engine or the feedback sink talks to NATS
    ///
    /// Both share one connection when they do.
    pub fn needs_nats(&self) -> bool {
        self.voice.engine == EngineKind::Nats || self.voice.feedback == FeedbackKind::Nats
    }

    /// Controller timings derived from the voice section
    pub fn session_config(&self) -> SessionConfig {
        let restart = &self.voice.restart;
        SessionConfig {
            debounce: Duration::from_millis(self.voice.debounce_ms),
            natural_end_delay: Duration::from_millis(restart.natural_end_delay_ms),
            degraded_end_delay: Duration::from_millis(restart.degraded_end_delay_ms),
            fault_delay: Duration::from_millis(restart.fault_delay_ms),
            network_delay: Duration::from_millis(restart.network_delay_ms),
            abort_base_delay: Duration::from_millis(restart.abort_base_delay_ms),
            abort_max_delay: Duration::from_millis(restart.abort_max_delay_ms),
            abort_window: Duration::from_millis(restart.abort_window_ms),
            abort_warning_threshold: restart.abort_warning_threshold,
        }
    }
}
