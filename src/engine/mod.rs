//! Speech recognition engines
//!
//! The controller talks to engines only through `RecognitionEngine` and
//! receives their callbacks through an `EventSink`. Engine selection happens
//! once, in `EngineProviderFactory::create`.

pub mod backend;
pub mod nats;
pub mod stdin;

pub use backend::{
    EngineError, EngineErrorKind, EngineEvent, EngineProvider, EventSink, PermissionStatus,
    RecognitionEngine, UnsupportedProvider,
};
pub use nats::NatsEngineProvider;
pub use stdin::StdinEngineProvider;

use crate::config::{Config, EngineKind};
use crate::nats::NatsClient;
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

/// Engine provider factory
pub struct EngineProviderFactory;

impl EngineProviderFactory {
    /// Create the provider selected by configuration
    ///
    /// The NATS engine shares the connection opened for the service, so
    /// `nats` must be present when it is selected.
    pub fn create(config: &Config, nats: Option<&NatsClient>) -> Result<Arc<dyn EngineProvider>> {
        match config.voice.engine {
            EngineKind::Stdin => Ok(Arc::new(StdinEngineProvider::new())),
            EngineKind::Nats => {
                let client = nats
                    .cloned()
                    .context("NATS engine selected but no NATS connection is available")?;
                Ok(Arc::new(NatsEngineProvider::new(
                    client,
                    Duration::from_millis(config.nats.probe_timeout_ms),
                )))
            }
            EngineKind::None => Ok(Arc::new(UnsupportedProvider)),
        }
    }
}
