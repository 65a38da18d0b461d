pub mod commands;
pub mod config;
pub mod controller;
pub mod engine;
pub mod executor;
pub mod http;
pub mod nats;
pub mod session;

pub use commands::{command_table, resolve, Action};
pub use config::Config;
pub use controller::{ControllerHandle, RecognitionController, RecognitionState};
pub use engine::{
    EngineError, EngineErrorKind, EngineEvent, EngineProvider, EngineProviderFactory, EventSink,
    PermissionStatus, RecognitionEngine,
};
pub use executor::{CommandExecutor, ExecutionOutcome, Feedback, LogFeedback};
pub use http::{create_router, AppState};
pub use nats::{NatsClient, NatsFeedback};
pub use session::{RecognitionSession, SessionConfig, SessionStatus};
