pub mod client;
pub mod feedback;
pub mod messages;

pub use client::NatsClient;
pub use feedback::{NatsFeedback, UiMessage, UiPublisher};
pub use messages::{
    EngineErrorMessage, NavigateMessage, PermissionProbeReply, SpeakMessage, ToastMessage,
    TranscriptMessage,
};
