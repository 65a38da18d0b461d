use anyhow::{Context, Result};
use async_nats::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

use super::messages::{NavigateMessage, PermissionProbeReply, SpeakMessage, ToastMessage};

/// Transcripts from the STT service (partial and final)
pub const TRANSCRIPT_SUBJECT: &str = "stt.text.>";
/// Recognition errors from the STT service
pub const ENGINE_ERROR_SUBJECT: &str = "stt.error";
/// Microphone permission probe (request/reply)
pub const PERMISSION_PROBE_SUBJECT: &str = "voice.permission.probe";

#[derive(Clone)]
pub struct NatsClient {
    client: Client,
    session_id: String,
}

impl NatsClient {
    /// Connect to NATS server
    pub async fn connect(url: &str, session_id: String) -> Result<Self> {
        info!("Connecting to NATS at {}", url);

        let client = async_nats::connect(url)
            .await
            .context("Failed to connect to NATS")?;

        info!("Connected to NATS successfully");

        Ok(Self { client, session_id })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Subscribe to transcript messages
    ///
    /// The STT service publishes to stt.text.partial and stt.text.final for
    /// all sessions; callers filter by session_id in the payload.
    pub async fn subscribe_transcripts(&self) -> Result<async_nats::Subscriber> {
        info!("Subscribing to transcripts on {}", TRANSCRIPT_SUBJECT);

        self.client
            .subscribe(TRANSCRIPT_SUBJECT)
            .await
            .context("Failed to subscribe to transcripts")
    }

    /// Subscribe to recognition error messages
    pub async fn subscribe_engine_errors(&self) -> Result<async_nats::Subscriber> {
        info!("Subscribing to engine errors on {}", ENGINE_ERROR_SUBJECT);

        self.client
            .subscribe(ENGINE_ERROR_SUBJECT)
            .await
            .context("Failed to subscribe to engine errors")
    }

    /// Ask the capture side whether microphone access is granted
    pub async fn probe_permission(&self, timeout: Duration) -> Result<bool> {
        let subject = format!("{}.{}", PERMISSION_PROBE_SUBJECT, self.session_id);

        let reply = tokio::time::timeout(timeout, self.client.request(subject, "".into()))
            .await
            .context("Permission probe timed out")?
            .context("Permission probe failed")?;

        let reply: PermissionProbeReply =
            serde_json::from_slice(&reply.payload).context("Invalid permission probe reply")?;

        Ok(reply.granted)
    }

    pub async fn publish_navigate(&self, route: &str) -> Result<()> {
        let message = NavigateMessage {
            session_id: self.session_id.clone(),
            route: route.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        self.publish("ui.navigate", &message).await
    }

    pub async fn publish_speak(&self, text: &str) -> Result<()> {
        let message = SpeakMessage {
            session_id: self.session_id.clone(),
            text: text.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        self.publish("ui.speak", &message).await
    }

    pub async fn publish_toast(&self, title: &str, description: &str) -> Result<()> {
        let message = ToastMessage {
            session_id: self.session_id.clone(),
            title: title.to_string(),
            description: description.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        self.publish("ui.toast", &message).await
    }

    async fn publish<T: Serialize>(&self, prefix: &str, message: &T) -> Result<()> {
        let subject = format!("{}.{}", prefix, self.session_id);
        let payload = serde_json::to_vec(message)?;

        self.client
            .publish(subject.clone(), payload.into())
            .await
            .with_context(|| format!("Failed to publish to {}", subject))?;

        debug!("Published to {}", subject);

        Ok(())
    }
}
