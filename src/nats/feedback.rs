use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{error, warn};

use super::client::NatsClient;
use crate::executor::Feedback;

/// UI effect queued for publishing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiMessage {
    Navigate(String),
    Speak(String),
    Toast { title: String, description: String },
}

impl UiMessage {
    fn kind(&self) -> &'static str {
        match self {
            UiMessage::Navigate(_) => "navigate",
            UiMessage::Speak(_) => "speak",
            UiMessage::Toast { .. } => "toast",
        }
    }
}

/// Destination for UI messages
#[async_trait::async_trait]
pub trait UiPublisher: Send + Sync + 'static {
    async fn publish_ui(&self, message: &UiMessage) -> Result<()>;
}

#[async_trait::async_trait]
impl UiPublisher for NatsClient {
    async fn publish_ui(&self, message: &UiMessage) -> Result<()> {
        match message {
            UiMessage::Navigate(route) => self.publish_navigate(route).await,
            UiMessage::Speak(text) => self.publish_speak(text).await,
            UiMessage::Toast { title, description } => {
                self.publish_toast(title, description).await
            }
        }
    }
}

/// Feedback sink that forwards UI effects to the NATS bus
///
/// Calls only enqueue; a single publisher task drains the queue, so a
/// command's route change, speech and toast reach the bus in call order.
#[derive(Clone)]
pub struct NatsFeedback {
    queue: mpsc::UnboundedSender<UiMessage>,
}

impl NatsFeedback {
    pub fn new(client: NatsClient) -> Self {
        Self::with_publisher(client)
    }

    /// Start the publisher task; messages are dropped when no runtime is running
    pub fn with_publisher<P: UiPublisher>(publisher: P) -> Self {
        let (queue, mut rx) = mpsc::unbounded_channel::<UiMessage>();

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    while let Some(message) = rx.recv().await {
                        if let Err(e) = publisher.publish_ui(&message).await {
                            error!("Failed to publish {}: {:#}", message.kind(), e);
                        }
                    }
                });
            }
            Err(_) => warn!("No runtime available, UI messages will be dropped"),
        }

        Self { queue }
    }

    fn enqueue(&self, message: UiMessage) {
        if let Err(e) = self.queue.send(message) {
            warn!("UI publisher stopped, dropping {} message", e.0.kind());
        }
    }
}

impl Feedback for NatsFeedback {
    fn navigate(&self, route: &str) {
        self.enqueue(UiMessage::Navigate(route.to_string()));
    }

    fn speak(&self, text: &str) {
        self.enqueue(UiMessage::Speak(text.to_string()));
    }

    fn notify(&self, title: &str, description: &str) {
        self.enqueue(UiMessage::Toast {
            title: title.to_string(),
            description: description.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Records messages; the first publish is slow to expose reordering
    #[derive(Clone, Default)]
    struct RecordingPublisher {
        published: Arc<Mutex<Vec<UiMessage>>>,
    }

    #[async_trait::async_trait]
    impl UiPublisher for RecordingPublisher {
        async fn publish_ui(&self, message: &UiMessage) -> Result<()> {
            if matches!(message, UiMessage::Navigate(_)) {
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
            self.published.lock().unwrap().push(message.clone());
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_command_feedback_is_published_in_call_order() {
        let publisher = RecordingPublisher::default();
        let feedback = NatsFeedback::with_publisher(publisher.clone());

        feedback.navigate("/events");
        feedback.speak("Going to events page");
        feedback.notify("Voice Command", "Going to events page");

        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(
            *publisher.published.lock().unwrap(),
            vec![
                UiMessage::Navigate("/events".to_string()),
                UiMessage::Speak("Going to events page".to_string()),
                UiMessage::Toast {
                    title: "Voice Command".to_string(),
                    description: "Going to events page".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_without_runtime_messages_are_dropped() {
        let feedback = NatsFeedback::with_publisher(RecordingPublisher::default());
        feedback.navigate("/events");
    }
}
