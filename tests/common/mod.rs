// Shared test doubles for the recognition controller
//
// ScriptedProvider hands out engines whose start() results can be queued up
// front, and keeps every EventSink so tests can play engine callbacks.

#![allow(dead_code)]

use hacknhost_voice::{
    EngineError, EngineEvent, EngineProvider, EventSink, Feedback, PermissionStatus,
    RecognitionEngine,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackCall {
    Navigate(String),
    Speak(String),
    Notify(String, String),
}

/// Feedback sink that records every call
#[derive(Clone, Default)]
pub struct RecordingFeedback {
    calls: Arc<Mutex<Vec<FeedbackCall>>>,
}

impl RecordingFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<FeedbackCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn routes(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                FeedbackCall::Navigate(route) => Some(route),
                _ => None,
            })
            .collect()
    }

    pub fn notifications(&self) -> Vec<(String, String)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                FeedbackCall::Notify(title, description) => Some((title, description)),
                _ => None,
            })
            .collect()
    }
}

impl Feedback for RecordingFeedback {
    fn navigate(&self, route: &str) {
        self.calls
            .lock()
            .unwrap()
            .push(FeedbackCall::Navigate(route.to_string()));
    }

    fn speak(&self, text: &str) {
        self.calls
            .lock()
            .unwrap()
            .push(FeedbackCall::Speak(text.to_string()));
    }

    fn notify(&self, title: &str, description: &str) {
        self.calls.lock().unwrap().push(FeedbackCall::Notify(
            title.to_string(),
            description.to_string(),
        ));
    }
}

#[derive(Default)]
struct ScriptState {
    supported: bool,
    permission: Option<PermissionStatus>,
    auto_ack: bool,
    probes: usize,
    created: usize,
    start_calls: usize,
    stop_calls: usize,
    start_results: VecDeque<Result<(), EngineError>>,
    sinks: Vec<EventSink>,
}

/// Engine provider driven entirely by the test
#[derive(Clone)]
pub struct ScriptedProvider {
    state: Arc<Mutex<ScriptState>>,
}

impl ScriptedProvider {
    /// Supported, permission granted, engines acknowledge start immediately
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(ScriptState {
                supported: true,
                permission: Some(PermissionStatus::Granted),
                auto_ack: true,
                ..Default::default()
            })),
        }
    }

    pub fn unsupported() -> Self {
        let provider = Self::new();
        provider.state.lock().unwrap().supported = false;
        provider
    }

    pub fn set_permission(&self, permission: PermissionStatus) {
        self.state.lock().unwrap().permission = Some(permission);
    }

    pub fn set_auto_ack(&self, auto_ack: bool) {
        self.state.lock().unwrap().auto_ack = auto_ack;
    }

    /// Queue the result of the next engine start() call
    pub fn push_start_result(&self, result: Result<(), EngineError>) {
        self.state.lock().unwrap().start_results.push_back(result);
    }

    pub fn probes(&self) -> usize {
        self.state.lock().unwrap().probes
    }

    pub fn created(&self) -> usize {
        self.state.lock().unwrap().created
    }

    pub fn start_calls(&self) -> usize {
        self.state.lock().unwrap().start_calls
    }

    pub fn stop_calls(&self) -> usize {
        self.state.lock().unwrap().stop_calls
    }

    /// Sink of the most recently created engine
    pub fn sink(&self) -> EventSink {
        self.state
            .lock()
            .unwrap()
            .sinks
            .last()
            .cloned()
            .expect("no engine created yet")
    }

    /// Sink of the n-th created engine
    pub fn sink_at(&self, index: usize) -> EventSink {
        self.state.lock().unwrap().sinks[index].clone()
    }

    pub fn emit(&self, event: EngineEvent) {
        self.sink().emit(event);
    }

    pub fn emit_final(&self, transcript: &str) {
        self.emit(EngineEvent::Result {
            transcript: transcript.to_string(),
            is_final: true,
        });
    }
}

#[async_trait::async_trait]
impl EngineProvider for ScriptedProvider {
    fn is_supported(&self) -> bool {
        self.state.lock().unwrap().supported
    }

    async fn probe_permission(&self) -> PermissionStatus {
        let mut state = self.state.lock().unwrap();
        state.probes += 1;
        state.permission.unwrap_or(PermissionStatus::Granted)
    }

    async fn create(&self, sink: EventSink) -> anyhow::Result<Box<dyn RecognitionEngine>> {
        let mut state = self.state.lock().unwrap();
        state.created += 1;
        state.sinks.push(sink.clone());
        Ok(Box::new(ScriptedEngine {
            state: Arc::clone(&self.state),
            sink,
            listening: false,
        }))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

struct ScriptedEngine {
    state: Arc<Mutex<ScriptState>>,
    sink: EventSink,
    listening: bool,
}

#[async_trait::async_trait]
impl RecognitionEngine for ScriptedEngine {
    async fn start(&mut self) -> Result<(), EngineError> {
        let (result, auto_ack) = {
            let mut state = self.state.lock().unwrap();
            state.start_calls += 1;
            (state.start_results.pop_front().unwrap_or(Ok(())), state.auto_ack)
        };

        if result.is_ok() {
            self.listening = true;
            if auto_ack {
                self.sink.emit(EngineEvent::Started);
            }
        }
        result
    }

    async fn stop(&mut self) -> Result<(), EngineError> {
        self.state.lock().unwrap().stop_calls += 1;
        if !self.listening {
            return Err(EngineError::NotActive);
        }
        self.listening = false;
        self.sink.emit(EngineEvent::Ended);
        Ok(())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Let the controller task drain its queues without firing restart timers
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(10)).await;
}
