// Development engine: every line typed on stdin is a final transcript.
//
// Lines starting with '!' simulate engine callbacks instead:
//   !end          natural end of recognition
//   !<code>       engine error with that code (aborted, network, not-allowed, ...)

use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::backend::{
    EngineError, EngineErrorKind, EngineEvent, EngineProvider, EventSink, PermissionStatus,
    RecognitionEngine,
};

type SharedLines = Arc<Mutex<Lines<BufReader<Stdin>>>>;

/// Parsed stdin line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StdinLine {
    Transcript(String),
    End,
    Error(EngineErrorKind),
    Blank,
}

impl StdinLine {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return StdinLine::Blank;
        }
        match line.strip_prefix('!') {
            Some("end") => StdinLine::End,
            Some(code) => StdinLine::Error(EngineErrorKind::classify(code)),
            None => StdinLine::Transcript(line.to_string()),
        }
    }
}

/// Provider for the stdin engine
///
/// All handles share one line reader so recreating a handle never loses
/// buffered input.
pub struct StdinEngineProvider {
    lines: SharedLines,
}

impl StdinEngineProvider {
    pub fn new() -> Self {
        Self {
            lines: Arc::new(Mutex::new(BufReader::new(tokio::io::stdin()).lines())),
        }
    }
}

impl Default for StdinEngineProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl EngineProvider for StdinEngineProvider {
    fn is_supported(&self) -> bool {
        true
    }

    async fn probe_permission(&self) -> PermissionStatus {
        PermissionStatus::Granted
    }

    async fn create(&self, sink: EventSink) -> anyhow::Result<Box<dyn RecognitionEngine>> {
        Ok(Box::new(StdinEngine {
            lines: Arc::clone(&self.lines),
            sink,
            reader: None,
        }))
    }

    fn name(&self) -> &str {
        "stdin"
    }
}

pub struct StdinEngine {
    lines: SharedLines,
    sink: EventSink,
    reader: Option<JoinHandle<()>>,
}

impl StdinEngine {
    fn is_listening(&self) -> bool {
        self.reader.as_ref().is_some_and(|task| !task.is_finished())
    }
}

#[async_trait::async_trait]
impl RecognitionEngine for StdinEngine {
    async fn start(&mut self) -> Result<(), EngineError> {
        if self.is_listening() {
            return Err(EngineError::AlreadyStarted);
        }

        let lines = Arc::clone(&self.lines);
        let sink = self.sink.clone();

        self.reader = Some(tokio::spawn(async move {
            sink.emit(EngineEvent::Started);

            loop {
                let next = {
                    let mut lines = lines.lock().await;
                    lines.next_line().await
                };

                match next {
                    Ok(Some(line)) => match StdinLine::parse(&line) {
                        StdinLine::Blank => continue,
                        StdinLine::Transcript(transcript) => sink.emit(EngineEvent::Result {
                            transcript,
                            is_final: true,
                        }),
                        StdinLine::End => {
                            sink.emit(EngineEvent::Ended);
                            break;
                        }
                        StdinLine::Error(kind) => {
                            sink.emit(EngineEvent::Error(kind));
                            sink.emit(EngineEvent::Ended);
                            break;
                        }
                    },
                    Ok(None) => {
                        // Keep "listening" silently; nothing more will arrive
                        info!("stdin closed, no further transcripts");
                        std::future::pending::<()>().await;
                    }
                    Err(e) => {
                        sink.emit(EngineEvent::Error(EngineErrorKind::Other(format!(
                            "stdin: {}",
                            e
                        ))));
                        sink.emit(EngineEvent::Ended);
                        break;
                    }
                }
            }

            debug!("stdin reader stopped");
        }));

        Ok(())
    }

    async fn stop(&mut self) -> Result<(), EngineError> {
        if !self.is_listening() {
            return Err(EngineError::NotActive);
        }

        if let Some(reader) = self.reader.take() {
            reader.abort();
        }
        self.sink.emit(EngineEvent::Ended);

        Ok(())
    }

    fn name(&self) -> &str {
        "stdin"
    }
}
