//! Progress event port definition.

use std::sync::Mutex;

use chrono::{DateTime, Utc};

/// One progress event emitted while a step runs.
#[derive(Debug, Clone)]
pub struct LogEvent {
    pub at: DateTime<Utc>,
    pub message: String,
}

/// Port for step progress reporting. Implementations receive events in the
/// order the orchestrator produces them.
pub trait LogSink {
    fn emit(&self, event: LogEvent);

    fn log<S: Into<String>>(&self, message: S)
    where
        Self: Sized,
    {
        self.emit(LogEvent { at: Utc::now(), message: message.into() });
    }
}

/// Sink collecting events in memory so a harness can assert on the exact
/// ordered sequence.
#[derive(Debug, Default)]
pub struct MemoryLogSink {
    events: Mutex<Vec<LogEvent>>,
}

impl MemoryLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<LogEvent> {
        self.events.lock().expect("log sink lock poisoned").clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.events().into_iter().map(|event| event.message).collect()
    }
}

impl LogSink for MemoryLogSink {
    fn emit(&self, event: LogEvent) {
        self.events.lock().expect("log sink lock poisoned").push(event);
    }
}
