//! Progress event emission.
//!
//! Lightweight structured progress events for CLI consumers, dispatched
//! through an in-process event bus supporting multiple subscribers and
//! JSONL formatting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{mpsc, Mutex};

/// Standard progress event names.
pub mod event_names {
    pub const IMPORT_STARTED: &str = "import_started";
    pub const IMPORT_PROGRESS: &str = "import_progress";
    pub const IMPORT_COMPLETE: &str = "import_complete";

    pub const VALIDATE_STARTED: &str = "validate_started";
    pub const VALIDATE_COMPLETE: &str = "validate_complete";
}

/// High-level phase for a progress event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Import,
    Detect,
    Validate,
    Export,
}

/// Progress counters for a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub current: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

/// Structured progress event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub event: String,
    pub timestamp: DateTime<Utc>,
    pub phase: Phase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<Progress>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub details: HashMap<String, Value>,
}

impl ProgressEvent {
    pub fn new(event: impl Into<String>, phase: Phase) -> Self {
        Self {
            event: event.into(),
            timestamp: Utc::now(),
            phase,
            progress: None,
            details: HashMap::new(),
        }
    }

    pub fn with_progress(mut self, current: u64, total: Option<u64>) -> Self {
        self.progress = Some(Progress { current, total });
        self
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.details.insert(key.into(), v);
        }
        self
    }

    pub fn to_jsonl(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(
                r#"{{"error":"serialization_failed","event":"{}"}}"#,
                self.event
            )
        })
    }
}

/// Trait for emitting progress events.
pub trait ProgressEmitter: Send + Sync {
    fn emit(&self, event: ProgressEvent);
}

/// Broadcast event bus supporting multiple subscribers.
#[derive(Debug, Default)]
pub struct EventBus {
    senders: Mutex<Vec<mpsc::Sender<ProgressEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to receive progress events.
    pub fn subscribe(&self) -> mpsc::Receiver<ProgressEvent> {
        let (tx, rx) = mpsc::channel();
        if let Ok(mut senders) = self.senders.lock() {
            senders.push(tx);
        }
        rx
    }

    /// Emit a progress event to all subscribers, pruning dead receivers.
    pub fn emit(&self, event: ProgressEvent) {
        if let Ok(mut senders) = self.senders.lock() {
            senders.retain(|sender| sender.send(event.clone()).is_ok());
        }
    }
}

impl ProgressEmitter for EventBus {
    fn emit(&self, event: ProgressEvent) {
        EventBus::emit(self, event);
    }
}
