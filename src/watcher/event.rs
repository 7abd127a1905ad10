//! Batch and lifecycle event types

use std::path::Path;

use notify::Event;
use serde::Serialize;

/// One coalesced delivery from the notification facility.
///
/// Never empty: [`EventBatch::new`] refuses to build a batch without events.
#[derive(Debug, Clone)]
pub struct EventBatch {
    events: Vec<Event>,
}

impl EventBatch {
    pub fn new(events: Vec<Event>) -> Option<Self> {
        if events.is_empty() {
            None
        } else {
            Some(Self { events })
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the batch holds no events; a built batch always holds one.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Every path mentioned by any event, in delivery order (may repeat).
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.events
            .iter()
            .flat_map(|event| event.paths.iter().map(|p| p.as_path()))
    }
}

/// Listener lifecycle events, rendered as text or NDJSON by the CLI
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WatchEvent {
    ListenerStarted {
        path: String,
        callback: String,
        args: Vec<String>,
    },
    Listening {
        path: String,
    },
    ListenerInvoked {
        events: usize,
    },
    CallbackExited {
        pid: u32,
        code: i32,
    },
    CallbackSignaled {
        pid: u32,
        signal: i32,
    },
    CallbackSpawnFailed {
        command: String,
        message: String,
    },
    CallbackWaitFailed {
        pid: u32,
        message: String,
    },
    CallbackTimedOut {
        pid: u32,
    },
    CallbackCancelled {
        pid: u32,
    },
    WatchError {
        message: String,
    },
    Shutdown,
}

impl WatchEvent {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Failures belong on the diagnostic stream.
    pub fn is_failure(&self) -> bool {
        match self {
            WatchEvent::CallbackExited { code, .. } => *code != 0,
            WatchEvent::CallbackSignaled { .. }
            | WatchEvent::CallbackSpawnFailed { .. }
            | WatchEvent::CallbackWaitFailed { .. }
            | WatchEvent::CallbackTimedOut { .. }
            | WatchEvent::CallbackCancelled { .. }
            | WatchEvent::WatchError { .. } => true,
            WatchEvent::ListenerStarted { .. }
            | WatchEvent::Listening { .. }
            | WatchEvent::ListenerInvoked { .. }
            | WatchEvent::Shutdown => false,
        }
    }
}
