//! Configuration type definitions

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default coalescing window for change notifications
pub const DEFAULT_LATENCY_MS: u64 = 100;

/// Default time a callback gets between SIGTERM and SIGKILL
pub const DEFAULT_KILL_GRACE_MS: u64 = 2_000;

/// `[listener]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListenerSection {
    #[serde(default)]
    pub latency_ms: Option<u64>,
}

/// `[callback]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackSection {
    /// Upper bound on a single callback run; unset means wait forever
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    #[serde(default)]
    pub kill_grace_ms: Option<u64>,
}

/// On-disk configuration (`config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub listener: ListenerSection,

    #[serde(default)]
    pub callback: CallbackSection,
}

impl Config {
    /// Resolve the file layer on top of built-in defaults
    pub fn settings(&self) -> ListenerSettings {
        let defaults = ListenerSettings::default();
        ListenerSettings {
            latency: self
                .listener
                .latency_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.latency),
            callback_timeout: self
                .callback
                .timeout_ms
                .map_or(defaults.callback_timeout, |ms| {
                    (ms > 0).then(|| Duration::from_millis(ms))
                }),
            kill_grace: self
                .callback
                .kill_grace_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.kill_grace),
        }
    }
}

/// Runtime tunables for the listener and the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerSettings {
    /// Coalescing window: events arriving within it form one batch
    pub latency: Duration,
    /// Upper bound on a single callback run
    pub callback_timeout: Option<Duration>,
    /// Delay between SIGTERM and SIGKILL when a callback must be stopped
    pub kill_grace: Duration,
}

impl Default for ListenerSettings {
    fn default() -> Self {
        Self {
            latency: Duration::from_millis(DEFAULT_LATENCY_MS),
            callback_timeout: None,
            kill_grace: Duration::from_millis(DEFAULT_KILL_GRACE_MS),
        }
    }
}

impl ListenerSettings {
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_callback_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.callback_timeout = timeout;
        self
    }

    pub fn with_kill_grace(mut self, grace: Duration) -> Self {
        self.kill_grace = grace;
        self
    }
}
