//! fslistener - run a command whenever a path changes
//!
//! fslistener subscribes to native change notifications for a single path,
//! coalesces them into batches, and for every batch synchronously runs a
//! callback command with a fixed argument vector.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod watcher;

// Re-exports for convenience
pub use config::{Config, ListenerSettings, WatchConfig};
pub use dispatch::{ArgumentVector, CallbackDispatcher, DispatchOutcome};
pub use error::{ListenerError, ListenerResult};
pub use watcher::{
    BatchHandler, EventBatch, EventLoopRunner, ListenerHandle, NotificationSubscription,
    RunnerState, ShutdownSignal, WatchEvent,
};
