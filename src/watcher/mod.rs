//! Filesystem listener
//!
//! - One `notify` subscription per process, always recursive
//! - Events coalesced within a latency window (100ms by default)
//! - Batches handled synchronously on a dedicated `fs-listener` thread
//! - Cooperative shutdown through [`ShutdownSignal`]

mod coalesce;
mod event;
mod runner;
mod shutdown;
mod subscription;

pub use event::{EventBatch, WatchEvent};
pub use runner::{BatchHandler, EventLoopRunner, ListenerHandle, RunnerState, POLL_TICK};
pub use shutdown::ShutdownSignal;
pub use subscription::{is_change, NotificationSubscription};
