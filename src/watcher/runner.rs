//! The listener thread: owns the subscription, coalesces notifications and
//! runs the batch handler inline.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::mpsc::{sync_channel, RecvTimeoutError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::config::ListenerSettings;
use crate::error::{ListenerError, ListenerResult};

use super::coalesce::Coalescer;
use super::event::{EventBatch, WatchEvent};
use super::shutdown::ShutdownSignal;
use super::subscription::{is_change, NotificationSubscription};

/// Upper bound on how long the loop blocks before re-checking for shutdown
pub const POLL_TICK: Duration = Duration::from_millis(50);

const LISTENER_THREAD_NAME: &str = "fs-listener";

/// Receives every coalesced batch on the listener thread.
///
/// Handlers run synchronously: the next batch is not delivered until
/// `handle_batch` returns.
pub trait BatchHandler: Send + 'static {
    fn handle_batch(&mut self, batch: &EventBatch, report: &dyn Fn(WatchEvent));
}

/// Lifecycle of the listener thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RunnerState {
    Idle = 0,
    Scheduling = 1,
    Started = 2,
    Running = 3,
    Stopped = 4,
}

impl RunnerState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => RunnerState::Idle,
            1 => RunnerState::Scheduling,
            2 => RunnerState::Started,
            3 => RunnerState::Running,
            _ => RunnerState::Stopped,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct SharedState(Arc<AtomicU8>);

impl SharedState {
    fn set(&self, state: RunnerState) {
        tracing::trace!(?state, "listener state");
        self.0.store(state as u8, Ordering::SeqCst);
    }

    fn get(&self) -> RunnerState {
        RunnerState::from_u8(self.0.load(Ordering::SeqCst))
    }
}

/// Builds and launches the listener thread.
#[derive(Debug, Clone)]
pub struct EventLoopRunner {
    path: PathBuf,
    latency: Duration,
    shutdown: ShutdownSignal,
}

impl EventLoopRunner {
    pub fn new(path: impl Into<PathBuf>, settings: &ListenerSettings, shutdown: ShutdownSignal) -> Self {
        Self {
            path: path.into(),
            latency: settings.latency,
            shutdown,
        }
    }

    /// Start the listener thread and wait until the watch is registered.
    ///
    /// Registration failures are returned here, before any batch can be
    /// delivered.
    pub fn spawn<H, R>(self, handler: H, report: R) -> ListenerResult<ListenerHandle>
    where
        H: BatchHandler,
        R: Fn(WatchEvent) + Send + 'static,
    {
        let state = SharedState::default();
        let thread_state = state.clone();
        let (ready_tx, ready_rx) = sync_channel::<ListenerResult<()>>(1);

        let thread = thread::Builder::new()
            .name(LISTENER_THREAD_NAME.to_string())
            .spawn(move || {
                thread_state.set(RunnerState::Scheduling);
                let mut subscription = match NotificationSubscription::new(&self.path)
                    .and_then(|mut s| s.start().map(|()| s))
                {
                    Ok(subscription) => subscription,
                    Err(err) => {
                        thread_state.set(RunnerState::Stopped);
                        let _ = ready_tx.send(Err(err));
                        return Ok(());
                    }
                };
                thread_state.set(RunnerState::Started);
                let _ = ready_tx.send(Ok(()));

                report(WatchEvent::Listening {
                    path: self.path.display().to_string(),
                });
                thread_state.set(RunnerState::Running);

                run_loop(
                    &subscription,
                    self.latency,
                    &self.shutdown,
                    handler,
                    &report,
                );

                subscription.stop();
                thread_state.set(RunnerState::Stopped);
                report(WatchEvent::Shutdown);
                Ok(())
            })
            .map_err(ListenerError::ListenerSpawn)?;

        let handle = ListenerHandle { thread, state };

        match ready_rx.recv() {
            Ok(Ok(())) => Ok(handle),
            Ok(Err(err)) => {
                let _ = handle.join();
                Err(err)
            }
            Err(_) => Err(handle.join().err().unwrap_or(ListenerError::ListenerStartup)),
        }
    }
}

fn run_loop<H: BatchHandler>(
    subscription: &NotificationSubscription,
    latency: Duration,
    shutdown: &ShutdownSignal,
    mut handler: H,
    report: &dyn Fn(WatchEvent),
) {
    let mut coalescer = Coalescer::new(latency);

    while !shutdown.is_triggered() {
        let timeout = coalescer
            .time_until_flush(Instant::now())
            .map_or(POLL_TICK, |left| left.min(POLL_TICK));

        match subscription.recv_timeout(timeout) {
            Ok(Ok(event)) => {
                if is_change(&event) {
                    tracing::trace!(kind = ?event.kind, paths = ?event.paths, "change");
                    coalescer.add(event);
                }
            }
            Ok(Err(err)) => {
                tracing::warn!(error = %err, "notification error");
                report(WatchEvent::WatchError {
                    message: err.to_string(),
                });
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                tracing::warn!("notification stream closed");
                break;
            }
        }

        if shutdown.is_triggered() {
            break;
        }

        if coalescer.should_flush() {
            if let Some(batch) = coalescer.take_batch() {
                tracing::debug!(events = batch.len(), "dispatching batch");
                handler.handle_batch(&batch, report);
            }
        }
    }

    if coalescer.pending_len() > 0 {
        tracing::debug!(
            discarded = coalescer.pending_len(),
            "shutdown with undelivered events"
        );
    }
}

/// Handle to a running listener thread.
#[derive(Debug)]
pub struct ListenerHandle {
    thread: JoinHandle<ListenerResult<()>>,
    state: SharedState,
}

impl ListenerHandle {
    pub fn state(&self) -> RunnerState {
        self.state.get()
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Block until the listener thread exits.
    pub fn join(self) -> ListenerResult<()> {
        self.thread
            .join()
            .map_err(|payload| ListenerError::ListenerPanicked {
                message: panic_message(payload.as_ref()),
            })?
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
