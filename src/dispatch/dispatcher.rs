//! Runs the callback command once per batch and classifies how it ended

use std::process::{Child, ExitStatus};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::config::{ListenerSettings, WatchConfig};
use crate::watcher::{BatchHandler, EventBatch, ShutdownSignal, WatchEvent};

/// How often a running callback is checked for exit, timeout and shutdown
pub const WAIT_TICK: Duration = Duration::from_millis(10);

/// Outcome of a single dispatch. Not retained after it is reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Child exited normally
    Exited { pid: u32, code: i32 },
    /// Child was terminated by a signal it did not handle
    Signaled { pid: u32, signal: i32 },
    /// The process could not be created
    SpawnFailed { command: String, message: String },
    /// Waiting on the child failed; the child was killed
    WaitFailed { pid: u32, message: String },
    /// Child ran past the configured timeout and was stopped
    TimedOut { pid: u32 },
    /// Shutdown was requested while the child was running
    Cancelled { pid: u32 },
}

impl DispatchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DispatchOutcome::Exited { code: 0, .. })
    }

    pub fn to_event(&self) -> WatchEvent {
        match self.clone() {
            DispatchOutcome::Exited { pid, code } => WatchEvent::CallbackExited { pid, code },
            DispatchOutcome::Signaled { pid, signal } => {
                WatchEvent::CallbackSignaled { pid, signal }
            }
            DispatchOutcome::SpawnFailed { command, message } => {
                WatchEvent::CallbackSpawnFailed { command, message }
            }
            DispatchOutcome::WaitFailed { pid, message } => {
                WatchEvent::CallbackWaitFailed { pid, message }
            }
            DispatchOutcome::TimedOut { pid } => WatchEvent::CallbackTimedOut { pid },
            DispatchOutcome::Cancelled { pid } => WatchEvent::CallbackCancelled { pid },
        }
    }
}

/// Spawns the configured callback and blocks until it is done.
///
/// Only one child exists at a time: `dispatch` does not return before the
/// child has been reaped.
#[derive(Debug, Clone)]
pub struct CallbackDispatcher {
    config: Arc<WatchConfig>,
    timeout: Option<Duration>,
    kill_grace: Duration,
    shutdown: ShutdownSignal,
}

impl CallbackDispatcher {
    pub fn new(
        config: Arc<WatchConfig>,
        settings: &ListenerSettings,
        shutdown: ShutdownSignal,
    ) -> Self {
        Self {
            config,
            timeout: settings.callback_timeout,
            kill_grace: settings.kill_grace,
            shutdown,
        }
    }

    /// Run the callback once for `batch`.
    pub fn dispatch(&self, batch: &EventBatch) -> DispatchOutcome {
        let argv = self.config.callback_args();
        let child = match argv.to_command().spawn() {
            Ok(child) => child,
            Err(err) => {
                tracing::warn!(
                    command = %self.config.callback_command().display(),
                    error = %err,
                    "callback spawn failed"
                );
                return DispatchOutcome::SpawnFailed {
                    command: self.config.callback_command().display().to_string(),
                    message: err.to_string(),
                };
            }
        };

        let pid = child.id();
        tracing::debug!(pid, events = batch.len(), "callback spawned");
        let outcome = self.wait(child, pid);
        tracing::debug!(?outcome, "callback finished");
        outcome
    }

    fn wait(&self, mut child: Child, pid: u32) -> DispatchOutcome {
        let deadline = self.timeout.map(|timeout| Instant::now() + timeout);

        loop {
            match child.try_wait() {
                Ok(Some(status)) => return classify(pid, status),
                Ok(None) => {}
                Err(err) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return DispatchOutcome::WaitFailed {
                        pid,
                        message: err.to_string(),
                    };
                }
            }

            if self.shutdown.is_triggered() {
                tracing::info!(pid, "stopping callback for shutdown");
                self.terminate(&mut child, pid);
                return DispatchOutcome::Cancelled { pid };
            }

            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                tracing::warn!(pid, "callback timed out");
                self.terminate(&mut child, pid);
                return DispatchOutcome::TimedOut { pid };
            }

            thread::sleep(WAIT_TICK);
        }
    }

    /// SIGTERM, then SIGKILL once the grace period is over. Always reaps.
    fn terminate(&self, child: &mut Child, pid: u32) {
        #[cfg(unix)]
        {
            use nix::sys::signal::{kill, Signal};
            use nix::unistd::Pid;

            let target = i32::try_from(pid).map(Pid::from_raw);
            if let Ok(target) = target {
                if let Err(err) = kill(target, Signal::SIGTERM) {
                    tracing::debug!(pid, error = %err, "SIGTERM failed");
                }

                let grace_end = Instant::now() + self.kill_grace;
                while Instant::now() < grace_end {
                    match child.try_wait() {
                        Ok(Some(_)) => return,
                        Ok(None) => thread::sleep(WAIT_TICK),
                        Err(_) => break,
                    }
                }
            }
        }

        let _ = child.kill();
        let _ = child.wait();
    }
}

impl BatchHandler for CallbackDispatcher {
    fn handle_batch(&mut self, batch: &EventBatch, report: &dyn Fn(WatchEvent)) {
        report(WatchEvent::ListenerInvoked {
            events: batch.len(),
        });
        let outcome = self.dispatch(batch);
        report(outcome.to_event());
    }
}

fn classify(pid: u32, status: ExitStatus) -> DispatchOutcome {
    if let Some(code) = status.code() {
        return DispatchOutcome::Exited { pid, code };
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return DispatchOutcome::Signaled { pid, signal };
        }
    }

    DispatchOutcome::Exited { pid, code: -1 }
}
