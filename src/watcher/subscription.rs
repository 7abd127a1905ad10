//! Native change-notification registration for a single path

use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError};
use std::time::Duration;

use notify::event::{AccessKind, AccessMode};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::error::{ListenerError, ListenerResult};

/// A `notify` watcher bound to one path, forwarding raw events over a channel.
///
/// Only events that happen after [`start`](Self::start) are observed.
pub struct NotificationSubscription {
    path: PathBuf,
    watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    started: bool,
}

impl NotificationSubscription {
    /// Create the backend watcher. Nothing is observed until `start()`.
    pub fn new(path: impl Into<PathBuf>) -> ListenerResult<Self> {
        let path = path.into();
        let (tx, rx) = channel();

        let watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| {
                let _ = tx.send(res);
            },
            Config::default(),
        )
        .map_err(|source| ListenerError::WatchRegistration {
            path: path.clone(),
            source,
        })?;

        Ok(Self {
            path,
            watcher,
            rx,
            started: false,
        })
    }

    /// Register the watch. Call exactly once.
    pub fn start(&mut self) -> ListenerResult<()> {
        if self.started {
            return Err(ListenerError::AlreadyStarted {
                path: self.path.clone(),
            });
        }

        self.watcher
            .watch(&self.path, RecursiveMode::Recursive)
            .map_err(|source| ListenerError::WatchRegistration {
                path: self.path.clone(),
                source,
            })?;
        self.started = true;
        tracing::info!(path = %self.path.display(), "watch registered");
        Ok(())
    }

    /// Unregister the watch. A no-op when not started.
    pub fn stop(&mut self) {
        if !self.started {
            return;
        }
        if let Err(err) = self.watcher.unwatch(&self.path) {
            tracing::debug!(path = %self.path.display(), error = %err, "unwatch failed");
        }
        self.started = false;
    }

    pub fn recv_timeout(
        &self,
        timeout: Duration,
    ) -> Result<notify::Result<Event>, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_started(&self) -> bool {
        self.started
    }
}

/// Whether an event reports a change. Reads (open, read, close without
/// writing) are not changes; everything else is.
pub fn is_change(event: &Event) -> bool {
    match event.kind {
        EventKind::Access(AccessKind::Close(AccessMode::Write)) => true,
        EventKind::Access(_) => false,
        _ => true,
    }
}
