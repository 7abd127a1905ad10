//! The resolved watch target and callback

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::dispatch::ArgumentVector;
use crate::error::{ListenerError, ListenerResult};

/// What to watch and what to run.
///
/// Built once at startup and never mutated afterwards; the listener thread
/// receives it behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchConfig {
    watched_path: PathBuf,
    callback_command: PathBuf,
    callback_args: ArgumentVector,
}

impl WatchConfig {
    /// Validate startup parameters and build the callback argument vector.
    pub fn new<I, S>(
        watched_path: impl Into<PathBuf>,
        callback_command: impl Into<PathBuf>,
        extra_args: I,
    ) -> ListenerResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let watched_path = watched_path.into();
        let callback_command = callback_command.into();

        if watched_path.as_os_str().is_empty() {
            return Err(ListenerError::invalid_config(
                "watched path must not be empty",
            ));
        }
        if callback_command.as_os_str().is_empty() {
            return Err(ListenerError::invalid_config(
                "callback command must not be empty",
            ));
        }

        let callback_args = ArgumentVector::build(callback_command.clone(), extra_args);

        Ok(Self {
            watched_path,
            callback_command,
            callback_args,
        })
    }

    pub fn watched_path(&self) -> &Path {
        &self.watched_path
    }

    pub fn callback_command(&self) -> &Path {
        &self.callback_command
    }

    /// Full argv, element 0 being the callback command
    pub fn callback_args(&self) -> &ArgumentVector {
        &self.callback_args
    }
}
