//! Error types for fslistener
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for listener operations
pub type ListenerResult<T> = Result<T, ListenerError>;

/// Main error type for listener operations
#[derive(Error, Debug)]
pub enum ListenerError {
    /// Startup parameters that can never produce a working listener
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Config file could not be parsed
    #[error("invalid config file {file}: {message}")]
    ConfigFile { file: PathBuf, message: String },

    /// The notification facility refused the watch
    #[error("failed to watch '{path}': {source}")]
    WatchRegistration {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },

    /// `start()` was called on a subscription that is already running
    #[error("subscription for '{path}' was already started")]
    AlreadyStarted { path: PathBuf },

    /// The listener thread could not be created
    #[error("failed to spawn listener thread: {0}")]
    ListenerSpawn(#[source] std::io::Error),

    /// The listener thread went away before reporting its startup result
    #[error("listener thread exited during startup")]
    ListenerStartup,

    /// The listener thread panicked
    #[error("listener thread panicked: {message}")]
    ListenerPanicked { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ListenerError {
    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
