//! Configuration module for fslistener
//!
//! Settings hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (FSLISTENER_*)
//! 3. Config file (`--config`, else ~/.config/fslistener/config.toml)
//! 4. Built-in defaults (lowest priority)
//!
//! The watch target itself (`WatchConfig`) only comes from the command line.

mod env_validator;
mod loader;
mod types;
mod watch;

pub use env_validator::{levenshtein, EnvVarValidator};
pub use loader::{
    load_settings, load_with_warnings, parse_with_warnings, user_config_path,
    with_env_overrides, with_env_overrides_from, ConfigWarning, ENV_KILL_GRACE_MS,
    ENV_LATENCY_MS, ENV_TIMEOUT_MS,
};
pub use types::{
    CallbackSection, Config, ListenerSection, ListenerSettings, DEFAULT_KILL_GRACE_MS,
    DEFAULT_LATENCY_MS,
};
pub use watch::WatchConfig;
