//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ListenerError, ListenerResult};

use super::env_validator::{levenshtein, EnvVarValidator};
use super::types::{Config, ListenerSettings};

/// Environment override for the coalescing window
pub const ENV_LATENCY_MS: &str = "FSLISTENER_LATENCY_MS";
/// Environment override for the callback timeout (`0` disables it)
pub const ENV_TIMEOUT_MS: &str = "FSLISTENER_TIMEOUT_MS";
/// Environment override for the SIGTERM → SIGKILL grace period
pub const ENV_KILL_GRACE_MS: &str = "FSLISTENER_KILL_GRACE_MS";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> ListenerResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;
    parse_with_warnings(&content, path)
}

/// Parse TOML content; `path` is only used for error and warning locations.
pub fn parse_with_warnings(
    content: &str,
    path: &Path,
) -> ListenerResult<(Config, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| ListenerError::ConfigFile {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Resolve settings from an explicit config file, the user config, or defaults,
/// then apply environment overrides.
///
/// An explicit file must exist; the user config is optional.
pub fn load_settings(
    explicit: Option<&Path>,
) -> ListenerResult<(ListenerSettings, Vec<ConfigWarning>)> {
    let candidate = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => user_config_path().filter(|p| p.exists()),
    };

    let (config, warnings) = match candidate {
        Some(path) => {
            tracing::debug!(file = %path.display(), "loading config file");
            load_with_warnings(&path)?
        }
        None => (Config::default(), Vec::new()),
    };

    Ok((with_env_overrides(config.settings()), warnings))
}

/// Apply environment variable overrides (FSLISTENER_* prefix)
pub fn with_env_overrides(settings: ListenerSettings) -> ListenerSettings {
    with_env_overrides_from(settings, |name| std::env::var(name).ok())
}

/// Same as [`with_env_overrides`], reading variables through `lookup`.
pub fn with_env_overrides_from<F>(mut settings: ListenerSettings, lookup: F) -> ListenerSettings
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup(ENV_LATENCY_MS) {
        let validator = EnvVarValidator::new(ENV_LATENCY_MS, "a duration in milliseconds");
        settings.latency = validator.parse(&raw, parse_millis, settings.latency);
    }

    if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
        let validator =
            EnvVarValidator::new(ENV_TIMEOUT_MS, "a duration in milliseconds (0 disables)");
        settings.callback_timeout = validator.parse(
            &raw,
            |s| parse_millis(s).map(|d| (!d.is_zero()).then_some(d)),
            settings.callback_timeout,
        );
    }

    if let Some(raw) = lookup(ENV_KILL_GRACE_MS) {
        let validator = EnvVarValidator::new(ENV_KILL_GRACE_MS, "a duration in milliseconds");
        settings.kill_grace = validator.parse(&raw, parse_millis, settings.kill_grace);
    }

    settings
}

/// `~/.config/fslistener/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("fslistener").join("config.toml"))
}

fn parse_millis(raw: &str) -> Option<Duration> {
    raw.trim().parse::<u64>().ok().map(Duration::from_millis)
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "listener",
        "latency_ms",
        "callback",
        "timeout_ms",
        "kill_grace_ms",
    ];

    CANDIDATES
        .iter()
        .map(|candidate| (*candidate, levenshtein(unknown, candidate)))
        .filter(|(_, dist)| *dist > 0 && *dist <= 3)
        .min_by_key(|(_, dist)| *dist)
        .map(|(candidate, _)| candidate.to_string())
}
