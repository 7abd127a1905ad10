use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use fslistener::config::{load_settings, ListenerSettings, WatchConfig};
use fslistener::dispatch::CallbackDispatcher;
use fslistener::watcher::{EventLoopRunner, ShutdownSignal};

use crate::cli::Cli;
use crate::ui::output::{emit, print_config_warnings};
use crate::ui::views::listen::started_event;

pub fn cmd_listen(cli: Cli) -> Result<()> {
    let (callback, extra) = cli.callback().context("missing callback command")?;
    let watch = WatchConfig::new(&cli.path, callback, extra.iter().cloned())
        .context("invalid arguments")?;

    let (settings, warnings) = load_settings(cli.config.as_deref())?;
    print_config_warnings(&warnings);
    let settings = apply_cli_overrides(settings, &cli);
    tracing::debug!(?settings, "resolved settings");

    let json = cli.json;
    let watch = Arc::new(watch);

    let shutdown = ShutdownSignal::new();
    let on_signal = shutdown.clone();
    ctrlc::set_handler(move || on_signal.trigger())
        .context("failed to install signal handler")?;

    emit(json, &started_event(&watch));

    let dispatcher = CallbackDispatcher::new(watch.clone(), &settings, shutdown.clone());
    let handle = EventLoopRunner::new(watch.watched_path(), &settings, shutdown)
        .spawn(dispatcher, move |event| emit(json, &event))?;

    handle.join()?;
    Ok(())
}

fn apply_cli_overrides(mut settings: ListenerSettings, cli: &Cli) -> ListenerSettings {
    if let Some(ms) = cli.latency_ms {
        settings.latency = Duration::from_millis(ms);
    }
    if let Some(ms) = cli.timeout_ms {
        settings.callback_timeout = (ms > 0).then(|| Duration::from_millis(ms));
    }
    if let Some(ms) = cli.kill_grace_ms {
        settings.kill_grace = Duration::from_millis(ms);
    }
    settings
}
