use fslistener::config::WatchConfig;
use fslistener::watcher::WatchEvent;

/// The startup event describing what is watched and what will run
pub fn started_event(config: &WatchConfig) -> WatchEvent {
    WatchEvent::ListenerStarted {
        path: config.watched_path().display().to_string(),
        callback: config.callback_command().display().to_string(),
        args: config
            .callback_args()
            .as_slice()
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect(),
    }
}

pub fn render_banner(path: &str, callback: &str, args: &[String]) -> String {
    let mut rendered = format!("path to scan: {path}\ncallback script: {callback}\nscript args: [ ");
    for arg in args {
        rendered.push_str(arg);
        rendered.push(' ');
    }
    rendered.push(']');
    rendered
}

/// Human-readable line for an event, or `None` when nothing should be shown.
pub fn render_listen_event(event: &WatchEvent) -> Option<String> {
    let line = match event {
        WatchEvent::ListenerStarted {
            path,
            callback,
            args,
        } => render_banner(path, callback, args),
        WatchEvent::Listening { .. } => "(listening for fs events...)".to_string(),
        WatchEvent::ListenerInvoked { .. } => "listener invoked".to_string(),
        WatchEvent::CallbackExited { code: 0, .. } => return None,
        WatchEvent::CallbackExited { pid, code } => {
            format!("exit status from pid {pid}: {code}")
        }
        WatchEvent::CallbackSignaled { pid, signal } => {
            format!("pid {pid} terminated by signal {signal}")
        }
        WatchEvent::CallbackSpawnFailed { command, message } => {
            format!("failed to spawn '{command}': {message}")
        }
        WatchEvent::CallbackWaitFailed { pid, message } => {
            format!("failed to wait for pid {pid}: {message}")
        }
        WatchEvent::CallbackTimedOut { pid } => format!("pid {pid} timed out and was stopped"),
        WatchEvent::CallbackCancelled { pid } => format!("pid {pid} stopped for shutdown"),
        WatchEvent::WatchError { message } => format!("watch error: {message}"),
        WatchEvent::Shutdown => "exiting...".to_string(),
    };
    Some(line)
}
