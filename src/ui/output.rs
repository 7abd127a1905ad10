use fslistener::config::ConfigWarning;
use fslistener::watcher::WatchEvent;

use super::views::listen::render_listen_event;

/// Print one event: NDJSON or human text, failures on stderr.
pub fn emit(json: bool, event: &WatchEvent) {
    let line = if json {
        Some(event.to_json())
    } else {
        render_listen_event(event)
    };

    if let Some(line) = line {
        if event.is_failure() {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }
}

pub fn print_config_warnings(warnings: &[ConfigWarning]) {
    for w in warnings {
        if let Some(line) = w.line {
            eprintln!(
                "⚠ Unknown config key '{}' in {}:{}",
                w.key,
                w.file.display(),
                line
            );
        } else {
            eprintln!("⚠ Unknown config key '{}' in {}", w.key, w.file.display());
        }

        if let Some(suggestion) = &w.suggestion {
            eprintln!("   Did you mean '{}'?\n", suggestion);
        }
    }
}
