#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Config parsing must reject bad input with an error, never panic
        let _ = toml::from_str::<fslistener::Config>(content);
        if let Ok((config, _warnings)) =
            fslistener::config::parse_with_warnings(content, Path::new("config.toml"))
        {
            let _ = config.settings();
        }
    }
});
