#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let mut parts = text.split('\0');
    let command = parts.next().unwrap_or_default();
    let extra: Vec<&str> = parts.collect();

    let argv = fslistener::ArgumentVector::build(command, extra.iter().copied());
    assert_eq!(argv.len(), extra.len() + 1);
    assert_eq!(argv.program(), command);
    assert_eq!(argv.tail().len(), extra.len());
    let _ = argv.to_command();
});
