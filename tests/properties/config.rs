//! Property tests for config parsing.

use std::path::Path;
use std::time::Duration;

use proptest::prelude::*;

use fslistener::config::{parse_with_warnings, with_env_overrides_from, ListenerSettings};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: parsing arbitrary text never panics.
    #[test]
    fn property_config_parse_never_panics(s in "(?s).{0,256}") {
        let _ = parse_with_warnings(&s, Path::new("config.toml"));
    }

    /// PROPERTY: any latency in the file is the latency in the settings.
    #[test]
    fn property_latency_round_trips(ms in 0u64..1_000_000) {
        let content = format!("[listener]\nlatency_ms = {ms}\n");
        let (config, warnings) = parse_with_warnings(&content, Path::new("config.toml")).unwrap();

        prop_assert!(warnings.is_empty());
        prop_assert_eq!(config.settings().latency, Duration::from_millis(ms));
    }

    /// PROPERTY: garbage in the environment never changes resolved settings.
    #[test]
    fn property_invalid_env_is_ignored(raw in "[a-z .]{1,12}") {
        let base = ListenerSettings::default();
        let settings = with_env_overrides_from(base, |_| Some(raw.clone()));

        prop_assert_eq!(settings, base);
    }
}
