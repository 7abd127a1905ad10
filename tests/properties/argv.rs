//! Property tests for callback argument vectors.

use proptest::prelude::*;

use fslistener::{ArgumentVector, WatchConfig};

fn arg() -> impl Strategy<Value = String> {
    // Includes hyphens, spaces and duplicates on purpose
    proptest::string::string_regex("[A-Za-z0-9 ./_=-]{0,24}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: argv == [command] ++ extra, with no reordering or filtering.
    #[test]
    fn property_argv_is_command_then_args(
        command in "/[a-z]{1,8}(/[a-z]{1,8}){0,3}",
        extra in proptest::collection::vec(arg(), 0..8)
    ) {
        let argv = ArgumentVector::build(command.clone(), extra.clone());

        prop_assert_eq!(argv.len(), extra.len() + 1);
        prop_assert_eq!(argv.program().to_str().unwrap(), command.as_str());
        let tail: Vec<String> = argv
            .tail()
            .iter()
            .map(|a| a.to_str().unwrap().to_string())
            .collect();
        prop_assert_eq!(tail, extra);
    }

    /// PROPERTY: `WatchConfig` carries the same argv as the builder.
    #[test]
    fn property_watch_config_argv_matches_builder(
        command in "/[a-z]{1,8}",
        extra in proptest::collection::vec(arg(), 0..6)
    ) {
        let config = WatchConfig::new("/tmp/watched", command.clone(), extra.clone()).unwrap();

        prop_assert_eq!(config.callback_args(), &ArgumentVector::build(command, extra));
    }

    /// PROPERTY: the spawned command mirrors argv exactly.
    #[test]
    fn property_command_mirrors_argv(
        extra in proptest::collection::vec(arg(), 0..6)
    ) {
        let argv = ArgumentVector::build("/bin/echo", extra.clone());
        let cmd = argv.to_command();

        let args: Vec<String> = cmd
            .get_args()
            .map(|a| a.to_str().unwrap().to_string())
            .collect();
        prop_assert_eq!(args, extra);
    }
}
