//! Property-based tests for configuration system.

use super::merger::ConfigMerger;
use super::schema::Config;
use super::validator::ConfigValidator;
use proptest::prelude::*;
use std::path::PathBuf;

// Strategy for generating connection strings
fn connection_strategy() -> impl Strategy<Value = String> {
    ("[a-z]{1,12}", "[A-Za-z0-9!#]{1,12}", "[a-z0-9.-]{1,20}")
        .prop_map(|(user, password, host)| format!("{user}:{password}@{host}"))
}

// Strategy for generating configs
fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(connection_strategy()),
        prop::option::of(any::<bool>()),
        prop::option::of("[a-z/]{1,20}"),
        prop::option::of(1u32..100),
        prop::option::of(prop::sample::select(vec!["quiet", "normal", "verbose"])),
    )
        .prop_map(|(connection, insecure, inventory, attempts, mode)| Config {
            connection,
            insecure,
            inventory_file: inventory.map(PathBuf::from),
            max_thumbprint_attempts: attempts,
            log_mode: mode.map(str::to_string),
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        max_shrink_iters: 2000,
        .. ProptestConfig::default()
    })]

    // Set fields of the higher source always win; unset ones never clear
    #[test]
    fn config_merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut merged = low.clone();
        ConfigMerger::merge_into(&mut merged, &high);

        prop_assert_eq!(merged.connection, high.connection.or(low.connection));
        prop_assert_eq!(merged.insecure, high.insecure.or(low.insecure));
        prop_assert_eq!(merged.inventory_file, high.inventory_file.or(low.inventory_file));
        prop_assert_eq!(
            merged.max_thumbprint_attempts,
            high.max_thumbprint_attempts.or(low.max_thumbprint_attempts)
        );
        prop_assert_eq!(merged.log_mode, high.log_mode.or(low.log_mode));
    }

    // Merging into an empty config yields the source
    #[test]
    fn config_merge_into_default_is_identity(config in config_strategy()) {
        let mut merged = Config::default();
        ConfigMerger::merge_into(&mut merged, &config);
        prop_assert_eq!(merged, config);
    }

    // Generated configs are always valid, and stay valid after merging
    #[test]
    fn config_merge_preserves_validity(low in config_strategy(), high in config_strategy()) {
        prop_assert!(ConfigValidator::validate(&low).is_ok());
        let mut merged = low;
        ConfigMerger::merge_into(&mut merged, &high);
        prop_assert!(ConfigValidator::validate(&merged).is_ok());
    }

}
