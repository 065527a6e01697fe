//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::Config;

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use vcinv::config::{Config, ConfigMerger};
///
/// let low = Config { connection: Some("a:b@low".to_string()), ..Default::default() };
/// let high = Config { connection: Some("a:b@high".to_string()), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.connection, Some("a:b@high".to_string()));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple configuration sources into final config.
    ///
    /// Sources should be provided in order from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();

        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }

        result
    }

    /// Merge source config into target (source overwrites target).
    ///
    /// Every field is scalar: a `Some` in `source` replaces the target value.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.connection.is_some() {
            target.connection.clone_from(&source.connection);
        }

        if source.insecure.is_some() {
            target.insecure = source.insecure;
        }

        if source.inventory_file.is_some() {
            target.inventory_file.clone_from(&source.inventory_file);
        }

        if source.max_thumbprint_attempts.is_some() {
            target.max_thumbprint_attempts = source.max_thumbprint_attempts;
        }

        if source.log_mode.is_some() {
            target.log_mode.clone_from(&source.log_mode);
        }
    }
}
