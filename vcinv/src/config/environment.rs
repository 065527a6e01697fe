//! Environment variable handling for configuration overrides.
//!
//! This module provides support for VCINV_* environment variables that
//! override configuration file values.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use crate::logging::LOG_MODE_ENV;
use std::env;
use std::path::PathBuf;

/// Connection string variable.
pub const CONNECTION_ENV: &str = "VCINV_CONNECTION";
/// Certificate verification toggle.
pub const INSECURE_ENV: &str = "VCINV_INSECURE";
/// Inventory document path.
pub const INVENTORY_ENV: &str = "VCINV_INVENTORY";
/// Host add attempt cap.
pub const MAX_THUMBPRINT_ATTEMPTS_ENV: &str = "VCINV_MAX_THUMBPRINT_ATTEMPTS";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use vcinv::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// Reads all VCINV_* environment variables and applies them to the
    /// configuration with higher precedence than file-based configs.
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable value is invalid
    /// (e.g., non-numeric attempt count, invalid boolean).
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(connection) = env::var(CONNECTION_ENV) {
            config.connection = Some(connection);
        }

        if let Ok(val) = env::var(INSECURE_ENV) {
            config.insecure = Some(Self::parse_bool(INSECURE_ENV, &val)?);
        }

        if let Ok(path) = env::var(INVENTORY_ENV) {
            config.inventory_file = Some(PathBuf::from(path));
        }

        if let Ok(attempts) = env::var(MAX_THUMBPRINT_ATTEMPTS_ENV) {
            config.max_thumbprint_attempts =
                Some(attempts.parse().map_err(|_| Error::Validation {
                    field: MAX_THUMBPRINT_ATTEMPTS_ENV.into(),
                    message: "Must be a positive integer".into(),
                })?);
        }

        if let Ok(mode) = env::var(LOG_MODE_ENV) {
            config.log_mode = Some(mode);
        }

        Ok(())
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    pub(crate) fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }
}
