//! Configuration validation.

use crate::config::schema::Config;
use crate::connection::ConnectionDescriptor;
use crate::error::{Error, Result};
use crate::logging::LogLevel;

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use vcinv::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
///
/// let bad = Config { max_thumbprint_attempts: Some(0), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first invalid field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref connection) = config.connection {
            Self::validate_connection(connection)?;
        }

        if config.max_thumbprint_attempts == Some(0) {
            return Err(Error::Validation {
                field: "max_thumbprint_attempts".into(),
                message: "must be at least 1".into(),
            });
        }

        if let Some(ref mode) = config.log_mode {
            LogLevel::parse(mode).map_err(|message| Error::Validation {
                field: "log_mode".into(),
                message,
            })?;
        }

        if let Some(ref path) = config.inventory_file {
            if path.as_os_str().is_empty() {
                return Err(Error::Validation {
                    field: "inventory_file".into(),
                    message: "must not be empty".into(),
                });
            }
        }

        Ok(())
    }

    fn validate_connection(connection: &str) -> Result<()> {
        ConnectionDescriptor::parse(connection)
            .map(|_| ())
            .map_err(|e| Error::Validation {
                field: "connection".into(),
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_validate_empty_config() {
        assert!(ConfigValidator::validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_connection() {
        let good = Config {
            connection: Some("administrator:pw@vc01".into()),
            ..Default::default()
        };
        assert!(ConfigValidator::validate(&good).is_ok());

        let bad = Config {
            connection: Some("administrator@vc01".into()),
            ..Default::default()
        };
        let err = ConfigValidator::validate(&bad).unwrap_err();
        assert!(matches!(err, Error::Validation { ref field, .. } if field == "connection"));
    }

    #[test]
    fn test_validate_log_mode() {
        let bad = Config {
            log_mode: Some("chatty".into()),
            ..Default::default()
        };
        assert!(ConfigValidator::validate(&bad).is_err());
    }

    #[test]
    fn test_validate_empty_inventory_path() {
        let bad = Config {
            inventory_file: Some(PathBuf::new()),
            ..Default::default()
        };
        assert!(ConfigValidator::validate(&bad).is_err());
    }

    #[test]
    fn test_validate_attempts() {
        let ok = Config {
            max_thumbprint_attempts: Some(1),
            ..Default::default()
        };
        assert!(ConfigValidator::validate(&ok).is_ok());
    }
}
