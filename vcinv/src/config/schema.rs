//! Configuration schema definitions.
//!
//! This module defines the configuration structure for vcinv: where the
//! control plane is, how to reach it, and how patient host adds are.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::connection::ConnectionDescriptor;
use crate::error::{Error, Result};
use crate::logging::LogLevel;
use crate::retry::ThumbprintRetry;

/// Complete configuration structure.
///
/// Every field is optional so that sources can be layered; unset fields
/// fall back to the defaults documented on each accessor.
///
/// # Examples
///
/// ```
/// use vcinv::config::Config;
///
/// let config = Config {
///     connection: Some("administrator:secret@vc01".to_string()),
///     max_thumbprint_attempts: Some(3),
///     ..Default::default()
/// };
/// assert_eq!(config.connection_descriptor().unwrap().host(), "vc01");
/// assert_eq!(config.retry_policy().max_attempts(), Some(3));
/// ```
#[derive(Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Control plane connection string, `user:password@host`.
    pub connection: Option<String>,

    /// Skip verification of the control plane certificate.
    pub insecure: Option<bool>,

    /// YAML inventory document standing in for a control plane.
    pub inventory_file: Option<PathBuf>,

    /// Cap on host add attempts while accepting certificates.
    pub max_thumbprint_attempts: Option<u32>,

    /// Log verbosity: quiet, normal or verbose.
    pub log_mode: Option<String>,
}

impl Config {
    /// Builds the connection descriptor.
    ///
    /// `insecure` defaults to `true`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if no connection is configured and
    /// [`Error::InvalidConnection`] if it does not parse.
    pub fn connection_descriptor(&self) -> Result<ConnectionDescriptor> {
        let raw = self.connection.as_deref().ok_or_else(|| Error::Validation {
            field: "connection".into(),
            message: "no connection configured (use --connection or VCINV_CONNECTION)".into(),
        })?;
        Ok(ConnectionDescriptor::parse(raw)?.with_insecure(self.insecure.unwrap_or(true)))
    }

    /// The thumbprint retry policy: bounded if `max_thumbprint_attempts`
    /// is set, unbounded otherwise.
    #[must_use]
    pub fn retry_policy(&self) -> ThumbprintRetry {
        match self.max_thumbprint_attempts {
            Some(attempts) => ThumbprintRetry::new().with_max_attempts(attempts),
            None => ThumbprintRetry::new(),
        }
    }

    /// The configured log level, if any.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for an unknown level.
    pub fn log_level(&self) -> Result<Option<LogLevel>> {
        self.log_mode
            .as_deref()
            .map(|mode| {
                LogLevel::parse(mode).map_err(|message| Error::Validation {
                    field: "log_mode".into(),
                    message,
                })
            })
            .transpose()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let connection = self
            .connection
            .as_deref()
            .map(|raw| match ConnectionDescriptor::parse(raw) {
                Ok(descriptor) => descriptor.to_string(),
                Err(_) => "<invalid>".to_string(),
            });
        f.debug_struct("Config")
            .field("connection", &connection)
            .field("insecure", &self.insecure)
            .field("inventory_file", &self.inventory_file)
            .field("max_thumbprint_attempts", &self.max_thumbprint_attempts)
            .field("log_mode", &self.log_mode)
            .finish()
    }
}
