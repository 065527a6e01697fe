//! Connection descriptors.
//!
//! A descriptor is built once per operation from a `user:password@host`
//! string and handed to [`InventoryService::connect`](crate::inventory::InventoryService::connect).

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Credentials and target of a control plane connection.
///
/// `insecure` disables certificate verification of the control plane. It
/// defaults to `true` when parsed from a string and can be switched off
/// with [`ConnectionDescriptor::with_insecure`].
///
/// # Examples
///
/// ```
/// use vcinv::ConnectionDescriptor;
///
/// let conn = ConnectionDescriptor::parse("administrator:secret@vc01.example.com").unwrap();
/// assert_eq!(conn.user(), "administrator");
/// assert_eq!(conn.host(), "vc01.example.com");
/// assert!(conn.insecure());
/// assert_eq!(conn.to_string(), "administrator:***@vc01.example.com");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionDescriptor {
    user: String,
    password: String,
    host: String,
    insecure: bool,
}

impl ConnectionDescriptor {
    /// Creates a descriptor with `insecure` enabled.
    #[must_use]
    pub fn new(user: impl Into<String>, password: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
            host: host.into(),
            insecure: true,
        }
    }

    /// Parses a `user:password@host` string.
    ///
    /// The string is split on `:` and `@` with no escaping, so neither
    /// delimiter may appear inside a field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConnection`] unless the string splits into
    /// exactly a user, a password and a host, all non-empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use vcinv::ConnectionDescriptor;
    ///
    /// assert!(ConnectionDescriptor::parse("root:pw@vc").is_ok());
    /// assert!(ConnectionDescriptor::parse("root@vc").is_err());
    /// assert!(ConnectionDescriptor::parse("root:p:w@vc").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let fields: Vec<&str> = s.split([':', '@']).collect();
        let [user, password, host] = fields.as_slice() else {
            return Err(Error::InvalidConnection {
                reason: format!(
                    "expected user:password@host, found {} field(s)",
                    fields.len()
                ),
            });
        };

        // The delimiters must appear in order: ':' before '@'.
        let colon = s.find(':');
        let at = s.find('@');
        if !matches!((colon, at), (Some(c), Some(a)) if c < a) {
            return Err(Error::InvalidConnection {
                reason: "expected user:password@host".to_string(),
            });
        }

        for (field, value) in [("user", user), ("password", password), ("host", host)] {
            if value.is_empty() {
                return Err(Error::InvalidConnection {
                    reason: format!("{field} must not be empty"),
                });
            }
        }

        Ok(Self::new(*user, *password, *host))
    }

    /// Sets whether the control plane certificate is trusted blindly.
    #[must_use]
    pub fn with_insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    /// The user name.
    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    /// The password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// The control plane host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Whether certificate verification is disabled.
    #[must_use]
    pub fn insecure(&self) -> bool {
        self.insecure
    }
}

impl FromStr for ConnectionDescriptor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ConnectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:***@{}", self.user, self.host)
    }
}

impl fmt::Debug for ConnectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionDescriptor")
            .field("user", &self.user)
            .field("password", &"***")
            .field("host", &self.host)
            .field("insecure", &self.insecure)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let conn = ConnectionDescriptor::parse("admin:pw@10.1.2.3").unwrap();
        assert_eq!(conn.user(), "admin");
        assert_eq!(conn.password(), "pw");
        assert_eq!(conn.host(), "10.1.2.3");
        assert!(conn.insecure());
    }

    #[test]
    fn test_parse_rejects_missing_password() {
        let err = ConnectionDescriptor::parse("admin@vc").unwrap_err();
        assert!(matches!(err, Error::InvalidConnection { .. }));
    }

    #[test]
    fn test_parse_rejects_extra_delimiters() {
        assert!(ConnectionDescriptor::parse("admin:pw@vc:443").is_err());
        assert!(ConnectionDescriptor::parse("admin:p@ss@vc").is_err());
    }

    #[test]
    fn test_parse_rejects_reversed_delimiters() {
        assert!(ConnectionDescriptor::parse("admin@pw:vc").is_err());
    }

    #[test]
    fn test_parse_rejects_empty_fields() {
        assert!(ConnectionDescriptor::parse(":pw@vc").is_err());
        assert!(ConnectionDescriptor::parse("admin:@vc").is_err());
        assert!(ConnectionDescriptor::parse("admin:pw@").is_err());
        assert!(ConnectionDescriptor::parse("").is_err());
    }

    #[test]
    fn test_error_never_echoes_password() {
        let err = ConnectionDescriptor::parse("admin:topsecret@vc@x").unwrap_err();
        assert!(!format!("{err}").contains("topsecret"));
    }

    #[test]
    fn test_with_insecure() {
        let conn = ConnectionDescriptor::parse("a:b@c").unwrap().with_insecure(false);
        assert!(!conn.insecure());
    }

    #[test]
    fn test_debug_masks_password() {
        let conn = ConnectionDescriptor::new("a", "topsecret", "c");
        assert!(!format!("{conn:?}").contains("topsecret"));
    }

    #[test]
    fn test_from_str() {
        let conn: ConnectionDescriptor = "a:b@c".parse().unwrap();
        assert_eq!(conn.host(), "c");
    }
}
