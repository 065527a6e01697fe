//! Error types for the vcinv library.
//!
//! This module provides the error hierarchy for path resolution, container
//! lifecycle operations and the configuration layer, using `thiserror` for
//! ergonomic error handling.

use std::path::PathBuf;

use thiserror::Error;

use crate::inventory::{InventoryFault, NodeKind};

/// Result type alias for operations that may fail with a vcinv error.
///
/// # Examples
///
/// ```
/// use vcinv::{Error, Result};
///
/// fn example_operation() -> Result<usize> {
///     Ok(3)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the vcinv library.
#[derive(Debug, Error)]
pub enum Error {
    /// The connection string could not be parsed.
    ///
    /// The offending input is deliberately not carried because it holds a
    /// password.
    #[error("invalid connection string: {reason}")]
    InvalidConnection {
        /// The reason the connection string is invalid.
        reason: String,
    },

    /// Connecting to the control plane failed.
    #[error("cannot connect to {host}: {source}")]
    Connection {
        /// The host that was contacted.
        host: String,
        /// The fault reported by the inventory service.
        #[source]
        source: InventoryFault,
    },

    /// An inventory path string is malformed.
    #[error("invalid inventory path '{path}': {reason}")]
    InvalidPath {
        /// The raw path.
        path: String,
        /// The reason the path is invalid.
        reason: String,
    },

    /// A path does not resolve to a container.
    #[error("{context}{}", segment.as_ref().map(|s| format!(" (at '{s}')")).unwrap_or_default())]
    PathNotFound {
        /// Caller-supplied diagnostic context.
        context: String,
        /// The segment at which resolution stopped, if any.
        segment: Option<String>,
    },

    /// A node of a non-container kind was wrapped as a container.
    #[error("{name} is a {kind}, expected a folder, a datacenter or a cluster")]
    NotAContainer {
        /// Name of the node.
        name: String,
        /// Kind of the node.
        kind: NodeKind,
    },

    /// The container kind cannot support the requested operation.
    #[error("cannot {operation} under {container}")]
    UnsupportedOperation {
        /// The attempted operation.
        operation: String,
        /// Description of the container.
        container: String,
    },

    /// A host argument is neither a host nor a compute resource.
    #[error("unknown host type: {name} is a {kind}")]
    UnknownHostType {
        /// Name of the offending node.
        name: String,
        /// Kind of the offending node.
        kind: NodeKind,
    },

    /// A named child exists but is not of the expected kind.
    #[error("{name} is a {actual}, expected a {expected}")]
    KindMismatch {
        /// Name of the child.
        name: String,
        /// The expected kind.
        expected: NodeKind,
        /// The kind found in the inventory.
        actual: NodeKind,
    },

    /// A bounded thumbprint retry policy gave up.
    #[error("certificate of host {host} still not trusted after {attempts} attempt(s) (thumbprint {thumbprint})")]
    CertificateNotTrusted {
        /// The host being added.
        host: String,
        /// The last thumbprint reported by the control plane.
        thumbprint: String,
        /// Number of attempts made.
        attempts: u32,
    },

    /// A remote call or task failed.
    #[error("remote fault: {0}")]
    Remote(#[from] InventoryFault),

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A file could not be read or written.
    #[error("cannot access {}: {reason}", path.display())]
    File {
        /// The file path.
        path: PathBuf,
        /// The reason access failed.
        reason: String,
    },

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },
}

impl Error {
    /// Builds a [`Error::PathNotFound`] carrying only the caller context.
    pub(crate) fn path_not_found(context: &str, segment: Option<&str>) -> Self {
        Self::PathNotFound {
            context: context.to_string(),
            segment: segment.map(str::to_string),
        }
    }

    /// Check if error indicates a path does not resolve.
    ///
    /// # Examples
    ///
    /// ```
    /// use vcinv::Error;
    ///
    /// let err = Error::PathNotFound { context: "no such folder".into(), segment: None };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PathNotFound { .. })
    }

    /// Check if error is an existing node of the wrong kind.
    #[must_use]
    pub fn is_kind_mismatch(&self) -> bool {
        matches!(self, Self::KindMismatch { .. })
    }

    /// Check if error is caused by a fault on the control plane side.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_) | Self::Connection { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_not_found_display_without_segment() {
        let err = Error::path_not_found("Folder /DC1/Folder1/ not found", None);
        assert_eq!(format!("{err}"), "Folder /DC1/Folder1/ not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_path_not_found_display_with_segment() {
        let err = Error::path_not_found("cannot resolve /DC1/ClusterA/Sub/", Some("Sub"));
        let display = format!("{err}");
        assert!(display.contains("cannot resolve"));
        assert!(display.contains("(at 'Sub')"));
    }

    #[test]
    fn test_kind_mismatch_error() {
        let err = Error::KindMismatch {
            name: "Prod".to_string(),
            expected: NodeKind::Folder,
            actual: NodeKind::Cluster,
        };
        let display = format!("{err}");
        assert!(display.contains("Prod"));
        assert!(display.contains("cluster"));
        assert!(display.contains("expected a folder"));
        assert!(err.is_kind_mismatch());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_unsupported_operation_error() {
        let err = Error::UnsupportedOperation {
            operation: "create a folder".to_string(),
            container: "cluster 'ClusterA'".to_string(),
        };
        assert_eq!(
            format!("{err}"),
            "cannot create a folder under cluster 'ClusterA'"
        );
    }

    #[test]
    fn test_invalid_connection_hides_input() {
        let err = Error::InvalidConnection {
            reason: "expected user:password@host".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("invalid connection string"));
    }

    #[test]
    fn test_remote_fault_conversion() {
        let fault = InventoryFault::TaskFailed {
            task: "task-7".to_string(),
            message: "host is in maintenance".to_string(),
        };
        let err: Error = fault.into();
        assert!(err.is_remote());
        assert!(format!("{err}").contains("task-7"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(format!("{err}").contains("I/O error"));
    }

    #[test]
    fn test_certificate_not_trusted_display() {
        let err = Error::CertificateNotTrusted {
            host: "10.0.0.5".to_string(),
            thumbprint: "AA:BB:CC".to_string(),
            attempts: 3,
        };
        let display = format!("{err}");
        assert!(display.contains("10.0.0.5"));
        assert!(display.contains("3 attempt(s)"));
        assert!(display.contains("AA:BB:CC"));
    }
}
