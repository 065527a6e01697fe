//! CLI-specific error types with exit codes.
//!
//! This module defines error types specific to the CLI layer,
//! wrapping library errors and providing appropriate exit codes.

use std::fmt;
use vcinv::Error as LibError;

/// CLI-specific error type with exit code mapping.
#[derive(Debug)]
pub enum CliError {
    /// Library error (wrapped).
    Library(LibError),

    /// Invalid command-line arguments.
    InvalidArguments(String),

    /// I/O error.
    Io(std::io::Error),

    /// Configuration error.
    Config(String),

    /// Semantic failure (e.g., validation failed) - exit code 1.
    SemanticFailure(String),
}

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: Semantic failure (kind mismatch, unsupported operation, ...)
    /// - 2: Path not found
    /// - 3: Connection failure
    /// - 4: Invalid arguments
    /// - 5: I/O error
    /// - 6: Other library error
    /// - 7: Configuration error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::SemanticFailure(_) => 1,
            CliError::Library(lib_err) => match lib_err {
                LibError::KindMismatch { .. }
                | LibError::NotAContainer { .. }
                | LibError::UnsupportedOperation { .. }
                | LibError::UnknownHostType { .. }
                | LibError::CertificateNotTrusted { .. } => 1,
                LibError::PathNotFound { .. } => 2,
                LibError::Connection { .. } | LibError::InvalidConnection { .. } => 3,
                LibError::InvalidPath { .. } => 4,
                LibError::Io(_) | LibError::File { .. } => 5,
                LibError::Configuration(_) => 7,
                _ => 6,
            },
            CliError::InvalidArguments(_) => 4,
            CliError::Io(_) => 5,
            CliError::Config(_) => 7,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Library(e) => write!(f, "{e}"),
            CliError::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
            CliError::Config(msg) => write!(f, "Configuration error: {msg}"),
            CliError::SemanticFailure(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Library(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        CliError::Library(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vcinv::{InventoryFault, NodeKind};

    #[test]
    fn test_library_exit_codes() {
        let cases = [
            (
                LibError::KindMismatch {
                    name: "Prod".into(),
                    expected: NodeKind::Folder,
                    actual: NodeKind::Cluster,
                },
                1,
            ),
            (
                LibError::PathNotFound {
                    context: "missing".into(),
                    segment: None,
                },
                2,
            ),
            (
                LibError::Connection {
                    host: "vc01".into(),
                    source: InventoryFault::Connection("refused".into()),
                },
                3,
            ),
            (
                LibError::InvalidPath {
                    path: "DC1".into(),
                    reason: "must start with '/'".into(),
                },
                4,
            ),
            (LibError::Remote(InventoryFault::Other("boom".into())), 6),
        ];

        for (err, code) in cases {
            assert_eq!(CliError::from(err).exit_code(), code);
        }
    }

    #[test]
    fn test_cli_exit_codes() {
        assert_eq!(CliError::SemanticFailure("x".into()).exit_code(), 1);
        assert_eq!(CliError::InvalidArguments("x".into()).exit_code(), 4);
        assert_eq!(CliError::Config("x".into()).exit_code(), 7);
    }
}
