//! Error types for the Inkwell editor shell.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::window::WindowId;

/// A shared error type for the entire Inkwell application.
///
/// A cancelled dialog is never represented here; it is a normal outcome
/// carried by [`crate::outcome::SaveOutcome`] and [`crate::outcome::OpenOutcome`].
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InkwellError {
    /// The document at `path` could not be read (missing, unreadable, not UTF-8).
    #[error("Failed to read '{path}': {message}")]
    Read { path: String, message: String },

    /// The document could not be written to `path`.
    #[error("Failed to write '{path}': {message}")]
    Write { path: String, message: String },

    /// The window has no file on disk yet.
    #[error("Window {window} has no associated file")]
    NoAssociatedFile { window: WindowId },

    /// Handing a path to the OS shell failed
    #[error("Shell error: {0}")]
    Shell(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// IO error outside of document reads and writes
    #[error("IO error: {message}")]
    Io { message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl InkwellError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Read error for `path`.
    pub fn read(path: &Path, message: impl Into<String>) -> Self {
        Self::Read {
            path: path.display().to_string(),
            message: message.into(),
        }
    }

    /// Creates a Write error for `path`.
    pub fn write(path: &Path, message: impl Into<String>) -> Self {
        Self::Write {
            path: path.display().to_string(),
            message: message.into(),
        }
    }

    /// Creates a Shell error
    pub fn shell(message: impl Into<String>) -> Self {
        Self::Shell(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_read_failure(&self) -> bool {
        matches!(self, Self::Read { .. })
    }

    pub fn is_write_failure(&self) -> bool {
        matches!(self, Self::Write { .. })
    }

    pub fn is_no_associated_file(&self) -> bool {
        matches!(self, Self::NoAssociatedFile { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for InkwellError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<toml::de::Error> for InkwellError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for InkwellError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for InkwellError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, InkwellError>`.
pub type Result<T> = std::result::Result<T, InkwellError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error_carries_path() {
        let err = InkwellError::read(Path::new("/tmp/missing.md"), "No such file");
        assert!(err.is_read_failure());
        assert!(!err.is_write_failure());
        assert_eq!(
            err.to_string(),
            "Failed to read '/tmp/missing.md': No such file"
        );
    }

    #[test]
    fn test_io_conversion_keeps_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: InkwellError = io.into();
        match err {
            InkwellError::Io { message } => assert!(message.contains("PermissionDenied")),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_no_associated_file_display() {
        let err = InkwellError::NoAssociatedFile {
            window: WindowId::from_raw(7),
        };
        assert!(err.is_no_associated_file());
        assert_eq!(err.to_string(), "Window 7 has no associated file");
    }
}
