//! Unified error handling for the QuickNote library
//!
//! Every fallible library operation returns [`Result`], whose error type is
//! [`QuickNoteError`]. Tool-level failures layered on top of these live in
//! [`crate::mcp::error_handling`].

use std::io;
use std::time::Duration;
use thiserror::Error;

use crate::config::ConfigError;

/// The main error type for the QuickNote library
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuickNoteError {
    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Storage backend error
    #[error("Storage error: {0}")]
    Storage(String),

    /// A backend call did not complete within the configured bound
    #[error("Storage backend timed out during {operation} after {timeout:?}")]
    BackendTimeout {
        /// Store operation that was running
        operation: &'static str,
        /// The bound that elapsed
        timeout: Duration,
    },

    /// SQLite backend error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("Serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl QuickNoteError {
    /// Create a storage error from anything displayable
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Whether this error came from the storage layer (including timeouts)
    pub fn is_storage_error(&self) -> bool {
        matches!(
            self,
            Self::Storage(_) | Self::BackendTimeout { .. } | Self::Sqlite(_) | Self::Io(_)
        )
    }
}

/// Result type alias for QuickNote operations
pub type Result<T> = std::result::Result<T, QuickNoteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message_names_operation() {
        let err = QuickNoteError::BackendTimeout {
            operation: "save_note",
            timeout: Duration::from_millis(250),
        };
        let message = err.to_string();
        assert!(message.contains("save_note"));
        assert!(message.contains("250ms"));
        assert!(err.is_storage_error());
    }

    #[test]
    fn test_io_error_converts() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: QuickNoteError = io_err.into();
        assert!(matches!(err, QuickNoteError::Io(_)));
        assert!(err.to_string().starts_with("IO error"));
    }

    #[test]
    fn test_other_is_not_storage() {
        assert!(!QuickNoteError::Other("boom".into()).is_storage_error());
        assert!(QuickNoteError::storage("disk full").is_storage_error());
    }
}
