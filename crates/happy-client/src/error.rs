// ABOUTME: Error types for happy-client
// ABOUTME: ApiError for remote calls, StorageError for session storage, ValidationError for input

use thiserror::Error;

use crate::models::{MAX_MESSAGE_LEN, MIN_MESSAGE_LEN};

/// Errors from a round trip to the thoughts service
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, TLS or timeout failure before a response arrived.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    /// Displays the per-operation context message, e.g. "Failed to fetch thoughts".
    #[error("{context}")]
    Status { status: u16, context: &'static str },

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    pub fn status(status: u16, context: &'static str) -> Self {
        ApiError::Status { status, context }
    }
}

/// Errors from reading or writing session storage
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Corrupt session storage: {0}")]
    Corrupt(String),
}

/// A pending message outside the accepted length bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("You should type within {} to {} characters (got {len})", MIN_MESSAGE_LEN, MAX_MESSAGE_LEN)]
pub struct ValidationError {
    pub len: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_displays_context() {
        let err = ApiError::status(500, "Failed to fetch thoughts");
        assert_eq!(err.to_string(), "Failed to fetch thoughts");
        assert!(matches!(err, ApiError::Status { status: 500, .. }));
    }

    #[test]
    fn test_decode_error_display() {
        let err = ApiError::Decode("expected array".to_string());
        let display = format!("{}", err);
        assert!(display.contains("Invalid response"));
        assert!(display.contains("expected array"));
    }

    #[test]
    fn test_storage_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: StorageError = io.into();
        assert!(matches!(err, StorageError::Io(_)));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError { len: 3 };
        assert_eq!(
            err.to_string(),
            "You should type within 5 to 140 characters (got 3)"
        );
    }
}
