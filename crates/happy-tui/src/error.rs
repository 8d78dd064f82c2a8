// ABOUTME: Error types for happy-tui.
// ABOUTME: AppError covers config, IO, client, storage and validation failures.

use happy_client::{ApiError, StorageError, ValidationError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Client(#[from] ApiError),

    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A store operation failed; carries the message the store recorded.
    #[error("{0}")]
    Request(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
