//! Error types for groupdrive.

use thiserror::Error;

/// Common error type for groupdrive.
#[derive(Error, Debug)]
pub enum DriveError {
    /// I/O error from a disk operation.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The requester is not allowed to perform the operation.
    #[error("permission denied: {0}")]
    Permission(String),

    /// Validation error for user input (missing or empty field, bad name).
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found (group, file or folder).
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl DriveError {
    /// Shorthand for a missing group.
    pub fn group_not_found() -> Self {
        DriveError::NotFound("group".to_string())
    }

    /// Shorthand for a missing file.
    pub fn file_not_found() -> Self {
        DriveError::NotFound("file".to_string())
    }

    /// Shorthand for a missing folder.
    pub fn folder_not_found() -> Self {
        DriveError::NotFound("folder".to_string())
    }
}

/// Result type alias for groupdrive operations.
pub type Result<T> = std::result::Result<T, DriveError>;
