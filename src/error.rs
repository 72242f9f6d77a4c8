//! Error types for pathkv
//!
//! Provides a unified error type for all operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using PathKvError
pub type Result<T> = std::result::Result<T, PathKvError>;

/// Unified error type for pathkv operations
#[derive(Debug, Error)]
pub enum PathKvError {
    // -------------------------------------------------------------------------
    // Construction Errors
    // -------------------------------------------------------------------------
    /// The store could not be opened: empty path, missing directory,
    /// directory creation failure or engine open failure.
    #[error("Initialization error: {0}")]
    Initialization(String),

    /// Another store already holds the directory.
    #[error("Path directory is already used by another store: {}", .0.display())]
    PathInUse(PathBuf),

    // -------------------------------------------------------------------------
    // Codec Errors
    // -------------------------------------------------------------------------
    #[error("Decode error: {0}")]
    Decode(String),

    // -------------------------------------------------------------------------
    // Engine Errors
    // -------------------------------------------------------------------------
    #[error("Engine error: {0}")]
    Engine(String),

    // -------------------------------------------------------------------------
    // Handle Errors
    // -------------------------------------------------------------------------
    #[error("Store is closed: {}", .0.display())]
    Closed(PathBuf),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<sled::Error> for PathKvError {
    fn from(err: sled::Error) -> Self {
        PathKvError::Engine(err.to_string())
    }
}
