//! Storage error types.

use super::CharacterKey;

/// Errors raised by a character or settings store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No record under this key.
    #[error("character {0} not found")]
    NotFound(CharacterKey),

    /// A create collided with an existing record.
    #[error("character {0} already exists")]
    AlreadyExists(CharacterKey),

    /// The record changed since it was loaded.
    #[error("character {key} changed underneath us (expected version {expected}, found {found})")]
    Conflict {
        /// The contested record.
        key: CharacterKey,
        /// Version the writer loaded.
        expected: u64,
        /// Version currently stored.
        found: u64,
    },

    /// The backing medium failed.
    #[error("storage backend error: {0}")]
    Backend(String),

    /// A record could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        Self::Backend(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// Convenience result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
