//! # DomainError
//!
//! Centralized error handling for the GameHub crates.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

use crate::store::Collection;

/// Failures of the persistence medium.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The medium refused the read or write (disk full, permission denied).
    #[error("storage I/O error on {collection}: {source}")]
    Io {
        collection: Collection,
        #[source]
        source: std::io::Error,
    },

    /// The persisted bytes are not a valid serialized collection.
    #[error("storage corrupt in {collection}: {reason}")]
    Corrupt {
        collection: Collection,
        reason: String,
    },
}

impl StoreError {
    pub fn io(collection: Collection, source: std::io::Error) -> Self {
        Self::Io { collection, source }
    }

    pub fn corrupt(collection: Collection, reason: impl Into<String>) -> Self {
        Self::Corrupt {
            collection,
            reason: reason.into(),
        }
    }
}

/// The primary error type for all forum operations.
#[derive(Error, Debug)]
pub enum DomainError {
    /// Resource not found (e.g., Post, Game)
    #[error("{0} not found with ID {1}")]
    NotFound(&'static str, i64),

    /// A required field was missing
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrong username or password
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Resource already exists (e.g., duplicate username)
    #[error("conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A specialized Result type for forum logic.
pub type Result<T> = std::result::Result<T, DomainError>;

/// Result type of the record store contract.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
