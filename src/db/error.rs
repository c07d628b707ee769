//! Database-specific error types
//!
//! This module defines all error types that can occur during database operations.
//!
//! # Error Types
//!
//! - **`SledError`**: Errors from the underlying sled embedded database
//! - **`DecodeError`**: Failures when deserializing records from the database
//! - **`EncodeError`**: Failures when serializing records to the database
//! - **`SerializeError`**: Stored data that cannot be represented (bad timestamps, non UTF-8 paths)
//! - **`EntryNotFound`**: A lookup by id found no record
//! - **`FileRemoval`**: The backing file of an entry could not be deleted
//!
//! All errors implement `std::error::Error` via the `thiserror` crate.

use super::types::EntryId;
use thiserror::Error;

/// Database-specific errors
#[derive(Debug, Error)]
pub enum DbError {
    /// Represents a sled database error
    #[error("Database error: {0}")]
    SledError(#[from] sled::Error),

    /// Represents a bincode decoding error
    #[error("Error while decoding data: {0}")]
    DecodeError(#[from] bincode::error::DecodeError),

    /// Represents a bincode encoding error
    #[error("Error while encoding data: {0}")]
    EncodeError(#[from] bincode::error::EncodeError),

    /// Generic serialization/deserialization error
    #[error("Error during serialization: {0}")]
    SerializeError(String),

    /// No record exists for the id
    #[error("Entry not found: {0}")]
    EntryNotFound(EntryId),

    /// The entry's file exists but could not be removed
    #[error("Failed to delete file at {path}: {source}")]
    FileRemoval {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid input provided (e.g., a tag that is empty after normalization)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
