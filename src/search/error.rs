//! Search-specific error types
//!
//! This module defines error types for building queries and running searches
//! against the journal store.
//!
//! # Error Types
//!
//! - **`Database`**: Errors from database queries during search (wraps `DbError`)
//! - **`MissingTags`**: A search or refine command carried no tags
//! - **`InvalidTag`**: A tag uses characters outside letters, digits and dashes
//! - **`UnknownFlag`**: A `-x` style token that is not a recognized flag
//! - **`InvalidQuery`**: Conflicting modifiers, e.g. ascending and descending together
//! - **`RefineUnavailable`**: Refinement was requested on a small result set
//! - **`DeleteFailed`**: A batch delete stopped at a store failure
//!
//! Everything except `Database` and `DeleteFailed` is a user input error: the
//! prompt reports it and leaves the session unchanged.

use thiserror::Error;

/// Minimum number of results before a search may be refined
pub const REFINE_THRESHOLD: usize = 5;

/// Search-specific errors
#[derive(Debug, Error)]
pub enum SearchError {
    /// Database error occurred during search
    #[error("Database error: {0}")]
    Database(#[from] crate::db::DbError),

    /// No tags were supplied
    #[error("You must supply at least one tag to search for.")]
    MissingTags,

    /// Tag contains characters that can never be stored
    #[error("Invalid tag '{0}': only letters, numbers and dashes are allowed")]
    InvalidTag(String),

    /// Flag token that is not recognized
    #[error("Not a recognized flag: {0}")]
    UnknownFlag(String),

    /// Modifiers that cannot be combined
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Too few results to refine
    #[error("Refinement is only available when there are {REFINE_THRESHOLD} or more results.")]
    RefineUnavailable,

    /// A batch delete stopped partway; `deleted` holds the 1-based result
    /// positions removed before the failure
    #[error("Error deleting entry: {source}")]
    DeleteFailed {
        deleted: Vec<usize>,
        #[source]
        source: crate::db::DbError,
    },
}

impl SearchError {
    /// True for errors caused by what the user typed rather than by the store
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        !matches!(self, Self::Database(_) | Self::DeleteFailed { .. })
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
