//! Volume-specific error types
//!
//! - **`TooFewEntries`** and **`EmptyName`**/**`InvalidName`**: the merge
//!   request itself is not usable; nothing was written
//! - **`AlreadyExists`**: a document with the volume's name is already on disk
//! - **`SourceUnreadable`**: one of the merged entries could not be read
//! - **`Io`**/**`Database`**: writing or recording the volume failed

use std::path::PathBuf;
use thiserror::Error;

/// Volume creation errors
#[derive(Debug, Error)]
pub enum VolumeError {
    /// Fewer than two entries to merge
    #[error("Add at least two entries to your volume list first...")]
    TooFewEntries(usize),

    /// No name was given
    #[error("Give your volume a name: m [name]...")]
    EmptyName,

    /// Name cannot be used as a file name
    #[error("Invalid volume name '{0}'")]
    InvalidName(String),

    /// Target document exists
    #[error("A volume already exists at {}", .0.display())]
    AlreadyExists(PathBuf),

    /// A source entry's document could not be read
    #[error("Error reading original entry at {}: {source}", path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the volume document failed
    #[error("Error writing volume: {0}")]
    Io(#[from] std::io::Error),

    /// Recording the volume failed
    #[error("Database error: {0}")]
    Database(#[from] crate::db::DbError),
}
