//! Journalz - a tag-based journaling tool
//!
//! This library provides dated journal entries stored as plain Markdown files,
//! a tag index kept in an embedded database, an interactive search prompt and
//! the merging of selected entries into combined "volume" documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod document;
pub mod editor;
pub mod output;
pub mod prompt;
pub mod search;
pub mod ui;
pub mod volume;

#[cfg(test)]
pub mod testing;

pub use db::EntryId;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum JournalError {
    /// Database error
    #[error("Database error: {0}")]
    DbError(#[from] db::DbError),
    /// Search error
    #[error("Search error: {0}")]
    SearchError(#[from] search::SearchError),
    /// Volume creation error
    #[error("Volume error: {0}")]
    VolumeError(#[from] volume::VolumeError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// A journal record backed by a text file
///
/// Entries that were produced by merging other entries ("volumes") list the
/// ids of their sources in `originals`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub id: EntryId,
    pub name: String,
    pub file_path: PathBuf,
    pub created_at: DateTime<Utc>,
    /// Normalized tag names, sorted
    pub tags: Vec<String>,
    pub originals: Vec<EntryId>,
}

impl Entry {
    /// True if this entry was synthesized from other entries
    #[must_use]
    pub fn is_volume(&self) -> bool {
        !self.originals.is_empty()
    }

    /// Check whether the entry carries the given (normalized) tag
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
