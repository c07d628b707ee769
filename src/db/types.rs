//! Type wrappers for database keys and values
//!
//! - **`EntryId`**: stable entry identifier, stored as a big-endian key so that
//!   iteration over the `entries` tree follows creation order
//! - **`EntryRecord`**: the bincode-encoded value stored for each entry
//! - **`NewEntry`**: the caller-side description of an entry to insert
//!
//! Tag normalization lives here as well, since every tag that reaches the
//! store or a query goes through it.

use super::error::DbError;
use crate::Entry;
use bincode::{Decode, Encode};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use std::sync::LazyLock;

static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9\-]+$").expect("tag pattern is a valid regex")
});

/// Stable identifier of an entry
#[derive(
    Encode, Decode, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
pub struct EntryId(pub u64);

impl EntryId {
    /// Key bytes for the `entries` tree
    #[must_use]
    pub const fn to_key(self) -> [u8; 8] {
        self.0.to_be_bytes()
    }

    /// # Errors
    ///
    /// Returns `DbError::SerializeError` if the key is not exactly eight bytes.
    pub fn from_key(bytes: &[u8]) -> Result<Self, DbError> {
        let raw: [u8; 8] = bytes
            .try_into()
            .map_err(|_| DbError::SerializeError(format!("Invalid entry key length {}", bytes.len())))?;
        Ok(Self(u64::from_be_bytes(raw)))
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Stored form of an entry
#[derive(Encode, Decode, Clone, Debug, PartialEq, Eq)]
pub struct EntryRecord {
    pub name: String,
    pub file_path: PathBuf,
    pub tags: Vec<String>,
    pub originals: Vec<u64>,
    pub created_at_micros: i64,
}

impl EntryRecord {
    /// Attach the id and convert to the public `Entry` type
    ///
    /// # Errors
    ///
    /// Returns `DbError::SerializeError` if the stored timestamp is out of range.
    pub fn into_entry(self, id: EntryId) -> Result<Entry, DbError> {
        let created_at = DateTime::from_timestamp_micros(self.created_at_micros).ok_or_else(|| {
            DbError::SerializeError(format!("Invalid timestamp for entry {id}"))
        })?;
        Ok(Entry {
            id,
            name: self.name,
            file_path: self.file_path,
            created_at,
            tags: self.tags,
            originals: self.originals.into_iter().map(EntryId).collect(),
        })
    }
}

/// An entry that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub name: String,
    pub file_path: PathBuf,
    pub tags: Vec<String>,
    pub originals: Vec<EntryId>,
    pub created_at: DateTime<Utc>,
}

impl NewEntry {
    /// Describe a plain entry created now, with no originals
    #[must_use]
    pub fn new(name: impl Into<String>, file_path: impl Into<PathBuf>, tags: Vec<String>) -> Self {
        Self {
            name: name.into(),
            file_path: file_path.into(),
            tags,
            originals: Vec::new(),
            created_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn with_originals(mut self, originals: Vec<EntryId>) -> Self {
        self.originals = originals;
        self
    }

    #[must_use]
    pub const fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Build the record that will be stored, normalizing the tags
    #[must_use]
    pub fn to_record(&self) -> EntryRecord {
        EntryRecord {
            name: self.name.clone(),
            file_path: self.file_path.clone(),
            tags: normalize_tags(&self.tags),
            originals: self.originals.iter().map(|id| id.0).collect(),
            created_at_micros: self.created_at.timestamp_micros(),
        }
    }
}

/// Trim and lowercase a tag
#[must_use]
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}

/// Normalize a batch of tags: sorted, de-duplicated, blanks dropped
#[must_use]
pub fn normalize_tags<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    tags.iter()
        .map(|t| normalize_tag(t.as_ref()))
        .filter(|t| !t.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Check that a normalized tag only uses letters, digits and dashes
#[must_use]
pub fn is_valid_tag(tag: &str) -> bool {
    TAG_PATTERN.is_match(tag)
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
