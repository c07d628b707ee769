//! Volume creation: merging entries into one document
//!
//! A volume is an entry whose document concatenates the bodies of other
//! entries. It carries the union of their tags and records their ids as its
//! originals. Merging a volume again records the volume itself followed by its
//! own originals, each id at most once.

pub mod error;

pub use error::VolumeError;

use crate::db::{Database, EntryId, NewEntry};
use crate::document::{header_lines, lines_from, read_lines, write_then_record};
use crate::Entry;
use chrono::{DateTime, Local, TimeZone, Utc};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};

/// Minimum number of entries in a volume
pub const MIN_VOLUME_ENTRIES: usize = 2;

/// Sorted union of the tags of `entries`
#[must_use]
pub fn union_tags(entries: &[Entry]) -> Vec<String> {
    entries
        .iter()
        .flat_map(|e| e.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Each entry followed by its own originals, first occurrence wins
#[must_use]
pub fn flatten_originals(entries: &[Entry]) -> Vec<EntryId> {
    let mut seen = HashSet::new();
    entries
        .iter()
        .flat_map(|e| std::iter::once(e.id).chain(e.originals.iter().copied()))
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Builds volumes into a directory
pub struct VolumeBuilder<'a> {
    db: &'a Database,
    volume_dir: PathBuf,
    start_line: usize,
}

impl<'a> VolumeBuilder<'a> {
    #[must_use]
    pub fn new(db: &'a Database, volume_dir: impl Into<PathBuf>, start_line: usize) -> Self {
        Self {
            db,
            volume_dir: volume_dir.into(),
            start_line: start_line.max(1),
        }
    }

    #[must_use]
    pub fn volume_dir(&self) -> &Path {
        &self.volume_dir
    }

    #[must_use]
    pub const fn start_line(&self) -> usize {
        self.start_line
    }

    /// Path the volume `name` would be written to
    #[must_use]
    pub fn volume_path(&self, name: &str) -> PathBuf {
        self.volume_dir.join(format!("{name}.md"))
    }

    /// Build a volume stamped with the current local time
    ///
    /// # Errors
    ///
    /// See [`VolumeBuilder::build_at`].
    pub fn build(&self, name: &str, entries: &[Entry]) -> Result<Entry, VolumeError> {
        self.build_at(name, entries, &Local::now())
    }

    /// Build a volume from `entries` named `name`
    ///
    /// The document is written first and recorded second; if recording fails
    /// the document is removed again.
    ///
    /// # Errors
    ///
    /// Returns `VolumeError::TooFewEntries`, `EmptyName` or `InvalidName`
    /// before anything is read or written, `AlreadyExists` if the target file
    /// exists, `SourceUnreadable` if an entry's document cannot be read, and
    /// `Io`/`Database` if writing or recording fails.
    pub fn build_at<Tz>(&self, name: &str, entries: &[Entry], now: &DateTime<Tz>) -> Result<Entry, VolumeError>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        if entries.len() < MIN_VOLUME_ENTRIES {
            return Err(VolumeError::TooFewEntries(entries.len()));
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(VolumeError::EmptyName);
        }
        if name == "." || name == ".." || name.contains(['/', '\\']) {
            return Err(VolumeError::InvalidName(name.to_string()));
        }

        let path = self.volume_path(name);
        if path.exists() {
            return Err(VolumeError::AlreadyExists(path));
        }

        let mut lines = header_lines(now, Some(name));
        for entry in entries {
            let source = read_lines(&entry.file_path).map_err(|source| VolumeError::SourceUnreadable {
                path: entry.file_path.clone(),
                source,
            })?;
            lines.extend_from_slice(lines_from(&source, self.start_line));
            lines.extend([String::new(), "---".to_string(), String::new()]);
        }

        let new_entry = NewEntry::new(name, &path, union_tags(entries))
            .with_originals(flatten_originals(entries))
            .created_at(now.with_timezone(&Utc));

        let volume = write_then_record(&path, &lines, || self.db.insert_entry(&new_entry))
            .map_err(|e| match e {
                VolumeError::Io(io) if io.kind() == std::io::ErrorKind::AlreadyExists => {
                    VolumeError::AlreadyExists(path.clone())
                }
                other => other,
            })?;

        tracing::debug!(
            id = %volume.id,
            path = %volume.file_path.display(),
            originals = volume.originals.len(),
            "created volume"
        );
        Ok(volume)
    }
}
