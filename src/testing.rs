//! Testing utilities for journalz
//!
//! This module provides `TestJournal`, a throwaway journal with its own
//! temporary directory, database and volume directory, plus entry fixtures
//! with fixed timestamps.
//!
//! Only available when compiled with `cfg(test)`.

use crate::Entry;
use crate::config::JournalConfig;
use crate::db::{Database, EntryId, NewEntry};
use crate::document::{header_lines, write_lines};
use crate::volume::VolumeBuilder;
use chrono::{DateTime, TimeZone, Utc};
use std::cell::Cell;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Start line used by every fixture
pub const TEST_START_LINE: usize = 8;

/// Temporary journal that is removed on drop
///
/// # Examples
/// ```ignore
/// let journal = TestJournal::new();
/// let entry = journal.add_entry(&["work"], 9, "met the team");
/// assert_eq!(journal.db().count(), 1);
/// ```
pub struct TestJournal {
    // Field order matters: the database must close before the directory goes
    db: Database,
    dir: TempDir,
    counter: Cell<usize>,
}

impl TestJournal {
    /// # Panics
    /// Panics if the temporary directory or database cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let db = Database::open(dir.path().join("metadata.db")).expect("Failed to open test database");
        std::fs::create_dir_all(dir.path().join("Volumes")).expect("Failed to create volume dir");
        Self {
            db,
            dir,
            counter: Cell::new(0),
        }
    }

    #[must_use]
    pub const fn db(&self) -> &Database {
        &self.db
    }

    /// Root of the journal, also the entry directory
    #[must_use]
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    #[must_use]
    pub fn volume_dir(&self) -> PathBuf {
        self.dir.path().join("Volumes")
    }

    #[must_use]
    pub fn volume_builder(&self) -> VolumeBuilder<'_> {
        VolumeBuilder::new(&self.db, self.volume_dir(), TEST_START_LINE)
    }

    /// Config pointing at this journal
    #[must_use]
    pub fn config(&self) -> JournalConfig {
        JournalConfig {
            entry_dir: self.dir().to_path_buf(),
            volume_dir: Some(self.volume_dir()),
            database: Some(self.dir().join("metadata.db")),
            ..JournalConfig::default()
        }
    }

    /// Timestamp of a fixture created at `hour` on 2024-01-01
    ///
    /// # Panics
    /// Panics if `hour` is not a valid hour of the day.
    #[must_use]
    pub fn at_hour(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, hour, 0, 0).unwrap()
    }

    /// Write and record an entry whose body is the single line `body`
    ///
    /// # Panics
    /// Panics if the file cannot be written or the entry cannot be stored.
    pub fn add_entry(&self, tags: &[&str], hour: u32, body: &str) -> Entry {
        self.insert(tags, hour, body, Vec::new())
    }

    /// Write and record a volume fixture with the given originals
    ///
    /// # Panics
    /// Panics if the file cannot be written or the entry cannot be stored.
    pub fn add_volume(&self, tags: &[&str], hour: u32, originals: &[EntryId]) -> Entry {
        self.insert(tags, hour, "volume body", originals.to_vec())
    }

    /// Swap an entry's file for a non-empty directory so deleting it fails
    ///
    /// # Panics
    /// Panics if the directory cannot be created.
    pub fn block_removal(&self, entry: &Entry) {
        std::fs::remove_file(&entry.file_path).unwrap();
        std::fs::create_dir(&entry.file_path).unwrap();
        std::fs::write(entry.file_path.join("inner"), "x").unwrap();
    }

    fn insert(&self, tags: &[&str], hour: u32, body: &str, originals: Vec<EntryId>) -> Entry {
        let n = self.counter.get();
        self.counter.set(n + 1);

        let created_at = Self::at_hour(hour);
        let name = format!("Entry_{n:03}.md");
        let path = self.dir().join(&name);

        let mut lines = header_lines(&created_at, None);
        lines.truncate(TEST_START_LINE - 1);
        lines.push(body.to_string());
        write_lines(&path, &lines).unwrap();

        let new_entry = NewEntry::new(name, path, tags.iter().map(|t| (*t).to_string()).collect())
            .with_originals(originals)
            .created_at(created_at);
        self.db.insert_entry(&new_entry).unwrap()
    }
}

impl Default for TestJournal {
    fn default() -> Self {
        Self::new()
    }
}
