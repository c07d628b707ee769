//! Database wrapper module for journalz
//!
//! Provides a clean API for storing and retrieving journal entries
//! using sled as the embedded database backend.
//!
//! Uses multiple sled trees for efficient indexing:
//! - `entries`: Main tree mapping entry ids to entry records
//! - `tags`: Reverse index mapping tags to entry ids

use sled::transaction::{ConflictableTransactionError, ConflictableTransactionResult, TransactionError};
use sled::{Db, Transactional, Tree};
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::Path;
use crate::Entry;

pub mod error;
pub mod types;

pub use error::DbError;
pub use types::{EntryId, EntryRecord, NewEntry, is_valid_tag, normalize_tag, normalize_tags};

/// Database wrapper that encapsulates all database operations
///
/// Uses two trees for efficient bidirectional lookups:
/// - `entries` tree: `entry_id` -> `EntryRecord`
/// - `tags` tree: tag -> Vec<`entry_id`>
pub struct Database {
    db: Db,
    entries: Tree, // id -> record
    tags: Tree,    // tag -> ids reverse index
}

impl Database {
    /// Opens or creates a database at the specified path
    ///
    /// # Examples
    /// ```no_run
    /// use journalz::db::Database;
    /// let db = Database::open("metadata.db").unwrap();
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the database cannot be opened or if the internal trees cannot be created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DbError> {
        let db = sled::open(path)?;
        let entries = db.open_tree("entries")?;
        let tags = db.open_tree("tags")?;
        Ok(Self { db, entries, tags })
    }

    /// Store a new entry together with its tags
    ///
    /// Tags are normalized before storage. The entry record and every tag
    /// index update are written in one transaction, so either all of them
    /// land or none do.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if id generation, serialization or the transaction fails.
    pub fn insert_entry(&self, new_entry: &NewEntry) -> Result<Entry, DbError> {
        let record = new_entry.to_record();
        let id = EntryId(self.db.generate_id()?);
        let key = id.to_key();
        let value = bincode::encode_to_vec(&record, bincode::config::standard())?;

        (&self.entries, &self.tags)
            .transaction(|(entries, tags)| -> ConflictableTransactionResult<(), DbError> {
                entries.insert(&key[..], value.as_slice())?;
                for tag in &record.tags {
                    let mut ids = match tags.get(tag.as_bytes())? {
                        Some(bytes) => decode_ids(&bytes).map_err(ConflictableTransactionError::Abort)?,
                        None => Vec::new(),
                    };
                    if !ids.contains(&id.0) {
                        ids.push(id.0);
                    }
                    let encoded = encode_ids(&ids).map_err(ConflictableTransactionError::Abort)?;
                    tags.insert(tag.as_bytes(), encoded)?;
                }
                Ok(())
            })
            .map_err(flatten_transaction_error)?;

        tracing::debug!(id = %id, name = %record.name, tags = ?record.tags, "inserted entry");
        record.into_entry(id)
    }

    /// Get a single entry by id
    ///
    /// # Errors
    ///
    /// Returns `DbError` if database operations fail or deserialization errors occur.
    pub fn get_entry(&self, id: EntryId) -> Result<Option<Entry>, DbError> {
        match self.entries.get(id.to_key())? {
            Some(value) => {
                let (record, _): (EntryRecord, usize) =
                    bincode::decode_from_slice(&value, bincode::config::standard())?;
                Ok(Some(record.into_entry(id)?))
            }
            None => Ok(None),
        }
    }

    /// Find the ids of all entries carrying a tag (reverse index lookup)
    ///
    /// # Errors
    ///
    /// Returns `DbError` if database operations fail or deserialization errors occur.
    pub fn find_by_tag(&self, tag: &str) -> Result<Vec<EntryId>, DbError> {
        match self.tags.get(normalize_tag(tag).as_bytes())? {
            Some(value) => Ok(decode_ids(&value)?.into_iter().map(EntryId).collect()),
            None => Ok(Vec::new()),
        }
    }

    /// Find all entries that carry at least one of the tags
    ///
    /// This is the candidate superset for a search; the exact tag semantics are
    /// applied afterwards by the search filters.
    ///
    /// # Returns
    /// Entries ordered by id, i.e. in the order they were created
    ///
    /// # Errors
    ///
    /// Returns `DbError` if any tag lookup fails or an entry record cannot be decoded.
    pub fn find_by_any_tag<S: AsRef<str>>(&self, tags: &[S]) -> Result<Vec<Entry>, DbError> {
        let mut ids = BTreeSet::new();
        for tag in tags {
            ids.extend(self.find_by_tag(tag.as_ref())?);
        }

        let mut found = Vec::with_capacity(ids.len());
        for id in ids {
            match self.get_entry(id)? {
                Some(entry) => found.push(entry),
                None => tracing::warn!(id = %id, "tag index references a missing entry"),
            }
        }
        Ok(found)
    }

    /// Delete an entry: its backing file first, then its record
    ///
    /// A backing file that is already gone does not block the deletion. Any
    /// other failure removing the file aborts before the store is touched.
    ///
    /// # Errors
    ///
    /// Returns `DbError::EntryNotFound` for an unknown id, `DbError::FileRemoval`
    /// if the file cannot be removed, or other `DbError`s from the store.
    pub fn delete_entry(&self, id: EntryId) -> Result<Entry, DbError> {
        let entry = self.get_entry(id)?.ok_or(DbError::EntryNotFound(id))?;

        match fs::remove_file(&entry.file_path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(path = %entry.file_path.display(), "backing file already missing");
            }
            Err(source) => {
                return Err(DbError::FileRemoval {
                    path: entry.file_path.display().to_string(),
                    source,
                });
            }
        }

        self.remove_entry_record(id)?;
        Ok(entry)
    }

    /// Remove an entry record and its tag index entries, leaving any file alone
    ///
    /// # Returns
    /// `true` if a record was removed
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the transaction fails or stored data cannot be decoded.
    pub fn remove_entry_record(&self, id: EntryId) -> Result<bool, DbError> {
        let key = id.to_key();

        let removed = (&self.entries, &self.tags)
            .transaction(|(entries, tags)| -> ConflictableTransactionResult<bool, DbError> {
                let Some(value) = entries.remove(&key[..])? else {
                    return Ok(false);
                };
                let (record, _): (EntryRecord, usize) =
                    bincode::decode_from_slice(&value, bincode::config::standard())
                        .map_err(|e| ConflictableTransactionError::Abort(DbError::from(e)))?;

                for tag in &record.tags {
                    if let Some(bytes) = tags.get(tag.as_bytes())? {
                        let mut ids = decode_ids(&bytes).map_err(ConflictableTransactionError::Abort)?;
                        ids.retain(|other| *other != id.0);
                        if ids.is_empty() {
                            tags.remove(tag.as_bytes())?;
                        } else {
                            let encoded = encode_ids(&ids).map_err(ConflictableTransactionError::Abort)?;
                            tags.insert(tag.as_bytes(), encoded)?;
                        }
                    }
                }
                Ok(true)
            })
            .map_err(flatten_transaction_error)?;

        tracing::debug!(id = %id, removed, "removed entry record");
        Ok(removed)
    }

    /// List every entry in creation order
    ///
    /// # Errors
    ///
    /// Returns `DbError` if database iteration fails or deserialization errors occur.
    pub fn list_all(&self) -> Result<Vec<Entry>, DbError> {
        let mut entries = Vec::new();
        for result in &self.entries {
            let (key, value) = result?;
            let id = EntryId::from_key(&key)?;
            let (record, _): (EntryRecord, usize) =
                bincode::decode_from_slice(&value, bincode::config::standard())?;
            entries.push(record.into_entry(id)?);
        }
        Ok(entries)
    }

    /// Get all unique tags in the database, sorted
    ///
    /// # Errors
    ///
    /// Returns `DbError` if database iteration fails.
    pub fn list_all_tags(&self) -> Result<Vec<String>, DbError> {
        let mut tag_vec = Vec::new();
        for result in &self.tags {
            let (key, _) = result?;
            let tag = String::from_utf8(key.to_vec())
                .map_err(|e| DbError::SerializeError(format!("Invalid UTF-8 in tag: {e}")))?;
            tag_vec.push(tag);
        }
        tag_vec.sort();
        Ok(tag_vec)
    }

    /// Get the number of entries in the database
    #[must_use]
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Check if an entry exists in the database
    ///
    /// # Errors
    ///
    /// Returns `DbError` if database operations fail.
    pub fn contains(&self, id: EntryId) -> Result<bool, DbError> {
        Ok(self.entries.contains_key(id.to_key())?)
    }

    /// Flush all pending writes to disk
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the flush operation fails.
    pub fn flush(&self) -> Result<(), DbError> {
        self.db.flush()?;
        Ok(())
    }

    /// Clear all entries and tags from the database
    ///
    /// # Warning
    /// This operation is irreversible! Backing files are not touched.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if clearing either tree fails.
    pub fn clear(&self) -> Result<(), DbError> {
        self.entries.clear()?;
        self.tags.clear()?;
        Ok(())
    }
}

impl Drop for Database {
    fn drop(&mut self) {
        // Errors can't be propagated from Drop; callers needing durability call flush().
        let _ = self.db.flush();
    }
}

fn decode_ids(bytes: &[u8]) -> Result<Vec<u64>, DbError> {
    let (ids, _): (Vec<u64>, usize) = bincode::decode_from_slice(bytes, bincode::config::standard())?;
    Ok(ids)
}

fn encode_ids(ids: &[u64]) -> Result<Vec<u8>, DbError> {
    Ok(bincode::encode_to_vec(ids, bincode::config::standard())?)
}

fn flatten_transaction_error(error: TransactionError<DbError>) -> DbError {
    match error {
        TransactionError::Abort(e) => e,
        TransactionError::Storage(e) => DbError::SledError(e),
    }
}
