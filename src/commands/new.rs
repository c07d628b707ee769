//! New command - create a dated entry

use crate::config::JournalConfig;
use crate::db::{Database, NewEntry, is_valid_tag, normalize_tags};
use crate::document::{entry_file_name, header_lines, write_then_record};
use crate::editor::DocumentEditor;
use crate::{Entry, JournalError};
use chrono::{DateTime, Local, Utc};
use std::path::Path;

type Result<T> = std::result::Result<T, JournalError>;

/// Write a new entry document into `entry_dir` and record it
///
/// # Errors
/// Returns `JournalError::InvalidInput` for a tag outside `[a-z0-9-]`, an I/O
/// error if the document cannot be written (including when a document with
/// the same timestamp exists), or a database error if recording fails. A
/// failed record removes the written document again.
pub fn create_entry(db: &Database, entry_dir: &Path, tags: &[String], now: &DateTime<Local>) -> Result<Entry> {
    let tags = normalize_tags(tags);
    if let Some(bad) = tags.iter().find(|t| !is_valid_tag(t)) {
        return Err(JournalError::InvalidInput(format!(
            "Invalid tag '{bad}': only letters, numbers and dashes are allowed"
        )));
    }

    let name = entry_file_name(now);
    let path = entry_dir.join(&name);
    let lines = header_lines(now, None);
    let new_entry = NewEntry::new(name, &path, tags).created_at(now.with_timezone(&Utc));

    let entry = write_then_record::<_, _, JournalError, _>(&path, &lines, || db.insert_entry(&new_entry))?;
    tracing::debug!(id = %entry.id, path = %entry.file_path.display(), "created entry");
    Ok(entry)
}

/// Execute the new command
///
/// # Errors
/// Returns an error if the entry cannot be created.
pub fn execute<E: DocumentEditor>(
    db: &Database,
    config: &JournalConfig,
    tags: &[String],
    editor: &E,
    quiet: bool,
) -> Result<Entry> {
    let entry = create_entry(db, &config.entry_dir, tags, &Local::now())?;
    if !quiet {
        println!("Created new entry: {}", entry.file_path.display());
    }
    editor.open(&entry.file_path, config.start_line(), config.insert_on_new);
    Ok(entry)
}
