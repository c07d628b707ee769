//! Line-based file helpers for entry and volume documents
//!
//! Documents are plain text: a dated header block followed by the body. The
//! body of a document starts at the configured start line (1-based), which is
//! also where the editor places the cursor.

use crate::db::DbError;
use chrono::{DateTime, TimeZone};
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Width the header fields are right-aligned to
pub const LINE_WIDTH: usize = 80;

/// Lines shown per entry preview
pub const PREVIEW_LINES: usize = 7;

/// Read a whole file as lines, without line terminators
///
/// # Errors
///
/// Returns an `io::Error` if the file cannot be read or is not valid UTF-8.
pub fn read_lines(path: &Path) -> io::Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(content.lines().map(str::to_string).collect())
}

/// Create a new file holding `lines`, each newline-terminated
///
/// Missing parent directories are created. An existing file is never
/// overwritten.
///
/// # Errors
///
/// Returns an `io::Error` of kind `AlreadyExists` if the file exists, or any
/// error from creating directories or writing.
pub fn write_lines<S: AsRef<str>>(path: &Path, lines: &[S]) -> io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().write(true).create_new(true).open(path)?;
    let mut writer = BufWriter::new(file);
    for line in lines {
        writeln!(writer, "{}", line.as_ref())?;
    }
    writer.flush()
}

/// Lines from the 1-based `start_line` onward
///
/// A start line past the end yields an empty slice; `0` is treated as `1`.
#[must_use]
pub fn lines_from(lines: &[String], start_line: usize) -> &[String] {
    let start = start_line.saturating_sub(1);
    lines.get(start..).unwrap_or(&[])
}

/// At most `count` lines starting at the 1-based `start_line`
#[must_use]
pub fn preview_lines(lines: &[String], start_line: usize, count: usize) -> &[String] {
    let body = lines_from(lines, start_line);
    &body[..body.len().min(count)]
}

/// Header block of a new document
///
/// Weekday, date and time are right-aligned to [`LINE_WIDTH`]. Volumes pass
/// their name as `title`, which is added as a Markdown heading.
pub fn header_lines<Tz>(now: &DateTime<Tz>, title: Option<&str>) -> Vec<String>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let mut lines = vec![
        String::new(),
        format!("{:>LINE_WIDTH$}", now.format("%A").to_string()),
        format!("{:>LINE_WIDTH$}", now.format("%m/%d/%Y").to_string()),
        format!("{:>LINE_WIDTH$}", now.format("%H:%M").to_string()),
    ];
    if let Some(title) = title {
        lines.push(format!("# {title}"));
    }
    lines.extend([String::new(), "---".to_string(), String::new(), String::new()]);
    lines
}

/// File name of an entry created at `now`
pub fn entry_file_name<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    format!("Entry_{}.md", now.format("%Y-%m-%d_%H-%M-%S"))
}

/// Write a new document, then record it in the store
///
/// If `record` fails, the freshly written file is removed so no document is
/// left without its store record.
///
/// # Errors
///
/// Returns the write error, or the store error after rolling back the file.
pub fn write_then_record<S, T, E, F>(path: &Path, lines: &[S], record: F) -> Result<T, E>
where
    S: AsRef<str>,
    E: From<io::Error> + From<DbError>,
    F: FnOnce() -> Result<T, DbError>,
{
    write_lines(path, lines)?;
    match record() {
        Ok(value) => Ok(value),
        Err(e) => {
            if let Err(remove_err) = fs::remove_file(path) {
                tracing::warn!(path = %path.display(), error = %remove_err, "failed to roll back document");
            }
            Err(e.into())
        }
    }
}
