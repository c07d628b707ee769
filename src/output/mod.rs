//! Output formatting for CLI display
//!
//! This module provides utilities for formatting entries, dates and tags in
//! the CLI and the interactive prompt.

use crate::Entry;
use chrono::{DateTime, Local, Utc};
use colored::Colorize;

/// Width of section titles and separators
pub const SCREEN_WIDTH: usize = 80;

/// Column section titles are centered on
const TITLE_CENTER: usize = 20;

/// Creation date as shown next to an entry, in local time
#[must_use]
pub fn format_date(created_at: &DateTime<Utc>) -> String {
    created_at.with_timezone(&Local).format("%m-%d-%Y").to_string()
}

/// Numbered entry line: `3) Entry_2024-01-01_08-00-00.md | Created: 01-01-2024`
#[must_use]
pub fn entry_line(position: usize, entry: &Entry) -> String {
    format!(
        "{} {} | Created: {}",
        format!("{position})").bold().blue(),
        entry.name,
        format_date(&entry.created_at)
    )
}

/// Full-width title bar, e.g. `=================OPTIONS=====...`
#[must_use]
pub fn section_title(title: &str, symbol: char) -> String {
    let len = title.chars().count();
    let start = TITLE_CENTER.saturating_sub(len.div_ceil(2));
    let end = start + len;

    let mut bar = String::with_capacity(SCREEN_WIDTH.max(end));
    bar.extend(std::iter::repeat_n(symbol, start));
    bar.push_str(title);
    bar.extend(std::iter::repeat_n(symbol, SCREEN_WIDTH.saturating_sub(end)));
    bar
}

/// Separator line between entries
#[must_use]
pub fn separator() -> String {
    "=".repeat(SCREEN_WIDTH)
}

/// Format a tag with usage count
#[must_use]
pub fn tag_with_count(tag: &str, count: usize, quiet: bool) -> String {
    if quiet {
        tag.to_string()
    } else {
        format!("  {tag} (used by {count} entr{})", if count == 1 { "y" } else { "ies" })
    }
}
