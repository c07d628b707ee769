//! Entry filtering operations used by search and refine
//!
//! The pipeline is always tag filter, then originals filter, then sort:
//!
//! ```ignore
//! use journalz::search::filter::EntryFilterExt;
//!
//! let results = candidates
//!     .into_iter()
//!     .filter_tags(&query.tags, query.mode)
//!     .originals_only(query.originals_only)
//!     .sorted_by_created(query.sort);
//! ```
//!
//! Every step keeps the relative order of the entries it does not drop.

use super::query::{Query, SearchMode, SortOrder};
use crate::Entry;

/// Keep the entries that match the query tags
///
/// # Arguments
/// * `entries` - Candidate entries
/// * `tags` - Normalized query tags
/// * `mode` - `Any` keeps entries carrying at least one tag, `All` keeps
///   entries carrying every tag
pub fn by_tags(
    entries: impl IntoIterator<Item = Entry>,
    tags: &[String],
    mode: SearchMode,
) -> Vec<Entry> {
    entries
        .into_iter()
        .filter(|entry| matches_tags(entry, tags, mode))
        .collect()
}

/// Check a single entry against the query tags
#[must_use]
pub fn matches_tags(entry: &Entry, tags: &[String], mode: SearchMode) -> bool {
    match mode {
        SearchMode::Any => tags.iter().any(|tag| entry.has_tag(tag)),
        SearchMode::All => {
            let mut remaining = tags.len();
            for tag in tags {
                if entry.has_tag(tag) {
                    remaining -= 1;
                }
            }
            remaining == 0
        }
    }
}

/// Drop volumes (entries with originals) when `enabled`
pub fn originals_only(entries: impl IntoIterator<Item = Entry>, enabled: bool) -> Vec<Entry> {
    entries
        .into_iter()
        .filter(|entry| !enabled || !entry.is_volume())
        .collect()
}

/// Sort by creation time; ties keep their input order
#[must_use]
pub fn sort_by_created(mut entries: Vec<Entry>, order: SortOrder) -> Vec<Entry> {
    match order {
        SortOrder::Unsorted => {}
        SortOrder::Ascending => entries.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortOrder::Descending => entries.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }
    entries
}

/// Run the full filter pipeline for a query
pub fn apply_query(entries: impl IntoIterator<Item = Entry>, query: &Query) -> Vec<Entry> {
    entries
        .filter_tags(&query.tags, query.mode)
        .originals_only(query.originals_only)
        .sorted_by_created(query.sort)
}

/// Extension trait for chaining the filter steps on entry collections
pub trait EntryFilterExt: IntoIterator<Item = Entry> + Sized {
    fn filter_tags(self, tags: &[String], mode: SearchMode) -> Vec<Entry> {
        by_tags(self, tags, mode)
    }

    fn originals_only(self, enabled: bool) -> Vec<Entry> {
        originals_only(self, enabled)
    }

    fn sorted_by_created(self, order: SortOrder) -> Vec<Entry> {
        sort_by_created(self.into_iter().collect(), order)
    }
}

impl<I> EntryFilterExt for I where I: IntoIterator<Item = Entry> {}
