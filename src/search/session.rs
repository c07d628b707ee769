//! Search session state
//!
//! A [`SearchSession`] owns the current query, the result list and the merge
//! list. The result list always reflects the last search or refinement; the
//! merge list only changes through explicit add, remove and delete calls and
//! survives new searches.

use super::error::{REFINE_THRESHOLD, SearchError};
use super::filter::apply_query;
use super::query::Query;
use crate::Entry;
use crate::db::{Database, EntryId};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// What a search or refinement produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Number of results now in the session
    Found(usize),
    /// Nothing matched; the result list is now empty
    Empty,
    /// First-only query matched: open this file and finish
    OpenFirst(PathBuf),
}

/// Outcome of a command taking 1-based index arguments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexReport {
    /// Valid indices, 1-based, in argument order
    pub accepted: Vec<usize>,
    /// Tokens that were not a valid index
    pub rejected: Vec<String>,
}

impl IndexReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty() && self.rejected.is_empty()
    }
}

/// Parse a 1-based index token against a list length
///
/// # Returns
/// The 0-based position, or `None` for a non-numeric or out-of-range token
#[must_use]
pub fn parse_index(token: &str, len: usize) -> Option<usize> {
    match token.trim().parse::<usize>() {
        Ok(n) if (1..=len).contains(&n) => Some(n - 1),
        _ => None,
    }
}

fn validate_indices<S: AsRef<str>>(args: &[S], len: usize) -> IndexReport {
    let mut report = IndexReport::default();
    for arg in args {
        let arg = arg.as_ref();
        match parse_index(arg, len) {
            Some(pos) => report.accepted.push(pos + 1),
            None => report.rejected.push(arg.to_string()),
        }
    }
    report
}

/// Search state for one interactive run
pub struct SearchSession<'a> {
    db: &'a Database,
    query: Option<Query>,
    results: Vec<Entry>,
    merge_list: Vec<Entry>,
}

impl<'a> SearchSession<'a> {
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self {
            db,
            query: None,
            results: Vec::new(),
            merge_list: Vec::new(),
        }
    }

    #[must_use]
    pub const fn database(&self) -> &'a Database {
        self.db
    }

    #[must_use]
    pub const fn query(&self) -> Option<&Query> {
        self.query.as_ref()
    }

    /// Tags of the current query, empty before the first search
    #[must_use]
    pub fn query_tags(&self) -> &[String] {
        match &self.query {
            Some(query) => &query.tags,
            None => &[],
        }
    }

    #[must_use]
    pub fn results(&self) -> &[Entry] {
        &self.results
    }

    #[must_use]
    pub fn merge_list(&self) -> &[Entry] {
        &self.merge_list
    }

    /// Result at a 1-based position
    #[must_use]
    pub fn result(&self, index: usize) -> Option<&Entry> {
        index.checked_sub(1).and_then(|i| self.results.get(i))
    }

    #[must_use]
    pub fn can_refine(&self) -> bool {
        self.results.len() >= REFINE_THRESHOLD
    }

    /// Run a fresh search against the store, replacing results and query
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Database` if the store lookup fails; the session
    /// is unchanged in that case.
    pub fn run_search(&mut self, query: Query) -> Result<SearchOutcome, SearchError> {
        let candidates = self.db.find_by_any_tag(&query.tags)?;
        tracing::debug!(tags = ?query.tags, candidates = candidates.len(), "running search");
        Ok(self.replace_results(candidates, query))
    }

    /// Narrow the current results with a new query
    ///
    /// # Errors
    ///
    /// Returns `SearchError::RefineUnavailable` with fewer than five current
    /// results; nothing changes in that case.
    pub fn refine_search(&mut self, query: Query) -> Result<SearchOutcome, SearchError> {
        if !self.can_refine() {
            return Err(SearchError::RefineUnavailable);
        }
        let candidates = std::mem::take(&mut self.results);
        tracing::debug!(tags = ?query.tags, candidates = candidates.len(), "refining search");
        Ok(self.replace_results(candidates, query))
    }

    fn replace_results(&mut self, candidates: Vec<Entry>, query: Query) -> SearchOutcome {
        self.results = apply_query(candidates, &query);
        let first_only = query.first_only;
        self.query = Some(query);

        match self.results.first() {
            None => SearchOutcome::Empty,
            Some(first) if first_only => SearchOutcome::OpenFirst(first.file_path.clone()),
            Some(_) => SearchOutcome::Found(self.results.len()),
        }
    }

    /// Append results to the merge list by 1-based index
    ///
    /// Duplicates are allowed and argument order is kept. Invalid tokens are
    /// reported and skipped.
    pub fn add_to_merge<S: AsRef<str>>(&mut self, args: &[S]) -> IndexReport {
        let report = validate_indices(args, self.results.len());
        for &index in &report.accepted {
            self.merge_list.push(self.results[index - 1].clone());
        }
        report
    }

    /// Remove merge list positions by 1-based index
    ///
    /// Indices refer to the list as it was before the call; repeated indices
    /// remove a single entry.
    pub fn remove_from_merge<S: AsRef<str>>(&mut self, args: &[S]) -> IndexReport {
        let report = validate_indices(args, self.merge_list.len());
        let positions: BTreeSet<usize> = report.accepted.iter().map(|i| i - 1).collect();
        for pos in positions.into_iter().rev() {
            self.merge_list.remove(pos);
        }
        report
    }

    /// Permanently delete results by 1-based index
    ///
    /// Indices are resolved to entry ids up front, so the batch is unaffected
    /// by the list shrinking. Each deleted entry leaves both the result list
    /// and the merge list.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::DeleteFailed` on the first failed deletion,
    /// listing the positions deleted before it. Those entries stay deleted and
    /// out of the lists.
    pub fn delete_entries<S: AsRef<str>>(&mut self, args: &[S]) -> Result<IndexReport, SearchError> {
        let report = validate_indices(args, self.results.len());

        let mut targets: Vec<(EntryId, Vec<usize>)> = Vec::with_capacity(report.accepted.len());
        for &index in &report.accepted {
            let id = self.results[index - 1].id;
            match targets.iter_mut().find(|(target, _)| *target == id) {
                Some((_, positions)) => {
                    if !positions.contains(&index) {
                        positions.push(index);
                    }
                }
                None => targets.push((id, vec![index])),
            }
        }

        let mut deleted = Vec::new();
        for (id, positions) in targets {
            if let Err(source) = self.db.delete_entry(id) {
                return Err(SearchError::DeleteFailed { deleted, source });
            }
            self.results.retain(|e| e.id != id);
            self.merge_list.retain(|e| e.id != id);
            deleted.extend(positions);
            tracing::debug!(id = %id, "deleted entry");
        }
        Ok(report)
    }

    /// Drop every entry from the merge list
    pub fn clear_merge_list(&mut self) {
        self.merge_list.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbError;
    use crate::search::query::QueryFlags;
    use crate::testing::TestJournal;

    fn query(tags: &[&str]) -> Query {
        Query::new(tags, QueryFlags::default()).unwrap()
    }

    fn ids(entries: &[Entry]) -> Vec<EntryId> {
        entries.iter().map(|e| e.id).collect()
    }

    #[test]
    fn test_parse_index() {
        assert_eq!(parse_index("1", 3), Some(0));
        assert_eq!(parse_index("3", 3), Some(2));
        assert_eq!(parse_index("0", 3), None);
        assert_eq!(parse_index("4", 3), None);
        assert_eq!(parse_index("-1", 3), None);
        assert_eq!(parse_index("two", 3), None);
        assert_eq!(parse_index("1", 0), None);
    }

    #[test]
    fn test_run_search_exclusive_and_inclusive() {
        let journal = TestJournal::new();
        let a = journal.add_entry(&["work", "urgent"], 1, "a");
        let b = journal.add_entry(&["work"], 2, "b");
        let c = journal.add_entry(&["work", "urgent", "extra"], 3, "c");

        let mut session = SearchSession::new(journal.db());
        let outcome = session.run_search(query(&["work", "urgent"])).unwrap();
        assert_eq!(outcome, SearchOutcome::Found(2));
        assert_eq!(ids(session.results()), vec![a.id, c.id]);

        let flags = QueryFlags { inclusive: true, ..QueryFlags::default() };
        session.run_search(Query::new(&["work", "urgent"], flags).unwrap()).unwrap();
        assert_eq!(ids(session.results()), vec![a.id, b.id, c.id]);
        assert_eq!(session.query_tags(), ["work", "urgent"]);
    }

    #[test]
    fn test_run_search_empty() {
        let journal = TestJournal::new();
        journal.add_entry(&["work"], 1, "a");

        let mut session = SearchSession::new(journal.db());
        assert_eq!(session.run_search(query(&["missing"])).unwrap(), SearchOutcome::Empty);
        assert!(session.results().is_empty());
    }

    #[test]
    fn test_run_search_first_only() {
        let journal = TestJournal::new();
        let a = journal.add_entry(&["work"], 5, "a");
        journal.add_entry(&["work"], 1, "b");

        let mut session = SearchSession::new(journal.db());
        let flags = QueryFlags { first_only: true, ..QueryFlags::default() };
        let outcome = session.run_search(Query::new(&["work"], flags).unwrap()).unwrap();
        assert_eq!(outcome, SearchOutcome::OpenFirst(a.file_path));
    }

    #[test]
    fn test_refine_requires_five_results() {
        let journal = TestJournal::new();
        for hour in 0..3 {
            journal.add_entry(&["work"], hour, "x");
        }

        let mut session = SearchSession::new(journal.db());
        session.run_search(query(&["work"])).unwrap();
        let before = session.results().to_vec();

        let result = session.refine_search(query(&["urgent"]));
        assert!(matches!(result, Err(SearchError::RefineUnavailable)));
        assert_eq!(session.results(), before.as_slice());
        assert_eq!(session.query_tags(), ["work"]);
    }

    #[test]
    fn test_refine_narrows_current_results() {
        let journal = TestJournal::new();
        let mut urgent = Vec::new();
        for hour in 0..6 {
            let tags: &[&str] = if hour % 2 == 0 { &["work", "urgent"] } else { &["work"] };
            let entry = journal.add_entry(tags, hour, "x");
            if hour % 2 == 0 {
                urgent.push(entry.id);
            }
        }
        // Matches the refine tag but was never part of the results
        journal.add_entry(&["urgent"], 9, "outside");

        let mut session = SearchSession::new(journal.db());
        session.run_search(query(&["work"])).unwrap();
        assert!(session.can_refine());

        let outcome = session.refine_search(query(&["urgent"])).unwrap();
        assert_eq!(outcome, SearchOutcome::Found(3));
        assert_eq!(ids(session.results()), urgent);
    }

    #[test]
    fn test_add_to_merge_reports_invalid_indices() {
        let journal = TestJournal::new();
        let a = journal.add_entry(&["work"], 1, "a");
        let b = journal.add_entry(&["work"], 2, "b");

        let mut session = SearchSession::new(journal.db());
        session.run_search(query(&["work"])).unwrap();

        let report = session.add_to_merge(&["2", "x", "1", "7", "2"]);
        assert_eq!(report.accepted, vec![2, 1, 2]);
        assert_eq!(report.rejected, vec!["x", "7"]);
        assert_eq!(ids(session.merge_list()), vec![b.id, a.id, b.id]);
    }

    #[test]
    fn test_merge_list_survives_new_search() {
        let journal = TestJournal::new();
        let a = journal.add_entry(&["work"], 1, "a");
        journal.add_entry(&["home"], 2, "b");

        let mut session = SearchSession::new(journal.db());
        session.run_search(query(&["work"])).unwrap();
        session.add_to_merge(&["1"]);
        session.run_search(query(&["home"])).unwrap();

        assert_eq!(ids(session.merge_list()), vec![a.id]);
    }

    #[test]
    fn test_remove_from_merge_uses_original_positions() {
        let journal = TestJournal::new();
        let entries: Vec<_> = (0..4).map(|h| journal.add_entry(&["work"], h, "x")).collect();

        let mut session = SearchSession::new(journal.db());
        session.run_search(query(&["work"])).unwrap();
        session.add_to_merge(&["1", "2", "3", "4"]);

        let report = session.remove_from_merge(&["2", "3", "3", "9"]);
        assert_eq!(report.rejected, vec!["9"]);
        assert_eq!(ids(session.merge_list()), vec![entries[0].id, entries[3].id]);
    }

    #[test]
    fn test_delete_entries_by_stable_id() {
        let journal = TestJournal::new();
        let entries: Vec<_> = (0..4).map(|h| journal.add_entry(&["work"], h, "x")).collect();

        let mut session = SearchSession::new(journal.db());
        session.run_search(query(&["work"])).unwrap();
        session.add_to_merge(&["2", "4"]);

        let report = session.delete_entries(&["2", "3", "2"]).unwrap();
        assert_eq!(report.accepted, vec![2, 3, 2]);

        assert_eq!(ids(session.results()), vec![entries[0].id, entries[3].id]);
        assert_eq!(ids(session.merge_list()), vec![entries[3].id]);
        assert!(!journal.db().contains(entries[1].id).unwrap());
        assert!(!journal.db().contains(entries[2].id).unwrap());
        assert!(!entries[1].file_path.exists());

        session.run_search(query(&["work"])).unwrap();
        assert_eq!(ids(session.results()), vec![entries[0].id, entries[3].id]);
    }

    #[test]
    fn test_delete_entries_reports_positions_before_failure() {
        let journal = TestJournal::new();
        let entries: Vec<_> = (0..3).map(|h| journal.add_entry(&["work"], h, "x")).collect();
        journal.block_removal(&entries[1]);

        let mut session = SearchSession::new(journal.db());
        session.run_search(query(&["work"])).unwrap();
        session.add_to_merge(&["1", "2"]);

        let result = session.delete_entries(&["1", "1", "2", "3"]);
        match result {
            Err(SearchError::DeleteFailed { deleted, source }) => {
                assert_eq!(deleted, vec![1]);
                assert!(matches!(source, DbError::FileRemoval { .. }));
            }
            other => panic!("expected DeleteFailed, got {other:?}"),
        }

        assert_eq!(ids(session.results()), vec![entries[1].id, entries[2].id]);
        assert_eq!(ids(session.merge_list()), vec![entries[1].id]);
        assert!(!journal.db().contains(entries[0].id).unwrap());
        assert!(journal.db().contains(entries[1].id).unwrap());
        assert!(journal.db().contains(entries[2].id).unwrap());
    }

    #[test]
    fn test_delete_entries_invalid_index_changes_nothing() {
        let journal = TestJournal::new();
        journal.add_entry(&["work"], 1, "a");

        let mut session = SearchSession::new(journal.db());
        session.run_search(query(&["work"])).unwrap();

        let report = session.delete_entries(&["5"]).unwrap();
        assert!(report.accepted.is_empty());
        assert_eq!(session.results().len(), 1);
        assert_eq!(journal.db().count(), 1);
    }
}
