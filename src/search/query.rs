//! Search queries and their modifier flags
//!
//! A [`Query`] is rebuilt from user input for every search or refine command.
//! Flags arrive as `-x` tokens and may be clustered (`-ia`); they are decoded
//! once into [`QueryFlags`] and then folded into typed modifiers.

use super::error::SearchError;
use crate::db::{is_valid_tag, normalize_tag};

/// How the query tags combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Entry must carry at least one query tag (OR)
    Any,
    /// Entry must carry every query tag (AND)
    #[default]
    All,
}

/// Ordering applied to search results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Keep the order the filter produced
    #[default]
    Unsorted,
    /// Earliest first
    Ascending,
    /// Latest first
    Descending,
}

/// Single-letter modifiers accepted by search commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Inclusive,
    FirstOnly,
    Ascending,
    Descending,
    OriginalsOnly,
}

impl Flag {
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'i' => Some(Self::Inclusive),
            'f' => Some(Self::FirstOnly),
            'a' => Some(Self::Ascending),
            'd' => Some(Self::Descending),
            'o' => Some(Self::OriginalsOnly),
            _ => None,
        }
    }
}

/// Raw flag set as typed by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct QueryFlags {
    pub inclusive: bool,
    pub first_only: bool,
    pub ascending: bool,
    pub descending: bool,
    pub originals_only: bool,
}

impl QueryFlags {
    pub const fn set(&mut self, flag: Flag) {
        match flag {
            Flag::Inclusive => self.inclusive = true,
            Flag::FirstOnly => self.first_only = true,
            Flag::Ascending => self.ascending = true,
            Flag::Descending => self.descending = true,
            Flag::OriginalsOnly => self.originals_only = true,
        }
    }

    /// Decode a flag token such as `-i` or `-ia`
    ///
    /// # Errors
    ///
    /// Returns `SearchError::UnknownFlag` carrying the whole token if any letter
    /// is not a recognized flag. `self` is left untouched in that case.
    pub fn apply_token(&mut self, token: &str) -> Result<(), SearchError> {
        let letters = token.strip_prefix('-').unwrap_or(token);
        if letters.is_empty() {
            return Err(SearchError::UnknownFlag(token.to_string()));
        }

        let mut decoded = *self;
        for c in letters.chars() {
            let flag = Flag::from_char(c).ok_or_else(|| SearchError::UnknownFlag(token.to_string()))?;
            decoded.set(flag);
        }
        *self = decoded;
        Ok(())
    }

    #[must_use]
    pub const fn mode(&self) -> SearchMode {
        if self.inclusive { SearchMode::Any } else { SearchMode::All }
    }

    /// # Errors
    ///
    /// Returns `SearchError::InvalidQuery` if both sort directions are set.
    pub fn sort_order(&self) -> Result<SortOrder, SearchError> {
        match (self.ascending, self.descending) {
            (true, true) => Err(SearchError::InvalidQuery(
                "cannot sort ascending and descending at the same time".to_string(),
            )),
            (true, false) => Ok(SortOrder::Ascending),
            (false, true) => Ok(SortOrder::Descending),
            (false, false) => Ok(SortOrder::Unsorted),
        }
    }
}

/// Search tags plus modifiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Normalized tags in the order given, without duplicates
    pub tags: Vec<String>,
    pub mode: SearchMode,
    pub sort: SortOrder,
    pub first_only: bool,
    pub originals_only: bool,
}

impl Query {
    /// Build a query from tags and already decoded flags
    ///
    /// # Errors
    ///
    /// Returns `SearchError::MissingTags` when no tag survives normalization,
    /// `SearchError::InvalidTag` for a tag outside `[a-z0-9-]` and
    /// `SearchError::InvalidQuery` for conflicting sort directions.
    pub fn new<S: AsRef<str>>(tags: &[S], flags: QueryFlags) -> Result<Self, SearchError> {
        let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
        for tag in tags {
            let tag = normalize_tag(tag.as_ref());
            if tag.is_empty() || normalized.contains(&tag) {
                continue;
            }
            normalized.push(tag);
        }

        if normalized.is_empty() {
            return Err(SearchError::MissingTags);
        }
        if let Some(bad) = normalized.iter().find(|t| !is_valid_tag(t)) {
            return Err(SearchError::InvalidTag(bad.clone()));
        }

        Ok(Self {
            tags: normalized,
            mode: flags.mode(),
            sort: flags.sort_order()?,
            first_only: flags.first_only,
            originals_only: flags.originals_only,
        })
    }

    /// Parse the argument tokens of a search command
    ///
    /// Tokens starting with `-` are flags, everything else is a tag.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::UnknownFlag` for an unrecognized flag token, plus
    /// every error of [`Query::new`].
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self, SearchError> {
        let mut flags = QueryFlags::default();
        let mut tags = Vec::new();
        for arg in args {
            let arg = arg.as_ref();
            if arg.starts_with('-') {
                flags.apply_token(arg)?;
            } else {
                tags.push(arg);
            }
        }
        Self::new(&tags, flags)
    }
}
