//! Tag search over journal entries
//!
//! - [`query`]: typed queries decoded from user tokens
//! - [`filter`]: the tag filter, originals filter and result sorter
//! - [`session`]: the stateful search session driven by the prompt

pub mod error;
pub mod filter;
pub mod query;
pub mod session;

pub use error::{REFINE_THRESHOLD, SearchError};
pub use query::{Flag, Query, QueryFlags, SearchMode, SortOrder};
pub use session::{IndexReport, SearchOutcome, SearchSession, parse_index};
