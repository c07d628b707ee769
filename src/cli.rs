//! Command-line interface definitions and parsing
//!
//! This module defines the CLI structure for journalz using the `clap` crate.
//!
//! # Commands
//!
//! - **new**: Create a dated entry and open it in the editor
//! - **find**: Search entries by tag and enter the interactive prompt
//! - **tags**: List every tag with its entry count
//!
//! # Examples
//!
//! ```
//! use journalz::cli::{Cli, Commands};
//! use clap::Parser;
//!
//! let cli = Cli::parse_from(["journalz", "find", "work", "-i"]);
//! assert!(matches!(cli.command, Commands::Find { .. }));
//! ```

use crate::search::QueryFlags;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "journalz", version, about = "A tag-based journal in your terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Suppress informational output
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Use this config file instead of the default one
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log more (repeat for more detail)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Create a new entry
    New {
        /// Tags for the new entry
        #[arg(value_name = "TAGS")]
        tags: Vec<String>,
    },

    /// Find entries by tags
    #[command(visible_alias = "f")]
    Find {
        /// Tags to search for
        #[arg(value_name = "TAGS", required = true, num_args = 1..)]
        tags: Vec<String>,

        /// Show entries including ANY of the provided tags
        #[arg(short = 'i', long = "inclusive")]
        inclusive: bool,

        /// Open only the first entry to match the provided tags
        #[arg(short = 'f', long = "first")]
        first: bool,

        /// Sort by date/time in ascending order
        #[arg(short = 'a', long = "ascending", conflicts_with = "descending")]
        ascending: bool,

        /// Sort by date/time in descending order
        #[arg(short = 'd', long = "descending")]
        descending: bool,

        /// Show only original entries (exclude volumes)
        #[arg(short = 'o', long = "originals-only")]
        originals_only: bool,
    },

    /// List all tags with their entry counts
    Tags,
}

impl Commands {
    /// Modifier flags of a `find` command
    #[must_use]
    pub const fn get_query_flags(&self) -> Option<QueryFlags> {
        match self {
            Self::Find {
                inclusive,
                first,
                ascending,
                descending,
                originals_only,
                ..
            } => Some(QueryFlags {
                inclusive: *inclusive,
                first_only: *first,
                ascending: *ascending,
                descending: *descending,
                originals_only: *originals_only,
            }),
            _ => None,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
