//! Presentation layer for the interactive prompt
//!
//! The prompt loop hands a [`View`] to a [`Renderer`] once per iteration and
//! never writes to the terminal itself.
//!
//! - [`terminal::TerminalRenderer`]: clears the screen and prints colored output
//! - `mock::RecordingRenderer` (unit tests only): keeps every view for inspection

#[cfg(test)]
pub mod mock;
pub mod terminal;

#[cfg(test)]
pub use mock::{RecordedView, RecordingRenderer};
pub use terminal::TerminalRenderer;

use crate::Entry;
use std::io;

/// Prompt text printed before reading a command
pub const PROMPT: &str = "Your decision: ";

/// Which screen the prompt is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Search results
    #[default]
    Search,
    /// Merge list staging
    Merge,
}

impl DisplayMode {
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Search => "SEARCH RESULTS",
            Self::Merge => "MERGE LIST",
        }
    }

    /// Option lines as (label, usage) pairs
    #[must_use]
    pub const fn options(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Search => &[
                ("[R]efine current search: ", "r -[opts] [tag]..."),
                ("[N]ew search: ", "n -[opts] [tag]..."),
                ("[A]dd entry to volume list: ", "a [number]..."),
                ("[D]elete entry permanently: ", "d [number]..."),
                ("[V]iew current volume list: ", "v"),
                ("[Q]uit: ", "q"),
                ("[#] Number of the file to open: ", "[number]"),
            ],
            Self::Merge => &[
                ("[M]erge entries from merge list to single volume: ", "m [name]..."),
                ("[D]elete entries from merge list: ", "d [number]..."),
                ("[B]ack to results: ", "b"),
                ("[Q]uit: ", "q"),
            ],
        }
    }
}

/// Everything one screen shows
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    pub mode: DisplayMode,
    pub entries: &'a [Entry],
    pub query_tags: &'a [String],
    pub message: Option<&'a str>,
}

/// Draws views and prompt text
pub trait Renderer {
    /// Draw a full screen
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` if writing to the output fails.
    fn render(&mut self, view: &View<'_>) -> io::Result<()>;

    /// Print the input prompt without a trailing newline
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` if writing to the output fails.
    fn prompt(&mut self, text: &str) -> io::Result<()>;

    /// Print a one-line notice outside of a screen
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` if writing to the output fails.
    fn notify(&mut self, text: &str) -> io::Result<()>;
}

impl<T: Renderer + ?Sized> Renderer for &mut T {
    fn render(&mut self, view: &View<'_>) -> io::Result<()> {
        (**self).render(view)
    }

    fn prompt(&mut self, text: &str) -> io::Result<()> {
        (**self).prompt(text)
    }

    fn notify(&mut self, text: &str) -> io::Result<()> {
        (**self).notify(text)
    }
}
