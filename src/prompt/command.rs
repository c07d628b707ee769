//! Parsing one input line into a command for the active screen

use crate::ui::DisplayMode;

/// A command typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `r [flags/tags]`
    Refine(Vec<String>),
    /// `n [flags/tags]`
    NewSearch(Vec<String>),
    /// `a [number]...`
    Add(Vec<String>),
    /// `d [number]...` on the results screen
    Delete(Vec<String>),
    /// `v`
    ViewMerge,
    /// `q`
    Quit,
    /// Anything else on the results screen, expected to be a result number
    Select(String),
    /// `m [name]...`, name tokens joined by single spaces
    Merge(String),
    /// `b`
    Back,
    /// `d [number]...` on the merge screen
    Remove(Vec<String>),
    /// Unrecognized command on the merge screen
    Unknown(String),
}

impl Command {
    /// Parse a line for `mode`
    ///
    /// The command letter is case-insensitive. Search arguments are
    /// lowercased; volume names keep their case.
    #[must_use]
    pub fn parse(line: &str, mode: DisplayMode) -> Self {
        let mut tokens = line.split_whitespace();
        let command = tokens.next().map(str::to_lowercase).unwrap_or_default();
        let args: Vec<&str> = tokens.collect();
        let lowered = || args.iter().map(|a| a.to_lowercase()).collect::<Vec<_>>();
        let owned = || args.iter().map(|a| (*a).to_string()).collect::<Vec<_>>();

        match mode {
            DisplayMode::Search => match command.as_str() {
                "r" => Self::Refine(lowered()),
                "n" => Self::NewSearch(lowered()),
                "a" => Self::Add(owned()),
                "d" => Self::Delete(owned()),
                "v" => Self::ViewMerge,
                "q" => Self::Quit,
                _ => Self::Select(line.trim().to_string()),
            },
            DisplayMode::Merge => match command.as_str() {
                "m" => Self::Merge(args.join(" ")),
                "b" => Self::Back,
                "d" => Self::Remove(owned()),
                "q" => Self::Quit,
                _ => Self::Unknown(command),
            },
        }
    }
}
