//! Interactive prompt loop
//!
//! Each iteration renders the active screen, reads one line and applies it
//! as a [`Command`] to the [`SearchSession`]. The loop ends on `q`, at end of
//! input, or after a hand-off to the editor that finishes the session
//! (first-only searches and newly merged volumes).
//!
//! Commands that fail leave the session as it was and explain why in the
//! info message; the loop keeps going.

pub mod command;

pub use command::Command;

use crate::editor::DocumentEditor;
use crate::search::{IndexReport, Query, SearchError, SearchOutcome, SearchSession, parse_index};
use crate::ui::{DisplayMode, PROMPT, Renderer, View};
use crate::volume::{VolumeBuilder, VolumeError};
use std::io::{self, BufRead};

pub const NO_RESULTS: &str = "No results found";
pub const INVALID_SELECTION: &str = "Invalid selection. Please enter a valid option.";
pub const INVALID_COMMAND: &str = "Invalid command";
pub const EMPTY_MERGE_LIST: &str = "Add something to your volume list first...";
pub const MERGE_LIST_UPDATED: &str = "Merge list updated";

/// Whether the loop goes on after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Continue,
    Exit,
}

/// The read-eval loop over a search session
pub struct PromptLoop<'a, E, R> {
    session: SearchSession<'a>,
    volumes: VolumeBuilder<'a>,
    editor: E,
    renderer: R,
    mode: DisplayMode,
    message: Option<String>,
}

impl<'a, E: DocumentEditor, R: Renderer> PromptLoop<'a, E, R> {
    #[must_use]
    pub const fn new(session: SearchSession<'a>, volumes: VolumeBuilder<'a>, editor: E, renderer: R) -> Self {
        Self {
            session,
            volumes,
            editor,
            renderer,
            mode: DisplayMode::Search,
            message: None,
        }
    }

    /// Start with an info message already showing
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub const fn mode(&self) -> DisplayMode {
        self.mode
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[must_use]
    pub const fn session(&self) -> &SearchSession<'a> {
        &self.session
    }

    #[must_use]
    pub const fn editor(&self) -> &E {
        &self.editor
    }

    #[must_use]
    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Run until quit, end of input or a finishing editor hand-off
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` if reading input or rendering fails. Input that
    /// is not valid UTF-8 is not an error.
    pub fn run<B: BufRead>(&mut self, mut input: B) -> io::Result<()> {
        loop {
            self.render()?;
            self.renderer.prompt(PROMPT)?;

            let mut buf = Vec::new();
            if input.read_until(b'\n', &mut buf)? == 0 {
                tracing::debug!("end of input");
                return Ok(());
            }
            // Undecodable bytes become U+FFFD and fail as an ordinary bad command
            let line = String::from_utf8_lossy(&buf);
            if self.step(&line)? == Transition::Exit {
                return Ok(());
            }
        }
    }

    /// Draw the active screen
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` if the renderer fails.
    pub fn render(&mut self) -> io::Result<()> {
        let entries = match self.mode {
            DisplayMode::Search => self.session.results(),
            DisplayMode::Merge => self.session.merge_list(),
        };
        let view = View {
            mode: self.mode,
            entries,
            query_tags: self.session.query_tags(),
            message: self.message.as_deref(),
        };
        self.renderer.render(&view)
    }

    /// Apply one input line
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` only if the renderer fails to print a notice.
    pub fn step(&mut self, line: &str) -> io::Result<Transition> {
        self.message = None;
        let command = Command::parse(line, self.mode);
        tracing::debug!(?command, mode = ?self.mode, "prompt command");

        let transition = match command {
            Command::Refine(args) => self.search(&args, true),
            Command::NewSearch(args) => self.search(&args, false),
            Command::Add(args) => {
                self.add(&args);
                Transition::Continue
            }
            Command::Delete(args) => {
                self.delete(&args);
                Transition::Continue
            }
            Command::ViewMerge => {
                if self.session.merge_list().is_empty() {
                    self.message = Some(EMPTY_MERGE_LIST.to_string());
                } else {
                    self.mode = DisplayMode::Merge;
                }
                Transition::Continue
            }
            Command::Select(token) => {
                match parse_index(&token, self.session.results().len()) {
                    Some(pos) => {
                        let path = self.session.results()[pos].file_path.clone();
                        self.editor.open(&path, self.volumes.start_line(), false);
                    }
                    None => self.message = Some(INVALID_SELECTION.to_string()),
                }
                Transition::Continue
            }
            Command::Merge(name) => return self.merge(&name),
            Command::Back => {
                self.mode = DisplayMode::Search;
                Transition::Continue
            }
            Command::Remove(args) => {
                self.remove(&args);
                Transition::Continue
            }
            Command::Quit => Transition::Exit,
            Command::Unknown(_) => {
                self.message = Some(INVALID_COMMAND.to_string());
                Transition::Continue
            }
        };
        Ok(transition)
    }

    fn search(&mut self, args: &[String], refine: bool) -> Transition {
        if refine && !self.session.can_refine() {
            self.message = Some(SearchError::RefineUnavailable.to_string());
            return Transition::Continue;
        }
        let query = match Query::parse(args) {
            Ok(query) => query,
            Err(e) => {
                self.message = Some(e.to_string());
                return Transition::Continue;
            }
        };

        let outcome = if refine {
            self.session.refine_search(query)
        } else {
            self.session.run_search(query)
        };

        match outcome {
            Ok(SearchOutcome::Found(_)) => {}
            Ok(SearchOutcome::Empty) => self.message = Some(NO_RESULTS.to_string()),
            Ok(SearchOutcome::OpenFirst(path)) => {
                self.editor.open(&path, self.volumes.start_line(), false);
                return Transition::Exit;
            }
            Err(e) => {
                if !e.is_user_error() {
                    tracing::warn!(error = %e, "search failed");
                }
                self.message = Some(e.to_string());
            }
        }
        Transition::Continue
    }

    fn add(&mut self, args: &[String]) {
        if args.is_empty() || self.session.results().is_empty() {
            self.message = Some("Select one or more results to add: a [number]...".to_string());
            return;
        }
        let report = self.session.add_to_merge(args);
        self.message = Some(describe(&report, "added to volume list"));
    }

    fn delete(&mut self, args: &[String]) {
        if args.is_empty() || self.session.results().is_empty() {
            self.message = Some("Select one or more results to delete: d [number]...".to_string());
            return;
        }
        match self.session.delete_entries(args) {
            Ok(report) => self.message = Some(describe(&report, "deleted")),
            Err(SearchError::DeleteFailed { deleted, source }) => {
                tracing::warn!(error = %source, "delete failed");
                let failure = format!("Error deleting entry: {source}");
                self.message = Some(if deleted.is_empty() {
                    failure
                } else {
                    let done = IndexReport { accepted: deleted, rejected: Vec::new() };
                    format!("{}. {failure}", describe(&done, "deleted"))
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "delete failed");
                self.message = Some(format!("Error deleting entry: {e}"));
            }
        }
    }

    fn remove(&mut self, args: &[String]) {
        if args.is_empty() || self.session.merge_list().is_empty() {
            self.message = Some("Select one or more merge list entries to remove: d [number]...".to_string());
            return;
        }
        let report = self.session.remove_from_merge(args);
        self.message = Some(if report.rejected.is_empty() {
            MERGE_LIST_UPDATED.to_string()
        } else {
            describe(&report, "removed from merge list")
        });
    }

    fn merge(&mut self, name: &str) -> io::Result<Transition> {
        match self.volumes.build(name, self.session.merge_list()) {
            Ok(volume) => {
                self.renderer
                    .notify(&format!("Volume created: {}", volume.file_path.display()))?;
                self.editor.open(&volume.file_path, self.volumes.start_line(), false);
                self.session.clear_merge_list();
                Ok(Transition::Exit)
            }
            Err(e) => {
                if matches!(e, VolumeError::Io(_) | VolumeError::Database(_)) {
                    tracing::warn!(error = %e, "volume creation failed");
                }
                self.message = Some(e.to_string());
                Ok(Transition::Continue)
            }
        }
    }
}

/// Info message for a batch of index arguments
fn describe(report: &IndexReport, action: &str) -> String {
    let mut parts = Vec::new();
    if !report.accepted.is_empty() {
        let accepted: Vec<String> = report.accepted.iter().map(ToString::to_string).collect();
        parts.push(format!("{} {action}", accepted.join(", ")));
    }
    if !report.rejected.is_empty() {
        parts.push(format!("Invalid selection: {}", report.rejected.join(", ")));
    }
    parts.join(". ")
}
