//! Terminal renderer using colored output

use super::{DisplayMode, Renderer, View};
use crate::document::{PREVIEW_LINES, preview_lines, read_lines};
use crate::output::{entry_line, section_title, separator};
use colored::Colorize;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use std::fmt::Write as _;
use std::io::{self, Write};

/// Entries past this position are listed without a preview
pub const PREVIEW_LIMIT: usize = 10;

/// Renders screens to a writer, stdout by default
pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    start_line: usize,
    clear_screen: bool,
}

impl TerminalRenderer {
    /// Renderer for stdout that clears the screen before every view
    #[must_use]
    pub fn stdout(start_line: usize) -> Self {
        Self::new(io::stdout(), start_line, true)
    }
}

impl<W: Write> TerminalRenderer<W> {
    #[must_use]
    pub const fn new(out: W, start_line: usize, clear_screen: bool) -> Self {
        Self {
            out,
            start_line,
            clear_screen,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Build the full text of a screen
    #[must_use]
    pub fn compose(&self, view: &View<'_>) -> String {
        let mut screen = String::new();

        if view.mode == DisplayMode::Search {
            let _ = writeln!(screen, "{} {}", "SEARCH TAGS =".green(), view.query_tags.join(","));
        }
        screen.push('\n');
        let _ = writeln!(screen, "{}", section_title(view.mode.title(), '=').blue());

        for (i, entry) in view.entries.iter().enumerate() {
            let _ = writeln!(screen, "{}", entry_line(i + 1, entry));
            if i < PREVIEW_LIMIT {
                self.write_preview(&mut screen, &entry.file_path);
            }
            if i + 1 < view.entries.len() {
                let _ = writeln!(screen, "{}", separator().yellow());
            }
        }

        let _ = writeln!(screen, "{}", section_title("OPTIONS", '=').bright_magenta());
        for (label, usage) in view.mode.options() {
            let _ = writeln!(screen, "{}{usage}", label.magenta());
        }

        if let Some(message) = view.message {
            let _ = writeln!(screen, "{}", section_title("INFO", '#').red());
            let _ = writeln!(screen, "{}", message.red());
        }
        screen
    }

    fn write_preview(&self, screen: &mut String, path: &std::path::Path) {
        match read_lines(path) {
            Ok(lines) => {
                let preview = preview_lines(&lines, self.start_line, PREVIEW_LINES);
                if preview.is_empty() {
                    let _ = writeln!(screen, "\tNo text available for preview");
                }
                for line in preview {
                    let _ = writeln!(screen, "\t{}", line.green());
                }
            }
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "preview unavailable");
                let _ = writeln!(screen, "\t{}", format!("Error reading body of entry at {}", path.display()).red());
            }
        }
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, view: &View<'_>) -> io::Result<()> {
        let screen = self.compose(view);
        if self.clear_screen {
            execute!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        self.out.write_all(screen.as_bytes())?;
        self.out.flush()
    }

    fn prompt(&mut self, text: &str) -> io::Result<()> {
        write!(self.out, "{text}")?;
        self.out.flush()
    }

    fn notify(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestJournal;

    #[test]
    fn test_compose_search_screen() {
        let journal = TestJournal::new();
        let entry = journal.add_entry(&["work"], 9, "today I wrote tests");
        let entries = vec![entry];
        let tags = vec!["work".to_string(), "urgent".to_string()];

        let renderer = TerminalRenderer::new(Vec::new(), 8, false);
        let screen = renderer.compose(&View {
            mode: DisplayMode::Search,
            entries: &entries,
            query_tags: &tags,
            message: Some("No results found"),
        });

        assert!(screen.contains("work,urgent"));
        assert!(screen.contains("SEARCH RESULTS"));
        assert!(screen.contains(&entries[0].name));
        assert!(screen.contains("today I wrote tests"));
        assert!(screen.contains("[R]efine current search: "));
        assert!(screen.contains("INFO"));
        assert!(screen.contains("No results found"));
        assert!(!screen.contains("MERGE LIST"));
    }

    #[test]
    fn test_compose_merge_screen_without_message() {
        let renderer = TerminalRenderer::new(Vec::new(), 8, false);
        let screen = renderer.compose(&View {
            mode: DisplayMode::Merge,
            entries: &[],
            query_tags: &[],
            message: None,
        });

        assert!(screen.contains("MERGE LIST"));
        assert!(screen.contains("[M]erge entries from merge list to single volume: "));
        assert!(!screen.contains("SEARCH TAGS"));
        assert!(!screen.contains("INFO"));
    }

    #[test]
    fn test_preview_of_missing_file() {
        let journal = TestJournal::new();
        let entry = journal.add_entry(&["work"], 9, "gone");
        std::fs::remove_file(&entry.file_path).unwrap();
        let entries = vec![entry];

        let renderer = TerminalRenderer::new(Vec::new(), 8, false);
        let screen = renderer.compose(&View {
            mode: DisplayMode::Search,
            entries: &entries,
            query_tags: &[],
            message: None,
        });
        assert!(screen.contains("Error reading body of entry"));
    }

    #[test]
    fn test_previews_stop_after_limit() {
        let journal = TestJournal::new();
        let entries: Vec<_> = (0..12)
            .map(|h| journal.add_entry(&["work"], h, &format!("body-{h}")))
            .collect();

        let renderer = TerminalRenderer::new(Vec::new(), 8, false);
        let screen = renderer.compose(&View {
            mode: DisplayMode::Search,
            entries: &entries,
            query_tags: &[],
            message: None,
        });
        assert!(screen.contains("body-9"));
        assert!(!screen.contains("body-10"));
        assert!(!screen.contains("body-11"));
    }

    #[test]
    fn test_render_writes_screen_and_prompt() {
        let mut renderer = TerminalRenderer::new(Vec::new(), 8, false);
        renderer
            .render(&View {
                mode: DisplayMode::Merge,
                entries: &[],
                query_tags: &[],
                message: None,
            })
            .unwrap();
        renderer.prompt(crate::ui::PROMPT).unwrap();

        let written = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(written.contains("MERGE LIST"));
        assert!(written.ends_with("Your decision: "));
    }
}
