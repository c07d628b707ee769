//! Recording renderer for testing
//!
//! Keeps an owned copy of every view so tests can assert on what the prompt
//! loop showed without a terminal.

use super::{DisplayMode, Renderer, View};
use crate::db::EntryId;
use std::io;

/// Owned snapshot of a rendered [`View`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedView {
    pub mode: DisplayMode,
    pub entries: Vec<EntryId>,
    pub query_tags: Vec<String>,
    pub message: Option<String>,
}

/// Renderer that records instead of drawing
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub views: Vec<RecordedView>,
    pub prompts: Vec<String>,
    pub notices: Vec<String>,
}

impl RecordingRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn last_view(&self) -> Option<&RecordedView> {
        self.views.last()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, view: &View<'_>) -> io::Result<()> {
        self.views.push(RecordedView {
            mode: view.mode,
            entries: view.entries.iter().map(|e| e.id).collect(),
            query_tags: view.query_tags.to_vec(),
            message: view.message.map(str::to_string),
        });
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> io::Result<()> {
        self.prompts.push(text.to_string());
        Ok(())
    }

    fn notify(&mut self, text: &str) -> io::Result<()> {
        self.notices.push(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_views_and_prompts() {
        let mut renderer = RecordingRenderer::new();
        let tags = vec!["work".to_string()];
        renderer
            .render(&View {
                mode: DisplayMode::Merge,
                entries: &[],
                query_tags: &tags,
                message: Some("Merge list updated"),
            })
            .unwrap();
        renderer.prompt("Your decision: ").unwrap();
        renderer.notify("done").unwrap();

        let view = renderer.last_view().unwrap();
        assert_eq!(view.mode, DisplayMode::Merge);
        assert_eq!(view.query_tags, vec!["work"]);
        assert_eq!(view.message.as_deref(), Some("Merge list updated"));
        assert_eq!(renderer.prompts, vec!["Your decision: "]);
        assert_eq!(renderer.notices, vec!["done"]);
    }
}
