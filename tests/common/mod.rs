//! Recording doubles for the editor and renderer seams

use journalz::EntryId;
use journalz::editor::DocumentEditor;
use journalz::ui::{DisplayMode, Renderer, View};
use std::cell::RefCell;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    pub path: PathBuf,
    pub line: usize,
    pub insert_mode: bool,
}

#[derive(Debug, Default)]
pub struct RecordingEditor {
    requests: RefCell<Vec<EditRequest>>,
}

impl RecordingEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<EditRequest> {
        self.requests.borrow().clone()
    }
}

impl DocumentEditor for RecordingEditor {
    fn open(&self, path: &Path, line: usize, insert_mode: bool) {
        self.requests.borrow_mut().push(EditRequest {
            path: path.to_path_buf(),
            line,
            insert_mode,
        });
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedView {
    pub mode: DisplayMode,
    pub entries: Vec<EntryId>,
    pub query_tags: Vec<String>,
}

#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub views: Vec<RecordedView>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

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
        });
        Ok(())
    }

    fn prompt(&mut self, _text: &str) -> io::Result<()> {
        Ok(())
    }

    fn notify(&mut self, _text: &str) -> io::Result<()> {
        Ok(())
    }
}
