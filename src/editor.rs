//! External editor hand-off
//!
//! The prompt loop only sees [`DocumentEditor`]; [`ProcessEditor`] spawns the
//! user's editor and blocks until it exits.

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

/// Editor used when neither the config nor `$EDITOR` names one
pub const DEFAULT_EDITOR: &str = "nvim";

/// Opens documents for editing
pub trait DocumentEditor {
    /// Open `path` with the cursor on the 1-based `line`
    ///
    /// Blocks until editing is finished. Failures are logged, not returned.
    fn open(&self, path: &Path, line: usize, insert_mode: bool);
}

impl<T: DocumentEditor + ?Sized> DocumentEditor for &T {
    fn open(&self, path: &Path, line: usize, insert_mode: bool) {
        (**self).open(path, line, insert_mode);
    }
}

/// Editor running as a child process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEditor {
    program: String,
    extra_args: Vec<String>,
}

impl ProcessEditor {
    /// Create from a command line such as `nvim` or `nvim --clean`
    #[must_use]
    pub fn new(command: &str) -> Self {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next().unwrap_or_else(|| DEFAULT_EDITOR.to_string());
        Self {
            program,
            extra_args: parts.collect(),
        }
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments passed to the editor for one document
    #[must_use]
    pub fn args(&self, path: &Path, line: usize, insert_mode: bool) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.extra_args.iter().map(OsString::from).collect();
        args.push(format!("+{}", line.max(1)).into());
        args.push(path.as_os_str().to_owned());
        if insert_mode {
            args.push("-c".into());
            args.push("startinsert".into());
        }
        args
    }
}

impl DocumentEditor for ProcessEditor {
    fn open(&self, path: &Path, line: usize, insert_mode: bool) {
        tracing::debug!(editor = %self.program, path = %path.display(), line, insert_mode, "opening editor");
        match Command::new(&self.program).args(self.args(path, line, insert_mode)).status() {
            Ok(status) if status.success() => {}
            Ok(status) => {
                tracing::warn!(editor = %self.program, code = ?status.code(), "editor exited with failure");
            }
            Err(e) => {
                tracing::warn!(editor = %self.program, error = %e, "failed to launch editor");
            }
        }
    }
}

/// A document handed to an editor
#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    pub path: std::path::PathBuf,
    pub line: usize,
    pub insert_mode: bool,
}

/// Editor that only records what it was asked to open
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingEditor {
    requests: std::cell::RefCell<Vec<EditRequest>>,
}

#[cfg(test)]
impl RecordingEditor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn requests(&self) -> Vec<EditRequest> {
        self.requests.borrow().clone()
    }
}

#[cfg(test)]
impl DocumentEditor for RecordingEditor {
    fn open(&self, path: &Path, line: usize, insert_mode: bool) {
        self.requests.borrow_mut().push(EditRequest {
            path: path.to_path_buf(),
            line,
            insert_mode,
        });
    }
}
