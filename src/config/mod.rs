//! Configuration module for journalz
//!
//! Manages where entries, volumes and the database live, plus editor
//! behavior. Configuration is stored in the user's config directory
//! (`~/.config/journalz/config.toml` on Linux) unless `--config` names
//! another file.

pub mod setup;

pub use setup::first_time_setup;

use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Line the cursor starts on in new documents and where bodies begin
pub const DEFAULT_START_LINE: usize = 8;

const fn default_true() -> bool {
    true
}

const fn default_start_line() -> usize {
    DEFAULT_START_LINE
}

/// Default journal directory: `<documents>/JournalZ`
#[must_use]
pub fn default_entry_dir() -> PathBuf {
    dirs::document_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("JournalZ")
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct JournalConfig {
    /// Directory holding entry documents
    #[serde(default = "default_entry_dir")]
    pub entry_dir: PathBuf,

    /// Directory holding volumes; `<entry_dir>/Volumes` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_dir: Option<PathBuf>,

    /// Database location; `<entry_dir>/metadata.db` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,

    /// Open new entries in insert mode
    #[serde(default = "default_true")]
    pub insert_on_new: bool,

    /// 1-based line where document bodies begin
    #[serde(default = "default_start_line")]
    pub start_line: usize,

    /// Editor command; `$EDITOR` and then `nvim` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            entry_dir: default_entry_dir(),
            volume_dir: None,
            database: None,
            insert_on_new: true,
            start_line: DEFAULT_START_LINE,
            editor: None,
            quiet: false,
        }
    }
}

impl JournalConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;
        Ok(config_dir.join("journalz").join("config.toml"))
    }

    /// Load configuration from the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a TOML file; missing keys take defaults
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?;
        settings.try_deserialize()
    }

    /// Save configuration to the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the path cannot be determined or writing fails.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration as TOML, creating parent directories
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Load configuration, running first-time setup if none exists
    ///
    /// With an explicit `path`, a missing file yields the defaults instead of
    /// prompting. Setup is also skipped when stdin is not a terminal.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if loading or creating the configuration fails.
    pub fn load_or_setup(path: Option<&Path>) -> Result<Self, ConfigError> {
        use std::io::IsTerminal;

        if let Some(path) = path {
            return if path.exists() { Self::load_from(path) } else { Ok(Self::default()) };
        }

        let config_path = Self::config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else if std::io::stdin().is_terminal() {
            first_time_setup()
        } else {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    #[must_use]
    pub fn volume_dir(&self) -> PathBuf {
        self.volume_dir
            .clone()
            .unwrap_or_else(|| self.entry_dir.join("Volumes"))
    }

    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.database
            .clone()
            .unwrap_or_else(|| self.entry_dir.join("metadata.db"))
    }

    /// Start line, never below 1
    #[must_use]
    pub fn start_line(&self) -> usize {
        self.start_line.max(1)
    }

    /// Editor command from the config, then `$EDITOR`, then `nvim`
    #[must_use]
    pub fn editor_command(&self) -> String {
        self.editor
            .clone()
            .filter(|e| !e.trim().is_empty())
            .or_else(|| std::env::var("EDITOR").ok().filter(|e| !e.trim().is_empty()))
            .unwrap_or_else(|| crate::editor::DEFAULT_EDITOR.to_string())
    }

    /// Create the entry and volume directories
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` if a directory cannot be created.
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.entry_dir)?;
        fs::create_dir_all(self.volume_dir())
    }
}
