//! Interactive setup wizard for first-time configuration
//!
//! This module handles the interactive prompts for creating an initial
//! configuration when journalz is run for the first time.

use super::{JournalConfig, default_entry_dir};
use config::ConfigError;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};
use std::path::PathBuf;

/// Interactive first-time setup - prompts for the journal location
///
/// 1. Prompts for the journal directory (default: `<documents>/JournalZ`)
/// 2. Asks whether new entries should open in insert mode
/// 3. Saves the configuration to the default location
///
/// # Errors
///
/// Returns `ConfigError` if user input cannot be read or the configuration
/// cannot be saved.
pub fn first_time_setup() -> Result<JournalConfig, ConfigError> {
    println!("Welcome to journalz! Let's set up your journal.\n");

    let entry_dir: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Journal directory")
        .default(default_entry_dir().to_string_lossy().to_string())
        .interact_text()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;

    let insert_on_new = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Open new entries in insert mode?")
        .default(true)
        .interact()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;

    let config = config_from_answers(&entry_dir, insert_on_new);
    config.save()?;

    println!("\nConfiguration saved successfully!");
    Ok(config)
}

/// Build the configuration from the setup answers
///
/// A blank directory answer falls back to the default journal directory.
fn config_from_answers(entry_dir: &str, insert_on_new: bool) -> JournalConfig {
    let entry_dir = entry_dir.trim();
    let entry_dir = if entry_dir.is_empty() {
        default_entry_dir()
    } else {
        PathBuf::from(entry_dir)
    };
    JournalConfig {
        entry_dir,
        insert_on_new,
        ..JournalConfig::default()
    }
}
