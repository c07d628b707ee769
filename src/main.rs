//! Journalz CLI application entry point
//!
//! # Usage
//!
//! ```bash
//! # Write a new entry tagged "work" and "ideas"
//! journalz new work ideas
//!
//! # Find entries carrying both tags, newest first
//! journalz find work ideas -d
//!
//! # Find entries carrying either tag, skipping volumes
//! journalz find work ideas -i -o
//!
//! # List tags
//! journalz tags
//! ```
//!
//! # Configuration
//!
//! On first run, journalz will prompt for initial setup. Configuration is stored in
//! the user's config directory (`~/.config/journalz/config.toml` on Linux).

use journalz::{
    JournalError,
    cli::{Cli, Commands},
    commands,
    config::JournalConfig,
    db::Database,
    editor::ProcessEditor,
    ui::TerminalRenderer,
};
use std::io;
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, JournalError>;

/// Diagnostics go to stderr; `RUST_LOG` wins over `-v`
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: Cli) -> Result<()> {
    let config = JournalConfig::load_or_setup(cli.config.as_deref())?;
    let quiet = cli.quiet || config.quiet;

    config.ensure_directories()?;
    let db = Database::open(config.database_path())?;
    tracing::debug!(
        entry_dir = %config.entry_dir.display(),
        database = %config.database_path().display(),
        entries = db.count(),
        "opened journal"
    );

    let editor = ProcessEditor::new(&config.editor_command());

    match &cli.command {
        Commands::New { tags } => {
            commands::new(&db, &config, tags, &editor, quiet)?;
        }
        Commands::Find { tags, .. } => {
            let flags = cli.command.get_query_flags().unwrap_or_default();
            let renderer = TerminalRenderer::stdout(config.start_line());
            commands::find(&db, &config, tags, flags, &editor, renderer, io::stdin().lock())?;
        }
        Commands::Tags => commands::tags(&db, quiet)?,
    }

    db.flush()?;
    Ok(())
}

fn main() {
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
