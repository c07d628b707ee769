//! Find command - initial search and the interactive prompt

use crate::config::JournalConfig;
use crate::db::Database;
use crate::editor::DocumentEditor;
use crate::prompt::{NO_RESULTS, PromptLoop};
use crate::search::{Query, QueryFlags, SearchOutcome, SearchSession};
use crate::ui::Renderer;
use crate::volume::VolumeBuilder;
use crate::JournalError;
use std::io::BufRead;

type Result<T> = std::result::Result<T, JournalError>;

/// Execute the find command
///
/// Runs the initial search, then hands over to the prompt loop reading from
/// `input`. A first-only search that matches opens the entry and returns
/// without entering the loop.
///
/// # Errors
/// Returns an error if the query is invalid, the initial search fails, or
/// reading input or rendering fails.
pub fn execute<E, R, B>(
    db: &Database,
    config: &JournalConfig,
    tags: &[String],
    flags: QueryFlags,
    editor: E,
    renderer: R,
    input: B,
) -> Result<()>
where
    E: DocumentEditor,
    R: Renderer,
    B: BufRead,
{
    let query = Query::new(tags, flags)?;
    let mut session = SearchSession::new(db);
    let outcome = session.run_search(query)?;

    if let SearchOutcome::OpenFirst(path) = &outcome {
        editor.open(path, config.start_line(), false);
        return Ok(());
    }

    let volumes = VolumeBuilder::new(db, config.volume_dir(), config.start_line());
    let mut prompt = PromptLoop::new(session, volumes, editor, renderer);
    if outcome == SearchOutcome::Empty {
        prompt = prompt.with_message(NO_RESULTS);
    }
    prompt.run(input)?;
    Ok(())
}
