//! Tags command - list every tag with its entry count

use crate::{JournalError, db::Database, output};

type Result<T> = std::result::Result<T, JournalError>;

/// Tags in the database with the number of entries carrying each
///
/// # Errors
/// Returns an error if database operations fail
pub fn tag_counts(db: &Database) -> Result<Vec<(String, usize)>> {
    let mut counts = Vec::new();
    for tag in db.list_all_tags()? {
        let count = db.find_by_tag(&tag)?.len();
        counts.push((tag, count));
    }
    Ok(counts)
}

/// Execute the tags command
///
/// # Errors
/// Returns an error if database operations fail
pub fn execute(db: &Database, quiet: bool) -> Result<()> {
    let counts = tag_counts(db)?;

    if counts.is_empty() {
        if !quiet {
            println!("No tags found in database.");
        }
        return Ok(());
    }

    if !quiet {
        println!("Tags in database:");
    }
    for (tag, count) in &counts {
        println!("{}", output::tag_with_count(tag, *count, quiet));
    }
    Ok(())
}
