//! Chunks command handler.
//!
//! Shows the utterances a text would be narrated as, without speaking it.

use std::path::Path;

use anyhow::Result;
use taleteller_core::SettingsUpdate;
use taleteller_voice::split_into_chunks;
use taleteller_voice::text_utils::word_count;

use super::read_text_file;
use crate::bootstrap::CliContext;
use crate::presentation::print_separator;

/// Execute the chunks command.
pub fn execute(ctx: &CliContext, file: &Path, chunk_chars: Option<usize>) -> Result<()> {
    let settings = ctx.settings_with(&SettingsUpdate {
        max_chunk_chars: chunk_chars.map(Some),
        ..SettingsUpdate::default()
    })?;
    let max_chars = settings.effective_max_chunk_chars();
    let text = read_text_file(file)?;
    let chunks = split_into_chunks(&text, max_chars);

    if chunks.is_empty() {
        println!("{} has no text to narrate.", file.display());
        return Ok(());
    }

    println!(
        "{} chunk(s) of at most {max_chars} characters:\n",
        chunks.len()
    );
    for (index, chunk) in chunks.iter().enumerate() {
        println!(
            "[{}] {} chars, {} words",
            index + 1,
            chunk.chars().count(),
            word_count(chunk)
        );
        println!("{chunk}");
        print_separator(60);
    }

    Ok(())
}
