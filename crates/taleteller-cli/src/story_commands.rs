//! Story store subcommands.

use std::path::PathBuf;

use clap::Subcommand;

/// Story command variants.
#[derive(Subcommand)]
pub enum StoryCommand {
    /// Store the text of a file as a new story
    Add {
        /// Text file holding the story
        file: PathBuf,
        /// Story title
        #[arg(long)]
        title: String,
        /// Prompt the story was written from
        #[arg(long)]
        prompt: Option<String>,
    },
    /// Print a stored story
    Show {
        /// Story id
        id: i64,
    },
    /// Delete a stored story
    Remove {
        /// Story id
        id: i64,
    },
}
