//! Main commands enum.
//!
//! This module defines the available commands for the CLI tool.

use std::path::PathBuf;

use clap::Subcommand;

use crate::story_commands::StoryCommand;

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Narrate a text file or stored story, with keyboard controls on stdin
    Narrate {
        /// Text file to narrate
        #[arg(required_unless_present = "story", conflicts_with = "story")]
        file: Option<PathBuf>,
        /// Narrate a stored story by id instead of a file
        #[arg(long)]
        story: Option<i64>,
        /// Friendly voice name (e.g. "Daniel")
        #[arg(long)]
        voice: Option<String>,
        /// Speed multiplier (0.25 to 4.0)
        #[arg(long)]
        speed: Option<f32>,
        /// Maximum characters per chunk
        #[arg(long)]
        chunk_chars: Option<usize>,
        /// Let the engine pause mid-utterance instead of restarting the chunk
        #[arg(long)]
        native_pause: bool,
        /// Words per second spoken at speed 1.0
        #[arg(long)]
        wps: Option<f32>,
    },

    /// Print how a text file would be chunked for narration
    Chunks {
        /// Text file to chunk
        file: PathBuf,
        /// Maximum characters per chunk
        #[arg(long)]
        chunk_chars: Option<usize>,
    },

    /// List curated voices and the engine voices they resolve to
    Voices,

    /// Manage stored stories
    Story {
        #[command(subcommand)]
        command: StoryCommand,
    },
}
