//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for the story narrator.
///
/// This is the top-level parser that handles global options and dispatches
/// to subcommands.
#[derive(Parser)]
#[command(name = "taleteller")]
#[command(about = "Narrate stories aloud, one chunk at a time")]
#[command(version)]
pub struct Cli {
    /// Narration settings file (JSON)
    #[arg(long = "config", global = true, env = "TALETELLER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Story database file
    #[arg(long = "db", global = true, env = "TALETELLER_DB")]
    pub db: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
