//! Command-line adapter for taleteller.
//!
//! `main.rs` is the composition root; this library exposes the parser,
//! bootstrap and handlers so they can be tested without spawning the binary.
#![deny(unused_crate_dependencies)]

// Used only by main.rs
use dotenvy as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;
pub mod story_commands;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::Commands;
pub use error::CliError;
pub use parser::Cli;
pub use story_commands::StoryCommand;
