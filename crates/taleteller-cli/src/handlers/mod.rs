//! Command handlers.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<()>`
//! - Thin wrappers that parse CLI input, call into the narration and story
//!   crates, and format output for the terminal

pub mod chunks;
pub mod narrate;
pub mod story;
pub mod voices;

use std::fs;
use std::path::Path;

use crate::error::CliError;

/// Read a UTF-8 text file named on the command line.
pub(crate) fn read_text_file(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("Cannot read {}: {e}", path.display())))
}
