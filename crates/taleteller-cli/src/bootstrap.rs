//! CLI bootstrap - the composition root.
//!
//! Resolves where settings and stories live and loads the narration
//! settings. The story database is opened lazily so commands that never
//! touch it (`chunks`, `voices`) do not create it.

use std::fs;
use std::path::{Path, PathBuf};

use taleteller_core::{NarrationSettings, SettingsUpdate, validate_settings};
use taleteller_store::{SqliteStoryRepository, setup_database};

use crate::error::CliError;
use crate::parser::Cli;

const DATA_DIR_NAME: &str = "taleteller";
const DATABASE_FILE_NAME: &str = "taleteller.db";

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// JSON narration settings file, if any.
    pub settings_path: Option<PathBuf>,
    /// Story database file.
    pub database_path: PathBuf,
}

impl CliConfig {
    /// Defaults overridden by the global `--config` and `--db` flags.
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let database_path = match &cli.db {
            Some(path) => path.clone(),
            None => default_database_path()?,
        };
        Ok(Self {
            settings_path: cli.config.clone(),
            database_path,
        })
    }
}

/// Everything a command handler needs.
#[derive(Debug)]
pub struct CliContext {
    /// Validated settings as loaded from disk, before per-command flags.
    pub settings: NarrationSettings,
    /// Story database file.
    pub database_path: PathBuf,
}

impl CliContext {
    /// Settings with per-command flag overrides applied, re-validated.
    pub fn settings_with(&self, overrides: &SettingsUpdate) -> Result<NarrationSettings, CliError> {
        let mut settings = self.settings.clone();
        settings.merge(overrides);
        validate_settings(&settings)?;
        Ok(settings)
    }

    /// Open (creating if needed) the story database.
    pub async fn stories(&self) -> Result<SqliteStoryRepository, CliError> {
        let pool = setup_database(&self.database_path)
            .await
            .map_err(|e| CliError::Database(format!("{e:#}")))?;
        Ok(SqliteStoryRepository::new(pool))
    }
}

/// Bootstrap the CLI application.
pub fn bootstrap(config: CliConfig) -> Result<CliContext, CliError> {
    let settings = load_settings(config.settings_path.as_deref())?;
    tracing::debug!(
        max_chunk_chars = settings.effective_max_chunk_chars(),
        database = %config.database_path.display(),
        "CLI bootstrapped"
    );
    Ok(CliContext {
        settings,
        database_path: config.database_path,
    })
}

/// Load and validate narration settings.
///
/// With no path, the built-in defaults are used.
pub fn load_settings(path: Option<&Path>) -> Result<NarrationSettings, CliError> {
    let Some(path) = path else {
        return Ok(NarrationSettings::with_defaults());
    };

    let raw = fs::read_to_string(path)
        .map_err(|e| CliError::Config(format!("Cannot read {}: {e}", path.display())))?;
    let settings: NarrationSettings = serde_json::from_str(&raw)
        .map_err(|e| CliError::Config(format!("Invalid settings in {}: {e}", path.display())))?;
    validate_settings(&settings)?;
    Ok(settings)
}

/// `taleteller.db` under the user's local data directory.
pub fn default_database_path() -> Result<PathBuf, CliError> {
    let data_dir = dirs::data_local_dir()
        .ok_or_else(|| CliError::Config("Cannot determine system data directory".to_string()))?;
    Ok(data_dir.join(DATA_DIR_NAME).join(DATABASE_FILE_NAME))
}
