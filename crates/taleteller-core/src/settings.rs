//! Narration settings and validation.
//!
//! Pure domain types with no infrastructure dependencies. The CLI loads
//! them from a JSON file and applies flag overrides via [`SettingsUpdate`].

use serde::{Deserialize, Serialize};

use crate::domain::{MAX_SPEED_MULTIPLIER, MIN_SPEED_MULTIPLIER};

/// Default upper bound on characters handed to the speech engine per utterance.
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 600;

/// Empirical speaking rate at speed multiplier 1.0, used to estimate how far
/// into a chunk the engine got when preferences change mid-utterance.
pub const DEFAULT_BASELINE_WORDS_PER_SECOND: f32 = 3.0;

/// Default speed multiplier.
pub const DEFAULT_SPEED: f32 = 1.0;

const MIN_CHUNK_CHARS: usize = 50;
const MAX_CHUNK_CHARS: usize = 4000;
const MAX_BASELINE_WPS: f32 = 10.0;

/// Narration settings.
///
/// All fields are optional to support partial config files and graceful
/// defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NarrationSettings {
    /// Maximum characters per chunk.
    pub max_chunk_chars: Option<usize>,

    /// Words per second spoken at speed multiplier 1.0.
    pub baseline_words_per_second: Option<f32>,

    /// Friendly name of the voice to narrate with (e.g. "Samantha").
    pub default_voice: Option<String>,

    /// Speed multiplier applied on top of the voice's own multiplier.
    pub default_speed: Option<f32>,
}

impl NarrationSettings {
    /// Create settings with sensible defaults.
    #[must_use]
    pub const fn with_defaults() -> Self {
        Self {
            max_chunk_chars: Some(DEFAULT_MAX_CHUNK_CHARS),
            baseline_words_per_second: Some(DEFAULT_BASELINE_WORDS_PER_SECOND),
            default_voice: None,
            default_speed: Some(DEFAULT_SPEED),
        }
    }

    /// Get the effective chunk length (with default fallback).
    #[must_use]
    pub const fn effective_max_chunk_chars(&self) -> usize {
        match self.max_chunk_chars {
            Some(chars) => chars,
            None => DEFAULT_MAX_CHUNK_CHARS,
        }
    }

    /// Get the effective words-per-second baseline (with default fallback).
    #[must_use]
    pub fn effective_baseline_words_per_second(&self) -> f32 {
        self.baseline_words_per_second
            .unwrap_or(DEFAULT_BASELINE_WORDS_PER_SECOND)
    }

    /// Get the effective speed multiplier (with default fallback).
    #[must_use]
    pub fn effective_default_speed(&self) -> f32 {
        self.default_speed.unwrap_or(DEFAULT_SPEED)
    }

    /// Merge an update into these settings, only touching fields that are `Some`.
    pub fn merge(&mut self, other: &SettingsUpdate) {
        if let Some(ref chars) = other.max_chunk_chars {
            self.max_chunk_chars = *chars;
        }
        if let Some(ref wps) = other.baseline_words_per_second {
            self.baseline_words_per_second = *wps;
        }
        if let Some(ref voice) = other.default_voice {
            self.default_voice.clone_from(voice);
        }
        if let Some(ref speed) = other.default_speed {
            self.default_speed = *speed;
        }
    }
}

/// Partial settings update.
///
/// Each field is `Option<Option<T>>`:
/// - `None` = don't change this field
/// - `Some(None)` = reset field to its default
/// - `Some(Some(value))` = set field to value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub max_chunk_chars: Option<Option<usize>>,
    pub baseline_words_per_second: Option<Option<f32>>,
    pub default_voice: Option<Option<String>>,
    pub default_speed: Option<Option<f32>>,
}

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    #[error("Chunk length must be between 50 and 4000 characters, got {0}")]
    InvalidChunkLength(usize),

    #[error("Baseline words per second must be in (0, 10], got {0}")]
    InvalidWordsPerSecond(f32),

    #[error("Speed multiplier must be between 0.25 and 4.0, got {0}")]
    InvalidSpeed(f32),

    #[error("Default voice cannot be empty")]
    EmptyVoice,
}

/// Validate settings values.
pub fn validate_settings(settings: &NarrationSettings) -> Result<(), SettingsError> {
    if let Some(chars) = settings.max_chunk_chars {
        if !(MIN_CHUNK_CHARS..=MAX_CHUNK_CHARS).contains(&chars) {
            return Err(SettingsError::InvalidChunkLength(chars));
        }
    }

    if let Some(wps) = settings.baseline_words_per_second {
        if !wps.is_finite() || wps <= 0.0 || wps > MAX_BASELINE_WPS {
            return Err(SettingsError::InvalidWordsPerSecond(wps));
        }
    }

    if let Some(speed) = settings.default_speed {
        if !(MIN_SPEED_MULTIPLIER..=MAX_SPEED_MULTIPLIER).contains(&speed) {
            return Err(SettingsError::InvalidSpeed(speed));
        }
    }

    if settings
        .default_voice
        .as_ref()
        .is_some_and(|v| v.trim().is_empty())
    {
        return Err(SettingsError::EmptyVoice);
    }

    Ok(())
}
