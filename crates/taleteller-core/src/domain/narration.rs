//! Narration session types: playback state, preferences, progress.
//!
//! These are the transport-agnostic shapes the narration controller reports
//! to UI adapters. The controller itself lives in `taleteller-voice`.

use serde::{Deserialize, Serialize};

/// Slowest speed multiplier a narration may run at.
pub const MIN_SPEED_MULTIPLIER: f32 = 0.25;

/// Fastest speed multiplier a narration may run at.
pub const MAX_SPEED_MULTIPLIER: f32 = 4.0;

/// Playback state of the narration session.
///
/// ```text
///   Idle --play--> Playing --pause--> Paused --resume--> Playing
///                     │
///                     └──(chunks exhausted)──> Idle
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    /// Nothing is being narrated.
    #[default]
    Idle,

    /// A chunk is being spoken (or about to be).
    Playing,

    /// Narration is paused; the chunk position is retained.
    Paused,
}

impl PlaybackState {
    /// Lower-case label used in logs and the CLI.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Playing => "playing",
            Self::Paused => "paused",
        }
    }
}

/// How a narration attempt ended, as seen by the caller awaiting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrationOutcome {
    /// Every chunk was spoken.
    Completed,

    /// Narration was stopped or superseded by a new session before the end.
    Stopped,

    /// The request was a no-op (re-entrant initiation, nothing loaded).
    Ignored,
}

/// Voice and speed applied to every utterance of a session.
///
/// Replaced wholesale on every preference change, never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "PreferencesWire")]
pub struct NarrationPreferences {
    voice_id: Option<String>,
    speed_multiplier: f32,
}

impl NarrationPreferences {
    /// Build preferences, clamping the speed multiplier into
    /// [`MIN_SPEED_MULTIPLIER`]..=[`MAX_SPEED_MULTIPLIER`].
    ///
    /// Non-finite speeds fall back to 1.0.
    pub fn new(voice_id: Option<String>, speed_multiplier: f32) -> Self {
        Self {
            voice_id,
            speed_multiplier: clamp_speed(speed_multiplier),
        }
    }

    /// Default voice at the given speed.
    pub fn with_speed(speed_multiplier: f32) -> Self {
        Self::new(None, speed_multiplier)
    }

    /// Platform voice identifier, if one was chosen.
    pub fn voice_id(&self) -> Option<&str> {
        self.voice_id.as_deref()
    }

    /// Speech rate multiplier (1.0 = engine default rate).
    pub const fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    /// Same voice, different speed.
    #[must_use]
    pub fn at_speed(&self, speed_multiplier: f32) -> Self {
        Self::new(self.voice_id.clone(), speed_multiplier)
    }

    /// Same speed, different voice.
    #[must_use]
    pub fn with_voice(&self, voice_id: Option<String>) -> Self {
        Self::new(voice_id, self.speed_multiplier)
    }
}

impl Default for NarrationPreferences {
    fn default() -> Self {
        Self::new(None, 1.0)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PreferencesWire {
    voice_id: Option<String>,
    speed_multiplier: f32,
}

impl From<PreferencesWire> for NarrationPreferences {
    fn from(wire: PreferencesWire) -> Self {
        Self::new(wire.voice_id, wire.speed_multiplier)
    }
}

fn clamp_speed(speed: f32) -> f32 {
    if speed.is_finite() {
        speed.clamp(MIN_SPEED_MULTIPLIER, MAX_SPEED_MULTIPLIER)
    } else {
        1.0
    }
}

/// Chunk-granular narration progress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrationProgress {
    /// One-based index of the current chunk; 0 when nothing is in flight.
    pub chunk: usize,

    /// Number of chunks in the loaded text.
    pub total: usize,

    /// Fraction of the text reached, in `[0, 1]`.
    pub fraction: f32,
}

impl NarrationProgress {
    /// Progress while chunk `index` (zero-based) is playing or paused.
    #[allow(clippy::cast_precision_loss)]
    pub fn at_chunk(index: usize, total: usize) -> Self {
        if total == 0 {
            return Self::idle(0);
        }
        let chunk = (index + 1).min(total);
        Self {
            chunk,
            total,
            fraction: chunk as f32 / total as f32,
        }
    }

    /// Progress reported once the final chunk has been spoken.
    pub const fn complete(total: usize) -> Self {
        Self {
            chunk: total,
            total,
            fraction: 1.0,
        }
    }

    /// Progress with nothing in flight.
    pub const fn idle(total: usize) -> Self {
        Self {
            chunk: 0,
            total,
            fraction: 0.0,
        }
    }
}

/// Point-in-time view of the narration session.
///
/// This is the authoritative state UI mirrors reconcile against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrationSnapshot {
    /// Current session id (monotonically increasing).
    pub session_id: u64,

    /// Playback state.
    pub state: PlaybackState,

    /// Zero-based index of the current (or most recent) chunk.
    pub chunk_index: usize,

    /// Number of chunks in the loaded text.
    pub total_chunks: usize,

    /// Preferences applied to the session.
    pub preferences: NarrationPreferences,
}

impl NarrationSnapshot {
    /// Whether a chunk is being spoken.
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Whether narration is paused.
    pub fn is_paused(&self) -> bool {
        self.state == PlaybackState::Paused
    }

    /// Progress derived from the state and chunk position.
    pub fn progress(&self) -> NarrationProgress {
        match self.state {
            PlaybackState::Idle => NarrationProgress::idle(self.total_chunks),
            PlaybackState::Playing | PlaybackState::Paused => {
                NarrationProgress::at_chunk(self.chunk_index, self.total_chunks)
            }
        }
    }
}

impl Default for NarrationSnapshot {
    fn default() -> Self {
        Self {
            session_id: 0,
            state: PlaybackState::Idle,
            chunk_index: 0,
            total_chunks: 0,
            preferences: NarrationPreferences::default(),
        }
    }
}
