//! Core domain types and port definitions for taleteller.
//!
//! This crate holds the pieces every adapter agrees on: story records,
//! narration preferences and playback snapshots, the narration event union,
//! narration settings, and the ports (traits) that storage and UI adapters
//! implement. It contains no speech-engine or storage code.
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod events;
pub mod ports;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{
    NarrationOutcome, NarrationPreferences, NarrationProgress, NarrationSnapshot, NewStory,
    PlaybackState, Story,
};
pub use events::NarrationEvent;
pub use ports::{
    ChannelEmitter, CoreError, NarrationEventEmitter, NoopEmitter, RepositoryError,
    StoryRepository,
};
pub use settings::{
    DEFAULT_BASELINE_WORDS_PER_SECOND, DEFAULT_MAX_CHUNK_CHARS, DEFAULT_SPEED,
    NarrationSettings, SettingsError, SettingsUpdate, validate_settings,
};

#[cfg(test)]
use serde_json as _;
