//! Narration for taleteller.
//!
//! Turns story text into spoken audio one chunk at a time:
//!
//! - [`text_utils`] splits text into sentence-aligned chunks
//! - [`engine`] defines the [`SpeechEngine`] boundary and a timer-driven
//!   [`SimulatedSpeechEngine`]
//! - [`catalog`] maps friendly voice names to engine voices and speeds
//! - [`narrator`] runs the session controller behind the cloneable
//!   [`Narrator`] handle
//!
//! The controller is the single source of truth for playback state. UI
//! layers observe it through [`NarrationEvent`](taleteller_core::NarrationEvent)s
//! and [`Narrator::snapshot`].

#![deny(unused_crate_dependencies)]

#[cfg(test)]
use mockall as _;

pub mod catalog;
pub mod engine;
pub mod error;
pub mod narrator;
pub mod text_utils;

// Re-export key types for convenience
pub use catalog::{CatalogVoice, VoiceCatalog};
pub use engine::{
    SimulatedSpeechEngine, SpeakOptions, SpeechEngine, UtteranceCallbacks, VoiceGender, VoiceInfo,
};
pub use error::NarratorError;
pub use narrator::{Completion, Narrator, NarratorConfig};
pub use text_utils::split_into_chunks;
