//! Canonical narration event union.
//!
//! The narration controller emits these through a
//! [`NarrationEventEmitter`](crate::ports::NarrationEventEmitter) whenever the
//! chunk position, playback state, or completion changes.
//!
//! # Wire Format
//!
//! Events are serialized with a `type` tag:
//!
//! ```json
//! { "type": "progress", "chunk": 2, "total": 5, "fraction": 0.4 }
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::{NarrationOutcome, NarrationProgress, PlaybackState};

/// Events emitted by the narration controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NarrationEvent {
    /// Playback state changed.
    StateChanged {
        /// New state.
        state: PlaybackState,
    },

    /// Chunk position or completion changed.
    Progress {
        /// One-based chunk number (0 when nothing is in flight).
        chunk: usize,
        /// Total number of chunks.
        total: usize,
        /// Fraction of the text reached.
        fraction: f32,
    },

    /// A chunk (or the unspoken remainder of one) was handed to the engine.
    ChunkStarted {
        /// Zero-based chunk index.
        index: usize,
        /// Text handed to the engine.
        text: String,
    },

    /// A narration ended.
    Finished {
        /// How it ended.
        outcome: NarrationOutcome,
    },

    /// The speech engine reported a failure.
    Error {
        /// Engine-provided description.
        message: String,
    },
}

impl NarrationEvent {
    /// Build a progress event.
    pub const fn progress(progress: NarrationProgress) -> Self {
        Self::Progress {
            chunk: progress.chunk,
            total: progress.total,
            fraction: progress.fraction,
        }
    }

    /// Build a state-change event.
    pub const fn state_changed(state: PlaybackState) -> Self {
        Self::StateChanged { state }
    }
}
