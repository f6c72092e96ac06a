//! Session state owned exclusively by the controller task.

use taleteller_core::{NarrationPreferences, NarrationSnapshot, PlaybackState};
use tokio::time::Instant;

/// Estimated unspoken remainder of a chunk, spoken in place of the full
/// chunk the next time the chain reaches `index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct ChunkOverride {
    pub index: usize,
    pub text: String,
}

/// Snapshot taken when an utterance starts, used to estimate how far the
/// engine got when preferences change mid-utterance.
#[derive(Debug, Clone)]
pub(super) struct ChunkClock {
    pub started_at: Instant,
    /// Set while paused so paused time is not counted as speech.
    pub paused_at: Option<Instant>,
    /// Speed in effect when the utterance started.
    pub speed_multiplier: f32,
    /// Text handed to the engine (the full chunk or an override).
    pub text: String,
    pub is_override: bool,
}

impl ChunkClock {
    /// Time the utterance has been audible, excluding any current pause.
    pub fn elapsed(&self, now: Instant) -> std::time::Duration {
        let end = self.paused_at.unwrap_or(now);
        end.saturating_duration_since(self.started_at)
    }

    pub fn pause(&mut self, now: Instant) {
        if self.paused_at.is_none() {
            self.paused_at = Some(now);
        }
    }

    /// Shift the start forward by the paused duration.
    pub fn resume(&mut self, now: Instant) {
        if let Some(paused_at) = self.paused_at.take() {
            self.started_at += now.saturating_duration_since(paused_at);
        }
    }
}

#[derive(Debug, Default)]
pub(super) struct Session {
    /// Fencing token; bumped for every new logical narration attempt.
    pub id: u64,
    pub state: PlaybackState,
    /// Text the chunks were computed from. Identity decides resume eligibility.
    pub source_text: Option<String>,
    pub chunks: Vec<String>,
    pub index: usize,
    pub preferences: NarrationPreferences,
    pub pending_override: Option<ChunkOverride>,
    pub clock: Option<ChunkClock>,
    /// Utterance whose callbacks may still act on this session.
    pub in_flight: Option<u64>,
    pub natively_paused: bool,
    next_utterance: u64,
}

impl Session {
    /// Start a new logical session, invalidating every outstanding callback.
    pub fn bump(&mut self) -> u64 {
        self.id += 1;
        self.in_flight = None;
        self.id
    }

    pub fn next_utterance_id(&mut self) -> u64 {
        self.next_utterance += 1;
        self.next_utterance
    }

    pub fn is_source(&self, text: &str) -> bool {
        self.source_text.as_deref() == Some(text)
    }

    /// Drop any engine-side utterance state after a stop.
    pub fn clear_utterance(&mut self) {
        self.in_flight = None;
        self.natively_paused = false;
    }

    pub fn snapshot(&self) -> NarrationSnapshot {
        NarrationSnapshot {
            session_id: self.id,
            state: self.state,
            chunk_index: self.index,
            total_chunks: self.chunks.len(),
            preferences: self.preferences.clone(),
        }
    }
}
