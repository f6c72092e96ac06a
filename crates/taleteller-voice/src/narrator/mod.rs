//! Chunked narration session controller.
//!
//! [`Narrator`] is a cheap, cloneable handle to a controller task that owns
//! the one narration session. The controller speaks text chunk by chunk
//! through a [`SpeechEngine`], keeps the chunk position across pause and
//! resume, and restarts the in-flight chunk (minus the words already heard)
//! when voice or speed change mid-utterance.
//!
//! # State machine
//!
//! ```text
//!   Idle --play--> Playing --pause--> Paused --resume--> Playing
//!                     │
//!                     └──(chunks exhausted)──> Idle
//! ```
//!
//! `restart` and loading new text start a fresh session from any state.
//!
//! # Fencing
//!
//! Every narration attempt has a session id. Engine callbacks are tagged
//! with the session id and utterance id they were issued under and are
//! discarded once either is superseded, so restarts, seeks and preference
//! changes are safe while speech is in flight.

mod actor;
mod estimate;
mod session;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::task::{Context, Poll};

use taleteller_core::settings::{DEFAULT_BASELINE_WORDS_PER_SECOND, DEFAULT_MAX_CHUNK_CHARS};
use taleteller_core::{
    NarrationEventEmitter, NarrationOutcome, NarrationPreferences, NarrationProgress,
    NarrationSettings, NarrationSnapshot,
};
use tokio::sync::{mpsc, oneshot, watch};

use crate::engine::SpeechEngine;
use crate::error::NarratorError;
use actor::{Controller, Message, NarrationResult};

// ── Configuration ──────────────────────────────────────────────────

/// Controller tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NarratorConfig {
    /// Maximum characters per utterance.
    pub max_chunk_chars: usize,

    /// Words per second at speed 1.0, used for resume-offset estimation.
    pub baseline_words_per_second: f32,
}

impl Default for NarratorConfig {
    fn default() -> Self {
        Self {
            max_chunk_chars: DEFAULT_MAX_CHUNK_CHARS,
            baseline_words_per_second: DEFAULT_BASELINE_WORDS_PER_SECOND,
        }
    }
}

impl From<&NarrationSettings> for NarratorConfig {
    fn from(settings: &NarrationSettings) -> Self {
        Self {
            max_chunk_chars: settings.effective_max_chunk_chars(),
            baseline_words_per_second: settings.effective_baseline_words_per_second(),
        }
    }
}

// ── Completion ─────────────────────────────────────────────────────

/// Resolves when the narration it was returned for ends.
///
/// Completed, stopped and superseded sessions resolve `Ok`; engine failures
/// resolve `Err`. Dropping a `Completion` does not affect playback.
#[must_use = "a Completion resolves when narration ends; drop it to fire and forget"]
#[derive(Debug)]
pub struct Completion {
    state: CompletionState,
}

#[derive(Debug)]
enum CompletionState {
    Pending(oneshot::Receiver<NarrationResult>),
    Ready(Option<NarrationResult>),
}

impl Completion {
    const fn pending(rx: oneshot::Receiver<NarrationResult>) -> Self {
        Self {
            state: CompletionState::Pending(rx),
        }
    }

    const fn ready(result: NarrationResult) -> Self {
        Self {
            state: CompletionState::Ready(Some(result)),
        }
    }
}

impl Future for Completion {
    type Output = Result<NarrationOutcome, NarratorError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match &mut self.get_mut().state {
            CompletionState::Pending(rx) => Pin::new(rx)
                .poll(cx)
                .map(|received| received.unwrap_or(Err(NarratorError::ControllerClosed))),
            CompletionState::Ready(result) => {
                Poll::Ready(result.take().unwrap_or(Err(NarratorError::ControllerClosed)))
            }
        }
    }
}

// ── Handle ─────────────────────────────────────────────────────────

/// Handle to the narration controller.
///
/// Construct once with [`Narrator::spawn`] and clone it to every caller.
/// The controller task exits, stopping the engine, when the last handle is
/// dropped.
#[derive(Clone)]
pub struct Narrator {
    tx: mpsc::UnboundedSender<Message>,
    /// Set while a play/resume/restart is being set up.
    initiating: Arc<AtomicBool>,
    snapshot: watch::Receiver<NarrationSnapshot>,
}

impl Narrator {
    /// Spawn the controller task on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn spawn(
        engine: Arc<dyn SpeechEngine>,
        emitter: Arc<dyn NarrationEventEmitter>,
        config: NarratorConfig,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(NarrationSnapshot::default());
        let initiating = Arc::new(AtomicBool::new(false));

        let controller = Controller::new(
            engine,
            emitter,
            config,
            Arc::clone(&initiating),
            snapshot_tx,
            tx.downgrade(),
        );
        tokio::spawn(controller.run(rx));

        Self {
            tx,
            initiating,
            snapshot: snapshot_rx,
        }
    }

    // ── Playback-initiating ────────────────────────────────────────

    /// Narrate `text` from the start, or continue it if it is the paused text.
    ///
    /// Resolves at the end of the whole narration, not when the first chunk
    /// starts. A call made while another play/resume/restart is still being
    /// set up resolves immediately with [`NarrationOutcome::Ignored`].
    pub fn play(&self, text: impl Into<String>, preferences: NarrationPreferences) -> Completion {
        let text = text.into();
        self.initiate("play", |done| Message::Play {
            text,
            preferences,
            done,
        })
    }

    /// Continue the loaded text from the current chunk.
    pub fn resume(&self) -> Completion {
        self.initiate("resume", |done| Message::Resume { done })
    }

    /// Rechunk `text` and narrate it from the first chunk, unconditionally.
    pub fn restart(&self, text: impl Into<String>, preferences: NarrationPreferences) -> Completion {
        let text = text.into();
        self.initiate("restart", |done| Message::Restart {
            text,
            preferences,
            done,
        })
    }

    // ── Commands ───────────────────────────────────────────────────

    /// Pause narration, keeping the chunk position.
    pub async fn pause(&self) -> Result<(), NarratorError> {
        self.send_and_recv(|ack| Message::Pause { ack }).await
    }

    /// Stop narration and reset to the first chunk.
    pub async fn stop(&self) -> Result<(), NarratorError> {
        self.send_and_recv(|ack| Message::Stop { ack }).await
    }

    /// Replace voice and speed. Mid-narration, the current chunk restarts
    /// from roughly where the engine had got to.
    pub async fn set_preferences(
        &self,
        preferences: NarrationPreferences,
    ) -> Result<(), NarratorError> {
        self.send_and_recv(|ack| Message::SetPreferences { preferences, ack })
            .await
    }

    /// Jump to chunk `index`. Returns `false` if the index is out of range.
    pub async fn seek_to_chunk(&self, index: usize) -> Result<bool, NarratorError> {
        self.send_and_recv(|reply| Message::SeekToChunk { index, reply })
            .await
    }

    /// Authoritative snapshot, after every earlier command has been applied.
    pub async fn status(&self) -> Result<NarrationSnapshot, NarratorError> {
        self.send_and_recv(|reply| Message::Status { reply }).await
    }

    // ── Queries ────────────────────────────────────────────────────

    pub fn is_playing(&self) -> bool {
        self.snapshot.borrow().is_playing()
    }

    pub fn is_paused(&self) -> bool {
        self.snapshot.borrow().is_paused()
    }

    pub fn current_chunk_index(&self) -> usize {
        self.snapshot.borrow().chunk_index
    }

    pub fn current_progress(&self) -> NarrationProgress {
        self.snapshot.borrow().progress()
    }

    /// Most recently published snapshot.
    pub fn snapshot(&self) -> NarrationSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Receiver that observes every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<NarrationSnapshot> {
        self.snapshot.clone()
    }

    // ── Internal helpers ───────────────────────────────────────────

    fn initiate(
        &self,
        request: &'static str,
        build: impl FnOnce(oneshot::Sender<NarrationResult>) -> Message,
    ) -> Completion {
        if self
            .initiating
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::info!(request, "Narration already being initiated, ignoring");
            return Completion::ready(Ok(NarrationOutcome::Ignored));
        }

        let (done_tx, done_rx) = oneshot::channel();
        if self.tx.send(build(done_tx)).is_err() {
            self.initiating.store(false, Ordering::Release);
            return Completion::ready(Err(NarratorError::ControllerClosed));
        }
        Completion::pending(done_rx)
    }

    /// Send a command carrying a one-shot reply channel and wait for the
    /// controller to answer.
    async fn send_and_recv<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> Message,
    ) -> Result<T, NarratorError> {
        let (tx, rx) = oneshot::channel();
        self.tx
            .send(build(tx))
            .map_err(|_| NarratorError::ControllerClosed)?;
        rx.await.map_err(|_| NarratorError::ControllerClosed)
    }
}

impl std::fmt::Debug for Narrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Narrator")
            .field("snapshot", &*self.snapshot.borrow())
            .finish_non_exhaustive()
    }
}
