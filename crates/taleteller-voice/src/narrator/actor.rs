//! Controller task: the single owner and mutator of the narration session.
//!
//! Commands from [`Narrator`](super::Narrator) handles and completion
//! signals from the speech engine arrive on one ordered channel, so every
//! mutation happens on this task in arrival order. Engine signals carry the
//! session id and utterance id they were issued under; anything that no
//! longer matches is discarded.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use taleteller_core::{
    NarrationEvent, NarrationEventEmitter, NarrationOutcome, NarrationPreferences,
    NarrationProgress, NarrationSnapshot, PlaybackState,
};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::Instant;

use super::NarratorConfig;
use super::estimate::{estimate_words_spoken, remaining_words};
use super::session::{ChunkClock, ChunkOverride, Session};
use crate::engine::{SpeakOptions, SpeechEngine, UtteranceCallbacks};
use crate::error::NarratorError;
use crate::text_utils::{split_into_chunks, word_count};

pub(super) type NarrationResult = Result<NarrationOutcome, NarratorError>;

// ── Messages ───────────────────────────────────────────────────────

/// Everything the controller task reacts to.
pub(super) enum Message {
    Play {
        text: String,
        preferences: NarrationPreferences,
        done: oneshot::Sender<NarrationResult>,
    },
    Resume {
        done: oneshot::Sender<NarrationResult>,
    },
    Restart {
        text: String,
        preferences: NarrationPreferences,
        done: oneshot::Sender<NarrationResult>,
    },
    Pause {
        ack: oneshot::Sender<()>,
    },
    Stop {
        ack: oneshot::Sender<()>,
    },
    SetPreferences {
        preferences: NarrationPreferences,
        ack: oneshot::Sender<()>,
    },
    SeekToChunk {
        index: usize,
        reply: oneshot::Sender<bool>,
    },
    Status {
        reply: oneshot::Sender<NarrationSnapshot>,
    },
    Utterance(UtteranceSignal),
}

/// Completion report for one utterance, tagged with the ids it was issued under.
pub(super) struct UtteranceSignal {
    session_id: u64,
    utterance_id: u64,
    index: usize,
    outcome: UtteranceOutcome,
}

enum UtteranceOutcome {
    Done,
    Stopped,
    Failed(String),
}

// ── Controller ─────────────────────────────────────────────────────

pub(super) struct Controller {
    engine: Arc<dyn SpeechEngine>,
    emitter: Arc<dyn NarrationEventEmitter>,
    config: NarratorConfig,
    session: Session,
    /// Callers awaiting the end of the current session.
    waiters: Vec<oneshot::Sender<NarrationResult>>,
    initiating: Arc<AtomicBool>,
    snapshot: watch::Sender<NarrationSnapshot>,
    /// Weak so pending engine callbacks never keep the controller alive.
    signals: mpsc::WeakUnboundedSender<Message>,
}

impl Controller {
    pub(super) fn new(
        engine: Arc<dyn SpeechEngine>,
        emitter: Arc<dyn NarrationEventEmitter>,
        config: NarratorConfig,
        initiating: Arc<AtomicBool>,
        snapshot: watch::Sender<NarrationSnapshot>,
        signals: mpsc::WeakUnboundedSender<Message>,
    ) -> Self {
        Self {
            engine,
            emitter,
            config,
            session: Session::default(),
            waiters: Vec::new(),
            initiating,
            snapshot,
            signals,
        }
    }

    /// Process messages until every handle is dropped.
    pub(super) async fn run(mut self, mut rx: mpsc::UnboundedReceiver<Message>) {
        tracing::debug!("Narration controller started");

        while let Some(message) = rx.recv().await {
            self.handle(message);
            self.publish();
        }

        // All handles gone
        self.engine.stop();
        self.resolve_waiters(&Ok(NarrationOutcome::Stopped));
        tracing::debug!("Narration controller stopped");
    }

    fn handle(&mut self, message: Message) {
        match message {
            Message::Play {
                text,
                preferences,
                done,
            } => {
                self.play(text, preferences, done);
                self.initiating.store(false, Ordering::Release);
            }
            Message::Resume { done } => {
                self.resume(done);
                self.initiating.store(false, Ordering::Release);
            }
            Message::Restart {
                text,
                preferences,
                done,
            } => {
                self.restart(text, preferences, done);
                self.initiating.store(false, Ordering::Release);
            }
            Message::Pause { ack } => {
                self.pause();
                self.publish();
                let _ = ack.send(());
            }
            Message::Stop { ack } => {
                self.stop();
                self.publish();
                let _ = ack.send(());
            }
            Message::SetPreferences { preferences, ack } => {
                self.set_preferences(preferences);
                self.publish();
                let _ = ack.send(());
            }
            Message::SeekToChunk { index, reply } => {
                let moved = self.seek_to_chunk(index);
                self.publish();
                let _ = reply.send(moved);
            }
            Message::Status { reply } => {
                let _ = reply.send(self.session.snapshot());
            }
            Message::Utterance(signal) => self.on_utterance(signal),
        }
    }

    // ── Playback-initiating commands ───────────────────────────────

    fn play(
        &mut self,
        text: String,
        preferences: NarrationPreferences,
        done: oneshot::Sender<NarrationResult>,
    ) {
        if self.session.state == PlaybackState::Paused && self.session.is_source(&text) {
            tracing::debug!("Play of paused text, resuming");
            self.resume(done);
            return;
        }

        if self.session.is_source(&text) && !self.session.chunks.is_empty() {
            tracing::debug!(chunks = self.session.chunks.len(), "Replaying loaded text");
        } else {
            self.load(text);
        }

        self.begin_new_session(preferences, done);
    }

    fn restart(
        &mut self,
        text: String,
        preferences: NarrationPreferences,
        done: oneshot::Sender<NarrationResult>,
    ) {
        self.load(text);
        self.begin_new_session(preferences, done);
    }

    fn resume(&mut self, done: oneshot::Sender<NarrationResult>) {
        if self.session.source_text.is_none() || self.session.chunks.is_empty() {
            tracing::warn!("Resume requested with no text loaded, ignoring");
            let _ = done.send(Ok(NarrationOutcome::Ignored));
            return;
        }

        if self.session.state == PlaybackState::Playing {
            tracing::debug!("Resume while already playing");
            self.waiters.push(done);
            return;
        }

        let resume_index = self.session.index;
        let sid = self.session.id;
        self.set_state(PlaybackState::Playing);
        self.waiters.push(done);

        if self.session.natively_paused {
            if self.engine.resume() {
                tracing::debug!(chunk = resume_index, "Resumed natively");
                self.session.natively_paused = false;
                let now = Instant::now();
                if let Some(clock) = self.session.clock.as_mut() {
                    clock.resume(now);
                }
                self.emit_progress();
                return;
            }
            tracing::debug!("Native resume failed, replaying chunk");
            self.session.clear_utterance();
            self.engine.stop();
        }

        // Replays the whole chunk; a partial remainder is not carried over a pause
        self.advance(resume_index, sid);
    }

    /// Replace the loaded text and recompute its chunks.
    fn load(&mut self, text: String) {
        self.session.chunks = split_into_chunks(&text, self.config.max_chunk_chars);
        tracing::info!(
            chars = text.chars().count(),
            chunks = self.session.chunks.len(),
            "Loaded narration text"
        );
        self.session.source_text = Some(text);
    }

    fn begin_new_session(
        &mut self,
        preferences: NarrationPreferences,
        done: oneshot::Sender<NarrationResult>,
    ) {
        // Callers of the superseded session see it as stopped
        self.resolve_waiters(&Ok(NarrationOutcome::Stopped));

        self.session.preferences = preferences;
        self.session.index = 0;
        self.session.pending_override = None;
        let sid = self.session.bump();
        self.session.clear_utterance();
        self.engine.stop();

        tracing::info!(
            session_id = sid,
            chunks = self.session.chunks.len(),
            speed = self.session.preferences.speed_multiplier(),
            "Starting narration session"
        );

        self.waiters.push(done);
        self.advance(0, sid);
    }

    // ── Other commands ─────────────────────────────────────────────

    fn pause(&mut self) {
        if self.session.state != PlaybackState::Playing {
            tracing::debug!(state = self.session.state.label(), "Pause ignored");
            return;
        }

        self.set_state(PlaybackState::Paused);
        let now = Instant::now();
        if let Some(clock) = self.session.clock.as_mut() {
            clock.pause(now);
        }

        if self.engine.supports_native_pause() && self.engine.pause() {
            self.session.natively_paused = true;
        } else {
            self.session.clear_utterance();
            self.engine.stop();
        }

        tracing::debug!(
            chunk = self.session.index,
            native = self.session.natively_paused,
            "Narration paused"
        );
        self.emit_progress();
    }

    fn stop(&mut self) {
        let was_active = self.session.state != PlaybackState::Idle || !self.waiters.is_empty();
        self.session.bump();
        self.session.clear_utterance();
        self.engine.stop();
        self.session.index = 0;
        self.session.pending_override = None;
        self.session.clock = None;
        self.set_state(PlaybackState::Idle);
        self.emit_progress();
        if was_active {
            tracing::info!(session_id = self.session.id, "Narration stopped");
            self.finish(&Ok(NarrationOutcome::Stopped));
        }
    }

    fn set_preferences(&mut self, preferences: NarrationPreferences) {
        self.session.preferences = preferences;

        if self.session.state == PlaybackState::Idle {
            tracing::debug!("Preferences replaced while idle");
            return;
        }

        self.estimate_resume_point();

        let sid = self.session.bump();
        self.session.clear_utterance();
        self.engine.stop();

        tracing::debug!(
            chunk = self.session.index,
            speed = self.session.preferences.speed_multiplier(),
            partial = self.session.pending_override.is_some(),
            "Preferences changed mid-narration"
        );
        self.advance(self.session.index, sid);
    }

    /// Work out how much of the current utterance was already heard and
    /// arrange for the chain to continue after it.
    fn estimate_resume_point(&mut self) {
        let Some(clock) = self.session.clock.take() else {
            return;
        };

        let total_words = word_count(&clock.text);
        let spoken = estimate_words_spoken(
            clock.elapsed(Instant::now()),
            self.config.baseline_words_per_second,
            clock.speed_multiplier,
            total_words,
        );

        let index = self.session.index;
        if spoken >= total_words {
            self.session.index = index + 1;
            self.session.pending_override = None;
        } else if spoken > 0 {
            self.session.pending_override =
                remaining_words(&clock.text, spoken).map(|text| ChunkOverride { index, text });
        } else if clock.is_override {
            self.session.pending_override = Some(ChunkOverride {
                index,
                text: clock.text,
            });
        }

        tracing::trace!(spoken, total_words, "Estimated words spoken");
    }

    fn seek_to_chunk(&mut self, index: usize) -> bool {
        if self.session.chunks.is_empty() {
            tracing::warn!(index, "Seek requested with no text loaded, ignoring");
            return false;
        }
        if index >= self.session.chunks.len() {
            tracing::warn!(
                index,
                total = self.session.chunks.len(),
                "Seek index out of range, ignoring"
            );
            return false;
        }

        let was_active = self.session.state != PlaybackState::Idle;
        self.session.clear_utterance();
        self.engine.stop();
        self.session.pending_override = None;
        self.session.clock = None;
        self.session.index = index;
        let sid = self.session.bump();

        if was_active {
            self.advance(index, sid);
        } else {
            self.emit_progress();
        }
        true
    }

    // ── Chunk chain ────────────────────────────────────────────────

    /// Speak chunk `index` of session `sid`, or complete the session.
    fn advance(&mut self, index: usize, sid: u64) {
        if sid != self.session.id {
            tracing::trace!(sid, current = self.session.id, "Stale continuation dropped");
            return;
        }

        let total = self.session.chunks.len();
        if index >= total {
            self.complete();
            return;
        }

        self.session.index = index;
        self.set_state(PlaybackState::Playing);

        let (text, is_override) = match self.session.pending_override.take() {
            Some(pending) if pending.index == index => (pending.text, true),
            _ => (self.session.chunks[index].clone(), false),
        };

        self.session.clock = Some(ChunkClock {
            started_at: Instant::now(),
            paused_at: None,
            speed_multiplier: self.session.preferences.speed_multiplier(),
            text: text.clone(),
            is_override,
        });

        self.emit_progress();
        self.emitter.emit(NarrationEvent::ChunkStarted {
            index,
            text: text.clone(),
        });

        let utterance_id = self.session.next_utterance_id();
        self.session.in_flight = Some(utterance_id);
        self.session.natively_paused = false;

        let options = SpeakOptions {
            voice_id: self.session.preferences.voice_id().map(str::to_string),
            rate: self.session.preferences.speed_multiplier(),
        };
        tracing::debug!(
            session_id = sid,
            chunk = index + 1,
            total,
            partial = is_override,
            "Speaking chunk"
        );
        self.engine
            .speak(&text, &options, self.callbacks_for(sid, utterance_id, index));
    }

    fn complete(&mut self) {
        let total = self.session.chunks.len();
        self.session.index = 0;
        self.session.clock = None;
        self.session.pending_override = None;
        self.session.clear_utterance();
        self.set_state(PlaybackState::Idle);
        self.emitter
            .emit(NarrationEvent::progress(NarrationProgress::complete(total)));

        tracing::info!(session_id = self.session.id, chunks = total, "Narration complete");
        self.finish(&Ok(NarrationOutcome::Completed));
    }

    fn on_utterance(&mut self, signal: UtteranceSignal) {
        if signal.session_id != self.session.id
            || self.session.in_flight != Some(signal.utterance_id)
        {
            tracing::trace!(
                session_id = signal.session_id,
                utterance_id = signal.utterance_id,
                "Stale utterance signal dropped"
            );
            return;
        }

        self.session.in_flight = None;

        match signal.outcome {
            UtteranceOutcome::Done if self.session.state == PlaybackState::Paused => {
                // The chain never advances while paused; resume replays this chunk
                self.session.natively_paused = false;
                self.session.clock = None;
            }
            UtteranceOutcome::Done => self.advance(signal.index + 1, signal.session_id),
            UtteranceOutcome::Stopped => {
                tracing::debug!(chunk = signal.index, "Utterance stopped by engine");
                self.finalize(&Ok(NarrationOutcome::Stopped));
            }
            UtteranceOutcome::Failed(message) => {
                tracing::error!(chunk = signal.index, error = %message, "Speech engine failed");
                self.emitter.emit(NarrationEvent::Error {
                    message: message.clone(),
                });
                self.finalize(&Err(NarratorError::Engine(message)));
            }
        }
    }

    /// End the session early, keeping the chunk position.
    fn finalize(&mut self, result: &NarrationResult) {
        self.session.clear_utterance();
        self.session.clock = None;
        self.session.pending_override = None;
        self.set_state(PlaybackState::Idle);
        self.emit_progress();
        self.finish(result);
    }

    // ── Helpers ────────────────────────────────────────────────────

    fn callbacks_for(&self, session_id: u64, utterance_id: u64, index: usize) -> UtteranceCallbacks {
        let signal = move |outcome: UtteranceOutcome| UtteranceSignal {
            session_id,
            utterance_id,
            index,
            outcome,
        };
        let (on_done, on_stopped, on_error) =
            (self.signals.clone(), self.signals.clone(), self.signals.clone());

        UtteranceCallbacks::new(
            move || deliver(&on_done, signal(UtteranceOutcome::Done)),
            move || deliver(&on_stopped, signal(UtteranceOutcome::Stopped)),
            move |message| deliver(&on_error, signal(UtteranceOutcome::Failed(message))),
        )
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.session.state != state {
            self.session.state = state;
            self.emitter.emit(NarrationEvent::state_changed(state));
        }
    }

    fn emit_progress(&self) {
        self.emitter
            .emit(NarrationEvent::progress(self.session.snapshot().progress()));
    }

    fn finish(&mut self, result: &NarrationResult) {
        // Awaiting callers must observe the final snapshot
        self.publish();
        if let Ok(outcome) = result {
            self.emitter.emit(NarrationEvent::Finished { outcome: *outcome });
        }
        self.resolve_waiters(result);
    }

    fn resolve_waiters(&mut self, result: &NarrationResult) {
        for waiter in self.waiters.drain(..) {
            let _ = waiter.send(result.clone());
        }
    }

    fn publish(&self) {
        let snapshot = self.session.snapshot();
        self.snapshot.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
    }
}

fn deliver(signals: &mpsc::WeakUnboundedSender<Message>, signal: UtteranceSignal) {
    if let Some(tx) = signals.upgrade() {
        let _ = tx.send(Message::Utterance(signal));
    }
}
