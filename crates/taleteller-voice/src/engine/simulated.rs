//! Timer-driven speech engine.
//!
//! Speaks nothing; each utterance lasts as long as a real voice would take
//! to read it (`words / (words_per_second * rate)`) and then reports done.
//! Used by the CLI and by tests that want realistic timing without audio
//! hardware.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use taleteller_core::settings::DEFAULT_BASELINE_WORDS_PER_SECOND;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use super::{SpeakOptions, SpeechEngine, UtteranceCallbacks, VoiceGender, VoiceInfo};
use crate::text_utils::word_count;

/// Hook invoked with the text and options of every utterance as it starts.
pub type UtteranceObserver = Arc<dyn Fn(&str, &SpeakOptions) + Send + Sync>;

/// Voices the simulated engine reports as installed.
const SIMULATED_VOICES: &[(&str, &str, VoiceGender)] = &[
    ("Samantha", "en-US", VoiceGender::Female),
    ("Fred", "en-US", VoiceGender::Male),
    ("Daniel", "en-GB", VoiceGender::Male),
    ("Karen", "en-AU", VoiceGender::Female),
    ("Moira", "en-IE", VoiceGender::Female),
    ("Rishi", "en-IN", VoiceGender::Male),
    ("Tessa", "en-ZA", VoiceGender::Female),
];

/// Speech engine that simulates utterance duration with tokio timers.
///
/// Must be driven from inside a tokio runtime; [`speak`](SpeechEngine::speak)
/// outside one reports an error through the utterance callbacks.
pub struct SimulatedSpeechEngine {
    words_per_second: f32,
    native_pause: bool,
    observer: Option<UtteranceObserver>,
    state: Arc<Mutex<EngineState>>,
}

#[derive(Default)]
struct EngineState {
    next_id: u64,
    active: Option<ActiveUtterance>,
}

struct ActiveUtterance {
    id: u64,
    callbacks: UtteranceCallbacks,
    /// Time left to speak as of `started`.
    remaining: Duration,
    started: Instant,
    /// `None` while natively paused.
    timer: Option<JoinHandle<()>>,
}

impl SimulatedSpeechEngine {
    /// Engine reading at `words_per_second` at rate 1.0, without native pause.
    pub fn new(words_per_second: f32) -> Self {
        let words_per_second = if words_per_second.is_finite() && words_per_second > 0.0 {
            words_per_second
        } else {
            DEFAULT_BASELINE_WORDS_PER_SECOND
        };

        Self {
            words_per_second,
            native_pause: false,
            observer: None,
            state: Arc::new(Mutex::new(EngineState::default())),
        }
    }

    /// Enable or disable mid-utterance pause and resume.
    #[must_use]
    pub const fn with_native_pause(mut self, enabled: bool) -> Self {
        self.native_pause = enabled;
        self
    }

    /// Install a hook that sees every utterance as it starts.
    #[must_use]
    pub fn with_observer(mut self, observer: UtteranceObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// How long `text` takes to read at `rate`.
    #[allow(clippy::cast_precision_loss)]
    pub fn utterance_duration(&self, text: &str, rate: f32) -> Duration {
        let rate = if rate.is_finite() && rate > 0.0 { rate } else { 1.0 };
        let words = word_count(text).max(1) as f32;
        Duration::from_secs_f32(words / (self.words_per_second * rate))
    }

    fn lock(&self) -> MutexGuard<'_, EngineState> {
        lock_state(&self.state)
    }

    /// Remove the active utterance and cancel its timer.
    fn take_active(&self) -> Option<ActiveUtterance> {
        let active = self.lock().active.take();
        if let Some(timer) = active.as_ref().and_then(|a| a.timer.as_ref()) {
            timer.abort();
        }
        active
    }
}

impl Default for SimulatedSpeechEngine {
    fn default() -> Self {
        Self::new(DEFAULT_BASELINE_WORDS_PER_SECOND)
    }
}

impl std::fmt::Debug for SimulatedSpeechEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedSpeechEngine")
            .field("words_per_second", &self.words_per_second)
            .field("native_pause", &self.native_pause)
            .finish_non_exhaustive()
    }
}

impl SpeechEngine for SimulatedSpeechEngine {
    fn speak(&self, text: &str, options: &SpeakOptions, callbacks: UtteranceCallbacks) {
        if let Some(previous) = self.take_active() {
            previous.callbacks.stopped();
        }

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            callbacks.error("simulated speech engine requires a tokio runtime");
            return;
        };

        if let Some(observer) = &self.observer {
            observer(text, options);
        }

        let duration = self.utterance_duration(text, options.rate);
        tracing::trace!(
            words = word_count(text),
            rate = options.rate,
            duration_ms = duration.as_millis(),
            "Simulated utterance started"
        );

        let mut state = self.lock();
        state.next_id += 1;
        let id = state.next_id;
        let timer = arm_timer(&runtime, &self.state, id, duration);
        state.active = Some(ActiveUtterance {
            id,
            callbacks,
            remaining: duration,
            started: Instant::now(),
            timer: Some(timer),
        });
    }

    fn supports_native_pause(&self) -> bool {
        self.native_pause
    }

    fn pause(&self) -> bool {
        if !self.native_pause {
            return false;
        }

        let mut state = self.lock();
        let Some(active) = state.active.as_mut() else {
            return false;
        };
        let Some(timer) = active.timer.take() else {
            // Already paused
            return true;
        };

        timer.abort();
        active.remaining = active.remaining.saturating_sub(active.started.elapsed());
        tracing::trace!(remaining_ms = active.remaining.as_millis(), "Simulated utterance paused");
        true
    }

    fn resume(&self) -> bool {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            return false;
        };

        let mut state = self.lock();
        let Some(active) = state.active.as_mut() else {
            return false;
        };
        if active.timer.is_some() {
            return false;
        }

        active.started = Instant::now();
        active.timer = Some(arm_timer(&runtime, &self.state, active.id, active.remaining));
        true
    }

    fn stop(&self) {
        if let Some(active) = self.take_active() {
            active.callbacks.stopped();
        }
    }

    fn list_voices(&self) -> Vec<VoiceInfo> {
        SIMULATED_VOICES
            .iter()
            .map(|(name, locale, gender)| VoiceInfo {
                id: format!("sim.{locale}.{name}"),
                name: (*name).to_string(),
                locale: (*locale).to_string(),
                gender: Some(*gender),
            })
            .collect()
    }
}

fn lock_state(state: &Mutex<EngineState>) -> MutexGuard<'_, EngineState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Spawn the timer that reports utterance `id` done after `delay`.
fn arm_timer(
    runtime: &tokio::runtime::Handle,
    state: &Arc<Mutex<EngineState>>,
    id: u64,
    delay: Duration,
) -> JoinHandle<()> {
    let state = Arc::clone(state);
    runtime.spawn(async move {
        tokio::time::sleep(delay).await;

        let finished = {
            let mut guard = lock_state(&state);
            if guard.active.as_ref().is_some_and(|a| a.id == id) {
                guard.active.take()
            } else {
                None
            }
        };

        if let Some(utterance) = finished {
            utterance.callbacks.done();
        }
    })
}
