//! Speech engine boundary: the platform text-to-speech service the narrator
//! drives one utterance at a time.
//!
//! The [`Narrator`](crate::narrator::Narrator) operates on an
//! `Arc<dyn SpeechEngine>` so platform engines can be swapped without
//! touching the session logic.
//!
//! ## Implementations
//!
//! | Module          | Native pause | Notes                                  |
//! |-----------------|--------------|----------------------------------------|
//! | [`simulated`]   | optional     | tokio timers, used by the CLI and demos |

pub mod simulated;

pub use simulated::{SimulatedSpeechEngine, UtteranceObserver};

// ── Shared types ───────────────────────────────────────────────────

/// Options applied to a single utterance.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakOptions {
    /// Engine voice identifier; `None` uses the engine default.
    pub voice_id: Option<String>,

    /// Rate multiplier relative to the engine's default speaking rate.
    pub rate: f32,
}

impl Default for SpeakOptions {
    fn default() -> Self {
        Self {
            voice_id: None,
            rate: 1.0,
        }
    }
}

/// Information about a voice installed in the engine.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceInfo {
    /// Engine voice identifier (passed back in [`SpeakOptions::voice_id`]).
    pub id: String,

    /// Human-readable display name.
    pub name: String,

    /// BCP 47 locale, e.g. `en-GB`.
    pub locale: String,

    /// Gender, when the engine reports one.
    pub gender: Option<VoiceGender>,
}

/// Voice gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VoiceGender {
    Female,
    Male,
}

type Callback = Box<dyn FnOnce() + Send + 'static>;
type ErrorCallback = Box<dyn FnOnce(String) + Send + 'static>;

/// Completion callbacks for one utterance.
///
/// Every method consumes the bundle, so an engine can report exactly one of
/// done, stopped, or error per utterance.
pub struct UtteranceCallbacks {
    on_done: Callback,
    on_stopped: Callback,
    on_error: ErrorCallback,
}

impl UtteranceCallbacks {
    pub fn new(
        on_done: impl FnOnce() + Send + 'static,
        on_stopped: impl FnOnce() + Send + 'static,
        on_error: impl FnOnce(String) + Send + 'static,
    ) -> Self {
        Self {
            on_done: Box::new(on_done),
            on_stopped: Box::new(on_stopped),
            on_error: Box::new(on_error),
        }
    }

    /// Callbacks that ignore every outcome.
    pub fn noop() -> Self {
        Self::new(|| {}, || {}, |_| {})
    }

    /// The utterance finished naturally.
    pub fn done(self) {
        (self.on_done)();
    }

    /// The utterance was cancelled by [`SpeechEngine::stop`] or replaced.
    pub fn stopped(self) {
        (self.on_stopped)();
    }

    /// The engine failed to speak the utterance.
    pub fn error(self, message: impl Into<String>) {
        (self.on_error)(message.into());
    }
}

impl std::fmt::Debug for UtteranceCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UtteranceCallbacks").finish_non_exhaustive()
    }
}

// ── Engine trait ───────────────────────────────────────────────────

/// Platform text-to-speech engine.
///
/// Calls return immediately; the outcome of [`speak`](Self::speak) arrives
/// later through the supplied [`UtteranceCallbacks`], possibly on another
/// thread. Callbacks may fire after the caller has lost interest, so callers
/// must fence them.
pub trait SpeechEngine: Send + Sync {
    /// Begin speaking `text`. Cancels any utterance already in progress.
    fn speak(&self, text: &str, options: &SpeakOptions, callbacks: UtteranceCallbacks);

    /// Whether [`pause`](Self::pause) can suspend an utterance mid-way.
    fn supports_native_pause(&self) -> bool;

    /// Suspend the current utterance. Returns `true` if the engine paused
    /// natively and can later [`resume`](Self::resume).
    fn pause(&self) -> bool;

    /// Continue a natively paused utterance. Returns `false` if there was
    /// nothing to resume.
    fn resume(&self) -> bool;

    /// Cancel the current utterance, if any. Its `stopped` callback fires.
    fn stop(&self);

    /// Voices installed in the engine.
    fn list_voices(&self) -> Vec<VoiceInfo>;
}
