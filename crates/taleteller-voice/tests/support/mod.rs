//! Shared fixtures for narration controller tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use taleteller_core::{ChannelEmitter, NarrationEvent};
use taleteller_voice::{
    Narrator, NarratorConfig, SpeakOptions, SpeechEngine, UtteranceCallbacks, VoiceInfo,
};
use tokio::sync::mpsc;

/// One `speak` call as seen by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct SpokenUtterance {
    pub text: String,
    pub voice_id: Option<String>,
    pub rate: f32,
}

#[derive(Default)]
struct Script {
    spoken: Vec<SpokenUtterance>,
    callbacks: Vec<Option<UtteranceCallbacks>>,
    stops: usize,
    pauses: usize,
    resumes: usize,
}

/// Speech engine driven by the test: utterances only finish when the test
/// says so, and `stop` never suppresses a callback the test fires later.
pub struct ScriptedEngine {
    script: Mutex<Script>,
    native_pause: bool,
    resume_ok: bool,
}

impl ScriptedEngine {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(Script::default()),
            native_pause: false,
            resume_ok: false,
        })
    }

    pub fn with_native_pause(resume_ok: bool) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(Script::default()),
            native_pause: true,
            resume_ok,
        })
    }

    pub fn spoken(&self) -> Vec<SpokenUtterance> {
        self.script.lock().unwrap().spoken.clone()
    }

    pub fn spoken_texts(&self) -> Vec<String> {
        self.spoken().into_iter().map(|u| u.text).collect()
    }

    pub fn last_spoken(&self) -> SpokenUtterance {
        self.spoken().last().cloned().expect("nothing spoken yet")
    }

    pub fn speak_count(&self) -> usize {
        self.script.lock().unwrap().spoken.len()
    }

    pub fn stop_count(&self) -> usize {
        self.script.lock().unwrap().stops
    }

    pub fn pause_count(&self) -> usize {
        self.script.lock().unwrap().pauses
    }

    pub fn resume_count(&self) -> usize {
        self.script.lock().unwrap().resumes
    }

    /// Report utterance `n` (zero-based, in speak order) as finished.
    pub fn finish(&self, n: usize) {
        self.take(n).done();
    }

    /// Report utterance `n` as stopped by the platform.
    pub fn interrupt(&self, n: usize) {
        self.take(n).stopped();
    }

    /// Report utterance `n` as failed.
    pub fn fail(&self, n: usize, message: &str) {
        self.take(n).error(message);
    }

    fn take(&self, n: usize) -> UtteranceCallbacks {
        self.script.lock().unwrap().callbacks[n]
            .take()
            .expect("utterance callbacks already consumed")
    }
}

impl SpeechEngine for ScriptedEngine {
    fn speak(&self, text: &str, options: &SpeakOptions, callbacks: UtteranceCallbacks) {
        let mut script = self.script.lock().unwrap();
        script.spoken.push(SpokenUtterance {
            text: text.to_string(),
            voice_id: options.voice_id.clone(),
            rate: options.rate,
        });
        script.callbacks.push(Some(callbacks));
    }

    fn supports_native_pause(&self) -> bool {
        self.native_pause
    }

    fn pause(&self) -> bool {
        self.script.lock().unwrap().pauses += 1;
        self.native_pause
    }

    fn resume(&self) -> bool {
        self.script.lock().unwrap().resumes += 1;
        self.resume_ok
    }

    fn stop(&self) {
        self.script.lock().unwrap().stops += 1;
    }

    fn list_voices(&self) -> Vec<VoiceInfo> {
        Vec::new()
    }
}

/// Spawn a narrator over `engine` with the given chunk limit, returning the
/// events it emits.
pub fn spawn_narrator(
    engine: &Arc<ScriptedEngine>,
    max_chunk_chars: usize,
) -> (Narrator, mpsc::UnboundedReceiver<NarrationEvent>) {
    let (emitter, events) = ChannelEmitter::new();
    let config = NarratorConfig {
        max_chunk_chars,
        ..NarratorConfig::default()
    };
    let engine: Arc<dyn SpeechEngine> = engine.clone();
    (Narrator::spawn(engine, Arc::new(emitter), config), events)
}

/// Drain every event emitted so far.
pub fn drain(events: &mut mpsc::UnboundedReceiver<NarrationEvent>) -> Vec<NarrationEvent> {
    let mut drained = Vec::new();
    while let Ok(event) = events.try_recv() {
        drained.push(event);
    }
    drained
}

/// Four sentences of distinct lengths; at 30 chars per chunk each sentence
/// is its own chunk.
pub const FOUR_CHUNK_TEXT: &str = "The first chunk is here. The second chunk follows. \
     Then comes the third one. Finally the fourth.";

pub const FOUR_CHUNK_LIMIT: usize = 30;

pub const FOUR_CHUNKS: [&str; 4] = [
    "The first chunk is here.",
    "The second chunk follows.",
    "Then comes the third one.",
    "Finally the fourth.",
];
