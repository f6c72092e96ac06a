//! Narrate command handler.
//!
//! Speaks a text through the simulated engine and turns stdin lines into
//! controller commands while it plays:
//!
//! | Line     | Effect                          |
//! |----------|---------------------------------|
//! | `p`      | pause                           |
//! | `r`      | resume                          |
//! | `s`      | restart from the first chunk    |
//! | `+`, `-` | speed up or slow down by 0.25x  |
//! | `v NAME` | switch to a curated voice       |
//! | `g N`    | jump to chunk N (one-based)     |
//! | `q`      | stop and exit                   |

use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use taleteller_core::domain::{MAX_SPEED_MULTIPLIER, MIN_SPEED_MULTIPLIER};
use taleteller_core::{
    ChannelEmitter, NarrationEvent, NarrationOutcome, NarrationPreferences, SettingsUpdate,
    StoryRepository,
};
use taleteller_voice::{
    Completion, Narrator, NarratorConfig, SimulatedSpeechEngine, SpeakOptions, SpeechEngine,
    VoiceCatalog, VoiceInfo,
};
use tokio::sync::mpsc;

use super::read_text_file;
use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::percent;

const SPEED_STEP: f32 = 0.25;

/// Arguments for the narrate command.
#[derive(Debug, Clone, Default)]
pub struct NarrateArgs {
    pub file: Option<PathBuf>,
    pub story: Option<i64>,
    pub voice: Option<String>,
    pub speed: Option<f32>,
    pub chunk_chars: Option<usize>,
    pub native_pause: bool,
    pub wps: Option<f32>,
}

/// One line of keyboard input while narrating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    Pause,
    Resume,
    Restart,
    Faster,
    Slower,
    Voice(String),
    /// Zero-based chunk index.
    Seek(usize),
    Quit,
    Help,
}

impl Control {
    /// Parse a stdin line. Chunk numbers are one-based on input.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let (command, argument) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(command, argument)| (command, argument.trim()));

        match (command, argument) {
            ("p", "") => Some(Self::Pause),
            ("r", "") => Some(Self::Resume),
            ("s", "") => Some(Self::Restart),
            ("+", "") => Some(Self::Faster),
            ("-", "") => Some(Self::Slower),
            ("q", "") => Some(Self::Quit),
            ("?" | "h", "") => Some(Self::Help),
            ("v", name) if !name.is_empty() => Some(Self::Voice(name.to_string())),
            ("g", number) => number
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .map(Self::Seek),
            _ => None,
        }
    }
}

/// Execute the narrate command.
pub async fn execute(ctx: &CliContext, args: NarrateArgs) -> Result<()> {
    let settings = ctx.settings_with(&SettingsUpdate {
        max_chunk_chars: args.chunk_chars.map(Some),
        baseline_words_per_second: args.wps.map(Some),
        default_voice: args.voice.clone().map(Some),
        default_speed: args.speed.map(Some),
    })?;
    let text = load_text(ctx, &args).await?;
    let config = NarratorConfig::from(&settings);

    let engine = SimulatedSpeechEngine::new(config.baseline_words_per_second)
        .with_native_pause(args.native_pause)
        .with_observer(Arc::new(|text: &str, options: &SpeakOptions| {
            println!("  ({:.2}x) {text}", options.rate);
        }));
    let available = engine.list_voices();

    let (emitter, events) = ChannelEmitter::new();
    let printer = tokio::spawn(print_events(events));
    let narrator = Narrator::spawn(Arc::new(engine), Arc::new(emitter), config);

    let mut remote = Remote {
        narrator,
        text,
        voice: settings.default_voice.clone(),
        speed: settings.effective_default_speed(),
        available,
    };
    print_controls();
    let outcome = remote.run(spawn_stdin_reader()).await;

    // Dropping the last handle shuts the controller down, which closes the
    // event stream.
    drop(remote);
    if let Err(e) = printer.await {
        tracing::debug!(error = %e, "Event printer ended abnormally");
    }

    match outcome? {
        NarrationOutcome::Completed => println!("Narration complete."),
        NarrationOutcome::Stopped => println!("Narration stopped."),
        NarrationOutcome::Ignored => println!("Nothing to narrate."),
    }
    Ok(())
}

async fn load_text(ctx: &CliContext, args: &NarrateArgs) -> Result<String, CliError> {
    match (&args.file, args.story) {
        (_, Some(id)) => {
            let stories = ctx.stories().await?;
            Ok(stories.get_by_id(id).await?.text)
        }
        (Some(file), None) => read_text_file(file),
        (None, None) => Err(CliError::Arguments(
            "Nothing to narrate: pass a file or --story ID".to_string(),
        )),
    }
}

/// Keyboard side of a narration: the handle plus the listener's current
/// voice and speed choice.
struct Remote {
    narrator: Narrator,
    text: String,
    voice: Option<String>,
    speed: f32,
    available: Vec<VoiceInfo>,
}

impl Remote {
    fn preferences(&self) -> NarrationPreferences {
        match &self.voice {
            Some(name) => VoiceCatalog::preferences_for(name, self.speed, &self.available),
            None => NarrationPreferences::with_speed(self.speed),
        }
    }

    /// Play the text and apply controls until the narration ends.
    async fn run(
        &mut self,
        mut controls: mpsc::UnboundedReceiver<String>,
    ) -> Result<NarrationOutcome, CliError> {
        let mut completion = self.narrator.play(self.text.clone(), self.preferences());
        let mut stdin_open = true;

        loop {
            tokio::select! {
                result = &mut completion => return Ok(result?),
                line = controls.recv(), if stdin_open => match line {
                    Some(line) => {
                        if let Some(next) = self.apply(&line).await? {
                            completion = next;
                        }
                    }
                    None => stdin_open = false,
                },
                _ = tokio::signal::ctrl_c() => self.narrator.stop().await?,
            }
        }
    }

    /// Apply one control line. Returns the completion of a new session when
    /// the line started one.
    async fn apply(&mut self, line: &str) -> Result<Option<Completion>, CliError> {
        if line.trim().is_empty() {
            return Ok(None);
        }
        let Some(control) = Control::parse(line) else {
            println!("Unknown control {:?}; type ? for help", line.trim());
            return Ok(None);
        };

        match control {
            Control::Pause => self.narrator.pause().await?,
            Control::Resume => {
                // The original completion stays attached to a resumed session
                drop(self.narrator.resume());
                self.narrator.status().await?;
            }
            Control::Restart => {
                let next = self.narrator.restart(self.text.clone(), self.preferences());
                // Wait for the restart to be applied so a quick second one is
                // not dropped as re-entrant
                self.narrator.status().await?;
                return Ok(Some(next));
            }
            Control::Faster => self.change_speed(SPEED_STEP).await?,
            Control::Slower => self.change_speed(-SPEED_STEP).await?,
            Control::Voice(name) => {
                if VoiceCatalog::engine_voice_id(&name, &self.available).is_none() {
                    println!("No voice named {name}; see `taleteller voices`");
                    return Ok(None);
                }
                println!("Voice {name}");
                self.voice = Some(name);
                self.narrator.set_preferences(self.preferences()).await?;
            }
            Control::Seek(index) => {
                if !self.narrator.seek_to_chunk(index).await? {
                    let total = self.narrator.snapshot().total_chunks;
                    println!("No chunk {}; the text has {total}", index + 1);
                }
            }
            Control::Quit => self.narrator.stop().await?,
            Control::Help => print_controls(),
        }
        Ok(None)
    }

    async fn change_speed(&mut self, step: f32) -> Result<(), CliError> {
        self.speed = (self.speed + step).clamp(MIN_SPEED_MULTIPLIER, MAX_SPEED_MULTIPLIER);
        println!("Speed {:.2}x", self.speed);
        self.narrator.set_preferences(self.preferences()).await?;
        Ok(())
    }
}

/// Read stdin lines on a dedicated thread so a pending read never holds up
/// runtime shutdown.
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

async fn print_events(mut events: mpsc::UnboundedReceiver<NarrationEvent>) {
    while let Some(event) = events.recv().await {
        match event {
            NarrationEvent::Progress {
                chunk,
                total,
                fraction,
            } if chunk > 0 => println!("[chunk {chunk}/{total}, {}%]", percent(fraction)),
            NarrationEvent::StateChanged { state } => println!("-- {}", state.label()),
            NarrationEvent::Error { message } => eprintln!("Speech engine error: {message}"),
            other => tracing::trace!(?other, "Narration event"),
        }
    }
}

fn print_controls() {
    println!("Controls: p pause, r resume, s restart, +/- speed, v NAME voice, g N seek, q quit");
}
