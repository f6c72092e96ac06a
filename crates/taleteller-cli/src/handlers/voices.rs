//! Voices command handler.

use anyhow::Result;
use taleteller_voice::{SimulatedSpeechEngine, SpeechEngine, VoiceCatalog, VoiceGender};

use crate::bootstrap::CliContext;
use crate::presentation::{format_optional, print_separator, truncate_string};

/// Execute the voices command.
///
/// Lists the curated catalog next to the engine voice each entry resolves
/// to, then every voice the engine reports.
pub fn execute(ctx: &CliContext) -> Result<()> {
    let engine =
        SimulatedSpeechEngine::new(ctx.settings.effective_baseline_words_per_second());
    let available = engine.list_voices();

    println!(
        "{:<10} {:<7} {:<7} {:<6} Engine voice",
        "Voice", "Locale", "Gender", "Speed"
    );
    print_separator(60);
    for voice in VoiceCatalog::voices() {
        let resolved = VoiceCatalog::engine_voice_id(voice.name, &available);
        println!(
            "{:<10} {:<7} {:<7} {:<6.2} {}",
            voice.name,
            voice.locale,
            gender_label(Some(voice.gender)),
            voice.speed_multiplier,
            format_optional(resolved, "(engine default)")
        );
    }

    println!("\n{} engine voice(s):", available.len());
    for voice in &available {
        println!(
            "  {:<28} {:<10} {:<7} {}",
            truncate_string(&voice.id, 28),
            voice.name,
            voice.locale,
            gender_label(voice.gender)
        );
    }

    if let Some(default_voice) = &ctx.settings.default_voice {
        println!("\nDefault voice from settings: {default_voice}");
    }

    Ok(())
}

const fn gender_label(gender: Option<VoiceGender>) -> &'static str {
    match gender {
        Some(VoiceGender::Female) => "female",
        Some(VoiceGender::Male) => "male",
        None => "--",
    }
}
