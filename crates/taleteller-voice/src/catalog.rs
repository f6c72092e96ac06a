//! Curated narrator voices.
//!
//! Maps the friendly voice names shown to listeners onto whatever voices the
//! platform engine has installed, and carries a per-voice speed multiplier
//! so slower, more deliberate voices sound natural at the user's chosen speed.

use taleteller_core::NarrationPreferences;

use crate::engine::{VoiceGender, VoiceInfo};

/// A curated narrator voice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogVoice {
    /// Friendly display name, e.g. "Daniel".
    pub name: &'static str,

    /// BCP 47 locale the voice speaks.
    pub locale: &'static str,

    pub gender: VoiceGender,

    /// Multiplier applied on top of the user's speed.
    pub speed_multiplier: f32,

    /// Substrings that identify this voice in platform voice ids.
    pub id_hints: &'static [&'static str],
}

const CURATED_VOICES: &[CatalogVoice] = &[
    CatalogVoice {
        name: "Samantha",
        locale: "en-US",
        gender: VoiceGender::Female,
        speed_multiplier: 1.0,
        id_hints: &["samantha", "en-us.female"],
    },
    CatalogVoice {
        name: "Daniel",
        locale: "en-GB",
        gender: VoiceGender::Male,
        speed_multiplier: 0.95,
        id_hints: &["daniel", "en-gb.male"],
    },
    CatalogVoice {
        name: "Karen",
        locale: "en-AU",
        gender: VoiceGender::Female,
        speed_multiplier: 1.0,
        id_hints: &["karen", "en-au.female"],
    },
    CatalogVoice {
        name: "Moira",
        locale: "en-IE",
        gender: VoiceGender::Female,
        speed_multiplier: 0.95,
        id_hints: &["moira", "en-ie.female"],
    },
    CatalogVoice {
        name: "Rishi",
        locale: "en-IN",
        gender: VoiceGender::Male,
        speed_multiplier: 1.0,
        id_hints: &["rishi", "en-in.male"],
    },
    CatalogVoice {
        name: "Tessa",
        locale: "en-ZA",
        gender: VoiceGender::Female,
        speed_multiplier: 1.0,
        id_hints: &["tessa", "en-za.female"],
    },
];

/// Registry of curated narrator voices.
pub struct VoiceCatalog;

impl VoiceCatalog {
    /// All curated voices, in display order.
    #[must_use]
    pub const fn voices() -> &'static [CatalogVoice] {
        CURATED_VOICES
    }

    /// Find a curated voice by friendly name (case-insensitive).
    #[must_use]
    pub fn find(name: &str) -> Option<&'static CatalogVoice> {
        let name = name.trim();
        CURATED_VOICES
            .iter()
            .find(|voice| voice.name.eq_ignore_ascii_case(name))
    }

    /// Resolve a friendly name to an installed engine voice id.
    ///
    /// Tries, in order: exact display name, an id containing the name, then
    /// the curated id hints. Returns `None` when nothing installed matches,
    /// in which case the engine default voice is used.
    #[must_use]
    pub fn engine_voice_id(name: &str, available: &[VoiceInfo]) -> Option<String> {
        let wanted = name.trim().to_lowercase();
        if wanted.is_empty() {
            return None;
        }

        if let Some(voice) = available
            .iter()
            .find(|v| v.name.to_lowercase() == wanted)
        {
            return Some(voice.id.clone());
        }

        if let Some(voice) = available
            .iter()
            .find(|v| v.id.to_lowercase().contains(&wanted))
        {
            return Some(voice.id.clone());
        }

        let hints = Self::find(name)?.id_hints;
        available
            .iter()
            .find(|v| {
                let id = v.id.to_lowercase();
                hints.iter().any(|hint| id.contains(hint))
            })
            .map(|v| v.id.clone())
    }

    /// Curated speed multiplier for `name`, or 1.0 for unknown voices.
    #[must_use]
    pub fn speed_multiplier_for(name: &str) -> f32 {
        Self::find(name).map_or(1.0, |voice| voice.speed_multiplier)
    }

    /// Build session preferences for a friendly voice at the user's speed.
    ///
    /// The effective rate is `user_speed * speed_multiplier_for(name)`,
    /// clamped by [`NarrationPreferences::new`].
    #[must_use]
    pub fn preferences_for(
        name: &str,
        user_speed: f32,
        available: &[VoiceInfo],
    ) -> NarrationPreferences {
        let voice_id = Self::engine_voice_id(name, available);
        if voice_id.is_none() {
            tracing::warn!(voice = name, "No installed voice matches, using engine default");
        }
        NarrationPreferences::new(voice_id, user_speed * Self::speed_multiplier_for(name))
    }
}
