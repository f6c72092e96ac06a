//! Resume-offset estimation for live preference changes.
//!
//! Speech engines report no playback position, so progress through an
//! utterance is inferred from wall-clock time and a calibrated speaking
//! rate. This is an approximation; callers only use it to avoid repeating
//! words already heard.

use std::time::Duration;

/// Words the engine has probably spoken after `elapsed` at `speed_multiplier`.
///
/// `floor(elapsed_secs * baseline_wps * speed_multiplier)`, clamped to
/// `total_words`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn estimate_words_spoken(
    elapsed: Duration,
    baseline_words_per_second: f32,
    speed_multiplier: f32,
    total_words: usize,
) -> usize {
    let estimate = (elapsed.as_secs_f32() * baseline_words_per_second * speed_multiplier).floor();
    if !estimate.is_finite() || estimate <= 0.0 {
        return 0;
    }
    if estimate >= total_words as f32 {
        return total_words;
    }
    estimate as usize
}

/// The words of `text` after the first `spoken`, joined by single spaces.
///
/// `None` when nothing remains.
pub fn remaining_words(text: &str, spoken: usize) -> Option<String> {
    let rest: Vec<&str> = text.split_whitespace().skip(spoken).collect();
    if rest.is_empty() {
        None
    } else {
        Some(rest.join(" "))
    }
}
