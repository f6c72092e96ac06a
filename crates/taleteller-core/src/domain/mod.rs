//! Domain types shared across adapters.

mod narration;
mod story;

pub use narration::{
    MAX_SPEED_MULTIPLIER, MIN_SPEED_MULTIPLIER, NarrationOutcome, NarrationPreferences,
    NarrationProgress, NarrationSnapshot, PlaybackState,
};
pub use story::{NewStory, Story};
