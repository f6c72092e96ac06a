//! Story records as handed to the narrator by the story store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    /// Store-assigned identifier.
    pub id: i64,

    /// Display title.
    pub title: String,

    /// Prompt the story was generated from, if known.
    pub prompt: Option<String>,

    /// Full story text. This is what gets narrated.
    pub text: String,

    /// When the story was stored.
    pub created_at: DateTime<Utc>,
}

/// A story that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStory {
    pub title: String,
    pub prompt: Option<String>,
    pub text: String,
}

impl NewStory {
    /// Create a new story record without a prompt.
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            prompt: None,
            text: text.into(),
        }
    }

    /// Attach the prompt the story was generated from.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Turn this record into a persisted [`Story`].
    pub fn into_story(self, id: i64, created_at: DateTime<Utc>) -> Story {
        Story {
            id,
            title: self.title,
            prompt: self.prompt,
            text: self.text,
            created_at,
        }
    }
}
