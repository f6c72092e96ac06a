//! Story repository trait definition.
//!
//! This port is the store-and-fetch interface the narrator's surroundings use
//! for story text records. Implementations handle all storage details.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{NewStory, Story};

/// Repository for story persistence.
///
/// # Design Rules
///
/// - Store-and-fetch only: insert, get, delete
/// - Library listing, search and access control live outside this port
#[async_trait]
pub trait StoryRepository: Send + Sync {
    /// Persist a new story and return it with its assigned id.
    async fn insert(&self, story: &NewStory) -> Result<Story, RepositoryError>;

    /// Fetch a story by id.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if the story doesn't exist.
    async fn get_by_id(&self, id: i64) -> Result<Story, RepositoryError>;

    /// Delete a story by id.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if the story doesn't exist.
    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;
}
