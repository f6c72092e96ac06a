//! Port definitions (trait abstractions) for external systems.
//!
//! These traits define the boundaries between the narration core and the
//! collaborators around it: the story store and the UI event sink.
//!
//! # Design Rules
//!
//! - No storage or transport types in any signature
//! - Repository traits are minimal store-and-fetch operations
//! - Emitters never block the caller

pub mod event_emitter;
pub mod story_repository;

use thiserror::Error;

pub use event_emitter::{ChannelEmitter, NarrationEventEmitter, NoopEmitter};
pub use story_repository::StoryRepository;

/// Domain-specific errors for repository operations.
///
/// This error type abstracts away storage implementation details (file IO,
/// JSON encoding) and gives callers a clean interface for storage failures.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The requested entity was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An entity with the same identifier already exists.
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Storage backend error (filesystem, etc.).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Core error type for semantic domain errors.
///
/// Adapters map this to their own error types (CLI exit codes, etc.).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Settings validation error.
    #[error(transparent)]
    Settings(#[from] crate::settings::SettingsError),

    /// Validation error (invalid input).
    #[error("Validation error: {0}")]
    Validation(String),
}
