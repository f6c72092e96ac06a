//! Narration error types.

/// Errors surfaced to callers awaiting a narration.
///
/// `Clone` because one engine failure resolves every waiter attached to the
/// session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NarratorError {
    /// The speech engine reported a failure for the in-flight utterance.
    #[error("Speech engine error: {0}")]
    Engine(String),

    /// The controller task has shut down.
    #[error("Narration controller is not running")]
    ControllerClosed,
}
