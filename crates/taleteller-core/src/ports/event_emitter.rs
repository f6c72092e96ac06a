//! Event emitter trait for narration progress notifications.
//!
//! This module defines the sink the narration controller reports into.
//! Implementations handle transport details (channels, UI bindings, etc.).

use tokio::sync::mpsc;

use crate::events::NarrationEvent;

/// Trait for emitting narration events.
///
/// The controller calls [`emit`](Self::emit) synchronously at the moment the
/// chunk index, playback state, or completion changes, so implementations
/// must not block.
///
/// # Implementations
///
/// - [`NoopEmitter`] - For tests and contexts that don't need events
/// - [`ChannelEmitter`] - Forwards into a tokio channel for async consumers
pub trait NarrationEventEmitter: Send + Sync {
    /// Emit a narration event.
    fn emit(&self, event: NarrationEvent);
}

/// A no-op event emitter.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEmitter;

impl NoopEmitter {
    /// Create a new no-op emitter.
    pub const fn new() -> Self {
        Self
    }
}

impl NarrationEventEmitter for NoopEmitter {
    fn emit(&self, _event: NarrationEvent) {
        // Intentionally do nothing
    }
}

/// Emitter that forwards every event into an unbounded tokio channel.
///
/// Sending never blocks. If the receiver has been dropped the event is
/// discarded with a debug log.
#[derive(Debug, Clone)]
pub struct ChannelEmitter {
    tx: mpsc::UnboundedSender<NarrationEvent>,
}

impl ChannelEmitter {
    /// Create an emitter and the receiver its events arrive on.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<NarrationEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl NarrationEventEmitter for ChannelEmitter {
    fn emit(&self, event: NarrationEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("Narration event receiver dropped");
        }
    }
}
