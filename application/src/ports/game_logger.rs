//! Port for structured game-event logging.
//!
//! Defines the [`GameLogger`] trait for recording quiz events (questions
//! asked, answers given, finished games) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the game
//! transcript in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured game event for logging.
pub struct GameEvent {
    /// Event type identifier (e.g., "question_asked", "answer_given").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl GameEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging game events to a structured log.
///
/// The `log` method is synchronous and non-fallible; adapters swallow their
/// own write errors.
pub trait GameLogger: Send + Sync {
    /// Record a game event.
    fn log(&self, event: GameEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoGameLogger;

impl GameLogger for NoGameLogger {
    fn log(&self, _event: GameEvent) {}
}
