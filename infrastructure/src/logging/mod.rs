//! Logging infrastructure: structured game-event logging.
//!
//! Provides [`JsonlGameLogger`], a JSONL file writer that implements
//! the [`GameLogger`](akanamen_application::GameLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlGameLogger;
