//! Application layer for AkaNamen
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::GameParams;
pub use ports::{
    game_logger::{GameEvent, GameLogger, NoGameLogger},
    roster_source::{RosterError, RosterSource},
};
pub use use_cases::import_roster::{ImportRosterError, ImportRosterUseCase, ImportSummary};
pub use use_cases::questioner::{AnswerOutcome, Questioner, QuestionerError};
