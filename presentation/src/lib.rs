//! Presentation layer for AkaNamen
//!
//! This crate contains CLI definitions, console output formatting
//! and the interactive quiz interface.

pub mod cli;
pub mod output;
pub mod quiz;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, PlayArgs};
pub use output::console::ConsoleFormatter;
pub use quiz::QuizRepl;
