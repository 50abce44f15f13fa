//! Interactive quiz module
//!
//! Provides a readline-based quiz game in the terminal.

mod repl;

pub use repl::{QuizInput, QuizRepl, parse_input};
