//! Application-level configuration.
//!
//! - [`GameParams`]: what a quiz session asks and how many times

pub mod game_params;

pub use game_params::GameParams;
