//! Infrastructure layer for AkaNamen
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod roster;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig, FileGameConfig, FileLogConfig, FileRosterConfig};
pub use logging::JsonlGameLogger;
pub use roster::{RosterFileError, TomlRosterSource, parse_roster};
