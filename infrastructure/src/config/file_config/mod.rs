//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to application types on use.

mod game;
mod log;
mod roster;

pub use game::FileGameConfig;
pub use log::FileLogConfig;
pub use roster::FileRosterConfig;

use akanamen_application::GameParams;
use akanamen_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Quiz settings
    pub game: FileGameConfig,
    /// Member roster location
    pub roster: FileRosterConfig,
    /// Structured game log
    pub log: FileLogConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        self.game.to_game_params().1
    }

    /// Game parameters, ignoring any issues
    pub fn game_params(&self) -> GameParams {
        self.game.to_game_params().0
    }
}
