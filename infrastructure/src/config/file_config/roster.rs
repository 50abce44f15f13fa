//! Roster configuration from TOML (`[roster]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw roster configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRosterConfig {
    /// Path to the roster file with the `[[members]]` tables
    pub path: Option<PathBuf>,
}
