//! Configuration file loading for akanamen
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./akanamen.toml` or `./.akanamen.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/akanamen/config.toml`
//! 4. Fallback: `~/.config/akanamen/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{FileConfig, FileGameConfig, FileLogConfig, FileRosterConfig};
pub use loader::ConfigLoader;
