//! Roster adapters: where member records come from.

mod toml_roster;

pub use toml_roster::{RosterFileError, TomlRosterSource, parse_roster};
