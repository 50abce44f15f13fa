//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod import_roster;
pub mod questioner;
