//! Roster source port
//!
//! Defines where the member records of the club come from.

use akanamen_domain::Member;
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while loading a roster
#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Roster unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed roster: {0}")]
    Malformed(String),

    #[error("Invalid record for member {member}: {message}")]
    InvalidMember { member: i64, message: String },
}

/// Source of member records
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait RosterSource: Send + Sync {
    /// Load every member record
    async fn load(&self) -> Result<Vec<Member>, RosterError>;
}
