//! Member records
//!
//! - [`member::Member`]: a member and its profile attributes
//! - [`gender::Gender`]: used to partition name indexes
//! - [`instrument::Instrument`]: the instrument hierarchy

pub mod gender;
pub mod instrument;
#[allow(clippy::module_inception)]
pub mod member;

pub use gender::Gender;
pub use instrument::Instrument;
pub use member::{Member, MemberId};
