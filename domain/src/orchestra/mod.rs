//! The member registry

#[allow(clippy::module_inception)]
pub mod orchestra;

pub use orchestra::{Orchestra, QuestionablePair};
