//! Domain layer for akanamen
//!
//! This crate contains the member directory and the quiz engine. It has no
//! dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Attribute indexes
//!
//! Every [`Attribute`] of a [`Member`] (names, age, instruments, ...) is kept
//! in an [`AttributeManager`]: an inverted index from values to members. The
//! index answers whether a (hint, question) pairing can currently produce a
//! quiz question, and draws one.
//!
//! ## Orchestra
//!
//! [`Orchestra`] is the registry of members. It owns one manager per
//! attribute, keeps them in sync on register/update/kick and tracks scores.

pub mod attribute;
pub mod config;
pub mod core;
pub mod index;
pub mod member;
pub mod orchestra;
pub mod quiz;
pub mod score;

// Re-export commonly used types
pub use attribute::{Attribute, AttributeValue, IndexingStrategy, Partition, Staleness};
pub use config::{ConfigIssue, ConfigIssueCode, Severity};
pub use core::{
    clock::{Clock, FixedClock, SystemClock},
    error::{DomainError, ErrorKind},
};
pub use index::{AttributeManager, ValueBuckets};
pub use member::{Gender, Instrument, Member, MemberId};
pub use orchestra::{Orchestra, QuestionablePair};
pub use quiz::{ACCEPTANCE_THRESHOLD, Answer, PHOTO_OPTIONS, Question, QuestionDraft, Solution};
pub use score::{Score, ScorePeriod, UserScore};
