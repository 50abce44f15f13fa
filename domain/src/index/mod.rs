//! Attribute indexes

pub mod manager;

pub use manager::{AttributeManager, DISTRACTORS, ValueBuckets};
