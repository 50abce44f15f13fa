//! Attributes of members and how they are indexed

#[allow(clippy::module_inception)]
pub mod attribute;
pub mod strategy;
pub mod value;

pub use attribute::Attribute;
pub use strategy::{IndexingStrategy, Partition, Staleness};
pub use value::AttributeValue;
