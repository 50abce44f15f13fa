//! Indexing strategy
//!
//! How an [`AttributeManager`](crate::index::AttributeManager) stores and
//! refreshes its index. Selected per attribute at construction, see
//! [`Attribute::strategy`](super::Attribute::strategy).

/// How members are split across index partitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    /// One index for all members
    Flat,
    /// Separate male and female indexes; members without gender are not indexed
    ByGender,
}

/// When an index has to be recomputed from its snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Staleness {
    /// Values only change through `update_member`
    Static,
    /// Values depend on the current date; rebuilt on the first read of a new day
    Daily,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexingStrategy {
    pub partition: Partition,
    pub staleness: Staleness,
}

impl IndexingStrategy {
    pub const fn flat() -> Self {
        Self {
            partition: Partition::Flat,
            staleness: Staleness::Static,
        }
    }

    pub const fn by_gender() -> Self {
        Self {
            partition: Partition::ByGender,
            staleness: Staleness::Static,
        }
    }

    pub const fn daily() -> Self {
        Self {
            partition: Partition::Flat,
            staleness: Staleness::Daily,
        }
    }
}

impl Default for IndexingStrategy {
    fn default() -> Self {
        Self::flat()
    }
}
