//! Import Roster use case
//!
//! Loads the member records from a [`RosterSource`] into the [`Orchestra`].

use crate::ports::roster_source::{RosterError, RosterSource};
use akanamen_domain::{DomainError, ErrorKind, Orchestra};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur during a roster import
#[derive(Error, Debug)]
pub enum ImportRosterError {
    #[error("Failed to load roster: {0}")]
    Source(#[from] RosterError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Counts of an import run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    /// Records whose id was already registered
    pub skipped: usize,
}

/// Use case for importing a roster
pub struct ImportRosterUseCase<S: RosterSource + 'static> {
    source: Arc<S>,
}

impl<S: RosterSource + 'static> ImportRosterUseCase<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    /// Register every loaded member, skipping ids that are already present
    pub async fn execute(&self, orchestra: &Orchestra) -> Result<ImportSummary, ImportRosterError> {
        let members = self.source.load().await?;
        let mut summary = ImportSummary::default();

        for member in &members {
            match orchestra.register_member(member) {
                Ok(()) => summary.imported += 1,
                Err(e) if e.kind() == ErrorKind::Registration => {
                    warn!(member = %member.id, "Skipping duplicate roster entry: {}", e);
                    summary.skipped += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }

        info!(
            imported = summary.imported,
            skipped = summary.skipped,
            "Imported roster"
        );
        Ok(summary)
    }
}
