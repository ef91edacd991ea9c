//! Bidirectional synchronization engine
//!
//! Inbound sync mirrors live files into the repository before the enclosed
//! work and aborts on the first failure. Outbound sync restores repository
//! edits afterwards, file by file, asking through a [`ConflictResolver`]
//! whenever both copies diverged, and only ever warns.
//!
//! [`ConflictResolver`]: crate::conflict::ConflictResolver

mod executor;
mod inbound;
mod outbound;
mod reporting;
mod session;

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::comparison::FileHash;

pub use executor::{FileOperationExecutor, backup_path};
pub use inbound::InboundSync;
pub use outbound::OutboundSync;
pub use reporting::SyncReporter;
pub use session::{EnterOutcome, SessionOutcome, SyncSession};

/// When inbound sync copies a live file over its repository copy
///
/// The policy also picks the outbound candidate set, so one invocation never
/// mixes timestamp and change-set reasoning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CopyPolicy {
    /// Always copy; outbound looks at files changed since the snapshot
    #[default]
    Unconditional,
    /// Copy only if the live mtime is strictly newer; outbound looks at
    /// every tracked file
    Staleness,
}

/// Content both copies last agreed on, per file
///
/// When a live copy still matches its baseline only the repository side
/// moved, so outbound sync restores it without raising a conflict.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Baseline {
    /// Digests recorded by the inbound pass of the same invocation
    Recorded(HashMap<PathBuf, FileHash>),
    /// Content the collaborator recorded at a revision, or in its index
    Collaborator(Option<String>),
    /// Nothing known: every divergence is a conflict
    #[default]
    Unknown,
}

/// Statistics and named outcomes of one pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Destination did not exist and was created
    pub created: usize,
    /// Destination existed and was overwritten
    pub updated: usize,
    /// Nothing to do (same content, or not stale)
    pub unchanged: usize,
    /// Source side absent, file skipped
    pub missing: usize,
    /// Divergent files found
    pub conflicts: usize,
    /// Conflicts left divergent (skip, invalid choice, failed backup)
    pub kept_live: Vec<PathBuf>,
    /// Backup files written
    pub backups: Vec<PathBuf>,
    /// Per-file failures
    pub warnings: Vec<String>,
}

impl SyncReport {
    /// Whether every candidate ended up with identical copies
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.kept_live.is_empty() && self.warnings.is_empty()
    }
}
