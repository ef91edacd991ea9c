//! Inbound sync: live copies -> repository, before the enclosed work

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info};

use super::executor::FileOperationExecutor;
use super::{CopyPolicy, SyncReport};
use crate::comparison::{FileHash, FileHasher, TimestampComparator};
use crate::error::{Result, SyncError};
use crate::paths::SyncPaths;
use crate::vcs::VersionControl;

/// One inbound pass over the tracked set
///
/// Fail-fast: the first file that cannot be mirrored aborts the pass, since
/// the work that follows must see a complete snapshot.
pub struct InboundSync<'a> {
    paths: &'a SyncPaths,
    vcs: &'a dyn VersionControl,
    executor: FileOperationExecutor,
    policy: CopyPolicy,
}

impl<'a> InboundSync<'a> {
    /// Create an inbound pass
    #[must_use]
    pub fn new(
        paths: &'a SyncPaths,
        vcs: &'a dyn VersionControl,
        executor: FileOperationExecutor,
        policy: CopyPolicy,
    ) -> Self {
        Self {
            paths,
            vcs,
            executor,
            policy,
        }
    }

    /// Mirror every tracked live file into the repository
    ///
    /// Alongside the report, returns the digest of every file whose two
    /// copies are identical once the pass is done.
    ///
    /// # Errors
    ///
    /// Returns an error if the tracked set cannot be listed, or
    /// [`SyncError::InboundCopy`] naming the first file that failed.
    pub fn run(&self) -> Result<(SyncReport, HashMap<PathBuf, FileHash>)> {
        let mut report = SyncReport::default();
        let mut baseline = HashMap::new();
        let tracked = self
            .vcs
            .tracked_paths()
            .context("Failed to list tracked files")?;

        for rel in tracked {
            let live = self.paths.live_path(&rel);
            if !live.is_file() {
                // Tracked but not materialized on this machine
                debug!(path = %rel.display(), "live file absent, skipping");
                report.missing += 1;
                continue;
            }

            let repo = self.paths.repo_path(&rel);
            let existed = repo.exists();

            let copy = || -> Result<bool> {
                if existed
                    && self.policy == CopyPolicy::Staleness
                    && !TimestampComparator::is_newer(&live, &repo)?
                {
                    return Ok(false);
                }
                self.executor.copy_file(&live, &repo)?;
                Ok(true)
            };

            match copy() {
                Ok(false) => report.unchanged += 1,
                Ok(true) => {
                    info!(path = %rel.display(), "live -> repository");
                    if existed {
                        report.updated += 1;
                    } else {
                        report.created += 1;
                    }
                }
                Err(source) => {
                    return Err(SyncError::InboundCopy { path: rel, source }.into());
                }
            }

            if let Some(digest) = agreed_digest(&live, &repo) {
                baseline.insert(rel, digest);
            }
        }

        Ok((report, baseline))
    }
}

/// Digest of `live` if `repo` holds the same bytes
fn agreed_digest(live: &Path, repo: &Path) -> Option<FileHash> {
    let live_hash = FileHasher::hash(live).ok()?;
    let repo_hash = FileHasher::hash(repo).ok()?;
    (live_hash == repo_hash).then_some(live_hash)
}
