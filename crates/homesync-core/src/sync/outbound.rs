//! Outbound sync: repository copies -> live locations, after the enclosed work

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::executor::FileOperationExecutor;
use super::{Baseline, CopyPolicy, SyncReport};
use crate::comparison::{FileHash, FileHasher};
use crate::conflict::{Conflict, ConflictResolver, Resolution};
use crate::error::Result;
use crate::paths::SyncPaths;
use crate::vcs::VersionControl;

/// One outbound pass over the candidate set
///
/// Best-effort: a file that cannot be restored produces a warning in the
/// report and the pass moves on. Nothing here can fail the command.
pub struct OutboundSync<'a> {
    paths: &'a SyncPaths,
    vcs: &'a dyn VersionControl,
    executor: FileOperationExecutor,
    policy: CopyPolicy,
    backup_suffix: &'a str,
}

impl<'a> OutboundSync<'a> {
    /// Create an outbound pass
    #[must_use]
    pub fn new(
        paths: &'a SyncPaths,
        vcs: &'a dyn VersionControl,
        executor: FileOperationExecutor,
        policy: CopyPolicy,
        backup_suffix: &'a str,
    ) -> Self {
        Self {
            paths,
            vcs,
            executor,
            policy,
            backup_suffix,
        }
    }

    /// Propagate repository edits to the live files
    ///
    /// `snapshot` is the revision recorded before the enclosed work; files
    /// that changed relative to it are candidates too, as are recorded
    /// baseline files whose repository copy moved. Live copies still
    /// matching `baseline` are overwritten without a conflict.
    pub fn run(
        &self,
        snapshot: Option<&str>,
        baseline: &Baseline,
        resolver: &mut dyn ConflictResolver,
    ) -> SyncReport {
        let mut report = SyncReport::default();

        let candidates = match self.candidates(snapshot, baseline) {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(error = %format!("{e:#}"), "Failed to list files to restore");
                report.warnings.push(format!("failed to list files to restore: {e:#}"));
                return report;
            }
        };

        for rel in candidates {
            if let Err(e) = self.sync_file(&rel, baseline, resolver, &mut report) {
                warn!(path = %rel.display(), error = %format!("{e:#}"), "Failed to restore file");
                report.warnings.push(format!("{}: {e:#}", rel.display()));
            }
        }

        report
    }

    fn candidates(&self, snapshot: Option<&str>, baseline: &Baseline) -> Result<Vec<PathBuf>> {
        let mut candidates = match self.policy {
            CopyPolicy::Unconditional => self.vcs.modified_paths(snapshot)?,
            CopyPolicy::Staleness => return self.vcs.tracked_paths(),
        };

        // A file reset to its index content during the work drops out of the
        // modified set while its live copy still holds the inbound edit
        if let Baseline::Recorded(digests) = baseline {
            let mut moved: Vec<PathBuf> = digests
                .iter()
                .filter(|(rel, _)| !candidates.contains(*rel))
                .filter(|(rel, digest)| {
                    FileHasher::hash(&self.paths.repo_path(rel))
                        .is_ok_and(|hash| hash != **digest)
                })
                .map(|(rel, _)| rel.clone())
                .collect();
            moved.sort();
            candidates.extend(moved);
        }

        Ok(candidates)
    }

    /// Digest of the content both copies last agreed on
    fn base_digest(&self, rel: &Path, baseline: &Baseline) -> Option<FileHash> {
        match baseline {
            Baseline::Recorded(digests) => digests.get(rel).copied(),
            Baseline::Collaborator(since) => {
                match self.vcs.base_content(rel, since.as_deref()) {
                    Ok(content) => content.map(|bytes| FileHasher::hash_bytes(&bytes)),
                    Err(e) => {
                        debug!(path = %rel.display(), error = %format!("{e:#}"), "no baseline");
                        None
                    }
                }
            }
            Baseline::Unknown => None,
        }
    }

    fn sync_file(
        &self,
        rel: &Path,
        baseline: &Baseline,
        resolver: &mut dyn ConflictResolver,
        report: &mut SyncReport,
    ) -> Result<()> {
        let repo = self.paths.repo_path(rel);
        let live = self.paths.live_path(rel);

        if !repo.is_file() {
            debug!(path = %rel.display(), "repository copy absent, nothing to restore");
            report.missing += 1;
            return Ok(());
        }

        if !live.exists() {
            self.executor.copy_file(&repo, &live)?;
            info!(path = %rel.display(), "repository -> live (created)");
            report.created += 1;
            return Ok(());
        }

        let live_hash = FileHasher::hash(&live)?;
        if live_hash == FileHasher::hash(&repo)? {
            report.unchanged += 1;
            return Ok(());
        }

        if self.base_digest(rel, baseline) == Some(live_hash) {
            // Only the repository side changed since the last sync
            self.executor.copy_file(&repo, &live)?;
            info!(path = %rel.display(), "repository -> live (fast-forward)");
            report.updated += 1;
            return Ok(());
        }

        report.conflicts += 1;
        let conflict = Conflict {
            rel: rel.to_path_buf(),
            live,
            repo,
        };

        if self.executor.is_dry_run() {
            info!(path = %rel.display(), "[dry run] conflict, would ask for a resolution");
            return Ok(());
        }

        let resolution = match resolver.resolve(&conflict) {
            Ok(resolution) => resolution,
            Err(e) => {
                report.warnings.push(format!(
                    "{}: no resolution obtained, keeping live version: {e:#}",
                    rel.display()
                ));
                Resolution::KeepLive
            }
        };

        match resolution {
            Resolution::KeepLive => {
                info!(path = %rel.display(), "kept live version, repository copy differs");
                report.kept_live.push(conflict.rel);
            }
            Resolution::Overwrite => {
                self.executor.copy_file(&conflict.repo, &conflict.live)?;
                info!(path = %rel.display(), "repository -> live (overwritten)");
                report.updated += 1;
            }
            Resolution::OverwriteWithBackup => {
                let attempt =
                    self.executor
                        .create_backup(&conflict.live, self.backup_suffix, &live_hash);
                let backup = match attempt {
                    Ok(backup) => backup,
                    Err(e) => {
                        // Never overwrite without a verified backup
                        warn!(
                            path = %rel.display(),
                            error = %format!("{e:#}"),
                            "Backup failed, keeping live version"
                        );
                        report.warnings.push(format!(
                            "{}: backup failed, live version kept: {e:#}",
                            rel.display()
                        ));
                        report.kept_live.push(conflict.rel);
                        return Ok(());
                    }
                };
                info!(path = %rel.display(), backup = %backup.display(), "backed up live version");
                report.backups.push(backup);

                self.executor.copy_file(&conflict.repo, &conflict.live)?;
                info!(path = %rel.display(), "repository -> live (overwritten)");
                report.updated += 1;
            }
        }

        Ok(())
    }
}
