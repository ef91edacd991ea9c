//! Enter -> work -> exit sequencing

use anyhow::Context;
use tracing::warn;

use super::executor::FileOperationExecutor;
use super::inbound::InboundSync;
use super::outbound::OutboundSync;
use super::{Baseline, SyncReport};
use crate::config::Settings;
use crate::conflict::ConflictResolver;
use crate::error::{Result, SyncError};
use crate::vcs::VersionControl;

/// Result of the inbound phase
#[derive(Debug, Clone, Default)]
pub struct EnterOutcome {
    /// Revision recorded before the enclosed work, if any
    pub snapshot: Option<String>,
    /// Inbound pass report
    pub report: SyncReport,
    /// Files whose two copies agreed after the pass
    pub baseline: Baseline,
}

/// Result of a full session
#[derive(Debug, Clone, Default)]
pub struct SessionOutcome {
    /// Exit status of the enclosed work
    pub status: i32,
    /// Inbound pass report
    pub inbound: SyncReport,
    /// Outbound pass report
    pub outbound: SyncReport,
}

/// Binds settings and the collaborator for the two sync phases
pub struct SyncSession<V> {
    settings: Settings,
    vcs: V,
    executor: FileOperationExecutor,
}

impl<V: VersionControl> SyncSession<V> {
    /// Create a session
    #[must_use]
    pub fn new(settings: Settings, vcs: V) -> Self {
        let executor = FileOperationExecutor::new(settings.dry_run);
        Self {
            settings,
            vcs,
            executor,
        }
    }

    /// Effective settings
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Version-control collaborator
    #[must_use]
    pub const fn vcs(&self) -> &V {
        &self.vcs
    }

    fn ensure_repository(&self) -> Result<()> {
        if self.settings.paths.repository_exists() {
            Ok(())
        } else {
            Err(SyncError::RepositoryMissing(self.settings.paths.repo().to_path_buf()).into())
        }
    }

    /// Inbound phase: record the snapshot, then mirror live files inward
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::RepositoryMissing`], a collaborator error, or
    /// [`SyncError::InboundCopy`]. In every case the enclosed work must not
    /// run.
    pub fn enter(&self) -> Result<EnterOutcome> {
        self.ensure_repository()?;

        let snapshot = self
            .vcs
            .snapshot()
            .context("Failed to read repository snapshot")?;

        let (report, digests) = InboundSync::new(
            &self.settings.paths,
            &self.vcs,
            self.executor,
            self.settings.copy_policy,
        )
        .run()?;

        let baseline = if self.settings.fast_forward {
            Baseline::Recorded(digests)
        } else {
            Baseline::Unknown
        };

        Ok(EnterOutcome {
            snapshot,
            report,
            baseline,
        })
    }

    /// Outbound phase on its own
    ///
    /// Returns `prior_status` unchanged together with the pass report. The
    /// collaborator's record at `snapshot` (its index when `None`) serves as
    /// the baseline.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::RepositoryMissing`] only; once the pass has
    /// started every failure becomes a warning in the report.
    pub fn exit(
        &self,
        prior_status: i32,
        snapshot: Option<&str>,
        resolver: &mut dyn ConflictResolver,
    ) -> Result<(i32, SyncReport)> {
        self.ensure_repository()?;
        let baseline = if self.settings.fast_forward {
            Baseline::Collaborator(snapshot.map(str::to_string))
        } else {
            Baseline::Unknown
        };
        Ok((prior_status, self.outbound(snapshot, &baseline, resolver)))
    }

    fn outbound(
        &self,
        snapshot: Option<&str>,
        baseline: &Baseline,
        resolver: &mut dyn ConflictResolver,
    ) -> SyncReport {
        OutboundSync::new(
            &self.settings.paths,
            &self.vcs,
            self.executor,
            self.settings.copy_policy,
            &self.settings.backup_suffix,
        )
        .run(snapshot, baseline, resolver)
    }

    /// Run `work` between the two phases
    ///
    /// The outbound phase runs whenever the work was started, whatever it
    /// returned; the work's status is passed through untouched.
    ///
    /// # Errors
    ///
    /// Returns an inbound error (work and outbound never ran), or the
    /// work's own error after the outbound phase completed.
    pub fn run<W>(&self, resolver: &mut dyn ConflictResolver, work: W) -> Result<SessionOutcome>
    where
        W: FnOnce(&Self) -> Result<i32>,
    {
        let entered = self.enter()?;

        let result = work(self);
        if let Err(e) = &result {
            warn!(error = %format!("{e:#}"), "Enclosed command failed, restoring files anyway");
        }

        let outbound = self.outbound(entered.snapshot.as_deref(), &entered.baseline, resolver);
        let status = result?;

        Ok(SessionOutcome {
            status,
            inbound: entered.report,
            outbound,
        })
    }
}
