//! Repository creation and adding paths to the tracked set

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::info;

use crate::error::{Result, SyncError};
use crate::paths::{SyncPaths, absolutize};
use crate::sync::FileOperationExecutor;
use crate::vcs::{VersionControl, is_metadata_path};

/// Creates the repository and registers new paths with it
pub struct Tracker<'a> {
    paths: &'a SyncPaths,
    vcs: &'a dyn VersionControl,
    executor: FileOperationExecutor,
}

impl<'a> Tracker<'a> {
    /// Create a tracker
    #[must_use]
    pub fn new(
        paths: &'a SyncPaths,
        vcs: &'a dyn VersionControl,
        executor: FileOperationExecutor,
    ) -> Self {
        Self {
            paths,
            vcs,
            executor,
        }
    }

    /// Create an empty repository at the configured root
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::AlreadyExists`] if the root is present, or an
    /// error if it cannot be created or initialized.
    pub fn init(&self) -> Result<()> {
        let repo = self.paths.repo();
        if repo.exists() {
            return Err(SyncError::AlreadyExists(repo.to_path_buf()).into());
        }

        if self.executor.is_dry_run() {
            info!(path = %repo.display(), "[dry run] would create repository");
            return Ok(());
        }

        fs::create_dir_all(repo)
            .with_context(|| format!("Failed to create repository: {}", repo.display()))?;
        self.vcs.init()?;
        info!(path = %repo.display(), "created repository");
        Ok(())
    }

    /// Copy `arg` into the repository and register it
    ///
    /// Relative arguments are taken relative to `cwd`. Directories are
    /// copied recursively. Returns the home-relative path now tracked.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::RepositoryMissing`], [`SyncError::PathMissing`],
    /// [`SyncError::InsideMetadata`], [`SyncError::InsideRepository`],
    /// [`SyncError::OutsideHome`], or a copy/registration failure.
    pub fn track(&self, arg: &Path, cwd: &Path) -> Result<PathBuf> {
        if !self.paths.repository_exists() {
            return Err(SyncError::RepositoryMissing(self.paths.repo().to_path_buf()).into());
        }

        let candidate = if arg.is_absolute() {
            arg.to_path_buf()
        } else {
            cwd.join(arg)
        };
        if candidate.symlink_metadata().is_err() {
            return Err(SyncError::PathMissing(arg.to_path_buf()).into());
        }

        let absolute = absolutize(&candidate)
            .with_context(|| format!("Failed to resolve {}", candidate.display()))?;
        let rel = self.classify(&absolute)?;

        let repo_path = self.paths.repo_path(&rel);
        if absolute.is_dir() {
            let copied = self.executor.copy_tree(&absolute, &repo_path)?;
            info!(path = %rel.display(), files = copied, "copied directory into repository");
        } else {
            self.executor.copy_file(&absolute, &repo_path)?;
        }

        if self.executor.is_dry_run() {
            info!(path = %rel.display(), "[dry run] would register");
        } else {
            self.vcs.register(&rel)?;
            info!(path = %rel.display(), "now tracked");
        }

        Ok(rel)
    }

    /// Home-relative form of `absolute`, rejecting paths that cannot be tracked
    fn classify(&self, absolute: &Path) -> Result<PathBuf> {
        let repo = dunce::canonicalize(self.paths.repo())
            .unwrap_or_else(|_| self.paths.repo().to_path_buf());

        if let Ok(inner) = absolute.strip_prefix(&repo) {
            let err = if is_metadata_path(inner) {
                SyncError::InsideMetadata(absolute.to_path_buf())
            } else {
                SyncError::InsideRepository(absolute.to_path_buf())
            };
            return Err(err.into());
        }

        self.paths.to_home_relative(absolute).ok_or_else(|| {
            SyncError::OutsideHome {
                path: absolute.to_path_buf(),
                home: self.paths.home().to_path_buf(),
            }
            .into()
        })
    }
}
