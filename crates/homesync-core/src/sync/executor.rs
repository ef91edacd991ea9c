//! File copy primitive shared by both passes and by `track`

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Local;
use filetime::FileTime;
use tracing::info;
use walkdir::WalkDir;

use crate::comparison::{FileHash, FileHasher};
use crate::error::Result;

/// Executes file operations, or only reports them in dry-run mode
#[derive(Debug, Clone, Copy)]
pub struct FileOperationExecutor {
    dry_run: bool,
}

impl FileOperationExecutor {
    /// Create a new executor
    #[must_use]
    pub const fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Whether writes are suppressed
    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Copy `source` over `dest`, preserving permissions and timestamps
    ///
    /// # Errors
    ///
    /// Returns an error if directories cannot be created or the copy fails.
    pub fn copy_file(&self, source: &Path, dest: &Path) -> Result<()> {
        if self.dry_run {
            info!("[dry run] would copy {} -> {}", source.display(), dest.display());
            return Ok(());
        }
        Self::copy_preserving(source, dest)
    }

    /// Copy a directory tree, returning the number of files copied
    ///
    /// # Errors
    ///
    /// Returns an error on the first entry that cannot be read or copied.
    pub fn copy_tree(&self, source: &Path, dest: &Path) -> Result<usize> {
        let mut copied = 0;

        for entry in WalkDir::new(source).follow_links(false) {
            let entry = entry
                .with_context(|| format!("Failed to read entry in: {}", source.display()))?;
            let rel = entry
                .path()
                .strip_prefix(source)
                .with_context(|| format!("Failed to strip prefix from {}", entry.path().display()))?;
            let target = dest.join(rel);

            if entry.file_type().is_dir() {
                if !self.dry_run {
                    fs::create_dir_all(&target).with_context(|| {
                        format!("Failed to create directory: {}", target.display())
                    })?;
                }
            } else if entry.path().is_file() {
                self.copy_file(entry.path(), &target)?;
                copied += 1;
            }
        }

        Ok(copied)
    }

    /// Copy the live file next to itself under a timestamped backup name
    ///
    /// The backup is hashed after writing and must match `expected` (the
    /// hash of the live content about to be replaced); otherwise it is
    /// removed and an error returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the backup cannot be written or verified.
    pub fn create_backup(&self, live: &Path, suffix: &str, expected: &FileHash) -> Result<PathBuf> {
        let timestamp = Local::now().format("%Y%m%d%H%M%S").to_string();
        let backup = backup_path(live, &timestamp, suffix);

        if self.dry_run {
            info!("[dry run] would back up {} -> {}", live.display(), backup.display());
            return Ok(backup);
        }

        Self::copy_preserving(live, &backup)?;

        if FileHasher::hash(&backup)? != *expected {
            // Live file changed mid-copy or the write was short
            let _ = fs::remove_file(&backup);
            anyhow::bail!(
                "Backup {} does not match {}",
                backup.display(),
                live.display()
            );
        }

        Ok(backup)
    }

    fn copy_preserving(source: &Path, dest: &Path) -> Result<()> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        // fs::copy carries the permission bits over
        fs::copy(source, dest).with_context(|| {
            format!("Failed to copy {} to {}", source.display(), dest.display())
        })?;

        let metadata = fs::metadata(source)
            .with_context(|| format!("Failed to read metadata for: {}", source.display()))?;
        filetime::set_file_times(
            dest,
            FileTime::from_last_access_time(&metadata),
            FileTime::from_last_modification_time(&metadata),
        )
        .with_context(|| format!("Failed to set timestamps on: {}", dest.display()))?;

        Ok(())
    }
}

/// `<live>.<timestamp><suffix>`, with `-N` inserted before the suffix if taken
#[must_use]
pub fn backup_path(live: &Path, timestamp: &str, suffix: &str) -> PathBuf {
    let name = live
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let candidate = live.with_file_name(format!("{name}.{timestamp}{suffix}"));
    if !candidate.exists() {
        return candidate;
    }

    (1..)
        .map(|n| live.with_file_name(format!("{name}.{timestamp}-{n}{suffix}")))
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}
