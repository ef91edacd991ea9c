//! File timestamp comparison for the staleness copy policy

use std::fs;
use std::path::Path;
use std::time::SystemTime;

use anyhow::Context;

use crate::error::Result;

/// Timestamp comparator
pub struct TimestampComparator;

impl TimestampComparator {
    /// Check if `source` was modified strictly later than `destination`
    ///
    /// # Errors
    ///
    /// Returns an error if file metadata cannot be read.
    pub fn is_newer(source: &Path, destination: &Path) -> Result<bool> {
        Ok(Self::modified(source)? > Self::modified(destination)?)
    }

    /// Last modification time of `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the metadata or its mtime cannot be read.
    pub fn modified(path: &Path) -> Result<SystemTime> {
        fs::metadata(path)
            .and_then(|metadata| metadata.modified())
            .with_context(|| format!("No modification time for {}", path.display()))
    }
}
