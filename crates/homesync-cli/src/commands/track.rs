use std::path::PathBuf;

use anyhow::Context;
use homesync_core::sync::FileOperationExecutor;
use homesync_core::track::Tracker;
use homesync_core::vcs::GitRepository;

use crate::commands::CommandOptions;

pub struct Track;

impl Track {
    /// Track each path in order, stopping at the first failure
    pub fn execute(paths: &[PathBuf], options: &CommandOptions) -> anyhow::Result<i32> {
        let settings = options.load_settings()?;
        let vcs = GitRepository::new(settings.paths.repo());
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        let tracker = Tracker::new(&settings.paths, &vcs, FileOperationExecutor::new(settings.dry_run));

        for path in paths {
            let rel = tracker.track(path, &cwd)?;
            println!("Tracking {}", rel.display());
        }

        Ok(0)
    }
}
