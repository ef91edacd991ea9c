use homesync_core::sync::FileOperationExecutor;
use homesync_core::track::Tracker;
use homesync_core::vcs::GitRepository;

use crate::commands::CommandOptions;

pub struct Init;

impl Init {
    pub fn execute(options: &CommandOptions) -> anyhow::Result<i32> {
        let settings = options.load_settings()?;
        let vcs = GitRepository::new(settings.paths.repo());

        Tracker::new(&settings.paths, &vcs, FileOperationExecutor::new(settings.dry_run)).init()?;

        println!("Initialized repository at {}", settings.paths.repo().display());
        Ok(0)
    }
}
