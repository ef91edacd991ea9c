//! Common types and utilities for command execution

use std::path::Path;
use std::process::ExitStatus;

use anyhow::Context;
use homesync_core::config::{Config, ConfigManager, Overrides, Settings};
use homesync_core::conflict::{ConflictPolicy, ConflictResolver, InteractiveResolver, PolicyResolver};
use homesync_core::sync::{CopyPolicy, SyncReport, SyncReporter, SyncSession};
use homesync_core::vcs::GitRepository;

use crate::interactive::TerminalIo;

/// Global flags shared by every command
#[derive(Debug, Clone, Default)]
pub struct CommandOptions<'a> {
    /// `-v` count
    pub verbose: u8,
    /// Preview changes without applying
    pub dry_run: bool,
    /// Repository override (`--repo` / `HOMESYNC_DIR`)
    pub repository: Option<&'a Path>,
    /// Path to custom config file
    pub config_path: Option<&'a Path>,
    /// Skip loading all config files
    pub no_config: bool,
    /// Conflict policy override
    pub conflict: Option<ConflictPolicy>,
    /// Copy policy override
    pub copy_policy: Option<CopyPolicy>,
}

impl CommandOptions<'_> {
    /// Resolve settings from config files and flags
    pub fn load_settings(&self) -> anyhow::Result<Settings> {
        let home = dirs::home_dir().context("Failed to determine home directory")?;

        let config = if self.no_config {
            Config::default()
        } else {
            ConfigManager::load(self.config_path)?
        };

        let overrides = Overrides {
            repository: self.repository.map(Path::to_path_buf),
            copy_policy: self.copy_policy,
            conflict: self.conflict,
            dry_run: self.dry_run,
        };

        Ok(Settings::resolve(&home, &config, &overrides))
    }

    /// Settings plus a git-backed session over them
    pub fn session(&self) -> anyhow::Result<SyncSession<GitRepository>> {
        let settings = self.load_settings()?;
        let vcs = GitRepository::new(settings.paths.repo());
        Ok(SyncSession::new(settings, vcs))
    }

    /// Print a pass summary to stderr
    ///
    /// Around enclosed commands only passes that need attention are shown,
    /// unless running verbose.
    pub fn report(&self, title: &str, report: &SyncReport, always: bool) {
        if always || self.verbose > 0 || self.dry_run || !report.is_clean() {
            eprint!("{}", SyncReporter::generate_summary(title, report));
        }
    }
}

/// Resolver matching the configured conflict policy
#[must_use]
pub fn resolver(policy: ConflictPolicy) -> Box<dyn ConflictResolver> {
    match policy.fixed_resolution() {
        Some(resolution) => Box::new(PolicyResolver(resolution)),
        None => Box::new(InteractiveResolver::new(TerminalIo::stderr())),
    }
}

/// Exit code of a finished child; a signal maps to 128 + its number
#[must_use]
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command;

    #[test]
    fn test_exit_code_passthrough() {
        let status = Command::new("sh").args(["-c", "exit 7"]).status().unwrap();
        assert_eq!(exit_code(status), 7);
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_code_signal() {
        let status = Command::new("sh").args(["-c", "kill -TERM $$"]).status().unwrap();
        assert_eq!(exit_code(status), 128 + 15);
    }
}
