//! Effective settings for one invocation

use std::path::{Path, PathBuf};

use super::types::Config;
use crate::conflict::ConflictPolicy;
use crate::paths::{DEFAULT_REPOSITORY_DIR, ExternalPathPolicy, SyncPaths, resolve_under_home};
use crate::sync::CopyPolicy;

/// Suffix used for backup files unless configured otherwise
pub const DEFAULT_BACKUP_SUFFIX: &str = ".homesync-backup";

/// Values given on the command line or through the environment
///
/// These take precedence over every config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Repository root (`--repo` / `HOMESYNC_DIR`)
    pub repository: Option<PathBuf>,
    /// Inbound copy policy (`--copy-policy`)
    pub copy_policy: Option<CopyPolicy>,
    /// Conflict policy (`--conflict`)
    pub conflict: Option<ConflictPolicy>,
    /// Report without writing (`--dry-run`)
    pub dry_run: bool,
}

/// Fully resolved settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Home and repository roots
    pub paths: SyncPaths,
    /// Inbound copy policy, also selecting the outbound candidate set
    pub copy_policy: CopyPolicy,
    /// How outbound conflicts are answered
    pub conflict: ConflictPolicy,
    /// Suffix appended to backup files
    pub backup_suffix: String,
    /// Translation of path arguments outside the home root
    pub external_paths: ExternalPathPolicy,
    /// Program spawned by `homesync shell`, when configured
    pub shell: Option<String>,
    /// Overwrite live copies that did not change since the last sync
    pub fast_forward: bool,
    /// Report without writing
    pub dry_run: bool,
}

impl Settings {
    /// Combine defaults, the merged config and overrides (highest wins)
    #[must_use]
    pub fn resolve(home: &Path, config: &Config, overrides: &Overrides) -> Self {
        let repository = overrides
            .repository
            .as_deref()
            .or(config.repository.as_deref())
            .map_or_else(
                || home.join(DEFAULT_REPOSITORY_DIR),
                |value| resolve_under_home(home, value),
            );

        Self {
            paths: SyncPaths::new(home, repository),
            copy_policy: overrides
                .copy_policy
                .or(config.copy_policy)
                .unwrap_or_default(),
            conflict: overrides.conflict.or(config.conflict).unwrap_or_default(),
            backup_suffix: config
                .backup_suffix
                .clone()
                .unwrap_or_else(|| DEFAULT_BACKUP_SUFFIX.to_string()),
            external_paths: config.external_paths.unwrap_or_default(),
            shell: config.shell.clone(),
            fast_forward: config.fast_forward.unwrap_or(true),
            dry_run: overrides.dry_run,
        }
    }
}
