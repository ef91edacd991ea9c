//! Configuration merging with precedence rules
//!
//! Files are applied lowest precedence first; every key a later file sets
//! replaces the earlier value, unset keys leave it alone.

use std::fs;
use std::path::Path;

use anyhow::Context;

use super::discovery::ConfigFiles;
use super::types::Config;
use crate::error::Result;

/// Configuration merger
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge the discovered config files
    ///
    /// Precedence order (highest to lowest):
    /// 1. CLI config
    /// 2. User config
    ///
    /// # Errors
    ///
    /// Returns an error if config files cannot be read or parsed.
    pub fn merge(files: &ConfigFiles) -> Result<Config> {
        let mut merged = Config::default();

        for path in [&files.global, &files.cli].into_iter().flatten() {
            let config = Self::load_file(path)?;
            Self::overlay(&mut merged, config);
        }

        Ok(merged)
    }

    /// Parse a single config file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Apply every key set in `top` onto `base`
    pub fn overlay(base: &mut Config, top: Config) {
        let Config {
            repository,
            copy_policy,
            conflict,
            backup_suffix,
            external_paths,
            shell,
            fast_forward,
        } = top;

        if repository.is_some() {
            base.repository = repository;
        }
        if copy_policy.is_some() {
            base.copy_policy = copy_policy;
        }
        if conflict.is_some() {
            base.conflict = conflict;
        }
        if backup_suffix.is_some() {
            base.backup_suffix = backup_suffix;
        }
        if external_paths.is_some() {
            base.external_paths = external_paths;
        }
        if shell.is_some() {
            base.shell = shell;
        }
        if fast_forward.is_some() {
            base.fast_forward = fast_forward;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conflict::ConflictPolicy;
    use crate::sync::CopyPolicy;
    use tempfile::TempDir;

    #[test]
    fn test_merge_empty_config() {
        let config = ConfigMerger::merge(&ConfigFiles::default()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_merge_precedence() {
        let tmp = TempDir::new().unwrap();

        let global = tmp.path().join("global.toml");
        fs::write(&global, "copy_policy = \"staleness\"\nconflict = \"overwrite\"\n").unwrap();

        let cli = tmp.path().join("cli.toml");
        fs::write(&cli, "conflict = \"keep-live\"\n").unwrap();

        let files = ConfigFiles {
            cli: Some(cli),
            global: Some(global),
        };
        let config = ConfigMerger::merge(&files).unwrap();

        // Set only in global: kept
        assert_eq!(config.copy_policy, Some(CopyPolicy::Staleness));
        // Set in both: CLI wins
        assert_eq!(config.conflict, Some(ConflictPolicy::KeepLive));
    }

    #[test]
    fn test_merge_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        let bad = tmp.path().join("bad.toml");
        fs::write(&bad, "conflict = [").unwrap();

        let files = ConfigFiles {
            cli: Some(bad),
            global: None,
        };
        let err = ConfigMerger::merge(&files).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
