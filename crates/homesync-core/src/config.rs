//! Configuration file parsing, merging, and settings resolution
//!
//! This module handles:
//! - Config file discovery (explicit `--config` path, user config dir)
//! - TOML parsing with serde
//! - Config merging with precedence rules
//! - Validation and error reporting
//! - Resolving the effective [`Settings`] from config, CLI flags and defaults

mod discovery;
mod merge;
mod settings;
mod types;
mod validation;


use std::path::Path;

pub use discovery::{ConfigDiscovery, ConfigFiles};
pub use merge::ConfigMerger;
pub use settings::{DEFAULT_BACKUP_SUFFIX, Overrides, Settings};
pub use types::Config;
pub use validation::ConfigValidator;

use crate::error::{Result, SyncError};

/// Configuration manager that coordinates discovery, parsing, merging, and validation
pub struct ConfigManager;

impl ConfigManager {
    /// Load and merge configuration from all sources
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly requested config file is missing, or
    /// if any config file is invalid or cannot be read.
    pub fn load(cli_config_path: Option<&Path>) -> Result<Config> {
        if let Some(path) = cli_config_path {
            if !path.is_file() {
                return Err(SyncError::InvalidConfig(format!(
                    "config file not found: {}",
                    path.display()
                ))
                .into());
            }
        }

        let config_files = ConfigDiscovery::discover(cli_config_path);
        let merged = ConfigMerger::merge(&config_files)?;
        ConfigValidator::validate(&merged)?;

        Ok(merged)
    }
}
