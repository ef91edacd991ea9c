//! Configuration validation and error reporting

use super::types::Config;
use crate::error::{Result, SyncError};

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a configuration
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidConfig`] if a value is unusable.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(repository) = &config.repository {
            if repository.as_os_str().is_empty() {
                return Err(invalid("repository cannot be empty"));
            }
        }

        if let Some(suffix) = &config.backup_suffix {
            if suffix.trim().is_empty() {
                return Err(invalid("backup_suffix cannot be empty"));
            }
            if suffix.contains('/') || suffix.contains('\\') {
                return Err(invalid("backup_suffix cannot contain a path separator"));
            }
        }

        if let Some(shell) = &config.shell {
            if shell.trim().is_empty() {
                return Err(invalid("shell cannot be empty"));
            }
        }

        Ok(())
    }
}

fn invalid(message: &str) -> anyhow::Error {
    SyncError::InvalidConfig(message.to_string()).into()
}
