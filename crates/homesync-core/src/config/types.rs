//! Configuration types and structures

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::conflict::ConflictPolicy;
use crate::paths::ExternalPathPolicy;
use crate::sync::CopyPolicy;

/// Contents of one configuration file
///
/// Every key is optional; unset keys fall through to lower-precedence files
/// and finally to built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Repository root (absolute, `~/`-prefixed, or relative to home)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<PathBuf>,

    /// Inbound copy policy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copy_policy: Option<CopyPolicy>,

    /// How outbound conflicts are answered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflict: Option<ConflictPolicy>,

    /// Suffix appended to backup files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_suffix: Option<String>,

    /// Translation of existing path arguments outside the home root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_paths: Option<ExternalPathPolicy>,

    /// Program spawned by `homesync shell`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shell: Option<String>,

    /// Restore repository edits over live copies unchanged since the last
    /// sync without treating them as conflicts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fast_forward: Option<bool>,
}
