use std::ffi::OsString;
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use homesync_core::conflict::ConflictPolicy;
use homesync_core::sync::CopyPolicy;

/// Keep files under your home directory in sync with a git repository
///
/// Any subcommand not listed below is handed to git inside the repository,
/// with live copies mirrored in before and repository edits restored after.
#[derive(Parser, Debug)]
#[command(name = "homesync")]
#[command(about, long_about = None, version)]
pub struct Cli {
    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Report what would be copied without writing anything
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Repository location (default: ~/.homesync)
    #[arg(long, global = true, value_name = "PATH", env = "HOMESYNC_DIR")]
    pub repo: Option<PathBuf>,

    /// Use specific config file
    #[arg(long, global = true, value_name = "PATH", conflicts_with = "no_config")]
    pub config: Option<PathBuf>,

    /// Ignore all config files
    #[arg(long, global = true, conflicts_with = "config")]
    pub no_config: bool,

    /// How to answer conflicts when restoring files
    #[arg(long, global = true, value_enum)]
    pub conflict: Option<ConflictMode>,

    /// When live copies replace repository copies
    #[arg(long, global = true, value_enum)]
    pub copy_policy: Option<CopyMode>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an empty repository
    Init,

    /// Start tracking files or directories under the home directory
    Track {
        /// Paths to track
        #[arg(required = true, value_name = "PATH")]
        paths: Vec<PathBuf>,
    },

    /// Copy live files into the repository
    SyncEnter,

    /// Restore repository edits to the live files
    SyncExit {
        /// Also restore files changed since this revision
        #[arg(long, value_name = "REV")]
        since: Option<String>,
    },

    /// Open a shell inside the repository, syncing around it
    Shell,

    #[command(external_subcommand)]
    External(Vec<OsString>),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ConflictMode {
    /// Ask for every conflict (default)
    Prompt,
    /// Keep the live version
    KeepLive,
    /// Overwrite the live version
    Overwrite,
    /// Back up the live version, then overwrite it
    Backup,
}

impl From<ConflictMode> for ConflictPolicy {
    fn from(mode: ConflictMode) -> Self {
        match mode {
            ConflictMode::Prompt => Self::Prompt,
            ConflictMode::KeepLive => Self::KeepLive,
            ConflictMode::Overwrite => Self::Overwrite,
            ConflictMode::Backup => Self::Backup,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CopyMode {
    /// Always copy (default)
    Unconditional,
    /// Copy only when the live file is newer
    Staleness,
}

impl From<CopyMode> for CopyPolicy {
    fn from(mode: CopyMode) -> Self {
        match mode {
            CopyMode::Unconditional => Self::Unconditional,
            CopyMode::Staleness => Self::Staleness,
        }
    }
}
