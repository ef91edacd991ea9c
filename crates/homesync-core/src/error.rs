use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using `anyhow::Error`
pub type Result<T> = anyhow::Result<T>;

/// Failures the caller may want to tell apart.
///
/// They travel inside `anyhow::Error`; use `downcast_ref::<SyncError>()` to
/// recover them.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The repository root does not exist yet
    #[error("repository not initialized at {0} (run `homesync init`)")]
    RepositoryMissing(PathBuf),

    /// `init` target is already present
    #[error("repository already exists at {0}")]
    AlreadyExists(PathBuf),

    /// A path given on the command line does not exist
    #[error("no such file or directory: {0}")]
    PathMissing(PathBuf),

    /// Path lies inside the version-control metadata directory
    #[error("refusing to track {0}: it lies inside the repository metadata directory")]
    InsideMetadata(PathBuf),

    /// Path lies inside the repository mirror itself
    #[error("refusing to track {0}: it lies inside the repository")]
    InsideRepository(PathBuf),

    /// Path is not below the home root
    #[error("refusing to track {path}: it is not under the home directory {home}")]
    OutsideHome {
        /// Offending path
        path: PathBuf,
        /// Home root
        home: PathBuf,
    },

    /// Inbound copy failed; the whole command is aborted
    #[error("failed to copy {path} into the repository")]
    InboundCopy {
        /// Home-relative path of the file
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: anyhow::Error,
    },

    /// A version-control command exited unsuccessfully
    #[error("`git {command}` failed: {stderr}")]
    Vcs {
        /// Arguments passed to git
        command: String,
        /// Trimmed stderr of the command
        stderr: String,
    },

    /// Configuration file holds an unusable value
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
