//! Version-control collaborator
//!
//! The sync engine never keeps its own registry of tracked files; it asks the
//! collaborator. [`GitRepository`] is the production implementation and runs
//! `git` as a child process scoped to the repository root, so the process
//! working directory is never changed.

use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Output, Stdio};

use anyhow::Context;

use crate::error::{Result, SyncError};
use crate::paths::METADATA_DIR;

/// Operations the sync engine needs from the version-control system
pub trait VersionControl {
    /// Repository root every path is relative to
    fn root(&self) -> &Path;

    /// Tracked paths, repository-relative, in collaborator order
    ///
    /// # Errors
    ///
    /// Returns an error if the collaborator cannot list its index.
    fn tracked_paths(&self) -> Result<Vec<PathBuf>>;

    /// Paths changed in the working tree relative to the recorded snapshot
    ///
    /// When `since` names a revision, paths that differ from it are included
    /// as well (this picks up a `pull` or `commit` run in between).
    ///
    /// # Errors
    ///
    /// Returns an error if the collaborator cannot compute the change set.
    fn modified_paths(&self, since: Option<&str>) -> Result<Vec<PathBuf>>;

    /// Identifier of the current snapshot, `None` before the first commit
    ///
    /// # Errors
    ///
    /// Returns an error if the collaborator cannot be queried.
    fn snapshot(&self) -> Result<Option<String>>;

    /// Content recorded for `rel` at revision `since`, or in the index when
    /// `since` is `None`; `None` if the path is not recorded there
    ///
    /// # Errors
    ///
    /// Returns an error if the collaborator cannot be queried.
    fn base_content(&self, rel: &Path, since: Option<&str>) -> Result<Option<Vec<u8>>>;

    /// Create an empty repository at [`VersionControl::root`]
    ///
    /// # Errors
    ///
    /// Returns an error if initialization fails.
    fn init(&self) -> Result<()>;

    /// Mark a repository-relative path as tracked
    ///
    /// # Errors
    ///
    /// Returns an error if registration fails.
    fn register(&self, rel: &Path) -> Result<()>;

    /// Run an arbitrary collaborator command with inherited stdio
    ///
    /// # Errors
    ///
    /// Returns an error only if the command could not be started.
    fn run(&self, args: &[&OsStr]) -> Result<ExitStatus>;
}

/// Git-backed collaborator
#[derive(Debug, Clone)]
pub struct GitRepository {
    root: PathBuf,
    program: PathBuf,
}

impl GitRepository {
    /// Open a repository at `root` using `git` from `PATH`
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_program(root, "git")
    }

    /// Open a repository using a specific git executable
    #[must_use]
    pub fn with_program(root: impl Into<PathBuf>, program: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            program: program.into(),
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.current_dir(&self.root);
        cmd
    }

    /// Run git capturing output, failing on non-zero exit
    fn capture(&self, args: &[&str]) -> Result<Output> {
        let output = self
            .command()
            .args(args)
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("Failed to run git in {}", self.root.display()))?;

        if !output.status.success() {
            return Err(SyncError::Vcs {
                command: args.join(" "),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }

        Ok(output)
    }

    /// Split NUL-separated `-z` output into paths
    fn parse_paths(stdout: &[u8]) -> Vec<PathBuf> {
        stdout
            .split(|b| *b == 0)
            .filter(|entry| !entry.is_empty())
            .map(|entry| PathBuf::from(String::from_utf8_lossy(entry).into_owned()))
            .collect()
    }
}

impl VersionControl for GitRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn tracked_paths(&self) -> Result<Vec<PathBuf>> {
        let output = self.capture(&["ls-files", "-z"])?;
        Ok(Self::parse_paths(&output.stdout))
    }

    fn modified_paths(&self, since: Option<&str>) -> Result<Vec<PathBuf>> {
        let mut seen = HashSet::new();
        let mut paths = Vec::new();

        let worktree = self.capture(&["ls-files", "-z", "--modified"])?;
        let mut batches = vec![Self::parse_paths(&worktree.stdout)];

        if let Some(revision) = since {
            let changed = self.capture(&["diff", "-z", "--name-only", revision])?;
            batches.push(Self::parse_paths(&changed.stdout));
        }

        for path in batches.into_iter().flatten() {
            if seen.insert(path.clone()) {
                paths.push(path);
            }
        }

        Ok(paths)
    }

    fn snapshot(&self) -> Result<Option<String>> {
        let output = self
            .command()
            .args(["rev-parse", "--verify", "--quiet", "HEAD"])
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("Failed to run git in {}", self.root.display()))?;

        if !output.status.success() {
            // Unborn branch: no commit recorded yet
            return Ok(None);
        }

        let revision = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok((!revision.is_empty()).then_some(revision))
    }

    fn base_content(&self, rel: &Path, since: Option<&str>) -> Result<Option<Vec<u8>>> {
        // git object names always use forward slashes
        let object = format!(
            "{}:{}",
            since.unwrap_or_default(),
            rel.to_string_lossy().replace('\\', "/")
        );
        let output = self
            .command()
            .args(["show", &object])
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("Failed to run git in {}", self.root.display()))?;

        Ok(output.status.success().then_some(output.stdout))
    }

    fn init(&self) -> Result<()> {
        self.capture(&["init", "--quiet"])?;
        Ok(())
    }

    fn register(&self, rel: &Path) -> Result<()> {
        let output = self
            .command()
            .arg("add")
            .arg("--")
            .arg(rel)
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("Failed to run git in {}", self.root.display()))?;

        if !output.status.success() {
            return Err(SyncError::Vcs {
                command: format!("add -- {}", rel.display()),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn run(&self, args: &[&OsStr]) -> Result<ExitStatus> {
        self.command()
            .args(args)
            .status()
            .with_context(|| format!("Failed to run git in {}", self.root.display()))
    }
}

/// Whether `rel` points into the metadata directory (`.git/...`)
#[must_use]
pub fn is_metadata_path(rel: &Path) -> bool {
    rel.components()
        .next()
        .is_some_and(|first| first.as_os_str() == OsStr::new(METADATA_DIR))
}
