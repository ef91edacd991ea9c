//! Home/repository path layout and argument path translation

use std::ffi::{OsStr, OsString};
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default repository directory name under the home root
pub const DEFAULT_REPOSITORY_DIR: &str = ".homesync";

/// Name of git's metadata directory inside the repository
pub const METADATA_DIR: &str = ".git";

/// The two roots every tracked file is mirrored between
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncPaths {
    home: PathBuf,
    repo: PathBuf,
}

impl SyncPaths {
    /// Create a layout from explicit roots
    #[must_use]
    pub fn new(home: impl Into<PathBuf>, repo: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            repo: repo.into(),
        }
    }

    /// Home root
    #[must_use]
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Repository root
    #[must_use]
    pub fn repo(&self) -> &Path {
        &self.repo
    }

    /// Live location of a tracked file
    #[must_use]
    pub fn live_path(&self, rel: &Path) -> PathBuf {
        self.home.join(rel)
    }

    /// Repository location of a tracked file
    #[must_use]
    pub fn repo_path(&self, rel: &Path) -> PathBuf {
        self.repo.join(rel)
    }

    /// Whether the repository root is present
    #[must_use]
    pub fn repository_exists(&self) -> bool {
        self.repo.is_dir()
    }

    /// Rewrite an absolute path under the home root as a home-relative one
    ///
    /// Both sides are compared canonicalised when possible so a symlinked
    /// home directory still matches.
    #[must_use]
    pub fn to_home_relative(&self, path: &Path) -> Option<PathBuf> {
        let home = dunce::canonicalize(&self.home).unwrap_or_else(|_| self.home.clone());
        path.strip_prefix(&home)
            .or_else(|_| path.strip_prefix(&self.home))
            .ok()
            .filter(|rel| !rel.as_os_str().is_empty())
            .map(Path::to_path_buf)
    }
}

/// Expand a leading `~/` and anchor relative paths at `home`
#[must_use]
pub fn resolve_under_home(home: &Path, value: &Path) -> PathBuf {
    let mut components = value.components();
    match components.next() {
        Some(Component::Normal(first)) if first == OsStr::new("~") => {
            home.join(components.as_path())
        }
        _ if value.is_absolute() => value.to_path_buf(),
        _ => home.join(value),
    }
}

/// Absolute form of an existing path with symlinked parents resolved
///
/// The final component is kept as named, so a symlinked dotfile stays at its
/// own location instead of jumping to its target.
///
/// # Errors
///
/// Returns an error if the path (or its parent) cannot be resolved.
pub fn absolutize(path: &Path) -> std::io::Result<PathBuf> {
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => {
            let parent = if parent.as_os_str().is_empty() {
                Path::new(".")
            } else {
                parent
            };
            Ok(dunce::canonicalize(parent)?.join(name))
        }
        _ => dunce::canonicalize(path),
    }
}

/// What to do with an existing path argument outside the home root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExternalPathPolicy {
    /// Return the argument exactly as given
    #[default]
    Unchanged,
    /// Re-root relative to the caller's current directory so git resolves
    /// it inside the repository
    Reroot,
}

/// Translates path-shaped command arguments into the home-relative form the
/// repository mirror uses
#[derive(Debug, Clone)]
pub struct PathTranslator<'a> {
    paths: &'a SyncPaths,
    cwd: PathBuf,
    policy: ExternalPathPolicy,
}

impl<'a> PathTranslator<'a> {
    /// Create a translator resolving relative arguments against `cwd`
    #[must_use]
    pub fn new(paths: &'a SyncPaths, cwd: impl Into<PathBuf>, policy: ExternalPathPolicy) -> Self {
        Self {
            paths,
            cwd: cwd.into(),
            policy,
        }
    }

    /// Translate a single argument
    ///
    /// Arguments that do not name an existing path (flags, revisions,
    /// messages) pass through untouched.
    #[must_use]
    pub fn translate(&self, arg: &OsStr) -> OsString {
        let candidate = self.cwd.join(arg);
        if arg.is_empty() || !candidate.exists() {
            return arg.to_os_string();
        }

        let Ok(absolute) = absolutize(&candidate) else {
            return arg.to_os_string();
        };

        // Inside the repository, git already expects repository-relative paths
        let repo = dunce::canonicalize(self.paths.repo())
            .unwrap_or_else(|_| self.paths.repo().to_path_buf());
        if let Ok(rel) = absolute.strip_prefix(&repo) {
            if rel.as_os_str().is_empty() {
                return OsString::from(".");
            }
            return rel.as_os_str().to_os_string();
        }

        if let Some(rel) = self.paths.to_home_relative(&absolute) {
            return rel.into_os_string();
        }

        match self.policy {
            ExternalPathPolicy::Unchanged => arg.to_os_string(),
            ExternalPathPolicy::Reroot => {
                let cwd = dunce::canonicalize(&self.cwd).unwrap_or_else(|_| self.cwd.clone());
                absolute
                    .strip_prefix(&cwd)
                    .map_or_else(|_| arg.to_os_string(), |rel| rel.as_os_str().to_os_string())
            }
        }
    }

    /// Translate every argument of a pass-through command
    #[must_use]
    pub fn translate_all<I, S>(&self, args: I) -> Vec<OsString>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        args.into_iter().map(|arg| self.translate(arg.as_ref())).collect()
    }
}
