//! Conflict resolution protocol
//!
//! A conflict exists when, during outbound sync, both the live and the
//! repository copy of a tracked file exist with different content. The
//! protocol decides, file by file and before anything is written, whether
//! the live copy is kept, overwritten, or overwritten after a backup.
//!
//! The decision logic is the pure state machine in [`ConflictState`]; the
//! terminal is reached only through the injected [`PromptIo`], and
//! [`PolicyResolver`] replaces the prompt with a fixed answer.

mod prompt;
mod state;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub use prompt::{InteractiveResolver, PromptIo};
#[cfg(test)]
pub(crate) use prompt::ScriptedIo;
pub use state::{Choice, ConflictState};

use crate::error::Result;

/// A divergent tracked file awaiting a decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    /// Home-relative path
    pub rel: PathBuf,
    /// Live copy under the home root
    pub live: PathBuf,
    /// Repository copy
    pub repo: PathBuf,
}

/// Final decision for one conflict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Leave the live copy alone; both sides stay divergent
    KeepLive,
    /// Replace the live copy with the repository copy
    Overwrite,
    /// Back up the live copy, then replace it
    OverwriteWithBackup,
}

/// How conflicts are answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictPolicy {
    /// Ask the user for every conflict
    #[default]
    Prompt,
    /// Always keep the live copy
    KeepLive,
    /// Always overwrite the live copy
    Overwrite,
    /// Always back up, then overwrite
    Backup,
}

impl ConflictPolicy {
    /// Fixed resolution for non-interactive policies
    #[must_use]
    pub const fn fixed_resolution(self) -> Option<Resolution> {
        match self {
            Self::Prompt => None,
            Self::KeepLive => Some(Resolution::KeepLive),
            Self::Overwrite => Some(Resolution::Overwrite),
            Self::Backup => Some(Resolution::OverwriteWithBackup),
        }
    }
}

/// Decides conflicts during an outbound pass
pub trait ConflictResolver {
    /// Resolve a single conflict; called strictly one at a time
    ///
    /// # Errors
    ///
    /// Returns an error if the decision could not be obtained. The outbound
    /// pass treats that as keeping the live copy.
    fn resolve(&mut self, conflict: &Conflict) -> Result<Resolution>;
}

/// Answers every conflict the same way
#[derive(Debug, Clone, Copy)]
pub struct PolicyResolver(pub Resolution);

impl ConflictResolver for PolicyResolver {
    fn resolve(&mut self, _conflict: &Conflict) -> Result<Resolution> {
        Ok(self.0)
    }
}

impl<F> ConflictResolver for F
where
    F: FnMut(&Conflict) -> Result<Resolution>,
{
    fn resolve(&mut self, conflict: &Conflict) -> Result<Resolution> {
        self(conflict)
    }
}
