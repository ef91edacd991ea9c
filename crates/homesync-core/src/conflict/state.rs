//! Conflict prompt state machine
//!
//! ```text
//! Detected --d--> DiffShown
//! Detected|DiffShown --s/o/b--> Resolved
//! Detected|DiffShown --other--> Invalid   (treated as keep-live)
//! ```
//!
//! `d` is not offered again once the diff has been shown.

use super::Resolution;

/// A single-letter answer at the conflict prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Show the diff between live and repository copy
    ShowDiff,
    /// Keep the live copy
    Skip,
    /// Overwrite the live copy
    Overwrite,
    /// Back up and overwrite the live copy
    Backup,
}

impl Choice {
    /// Parse user input; case-insensitive, surrounding whitespace ignored
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "d" => Some(Self::ShowDiff),
            "s" => Some(Self::Skip),
            "o" => Some(Self::Overwrite),
            "b" => Some(Self::Backup),
            _ => None,
        }
    }
}

/// Where a conflict is in the prompt protocol
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictState {
    /// Conflict found, nothing asked yet
    Detected,
    /// The diff has been displayed
    DiffShown,
    /// A valid resolution was chosen
    Resolved(Resolution),
    /// Unrecognized input; carries what was typed
    Invalid(String),
}

impl ConflictState {
    /// Apply one line of user input
    #[must_use]
    pub fn advance(self, input: &str) -> Self {
        match self {
            Self::Detected | Self::DiffShown => {}
            terminal => return terminal,
        }

        match (&self, Choice::parse(input)) {
            (Self::Detected, Some(Choice::ShowDiff)) => Self::DiffShown,
            (_, Some(Choice::Skip)) => Self::Resolved(Resolution::KeepLive),
            (_, Some(Choice::Overwrite)) => Self::Resolved(Resolution::Overwrite),
            (_, Some(Choice::Backup)) => Self::Resolved(Resolution::OverwriteWithBackup),
            _ => Self::Invalid(input.trim().to_string()),
        }
    }

    /// Resolution implied by a terminal state
    ///
    /// Invalid input always maps to keeping the live copy.
    #[must_use]
    pub const fn resolution(&self) -> Option<Resolution> {
        match self {
            Self::Resolved(resolution) => Some(*resolution),
            Self::Invalid(_) => Some(Resolution::KeepLive),
            Self::Detected | Self::DiffShown => None,
        }
    }

    /// Prompt text for the states that expect input
    #[must_use]
    pub const fn prompt(&self) -> Option<&'static str> {
        match self {
            Self::Detected => Some(
                "[d] show diff, [s] keep live version, [o] overwrite live, [b] overwrite with backup: ",
            ),
            Self::DiffShown => {
                Some("[s] keep live version, [o] overwrite live, [b] overwrite with backup: ")
            }
            Self::Resolved(_) | Self::Invalid(_) => None,
        }
    }
}
