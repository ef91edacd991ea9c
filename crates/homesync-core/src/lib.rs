//! # homesync-core
//!
//! Core library for keeping files under the home directory in sync with a
//! git-backed repository mirror.
//!
//! Every repository operation is wrapped by two passes: inbound sync copies
//! live files into the repository before the operation, outbound sync copies
//! repository edits back to their live locations afterwards and asks the user
//! whenever both sides diverged.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Error types and result alias
pub mod error;

/// Home and repository path layout, argument path translation
pub mod paths;

/// Version-control collaborator
pub mod vcs;

/// Content hashing, diffs and timestamp comparison
pub mod comparison;

/// Conflict resolution protocol
pub mod conflict;

/// Configuration file parsing and settings resolution
pub mod config;

/// Inbound/outbound synchronization engine
pub mod sync;

/// Repository initialization and path tracking
pub mod track;

pub use error::{Result, SyncError};
