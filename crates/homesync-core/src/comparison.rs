//! File comparison utilities shared by both sync passes
//!
//! This module provides read-only analysis of file pairs:
//! - Content equality via SHA-256 hashing
//! - Modification-time ordering for the staleness copy policy
//! - Unified diffs for the conflict prompt

mod diff;
mod hash;
mod timestamp;

pub use diff::DiffGenerator;
pub use hash::{FileHash, FileHasher};
pub use timestamp::TimestampComparator;
