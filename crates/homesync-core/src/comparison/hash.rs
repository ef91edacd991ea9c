//! File hashing for content comparison using SHA-256

use std::fs::File;
use std::io;
use std::path::Path;

use anyhow::Context;
use sha2::{Digest, Sha256};

use crate::error::Result;

/// File hash result
pub type FileHash = [u8; 32];

/// File hasher
pub struct FileHasher;

impl FileHasher {
    /// Compute SHA-256 hash of a file by streaming its contents
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn hash(path: &Path) -> Result<FileHash> {
        let mut file = File::open(path)
            .with_context(|| format!("Failed to open file for hashing: {}", path.display()))?;

        let mut hasher = Sha256::new();
        io::copy(&mut file, &mut hasher)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Ok(hasher.finalize().into())
    }

    /// SHA-256 of an in-memory buffer
    #[must_use]
    pub fn hash_bytes(bytes: &[u8]) -> FileHash {
        Sha256::digest(bytes).into()
    }
}
