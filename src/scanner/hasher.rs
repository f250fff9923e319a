//! BLAKE3 file hasher with streaming support.
//!
//! # Overview
//! This module provides the [`Hasher`] struct for computing BLAKE3 digests
//! of whole-file contents. Files are read in fixed-size chunks so that
//! large audio files never have to fit in memory.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use super::HashError;

/// Content digest of a file (BLAKE3, 32 bytes).
pub type Digest = [u8; 32];

/// Default read chunk size (8 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

/// Streaming whole-file hasher.
#[derive(Debug, Clone)]
pub struct Hasher {
    chunk_size: usize,
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher {
    /// Create a hasher using [`DEFAULT_CHUNK_SIZE`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Create a hasher with a custom chunk size. Zero is clamped to one byte.
    #[must_use]
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }

    /// Chunk size used for each read.
    #[must_use]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Compute the digest of the entire file at `path`.
    ///
    /// The file is opened, streamed and closed within this call; the handle
    /// is released on every return path.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be opened or read.
    pub fn full_hash(&self, path: &Path) -> Result<Digest, HashError> {
        let mut file = File::open(path).map_err(|e| HashError::from_io(path, e))?;
        self.hash_reader(&mut file)
            .map_err(|e| HashError::from_io(path, e))
    }

    /// Compute the digest of everything readable from `reader`.
    ///
    /// # Errors
    ///
    /// Propagates read errors other than `Interrupted`, which is retried.
    pub fn hash_reader<R: Read>(&self, reader: &mut R) -> std::io::Result<Digest> {
        let mut hasher = blake3::Hasher::new();
        let mut buffer = vec![0u8; self.chunk_size];

        loop {
            match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => {
                    hasher.update(&buffer[..n]);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }

        Ok(*hasher.finalize().as_bytes())
    }
}

/// Render a digest as 64 lowercase hexadecimal characters.
///
/// # Examples
///
/// ```
/// use audiodedupe::scanner::hash_to_hex;
///
/// let hex = hash_to_hex(&[0xab; 32]);
/// assert_eq!(hex.len(), 64);
/// assert!(hex.starts_with("abab"));
/// ```
#[must_use]
pub fn hash_to_hex(hash: &Digest) -> String {
    blake3::Hash::from(*hash).to_hex().to_string()
}
