//! Scanner module for directory listing and file hashing.
//!
//! This module provides functionality for:
//! - Single-level directory listing with audio extension filtering
//! - Streaming content hashing with BLAKE3
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory listing and eligibility filtering
//! - [`hasher`]: BLAKE3 file hashing (streaming)
//!
//! # Example
//!
//! ```no_run
//! use audiodedupe::scanner::{ScannerConfig, Walker};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("."), ScannerConfig::default());
//! let listing = walker.list().unwrap();
//! for file in &listing.candidates {
//!     println!("{}", file.path.display());
//! }
//! ```

pub mod hasher;
pub mod walker;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

// Re-export main types
pub use hasher::{hash_to_hex, Digest, Hasher, DEFAULT_CHUNK_SIZE};
pub use walker::{Listing, Walker};

/// Audio extensions considered when no explicit set is configured.
pub const DEFAULT_AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "flac", "aac", "ogg", "wma", "m4a"];

/// A file discovered in the scanned directory.
///
/// The full path is the identity; two entries with the same path are the
/// same file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileEntry {
    /// Full path to the file
    pub path: PathBuf,
    /// File size in bytes, as reported at listing time
    pub size: u64,
}

impl FileEntry {
    /// Create a new FileEntry.
    #[must_use]
    pub fn new(path: PathBuf, size: u64) -> Self {
        Self { path, size }
    }
}

/// Normalize a configured extension: strip a leading dot and lower-case it.
///
/// # Examples
///
/// ```
/// use audiodedupe::scanner::normalize_extension;
///
/// assert_eq!(normalize_extension(".MP3"), "mp3");
/// assert_eq!(normalize_extension("flac"), "flac");
/// ```
#[must_use]
pub fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}

/// Configuration for a directory scan.
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// Eligible extensions, lower-cased and without leading dots.
    pub extensions: BTreeSet<String>,

    /// Size of each read when streaming a file through the hasher.
    pub chunk_size: usize,

    /// Sort candidates by file name before hashing.
    ///
    /// Off by default: the original of each group is then the first file in
    /// directory-listing order, which is filesystem dependent.
    pub sort_by_name: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_AUDIO_EXTENSIONS
                .iter()
                .map(|ext| (*ext).to_string())
                .collect(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            sort_by_name: false,
        }
    }
}

impl ScannerConfig {
    /// Replace the eligible extension set.
    ///
    /// Entries are normalized with [`normalize_extension`]; empty entries
    /// are dropped.
    #[must_use]
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|ext| normalize_extension(ext.as_ref()))
            .filter(|ext| !ext.is_empty())
            .collect();
        self
    }

    /// Set the read chunk size. Zero is clamped to one byte.
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Enable or disable sorting candidates by name.
    #[must_use]
    pub fn with_sort_by_name(mut self, sort: bool) -> Self {
        self.sort_by_name = sort;
        self
    }

    /// Check whether a path carries an eligible extension.
    #[must_use]
    pub fn is_eligible(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .is_some_and(|ext| self.extensions.contains(&ext))
    }
}

/// Per-file errors recorded during a scan. None of them abort the scan.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// A candidate could not be hashed.
    #[error(transparent)]
    Hash(#[from] HashError),

    /// A directory entry could not be inspected.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Path of the file the error refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Hash(e) => e.path(),
            Self::Io { path, .. } => path,
        }
    }
}

/// Errors that can occur during file hashing.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The specified file was not found.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl HashError {
    /// Classify an I/O error raised while reading `path`.
    pub(crate) fn from_io(path: &Path, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }

    /// Path of the file that failed to hash.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(p) | Self::PermissionDenied(p) | Self::Io { path: p, .. } => p,
        }
    }
}
