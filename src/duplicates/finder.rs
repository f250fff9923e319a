//! Duplicate finder: lists a directory and groups eligible files by digest.
//!
//! # Pipeline
//!
//! 1. **List**: read the direct entries of the directory and keep regular
//!    files with an eligible extension
//! 2. **Hash**: stream every candidate through BLAKE3, one file at a time
//! 3. **Group**: append each file to the group for its digest
//!
//! A file that cannot be read is logged, recorded in
//! [`ScanSummary::scan_errors`], and left out of every group. Only a missing
//! or unreadable directory stops the scan.
//!
//! # Example
//!
//! ```no_run
//! use audiodedupe::duplicates::DuplicateFinder;
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::with_defaults();
//! let (result, summary) = finder.find_duplicates(Path::new("/music")).unwrap();
//!
//! for group in result.duplicate_groups() {
//!     println!("{} copies of {}", group.len(), group.hash_hex());
//! }
//! println!("{} duplicate file(s)", summary.duplicate_files);
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use bytesize::ByteSize;

use super::ScanResult;
use crate::progress::ProgressCallback;
use crate::scanner::{FileEntry, Hasher, ScanError, ScannerConfig, Walker};

/// Configuration for the duplicate finder.
#[derive(Clone, Default)]
pub struct FinderConfig {
    /// Listing and hashing options.
    pub scanner: ScannerConfig,
    /// Optional progress reporter.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("scanner", &self.scanner)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "ProgressCallback"),
            )
            .finish()
    }
}

impl FinderConfig {
    /// Set the scanner configuration.
    #[must_use]
    pub fn with_scanner_config(mut self, config: ScannerConfig) -> Self {
        self.scanner = config;
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }
}

/// Statistics about a completed scan.
#[derive(Debug, Default)]
pub struct ScanSummary {
    /// Number of direct entries in the directory
    pub total_entries: usize,
    /// Number of eligible audio files found
    pub candidates: usize,
    /// Number of candidates hashed successfully
    pub hashed_files: usize,
    /// Bytes read while hashing
    pub total_size: u64,
    /// Number of groups with two or more files
    pub duplicate_groups: usize,
    /// Number of files beyond the original in each group
    pub duplicate_files: usize,
    /// Bytes held by duplicates
    pub reclaimable_space: u64,
    /// Duration of the scan
    pub scan_duration: Duration,
    /// Per-file errors; each skipped file appears here once
    pub scan_errors: Vec<ScanError>,
}

impl ScanSummary {
    /// Human-readable total size of the hashed files.
    #[must_use]
    pub fn total_size_display(&self) -> String {
        ByteSize::b(self.total_size).to_string()
    }

    /// Human-readable reclaimable space.
    #[must_use]
    pub fn reclaimable_display(&self) -> String {
        ByteSize::b(self.reclaimable_space).to_string()
    }

    /// Check whether any duplicates were found.
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        self.duplicate_groups > 0
    }
}

/// Errors that abort a scan.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The provided path does not exist.
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// The provided path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// The directory itself could not be read.
    #[error("I/O error for {path}: {source}")]
    IoWithPath {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Finds byte-identical audio files in a single directory.
#[derive(Debug)]
pub struct DuplicateFinder {
    config: FinderConfig,
    hasher: Hasher,
}

impl DuplicateFinder {
    /// Create a finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        let hasher = Hasher::with_chunk_size(config.scanner.chunk_size);
        Self { config, hasher }
    }

    /// Create a finder with the default audio extensions and no progress.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// Scan `path` and group its eligible files by content digest.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError`] if `path` is missing, is not a directory, or
    /// cannot be listed. Per-file failures never produce an error; they are
    /// reported in [`ScanSummary::scan_errors`].
    pub fn find_duplicates(&self, path: &Path) -> Result<(ScanResult, ScanSummary), FinderError> {
        let start = Instant::now();
        validate_directory(path)?;

        log::info!("Scanning directory: {}", path.display());

        let listing = Walker::new(path, self.config.scanner.clone())
            .list()
            .map_err(|source| FinderError::IoWithPath {
                path: path.to_path_buf(),
                source,
            })?;

        let mut summary = ScanSummary {
            total_entries: listing.total_entries,
            candidates: listing.candidates.len(),
            scan_errors: listing.errors,
            ..ScanSummary::default()
        };

        let result = self.hash_files(listing.candidates, &mut summary);

        summary.duplicate_groups = result.duplicate_group_count();
        summary.duplicate_files = result.duplicate_file_count();
        summary.reclaimable_space = result.reclaimable_space();
        summary.scan_duration = start.elapsed();

        log::info!(
            "Scan complete: {} candidate(s), {} hashed ({}), {} duplicate group(s), {} error(s) in {:?}",
            summary.candidates,
            summary.hashed_files,
            summary.total_size_display(),
            summary.duplicate_groups,
            summary.scan_errors.len(),
            summary.scan_duration
        );

        Ok((result, summary))
    }

    /// Hash already-listed files and group them, in the order given.
    ///
    /// Useful when the caller has its own candidate list. The returned
    /// summary only carries hashing statistics.
    #[must_use]
    pub fn find_duplicates_from_files(&self, files: Vec<FileEntry>) -> (ScanResult, ScanSummary) {
        let mut summary = ScanSummary {
            candidates: files.len(),
            total_entries: files.len(),
            ..ScanSummary::default()
        };
        let result = self.hash_files(files, &mut summary);
        summary.duplicate_groups = result.duplicate_group_count();
        summary.duplicate_files = result.duplicate_file_count();
        summary.reclaimable_space = result.reclaimable_space();
        (result, summary)
    }

    fn hash_files(&self, files: Vec<FileEntry>, summary: &mut ScanSummary) -> ScanResult {
        let callback = self.config.progress_callback.as_deref();
        let total = files.len();
        let mut result = ScanResult::new();

        if let Some(cb) = callback {
            cb.on_phase_start("scan", total);
        }

        for (i, file) in files.into_iter().enumerate() {
            if let Some(cb) = callback {
                cb.on_progress(i + 1, &file.path.to_string_lossy());
            }

            match self.hasher.full_hash(&file.path) {
                Ok(hash) => {
                    log::trace!("Hashed {}", file.path.display());
                    summary.hashed_files += 1;
                    summary.total_size += file.size;
                    result.insert(hash, file);
                }
                Err(e) => {
                    log::warn!("Error reading file {}: {}", file.path.display(), e);
                    summary.scan_errors.push(ScanError::Hash(e));
                }
            }
        }

        if let Some(cb) = callback {
            cb.on_phase_end("scan");
        }

        result
    }
}

/// Check that `path` names an existing directory.
///
/// # Errors
///
/// Returns [`FinderError::PathNotFound`] or [`FinderError::NotADirectory`].
pub fn validate_directory(path: &Path) -> Result<(), FinderError> {
    match std::fs::metadata(path) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(FinderError::NotADirectory(path.to_path_buf())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(FinderError::PathNotFound(path.to_path_buf()))
        }
        Err(source) => Err(FinderError::IoWithPath {
            path: path.to_path_buf(),
            source,
        }),
    }
}
