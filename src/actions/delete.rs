//! Removal of duplicate files.
//!
//! # Overview
//!
//! Every non-first member of each duplicate group is removed with
//! [`std::fs::remove_file`]. Removal is permanent: there is no trash, no dry
//! run and no confirmation. Each file is attempted independently; a failure
//! is logged and recorded, and the remaining files are still processed.
//!
//! The original (first member) of a group is never passed to
//! [`permanent_delete`].
//!
//! # Example
//!
//! ```no_run
//! use audiodedupe::actions::delete::delete_duplicates;
//! use audiodedupe::duplicates::DuplicateFinder;
//! use audiodedupe::progress::NoProgress;
//! use std::path::Path;
//!
//! let (result, _) = DuplicateFinder::with_defaults()
//!     .find_duplicates(Path::new("/music"))
//!     .unwrap();
//!
//! let outcome = delete_duplicates(&result, &NoProgress);
//! println!("{}", outcome.summary());
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::duplicates::ScanResult;
use crate::progress::ProgressCallback;

/// Error type for deletion operations.
#[derive(Debug, Error)]
pub enum DeleteError {
    /// File was not found (may have been deleted or moved).
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Permission denied when attempting to delete.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// General I/O error.
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DeleteError {
    fn from_io(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }

    /// Get the path associated with this error.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(p) | Self::PermissionDenied(p) | Self::Io { path: p, .. } => p,
        }
    }
}

/// Result of a successful deletion.
#[derive(Debug, Clone)]
pub struct DeleteResult {
    /// Path that was deleted.
    pub path: PathBuf,
    /// Size of the deleted file in bytes.
    pub size: u64,
}

impl DeleteResult {
    /// Create a new delete result.
    #[must_use]
    pub fn new(path: PathBuf, size: u64) -> Self {
        Self { path, size }
    }
}

/// Results of a batch deletion.
#[derive(Debug, Clone, Default)]
pub struct BatchDeleteResult {
    /// Successfully deleted files.
    pub successes: Vec<DeleteResult>,
    /// Failed deletions with their error messages.
    pub failures: Vec<(PathBuf, String)>,
    /// Total bytes freed.
    pub bytes_freed: u64,
}

impl BatchDeleteResult {
    /// Number of files actually deleted.
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.successes.len()
    }

    /// Number of failed deletions.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Total number of attempted deletions.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.successes.len() + self.failures.len()
    }

    /// Check if all deletions succeeded.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    /// Human-readable summary of the operation.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.all_succeeded() {
            format!("Deleted {} duplicate file(s).", self.success_count())
        } else {
            format!(
                "Deleted {} duplicate file(s), {} failed.",
                self.success_count(),
                self.failure_count()
            )
        }
    }
}

/// Permanently delete a single file.
///
/// **WARNING**: This operation cannot be undone.
///
/// # Errors
///
/// - `NotFound` if the file doesn't exist
/// - `PermissionDenied` if deletion is not allowed
/// - `Io` for any other failure
pub fn permanent_delete(path: &Path) -> Result<DeleteResult, DeleteError> {
    let size = fs::symlink_metadata(path)
        .map_err(|e| DeleteError::from_io(path, e))?
        .len();

    fs::remove_file(path).map_err(|e| DeleteError::from_io(path, e))?;

    log::debug!("Deleted: {} ({} bytes)", path.display(), size);

    Ok(DeleteResult::new(path.to_path_buf(), size))
}

/// Delete multiple files, continuing past failures.
///
/// Progress is reported under the `"delete"` phase.
pub fn delete_batch(paths: &[&Path], callback: &dyn ProgressCallback) -> BatchDeleteResult {
    let mut result = BatchDeleteResult::default();

    callback.on_phase_start("delete", paths.len());

    for (index, path) in paths.iter().enumerate() {
        callback.on_progress(index + 1, &path.to_string_lossy());

        match permanent_delete(path) {
            Ok(del) => {
                result.bytes_freed += del.size;
                result.successes.push(del);
            }
            Err(e) => {
                log::warn!("Error deleting file {}: {}", path.display(), e);
                result.failures.push((path.to_path_buf(), e.to_string()));
            }
        }
    }

    callback.on_phase_end("delete");

    log::info!("{}", result.summary());

    result
}

/// Delete every duplicate in `result`, keeping the original of each group.
///
/// Groups with a single file are ignored. Digests are not recomputed; the
/// scan result is trusted as-is.
pub fn delete_duplicates(result: &ScanResult, callback: &dyn ProgressCallback) -> BatchDeleteResult {
    let targets: Vec<&Path> = result
        .pairs()
        .map(|(original, duplicate)| {
            debug_assert_ne!(original.path, duplicate.path);
            duplicate.path.as_path()
        })
        .collect();

    log::debug!(
        "Deleting {} duplicate(s) across {} group(s)",
        targets.len(),
        result.duplicate_group_count()
    );

    delete_batch(&targets, callback)
}
