//! Directory listing for the scanner.
//!
//! # Overview
//!
//! [`Walker`] lists the direct entries of one directory (no recursion) using
//! [`walkdir`] with a depth of exactly one, and keeps the regular files whose
//! extension is in the configured audio set. Order is directory-listing
//! order unless [`ScannerConfig::sort_by_name`] is set.
//!
//! Symbolic links are not followed and never become candidates, so a link
//! can never be chosen as the original of a group whose target gets deleted.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::{FileEntry, ScanError, ScannerConfig};

/// Result of listing a directory.
#[derive(Debug, Default)]
pub struct Listing {
    /// Number of direct entries seen, eligible or not
    pub total_entries: usize,
    /// Eligible files in listing (or name) order
    pub candidates: Vec<FileEntry>,
    /// Entries that could not be inspected
    pub errors: Vec<ScanError>,
}

/// Single-level directory lister.
#[derive(Debug)]
pub struct Walker {
    /// Directory to list
    root: PathBuf,
    /// Scanner configuration
    config: ScannerConfig,
}

impl Walker {
    /// Create a new walker for the given directory.
    #[must_use]
    pub fn new(path: &Path, config: ScannerConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
        }
    }

    /// List the eligible files of the directory.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the directory itself cannot be
    /// read. Failures on individual entries are collected in
    /// [`Listing::errors`] instead.
    pub fn list(&self) -> Result<Listing, std::io::Error> {
        let mut walk = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false);
        if self.config.sort_by_name {
            walk = walk.sort_by_file_name();
        }

        let mut listing = Listing::default();

        for result in walk {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    if err.depth() == 0 {
                        return Err(err.into());
                    }
                    let path = err
                        .path()
                        .map_or_else(|| self.root.clone(), Path::to_path_buf);
                    log::warn!("Skipping unreadable entry {}: {}", path.display(), err);
                    listing.total_entries += 1;
                    listing.errors.push(ScanError::Io {
                        path,
                        source: err.into(),
                    });
                    continue;
                }
            };

            listing.total_entries += 1;

            if !entry.file_type().is_file() {
                log::trace!("Skipping non-regular file: {}", entry.path().display());
                continue;
            }

            if !self.config.is_eligible(entry.path()) {
                log::trace!("Skipping ineligible extension: {}", entry.path().display());
                continue;
            }

            let size = match entry.metadata() {
                Ok(metadata) => metadata.len(),
                Err(err) => {
                    log::warn!(
                        "Failed to read metadata for {}: {}",
                        entry.path().display(),
                        err
                    );
                    listing.errors.push(ScanError::Io {
                        path: entry.path().to_path_buf(),
                        source: err.into(),
                    });
                    continue;
                }
            };

            listing
                .candidates
                .push(FileEntry::new(entry.into_path(), size));
        }

        log::debug!(
            "Listed {} entries in {}, {} eligible",
            listing.total_entries,
            self.root.display(),
            listing.candidates.len()
        );

        Ok(listing)
    }
}
