//! Digest-keyed grouping of scanned files.
//!
//! # Overview
//!
//! A [`ScanResult`] maps each content digest to the [`DuplicateGroup`] of
//! files sharing it. Members keep the order in which they were scanned, so
//! the first member is the original that both resolution policies keep.
//! Groups iterate in the order their digest was first seen.
//!
//! # Example
//!
//! ```
//! use audiodedupe::duplicates::ScanResult;
//! use audiodedupe::scanner::FileEntry;
//! use std::path::PathBuf;
//!
//! let mut result = ScanResult::new();
//! result.insert([1; 32], FileEntry::new(PathBuf::from("/m/a.mp3"), 3));
//! result.insert([1; 32], FileEntry::new(PathBuf::from("/m/b.mp3"), 3));
//! result.insert([2; 32], FileEntry::new(PathBuf::from("/m/c.wav"), 5));
//!
//! assert_eq!(result.len(), 2);
//! assert_eq!(result.duplicate_groups().count(), 1);
//! assert_eq!(result.duplicate_file_count(), 1);
//! ```

use std::collections::HashMap;

use crate::scanner::{hash_to_hex, Digest, FileEntry};

/// Files sharing one content digest, in scan order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    /// BLAKE3 digest shared by every member
    pub hash: Digest,
    /// Members in scan order; the first one is the original
    pub files: Vec<FileEntry>,
}

impl DuplicateGroup {
    /// Create a new group.
    #[must_use]
    pub fn new(hash: Digest, files: Vec<FileEntry>) -> Self {
        Self { hash, files }
    }

    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Check if this group holds actual duplicates (2+ files).
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        self.files.len() > 1
    }

    /// The kept file: the first one scanned.
    #[must_use]
    pub fn original(&self) -> Option<&FileEntry> {
        self.files.first()
    }

    /// Every member after the original.
    #[must_use]
    pub fn duplicates(&self) -> &[FileEntry] {
        self.files.get(1..).unwrap_or(&[])
    }

    /// Hex representation of the digest.
    #[must_use]
    pub fn hash_hex(&self) -> String {
        hash_to_hex(&self.hash)
    }

    /// Bytes freed by removing every duplicate.
    #[must_use]
    pub fn reclaimable_space(&self) -> u64 {
        self.duplicates().iter().map(|f| f.size).sum()
    }
}

/// Mapping from digest to the group of files sharing it.
///
/// Singleton groups are kept; consumers go through
/// [`ScanResult::duplicate_groups`] to skip them.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    groups: Vec<DuplicateGroup>,
    index: HashMap<Digest, usize>,
}

impl ScanResult {
    /// Create an empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `file` to the group for `hash`, creating the group if needed.
    pub fn insert(&mut self, hash: Digest, file: FileEntry) {
        match self.index.get(&hash) {
            Some(&idx) => self.groups[idx].files.push(file),
            None => {
                self.index.insert(hash, self.groups.len());
                self.groups.push(DuplicateGroup::new(hash, vec![file]));
            }
        }
    }

    /// Number of distinct digests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if no file was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// All groups, singletons included, in first-seen order.
    pub fn groups(&self) -> impl Iterator<Item = &DuplicateGroup> {
        self.groups.iter()
    }

    /// Groups with two or more members, in first-seen order.
    pub fn duplicate_groups(&self) -> impl Iterator<Item = &DuplicateGroup> {
        self.groups.iter().filter(|g| g.has_duplicates())
    }

    /// `(original, duplicate)` pairs in report order.
    pub fn pairs(&self) -> impl Iterator<Item = (&FileEntry, &FileEntry)> {
        self.duplicate_groups().flat_map(|group| {
            let original = &group.files[0];
            group.duplicates().iter().map(move |dup| (original, dup))
        })
    }

    /// Number of groups with two or more members.
    #[must_use]
    pub fn duplicate_group_count(&self) -> usize {
        self.duplicate_groups().count()
    }

    /// Number of files that are not the original of their group.
    #[must_use]
    pub fn duplicate_file_count(&self) -> usize {
        self.duplicate_groups().map(|g| g.len() - 1).sum()
    }

    /// Total bytes held by duplicates.
    #[must_use]
    pub fn reclaimable_space(&self) -> u64 {
        self.duplicate_groups()
            .map(DuplicateGroup::reclaimable_space)
            .sum()
    }

    /// Total number of files recorded.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.groups.iter().map(DuplicateGroup::len).sum()
    }
}
