//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Content hashing of every eligible file in a directory
//! - Digest-keyed duplicate group management

pub mod finder;
pub mod groups;

pub use finder::{validate_directory, DuplicateFinder, FinderConfig, FinderError, ScanSummary};
pub use groups::{DuplicateGroup, ScanResult};
