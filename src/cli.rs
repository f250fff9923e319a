//! Command-line interface definitions for audiodedupe.
//!
//! # Example
//!
//! ```bash
//! # Report duplicates to duplicates.csv (default)
//! audiodedupe ~/Music
//!
//! # Report to a custom file
//! audiodedupe ~/Music --action csv --csv_file dupes.csv
//!
//! # Remove duplicates, keeping the first copy of each
//! audiodedupe ~/Music --action delete
//!
//! # Only consider FLAC and Opus files, originals chosen by name order
//! audiodedupe ~/Music -e flac -e opus --sort
//! ```

use clap::builder::FalseyValueParser;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Find and handle duplicate audio files in a directory.
///
/// Files are compared by a BLAKE3 digest of their full contents. In each
/// group of identical files the first one listed is kept as the original.
#[derive(Debug, Parser)]
#[command(name = "audiodedupe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the directory containing audio files
    #[arg(value_name = "DIRECTORY")]
    pub directory: PathBuf,

    /// Action to perform on duplicates [default: csv]
    #[arg(long, value_enum)]
    pub action: Option<Action>,

    /// CSV file to write duplicate pairs to (only used with --action csv) [default: duplicates.csv]
    #[arg(long = "csv_file", visible_alias = "csv-file", value_name = "CSV_FILE")]
    pub csv_file: Option<PathBuf>,

    /// Audio extension to consider (repeatable; replaces the built-in set)
    #[arg(short, long = "extension", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Sort files by name before grouping so the original is the first by name
    #[arg(long)]
    pub sort: bool,

    /// Configuration file (TOML)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output (any non-empty NO_COLOR value except false/0/no/off)
    #[arg(long, env = "NO_COLOR", value_parser = FalseyValueParser::new())]
    pub no_color: bool,

    /// Report fatal errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,
}

/// What to do with the duplicates that were found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Write original/duplicate pairs to a CSV file
    #[default]
    Csv,
    /// Delete every duplicate, keeping the first file of each group
    Delete,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Csv => write!(f, "csv"),
            Action::Delete => write!(f, "delete"),
        }
    }
}
