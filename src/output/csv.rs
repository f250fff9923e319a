//! CSV report of duplicate audio files.
//!
//! One row is written for each duplicate, pairing it with the original that
//! is kept.
//!
//! # Columns
//!
//! - `File 1`: full path of the original (first file of the group)
//! - `File 2`: full path of the duplicate
//! - `Duplicate`: always `TRUE`
//!
//! # Example
//!
//! ```no_run
//! use audiodedupe::duplicates::DuplicateFinder;
//! use audiodedupe::output::csv::CsvOutput;
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::with_defaults();
//! let (result, _) = finder.find_duplicates(Path::new("/music")).unwrap();
//!
//! let output = CsvOutput::new(&result);
//! output.write_to(std::io::stdout()).unwrap();
//! ```

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::duplicates::ScanResult;
use crate::progress::ProgressCallback;

/// Errors that can occur during CSV output generation.
#[derive(Debug, Error)]
pub enum CsvOutputError {
    /// The output file could not be created.
    #[error("cannot create {path}: {source}")]
    Create {
        /// Output path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// I/O error during writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A path is not valid UTF-8 and would be mangled in the report.
    #[error("path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),

    /// Error during CSV serialization.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Header row of the report.
pub const HEADER: [&str; 3] = ["File 1", "File 2", "Duplicate"];

fn utf8_path(path: &Path) -> Result<&str, CsvOutputError> {
    path.to_str().ok_or_else(|| CsvOutputError::NonUtf8Path(path.to_path_buf()))
}

/// CSV output formatter.
pub struct CsvOutput<'a> {
    result: &'a ScanResult,
    progress: Option<&'a dyn ProgressCallback>,
}

impl<'a> CsvOutput<'a> {
    /// Create a new CSV output formatter.
    #[must_use]
    pub fn new(result: &'a ScanResult) -> Self {
        Self {
            result,
            progress: None,
        }
    }

    /// Report each written row to `progress` under the `"csv"` phase.
    #[must_use]
    pub fn with_progress(mut self, progress: &'a dyn ProgressCallback) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Write the header and one row per duplicate to `writer`.
    ///
    /// Groups are written in scan-result order, members in group order.
    /// The header is written even when there are no duplicates.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError::NonUtf8Path` before anything is written if
    /// a path cannot be represented in the report, or another
    /// `CsvOutputError` if writing or serialization fails.
    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<usize, CsvOutputError> {
        let records = self.records()?;
        self.write_records(writer, &records)
    }

    /// Create (or truncate) `path` and write the report into it.
    ///
    /// Paths are checked before the file is touched, so an existing report
    /// survives a `NonUtf8Path` failure.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError::Create` if the file cannot be opened, or any
    /// error from [`CsvOutput::write_to`].
    pub fn write_to_path(&self, path: &Path) -> Result<usize, CsvOutputError> {
        let records = self.records()?;
        let file = File::create(path).map_err(|source| CsvOutputError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        let rows = self.write_records(BufWriter::new(file), &records)?;
        log::debug!("Wrote {} row(s) to {}", rows, path.display());
        Ok(rows)
    }

    /// Original/duplicate path pairs as UTF-8 text.
    fn records(&self) -> Result<Vec<[&'a str; 2]>, CsvOutputError> {
        self.result
            .pairs()
            .map(|(original, duplicate)| {
                Ok::<_, CsvOutputError>([utf8_path(&original.path)?, utf8_path(&duplicate.path)?])
            })
            .collect()
    }

    fn write_records<W: io::Write>(
        &self,
        writer: W,
        records: &[[&str; 2]],
    ) -> Result<usize, CsvOutputError> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        let mut rows = 0;

        if let Some(cb) = self.progress {
            cb.on_phase_start("csv", records.len());
        }

        csv_writer.write_record(HEADER)?;

        for [original_path, duplicate_path] in records {
            csv_writer.write_record([*original_path, *duplicate_path, "TRUE"])?;
            rows += 1;

            if let Some(cb) = self.progress {
                cb.on_progress(rows, duplicate_path);
            }
        }

        csv_writer.flush()?;

        if let Some(cb) = self.progress {
            cb.on_phase_end("csv");
        }

        Ok(rows)
    }

    /// Generate CSV output as a string.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if serialization fails.
    pub fn to_string(&self) -> Result<String, CsvOutputError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}
