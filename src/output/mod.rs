//! Output formatters for duplicate scan results.
//!
//! - CSV pairs of original and duplicate, for spreadsheet review

pub mod csv;

// Re-export main types
pub use csv::{CsvOutput, CsvOutputError};
