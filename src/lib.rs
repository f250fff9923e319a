//! audiodedupe - Exact Duplicate Audio Finder
//!
//! Finds byte-identical audio files in a single directory by hashing their
//! full contents with BLAKE3, then either reports original/duplicate pairs
//! to a CSV file or deletes every duplicate while keeping the first file of
//! each group.

pub mod actions;
pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use yansi::Paint;

use crate::actions::{delete_duplicates, BatchDeleteResult};
use crate::cli::{Action, Cli};
use crate::config::Config;
use crate::duplicates::{
    validate_directory, DuplicateFinder, FinderConfig, ScanResult, ScanSummary,
};
use crate::error::ExitCode;
use crate::output::CsvOutput;
use crate::progress::{Progress, ProgressCallback};

/// What the resolution step did.
#[derive(Debug)]
pub enum Outcome {
    /// No group had more than one file; nothing was written or deleted.
    NoDuplicates,
    /// The CSV report was written.
    Reported {
        /// Report path
        path: PathBuf,
        /// Data rows written (one per duplicate)
        rows: usize,
    },
    /// Duplicates were deleted.
    Deleted(BatchDeleteResult),
}

/// Result of a full scan-and-resolve run.
#[derive(Debug)]
pub struct RunReport {
    /// Scan statistics
    pub summary: ScanSummary,
    /// Resolution outcome
    pub outcome: Outcome,
}

/// Scan `directory` for duplicate audio files.
///
/// # Errors
///
/// Fails if the directory is missing, not a directory, or cannot be listed.
/// Per-file read failures are logged and recorded in the summary.
pub fn scan_directory(
    directory: &Path,
    config: &Config,
    progress: Arc<dyn ProgressCallback>,
) -> Result<(ScanResult, ScanSummary)> {
    let finder = DuplicateFinder::new(
        FinderConfig::default()
            .with_scanner_config(config.scanner_config())
            .with_progress_callback(progress),
    );
    Ok(finder.find_duplicates(directory)?)
}

/// Apply the configured action to a scan result.
///
/// When no duplicates were found nothing is done and the CSV report is not
/// created.
///
/// # Errors
///
/// Fails if the CSV report cannot be written. Per-file delete failures are
/// logged and collected in the outcome instead.
pub fn resolve(
    result: &ScanResult,
    config: &Config,
    progress: &dyn ProgressCallback,
) -> Result<Outcome> {
    if result.duplicate_group_count() == 0 {
        return Ok(Outcome::NoDuplicates);
    }

    let outcome = match config.action {
        Action::Csv => {
            let rows = CsvOutput::new(result)
                .with_progress(progress)
                .write_to_path(&config.csv_file)
                .context("Error writing CSV file")?;
            Outcome::Reported {
                path: config.csv_file.clone(),
                rows,
            }
        }
        Action::Delete => Outcome::Deleted(delete_duplicates(result, progress)),
    };

    Ok(outcome)
}

/// Scan `directory` and apply the configured action.
///
/// # Errors
///
/// Fails if the directory is invalid or the CSV report cannot be written.
/// Per-file read and delete failures are logged and do not fail the run.
pub fn run_pipeline(
    directory: &Path,
    config: &Config,
    progress: Arc<dyn ProgressCallback>,
) -> Result<RunReport> {
    let (result, summary) = scan_directory(directory, config, Arc::clone(&progress))?;
    let outcome = resolve(&result, config, progress.as_ref())?;
    Ok(RunReport { summary, outcome })
}

/// Run the application with parsed command-line arguments.
///
/// A report that cannot be written is printed as an error but still ends
/// the run with [`ExitCode::Success`]; only an invalid directory or bad
/// configuration is fatal.
///
/// # Errors
///
/// Returns any fatal error; the caller maps it to an exit code.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    if cli.no_color {
        yansi::disable();
    }
    logging::init_logging(cli.verbose, cli.quiet);

    // Checked before anything else so a bad path fails without side effects.
    if let Err(e) = validate_directory(&cli.directory) {
        log::debug!("Directory check failed: {}", e);
        anyhow::bail!("{} is not a valid directory.", cli.directory.display());
    }

    let config = Config::load(cli.config.as_deref())
        .context("Failed to load configuration")?
        .merge_cli(&cli);
    config.validate().context("Invalid configuration")?;
    log::debug!("Effective configuration: {:?}", config);

    let quiet = cli.quiet;
    let say = |line: String| {
        if !quiet {
            println!("{line}");
        }
    };

    say(format!(
        "{}",
        "======================================\n      Audio Dedupe\n======================================\n"
            .yellow()
    ));
    say(format!(
        "{}",
        format!("Scanning directory: {}", cli.directory.display()).yellow()
    ));

    let progress: Arc<dyn ProgressCallback> = Arc::new(Progress::new(quiet));
    let (result, summary) = scan_directory(&cli.directory, &config, Arc::clone(&progress))?;

    if !summary.scan_errors.is_empty() {
        say(format!(
            "{}",
            format!(
                "Skipped {} file(s) that could not be read.",
                summary.scan_errors.len()
            )
            .red()
        ));
    }

    if !summary.has_duplicates() {
        say(format!("{}", "No duplicate audio files found.".green()));
        return Ok(ExitCode::Success);
    }
    say(found_line(&summary));

    match resolve(&result, &config, progress.as_ref()) {
        Ok(Outcome::NoDuplicates) => {}
        Ok(Outcome::Reported { path, .. }) => {
            say(format!(
                "{}",
                format!("CSV file with duplicates written to: {}", path.display()).green()
            ));
        }
        Ok(Outcome::Deleted(deleted)) => {
            let line = deleted.summary();
            if deleted.all_succeeded() {
                say(format!("{}", line.green()));
            } else {
                say(format!("{}", line.yellow()));
            }
        }
        Err(err) => {
            log::debug!("Report not written: {:?}", err);
            eprintln!("{}", format!("{err:#}").red());
        }
    }

    Ok(ExitCode::Success)
}

fn found_line(summary: &ScanSummary) -> String {
    format!(
        "{}",
        format!(
            "Found {} duplicate group(s) with {} duplicate file(s) ({} reclaimable).",
            summary.duplicate_groups,
            summary.duplicate_files,
            summary.reclaimable_display()
        )
        .yellow()
    )
}
