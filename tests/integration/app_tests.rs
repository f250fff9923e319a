use audiodedupe::cli::{Action, Cli};
use audiodedupe::config::Config;
use audiodedupe::error::ExitCode;
use audiodedupe::progress::NoProgress;
use audiodedupe::{resolve, run_app, scan_directory, Outcome};
use clap::Parser;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;

fn cli(args: &[&str]) -> Cli {
    let mut argv = vec!["audiodedupe", "-q"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_missing_directory_is_fatal() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope");

    let err = run_app(cli(&[arg(&missing)])).unwrap_err();

    assert!(err.to_string().contains("is not a valid directory."));
}

#[test]
fn test_file_argument_is_fatal_and_writes_nothing() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("song.mp3");
    fs::write(&file, b"audio").unwrap();
    let csv_path = dir.path().join("report.csv");

    let err = run_app(cli(&[arg(&file), "--csv_file", arg(&csv_path)])).unwrap_err();

    assert!(err.to_string().contains("is not a valid directory."));
    assert!(!csv_path.exists());
}

#[test]
fn test_empty_directory_succeeds_without_report() {
    let music = tempdir().unwrap();
    let out = tempdir().unwrap();
    let csv_path = out.path().join("duplicates.csv");

    let code = run_app(cli(&[arg(music.path()), "--csv_file", arg(&csv_path)])).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert!(!csv_path.exists());
}

#[test]
fn test_app_writes_report() {
    let music = tempdir().unwrap();
    let out = tempdir().unwrap();
    fs::write(music.path().join("a.mp3"), b"same").unwrap();
    fs::write(music.path().join("b.flac"), b"same").unwrap();
    let csv_path = out.path().join("duplicates.csv");

    let code = run_app(cli(&[arg(music.path()), "--csv_file", arg(&csv_path)])).unwrap();

    assert_eq!(code, ExitCode::Success);
    let content = fs::read_to_string(&csv_path).unwrap();
    assert_eq!(content.lines().count(), 2);
}

#[test]
fn test_unwritable_report_still_exits_success() {
    let music = tempdir().unwrap();
    fs::write(music.path().join("a.mp3"), b"same").unwrap();
    fs::write(music.path().join("b.mp3"), b"same").unwrap();
    let csv_path = music.path().join("no_such_dir").join("r.csv");

    let code = run_app(cli(&[arg(music.path()), "--csv_file", arg(&csv_path)])).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert!(!csv_path.exists());
    assert!(music.path().join("a.mp3").exists());
    assert!(music.path().join("b.mp3").exists());
}

#[test]
fn test_empty_extension_override_is_rejected() {
    let music = tempdir().unwrap();
    let out = tempdir().unwrap();
    fs::write(music.path().join("a.mp3"), b"same").unwrap();
    fs::write(music.path().join("b.mp3"), b"same").unwrap();
    let csv_path = out.path().join("duplicates.csv");

    let err = run_app(cli(&[
        arg(music.path()),
        "-e",
        ".",
        "--csv_file",
        arg(&csv_path),
    ]))
    .unwrap_err();

    assert!(format!("{err:#}").contains("at least one audio extension"));
    assert!(!csv_path.exists());
}

#[test]
fn test_scan_leaves_files_until_resolved() {
    let music = tempdir().unwrap();
    fs::write(music.path().join("a.wav"), b"same").unwrap();
    fs::write(music.path().join("b.wav"), b"same").unwrap();
    let config = Config {
        action: Action::Delete,
        sort_by_name: true,
        ..Config::default()
    };

    let (result, summary) = scan_directory(music.path(), &config, Arc::new(NoProgress)).unwrap();

    assert!(summary.has_duplicates());
    assert!(music.path().join("b.wav").exists());

    let outcome = resolve(&result, &config, &NoProgress).unwrap();

    match outcome {
        Outcome::Deleted(deleted) => assert_eq!(deleted.success_count(), 1),
        other => panic!("Expected Deleted outcome, got: {:?}", other),
    }
    assert!(music.path().join("a.wav").exists());
    assert!(!music.path().join("b.wav").exists());
}
