use audiodedupe::cli::Action;
use audiodedupe::config::Config;
use audiodedupe::progress::NoProgress;
use audiodedupe::{run_pipeline, Outcome};
use std::fs;
use std::sync::Arc;
use tempfile::tempdir;

fn delete_config() -> Config {
    Config {
        action: Action::Delete,
        sort_by_name: true,
        ..Config::default()
    }
}

#[test]
fn test_delete_keeps_first_of_three() {
    let music = tempdir().unwrap();
    // Named so that sorting puts the original first.
    for name in ["a_orig.mp3", "dup1.mp3", "dup2.mp3"] {
        fs::write(music.path().join(name), b"identical").unwrap();
    }

    let report = run_pipeline(music.path(), &delete_config(), Arc::new(NoProgress)).unwrap();

    let Outcome::Deleted(deleted) = report.outcome else {
        panic!("Expected Deleted outcome");
    };
    assert_eq!(deleted.success_count(), 2);
    assert_eq!(deleted.summary(), "Deleted 2 duplicate file(s).");
    assert!(music.path().join("a_orig.mp3").exists());
    assert!(!music.path().join("dup1.mp3").exists());
    assert!(!music.path().join("dup2.mp3").exists());
}

#[test]
fn test_delete_leaves_unique_and_non_audio_files() {
    let music = tempdir().unwrap();
    fs::write(music.path().join("a.mp3"), b"dup").unwrap();
    fs::write(music.path().join("b.mp3"), b"dup").unwrap();
    fs::write(music.path().join("c.txt"), b"dup").unwrap();
    fs::write(music.path().join("d.wav"), b"unique").unwrap();

    let report = run_pipeline(music.path(), &delete_config(), Arc::new(NoProgress)).unwrap();

    assert!(matches!(report.outcome, Outcome::Deleted(ref d) if d.success_count() == 1));
    assert!(music.path().join("a.mp3").exists());
    assert!(!music.path().join("b.mp3").exists());
    assert!(music.path().join("c.txt").exists());
    assert!(music.path().join("d.wav").exists());
}

#[test]
fn test_delete_multiple_groups_keep_one_each() {
    let music = tempdir().unwrap();
    for i in 0..3 {
        fs::write(music.path().join(format!("x{i}.flac")), b"xxx").unwrap();
        fs::write(music.path().join(format!("y{i}.ogg")), b"yyy").unwrap();
    }

    run_pipeline(music.path(), &delete_config(), Arc::new(NoProgress)).unwrap();

    let remaining: Vec<String> = {
        let mut names: Vec<String> = fs::read_dir(music.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    };
    assert_eq!(remaining, vec!["x0.flac", "y0.ogg"]);
}

#[test]
fn test_delete_without_duplicates_is_noop() {
    let music = tempdir().unwrap();
    fs::write(music.path().join("a.mp3"), b"1").unwrap();
    fs::write(music.path().join("b.mp3"), b"2").unwrap();

    let report = run_pipeline(music.path(), &delete_config(), Arc::new(NoProgress)).unwrap();

    assert!(matches!(report.outcome, Outcome::NoDuplicates));
    assert!(music.path().join("a.mp3").exists());
    assert!(music.path().join("b.mp3").exists());
}

#[test]
fn test_delete_then_rescan_finds_nothing() {
    let music = tempdir().unwrap();
    fs::write(music.path().join("a.mp3"), b"dup").unwrap();
    fs::write(music.path().join("b.mp3"), b"dup").unwrap();

    run_pipeline(music.path(), &delete_config(), Arc::new(NoProgress)).unwrap();
    let second = run_pipeline(music.path(), &delete_config(), Arc::new(NoProgress)).unwrap();

    assert!(matches!(second.outcome, Outcome::NoDuplicates));
}
