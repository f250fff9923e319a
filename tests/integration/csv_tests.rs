use audiodedupe::cli::Action;
use audiodedupe::config::Config;
use audiodedupe::progress::NoProgress;
use audiodedupe::{run_pipeline, Outcome};
use std::fs;
use std::sync::Arc;
use tempfile::tempdir;

fn csv_config(csv_file: std::path::PathBuf) -> Config {
    Config {
        action: Action::Csv,
        csv_file,
        sort_by_name: true,
        ..Config::default()
    }
}

#[test]
fn test_csv_single_pair() {
    let music = tempdir().unwrap();
    let out = tempdir().unwrap();
    let a = music.path().join("a.mp3");
    let b = music.path().join("b.mp3");
    fs::write(&a, b"bytes X").unwrap();
    fs::write(&b, b"bytes X").unwrap();
    fs::write(music.path().join("c.wav"), b"bytes Y").unwrap();

    let csv_path = out.path().join("duplicates.csv");
    let report = run_pipeline(music.path(), &csv_config(csv_path.clone()), Arc::new(NoProgress))
        .unwrap();

    assert!(matches!(report.outcome, Outcome::Reported { rows: 1, .. }));
    let content = fs::read_to_string(&csv_path).unwrap();
    assert_eq!(
        content,
        format!(
            "File 1,File 2,Duplicate\n{},{},TRUE\n",
            a.display(),
            b.display()
        )
    );
}

#[test]
fn test_csv_not_created_without_duplicates() {
    let music = tempdir().unwrap();
    let out = tempdir().unwrap();
    let csv_path = out.path().join("duplicates.csv");

    let report = run_pipeline(music.path(), &csv_config(csv_path.clone()), Arc::new(NoProgress))
        .unwrap();

    assert!(matches!(report.outcome, Outcome::NoDuplicates));
    assert!(!csv_path.exists());
}

#[test]
fn test_csv_record_count_law() {
    let music = tempdir().unwrap();
    let out = tempdir().unwrap();
    for i in 0..4 {
        fs::write(music.path().join(format!("x{i}.mp3")), b"group x").unwrap();
    }
    for i in 0..3 {
        fs::write(music.path().join(format!("y{i}.ogg")), b"group y").unwrap();
    }
    fs::write(music.path().join("solo.m4a"), b"alone").unwrap();

    let csv_path = out.path().join("report.csv");
    let report = run_pipeline(music.path(), &csv_config(csv_path.clone()), Arc::new(NoProgress))
        .unwrap();

    let content = fs::read_to_string(&csv_path).unwrap();
    let data_rows = content.lines().skip(1).count();
    assert_eq!(data_rows, (4 - 1) + (3 - 1));
    assert_eq!(report.summary.duplicate_files, data_rows);
    assert!(!content.contains("solo.m4a"));
}

#[test]
fn test_csv_original_never_in_second_column() {
    let music = tempdir().unwrap();
    let out = tempdir().unwrap();
    for name in ["orig.mp3", "dup1.mp3", "dup2.mp3"] {
        fs::write(music.path().join(name), b"same").unwrap();
    }

    let csv_path = out.path().join("report.csv");
    run_pipeline(music.path(), &csv_config(csv_path.clone()), Arc::new(NoProgress)).unwrap();

    let mut reader = csv::Reader::from_path(&csv_path).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, vec!["File 1", "File 2", "Duplicate"]);

    // Sorted by name, so "dup1.mp3" is listed first and kept.
    let first_by_name = music.path().join("dup1.mp3");
    let mut rows = 0;
    for record in reader.records() {
        let record = record.unwrap();
        rows += 1;
        assert_eq!(&record[0], first_by_name.to_string_lossy().as_ref());
        assert_ne!(&record[1], &record[0]);
        assert_eq!(&record[2], "TRUE");
    }
    assert_eq!(rows, 2);
}

#[test]
fn test_csv_is_idempotent() {
    let music = tempdir().unwrap();
    let out = tempdir().unwrap();
    fs::write(music.path().join("a.mp3"), b"one").unwrap();
    fs::write(music.path().join("b.mp3"), b"one").unwrap();
    fs::write(music.path().join("c.wav"), b"two").unwrap();
    fs::write(music.path().join("d.wav"), b"two").unwrap();

    let first = out.path().join("first.csv");
    let second = out.path().join("second.csv");
    run_pipeline(music.path(), &csv_config(first.clone()), Arc::new(NoProgress)).unwrap();
    run_pipeline(music.path(), &csv_config(second.clone()), Arc::new(NoProgress)).unwrap();

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn test_csv_does_not_touch_files() {
    let music = tempdir().unwrap();
    let out = tempdir().unwrap();
    fs::write(music.path().join("a.mp3"), b"one").unwrap();
    fs::write(music.path().join("b.mp3"), b"one").unwrap();

    run_pipeline(
        music.path(),
        &csv_config(out.path().join("r.csv")),
        Arc::new(NoProgress),
    )
    .unwrap();

    assert!(music.path().join("a.mp3").exists());
    assert!(music.path().join("b.mp3").exists());
}

#[test]
fn test_csv_unwritable_output_is_fatal() {
    let music = tempdir().unwrap();
    let out = tempdir().unwrap();
    fs::write(music.path().join("a.mp3"), b"one").unwrap();
    fs::write(music.path().join("b.mp3"), b"one").unwrap();

    let csv_path = out.path().join("missing_dir").join("r.csv");
    let err = run_pipeline(music.path(), &csv_config(csv_path), Arc::new(NoProgress))
        .unwrap_err();

    assert!(format!("{err:#}").contains("Error writing CSV file"));
}
