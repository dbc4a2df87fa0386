// tests/scanner.rs

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::tempdir;

use renderq::errors::{LoadErrorKind, RenderqError};
use renderq::fs::mock::MockFileSystem;
use renderq::fs::{FileSystem, RealFileSystem};
use renderq::job::{ScanOptions, Scanner};
use renderq::watch::DescriptorMatcher;
use renderq_test_utils::builders::DescriptorBuilder;

fn json_matcher() -> DescriptorMatcher {
    DescriptorMatcher::new(&["*.json"]).unwrap()
}

fn mock_scanner(fs: &MockFileSystem, options: ScanOptions) -> Scanner {
    let fs: Arc<dyn FileSystem> = Arc::new(fs.clone());
    Scanner::new(fs, "jobs", json_matcher(), options)
}

#[test]
fn consuming_scan_deletes_loaded_descriptors() {
    let dir = tempdir().unwrap();
    let a = DescriptorBuilder::new("echo a").id("a").write_to(dir.path(), "a.json");
    let b = DescriptorBuilder::new("echo b").id("b").write_to(dir.path(), "b.json");

    let scanner = Scanner::new(
        Arc::new(RealFileSystem),
        dir.path(),
        json_matcher(),
        ScanOptions::consuming(),
    );
    let report = scanner.scan().unwrap();

    let ids: Vec<_> = report.loaded.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
    assert!(report.failed.is_empty());
    assert!(!a.exists());
    assert!(!b.exists());

    // Nothing left for the next pass.
    assert!(scanner.scan().unwrap().loaded.is_empty());
}

#[test]
fn failed_descriptor_stays_and_is_retried() {
    let fs = MockFileSystem::new();
    fs.add_file("jobs/good.json", r#"{"command": "true"}"#);
    fs.add_file("jobs/bad.json", r#"{"id": "bad"}"#);

    let scanner = mock_scanner(&fs, ScanOptions::consuming());

    let first = scanner.scan().unwrap();
    assert_eq!(first.loaded.len(), 1);
    assert_eq!(first.failed.len(), 1);
    assert_eq!(first.failed[0].file, "bad.json");
    assert!(!fs.exists("jobs/good.json"));
    assert!(fs.exists("jobs/bad.json"));

    let second = scanner.scan().unwrap();
    assert!(second.loaded.is_empty());
    assert_eq!(second.failed.len(), 1);
}

#[test]
fn non_matching_files_and_subdirectories_are_ignored() {
    let fs = MockFileSystem::new();
    fs.add_file("jobs/notes.txt", "not a job");
    fs.add_file("jobs/job.json.tmp", r#"{"command": "true"}"#);
    fs.add_dir("jobs/nested.json");
    fs.add_file("jobs/real.json", r#"{"command": "true"}"#);

    let report = mock_scanner(&fs, ScanOptions::consuming()).scan().unwrap();

    assert_eq!(report.loaded.len(), 1);
    assert_eq!(report.loaded[0].id, "real");
    assert!(report.failed.is_empty());
    assert!(fs.exists("jobs/notes.txt"));
    assert!(fs.exists("jobs/job.json.tmp"));
}

#[test]
fn non_consuming_scan_sees_the_same_files_again() {
    // Same as a crash between load and delete: the descriptor is still
    // there on the next pass and gets picked up again.
    let fs = MockFileSystem::new();
    fs.add_file("jobs/a.json", r#"{"command": "true"}"#);

    let scanner = mock_scanner(&fs, ScanOptions::default());

    assert_eq!(scanner.scan().unwrap().loaded.len(), 1);
    assert_eq!(scanner.scan().unwrap().loaded.len(), 1);
    assert!(fs.exists("jobs/a.json"));
}

#[test]
fn record_is_not_handed_out_when_delete_fails() {
    let fs = MockFileSystem::new();
    fs.add_file("jobs/a.json", r#"{"command": "true"}"#);
    fs.deny_removals(true);

    let scanner = mock_scanner(&fs, ScanOptions::consuming());
    let report = scanner.scan().unwrap();

    assert!(report.loaded.is_empty());
    assert_eq!(report.failed.len(), 1);
    assert!(matches!(report.failed[0].kind, LoadErrorKind::Consume(_)));
    assert!(fs.exists("jobs/a.json"));

    // Once the file can be removed it is consumed normally.
    fs.deny_removals(false);
    let report = scanner.scan().unwrap();
    assert_eq!(report.loaded.len(), 1);
    assert!(!fs.exists("jobs/a.json"));
}

#[test]
fn quarantine_moves_failed_descriptors_out() {
    let fs = MockFileSystem::new();
    fs.add_file("jobs/bad.json", "{ nope");

    let options = ScanOptions {
        consume: true,
        quarantine_dir: Some(PathBuf::from("failed")),
    };
    let scanner = mock_scanner(&fs, options);

    let report = scanner.scan().unwrap();
    assert_eq!(report.failed.len(), 1);
    assert_eq!(
        report.quarantined,
        vec![(PathBuf::from("jobs/bad.json"), PathBuf::from("failed/bad.json"))]
    );
    assert!(!fs.exists("jobs/bad.json"));
    assert!(fs.exists("failed/bad.json"));

    // Quarantined files are not retried.
    let again = scanner.scan().unwrap();
    assert!(again.failed.is_empty());
}

#[test]
fn repeated_quarantine_keeps_every_failed_payload() {
    let fs = MockFileSystem::new();
    let scanner = mock_scanner(
        &fs,
        ScanOptions {
            consume: true,
            quarantine_dir: Some(PathBuf::from("failed")),
        },
    );

    fs.add_file("jobs/bad.json", "FIRST broken payload");
    scanner.scan().unwrap();
    fs.add_file("jobs/bad.json", "SECOND broken payload");
    let report = scanner.scan().unwrap();
    fs.add_file("jobs/bad.json", "THIRD broken payload");
    scanner.scan().unwrap();

    assert_eq!(
        report.quarantined,
        vec![(PathBuf::from("jobs/bad.json"), PathBuf::from("failed/bad.json.1"))]
    );
    let read = |p: &str| fs.read_to_string(Path::new(p)).unwrap();
    assert_eq!(read("failed/bad.json"), "FIRST broken payload");
    assert_eq!(read("failed/bad.json.1"), "SECOND broken payload");
    assert_eq!(read("failed/bad.json.2"), "THIRD broken payload");
}

#[test]
fn repeated_quarantine_on_real_filesystem_does_not_overwrite() {
    let dir = tempdir().unwrap();
    let jobs = dir.path().join("jobs");
    let failed = dir.path().join("failed");
    std::fs::create_dir_all(&jobs).unwrap();

    let scanner = Scanner::new(
        Arc::new(RealFileSystem),
        &jobs,
        json_matcher(),
        ScanOptions {
            consume: true,
            quarantine_dir: Some(failed.clone()),
        },
    );

    std::fs::write(jobs.join("bad.json"), "FIRST").unwrap();
    scanner.scan().unwrap();
    std::fs::write(jobs.join("bad.json"), "SECOND").unwrap();
    scanner.scan().unwrap();

    assert_eq!(std::fs::read_to_string(failed.join("bad.json")).unwrap(), "FIRST");
    assert_eq!(std::fs::read_to_string(failed.join("bad.json.1")).unwrap(), "SECOND");
    assert!(!jobs.join("bad.json").exists());
}

#[test]
fn quarantine_on_real_filesystem_creates_the_directory() {
    let dir = tempdir().unwrap();
    let jobs = dir.path().join("jobs");
    let failed = dir.path().join("failed");
    std::fs::create_dir_all(&jobs).unwrap();
    std::fs::write(jobs.join("bad.json"), "[]").unwrap();

    let scanner = Scanner::new(
        Arc::new(RealFileSystem),
        &jobs,
        json_matcher(),
        ScanOptions {
            consume: true,
            quarantine_dir: Some(failed.clone()),
        },
    );
    let report = scanner.scan().unwrap();

    assert_eq!(report.quarantined.len(), 1);
    assert!(failed.join("bad.json").exists());
    assert!(!jobs.join("bad.json").exists());
}

#[test]
fn missing_directory_is_fatal() {
    let fs = MockFileSystem::new();
    let scanner = mock_scanner(&fs, ScanOptions::consuming());

    match scanner.scan() {
        Err(RenderqError::WatchDir { path, .. }) => assert_eq!(path, Path::new("jobs")),
        other => panic!("expected WatchDir error, got {other:?}"),
    }
}

#[test]
fn ensure_dir_creates_the_watched_directory() {
    let dir = tempdir().unwrap();
    let jobs = dir.path().join("incoming").join("jobs");

    let scanner = Scanner::new(
        Arc::new(RealFileSystem),
        &jobs,
        json_matcher(),
        ScanOptions::consuming(),
    );
    scanner.ensure_dir().unwrap();

    assert!(jobs.is_dir());
    assert!(scanner.scan().unwrap().loaded.is_empty());
}

#[test]
fn matcher_uses_file_name_only() {
    let matcher = DescriptorMatcher::new(&["*.json", "job-*.txt"]).unwrap();

    assert!(matcher.matches(Path::new("/some/where/a.json")));
    assert!(matcher.matches(Path::new("job-1.txt")));
    assert!(!matcher.matches(Path::new("notes.txt")));
    assert!(!matcher.matches(Path::new("a.json.swp")));

    let by_ext = DescriptorMatcher::for_extension(".json").unwrap();
    assert_eq!(by_ext.patterns(), ["*.json".to_string()]);
}

#[test]
fn matcher_rejects_empty_or_invalid_patterns() {
    let empty: [&str; 0] = [];
    assert!(matches!(
        DescriptorMatcher::new(&empty),
        Err(RenderqError::ConfigError(_))
    ));
    assert!(matches!(
        DescriptorMatcher::new(&["[unclosed"]),
        Err(RenderqError::ConfigError(_))
    ));
}
