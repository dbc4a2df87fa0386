// tests/loader.rs

use std::path::Path;
use std::time::{Duration, SystemTime};

use serde_json::{json, Value};
use tempfile::tempdir;

use renderq::errors::LoadErrorKind;
use renderq::fs::mock::MockFileSystem;
use renderq::fs::RealFileSystem;
use renderq::job::load_job_file;
use renderq::job::loader::parse_priority;
use renderq_test_utils::builders::DescriptorBuilder;

fn kind_of(fs: &MockFileSystem, path: &str) -> LoadErrorKind {
    match load_job_file(fs, Path::new(path)) {
        Ok(record) => panic!("expected load error, got {record:?}"),
        Err(err) => {
            assert_eq!(err.file, Path::new(path).file_name().unwrap().to_str().unwrap());
            err.kind
        }
    }
}

#[test]
fn loads_all_fields_from_disk() {
    let dir = tempdir().unwrap();
    let path = DescriptorBuilder::new("echo hi")
        .id("a")
        .priority(5)
        .field("scene", json!("shot_010.blend"))
        .write_to(dir.path(), "a.json");

    let record = load_job_file(&RealFileSystem, &path).unwrap();

    assert_eq!(record.id, "a");
    assert_eq!(record.priority, 5);
    assert_eq!(record.command, "echo hi");
    assert_eq!(record.source, path);
    assert_eq!(record.raw_payload.get("scene"), Some(&json!("shot_010.blend")));
    assert_eq!(
        record.submitted_at,
        std::fs::metadata(&path).unwrap().modified().unwrap()
    );

    // Loading never deletes.
    assert!(path.exists());
}

#[test]
fn id_defaults_to_file_stem_and_priority_to_zero() {
    let fs = MockFileSystem::new();
    fs.add_file("jobs/render-7.json", r#"{"command": "echo x"}"#);

    let record = load_job_file(&fs, Path::new("jobs/render-7.json")).unwrap();
    assert_eq!(record.id, "render-7");
    assert_eq!(record.priority, 0);
}

#[test]
fn numeric_id_is_kept_as_text() {
    let fs = MockFileSystem::new();
    fs.add_file("jobs/n.json", r#"{"id": 42, "command": "true"}"#);

    let record = load_job_file(&fs, Path::new("jobs/n.json")).unwrap();
    assert_eq!(record.id, "42");
}

#[test]
fn submitted_at_comes_from_file_modification_time() {
    let fs = MockFileSystem::new();
    let at = SystemTime::UNIX_EPOCH + Duration::from_secs(1234);
    fs.add_file_at("jobs/t.json", r#"{"command": "true"}"#, at);

    let record = load_job_file(&fs, Path::new("jobs/t.json")).unwrap();
    assert_eq!(record.submitted_at, at);
}

#[test]
fn missing_command_is_a_load_error() {
    let fs = MockFileSystem::new();
    fs.add_file("jobs/b.json", r#"{"id": "b", "priority": 3}"#);

    assert!(matches!(kind_of(&fs, "jobs/b.json"), LoadErrorKind::MissingCommand));
    assert!(fs.exists("jobs/b.json"));
}

#[test]
fn null_command_counts_as_missing() {
    let fs = MockFileSystem::new();
    fs.add_file("jobs/b.json", r#"{"command": null}"#);

    assert!(matches!(kind_of(&fs, "jobs/b.json"), LoadErrorKind::MissingCommand));
}

#[test]
fn blank_or_non_string_command_is_rejected() {
    let fs = MockFileSystem::new();
    fs.add_file("jobs/blank.json", r#"{"command": "   "}"#);
    fs.add_file("jobs/list.json", r#"{"command": ["echo", "hi"]}"#);

    assert!(matches!(kind_of(&fs, "jobs/blank.json"), LoadErrorKind::EmptyCommand));
    assert!(matches!(
        kind_of(&fs, "jobs/list.json"),
        LoadErrorKind::InvalidCommand("an array")
    ));
}

#[test]
fn malformed_json_is_a_load_error() {
    let fs = MockFileSystem::new();
    fs.add_file("jobs/bad.json", "{ not json");

    assert!(matches!(kind_of(&fs, "jobs/bad.json"), LoadErrorKind::Malformed(_)));
}

#[test]
fn top_level_must_be_an_object() {
    let fs = MockFileSystem::new();
    fs.add_file("jobs/arr.json", r#"["echo hi"]"#);

    assert!(matches!(
        kind_of(&fs, "jobs/arr.json"),
        LoadErrorKind::NotAnObject("an array")
    ));
}

#[test]
fn object_id_is_rejected() {
    let fs = MockFileSystem::new();
    fs.add_file("jobs/o.json", r#"{"id": {"x": 1}, "command": "true"}"#);

    assert!(matches!(
        kind_of(&fs, "jobs/o.json"),
        LoadErrorKind::InvalidId("an object")
    ));
}

#[test]
fn non_integer_priority_is_a_load_error() {
    let fs = MockFileSystem::new();
    fs.add_file("jobs/p.json", r#"{"priority": "high", "command": "true"}"#);

    match kind_of(&fs, "jobs/p.json") {
        LoadErrorKind::InvalidPriority(raw) => assert!(raw.contains("high")),
        other => panic!("expected InvalidPriority, got {other:?}"),
    }
}

#[test]
fn unreadable_file_is_a_read_error() {
    let fs = MockFileSystem::new();

    assert!(matches!(kind_of(&fs, "jobs/gone.json"), LoadErrorKind::Read(_)));
}

#[test]
fn load_error_message_names_the_file() {
    let fs = MockFileSystem::new();
    fs.add_file("jobs/b.json", "{}");

    let err = load_job_file(&fs, Path::new("jobs/b.json")).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("b.json"), "{msg}");
    assert!(msg.contains("command"), "{msg}");
}

#[test]
fn priority_coercion() {
    let ok = |v: Value| parse_priority(Some(&v)).unwrap();

    assert_eq!(parse_priority(None).unwrap(), 0);
    assert_eq!(ok(json!(7)), 7);
    assert_eq!(ok(json!(-2)), -2);
    assert_eq!(ok(json!(3.9)), 3);
    assert_eq!(ok(json!(-3.9)), -3);
    assert_eq!(ok(json!(" 12 ")), 12);
    assert_eq!(ok(json!("-4")), -4);

    for bad in [
        json!(true),
        json!(null),
        json!("1.5"),
        json!(""),
        json!([1]),
        json!({"p": 1}),
        json!(1e300),
    ] {
        assert!(
            matches!(parse_priority(Some(&bad)), Err(LoadErrorKind::InvalidPriority(_))),
            "expected {bad} to be rejected"
        );
    }
}
