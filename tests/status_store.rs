mod common;

use std::fs;
use std::path::Path;

use stargate::flow::{STATUS_FILE_NAME, StatusRecord};
use stargate::fs::FileSystem;
use stargate::types::TaskStatus;

use common::{mock_store, real_store};

#[test]
fn status_path_is_keyed_by_flow_and_task() {
    let (_fs, store) = mock_store();

    assert_eq!(
        store.status_path("vivado", "synth"),
        Path::new("/out/vivado/synth").join(STATUS_FILE_NAME)
    );
    assert_eq!(store.task_dir("vivado", "impl"), Path::new("/out/vivado/impl"));
    assert_eq!(store.output_root(), Path::new("/out"));
}

#[test]
fn written_record_reads_back() {
    let dir = tempfile::tempdir().unwrap();
    let store = real_store(dir.path());

    let record = StatusRecord::new(TaskStatus::Failed, 3, "timing not met").with_duration_ms(42);
    store.write("demo", "impl", &record).unwrap();

    assert_eq!(store.read("demo", "impl"), TaskStatus::Failed);
    let back = store.read_record("demo", "impl").unwrap();
    assert_eq!(back, record);
    assert!(dir.path().join("demo/impl/status.json").is_file());
}

#[test]
fn on_disk_format_uses_snake_case_status() {
    let dir = tempfile::tempdir().unwrap();
    let store = real_store(dir.path());

    store
        .write("demo", "synth", &StatusRecord::new(TaskStatus::InProgress, 0, ""))
        .unwrap();

    let text = fs::read_to_string(store.status_path("demo", "synth")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["status"], "in_progress");
    assert_eq!(json["exit_code"], 0);
    assert_eq!(json["error"], "");
    assert!(json["timestamp"].as_str().is_some_and(|t| t.len() == 19));
}

#[test]
fn every_write_replaces_the_previous_record() {
    let (_fs, store) = mock_store();

    store
        .write("demo", "a", &StatusRecord::new(TaskStatus::Failed, 2, "boom"))
        .unwrap();
    store
        .write("demo", "a", &StatusRecord::new(TaskStatus::Success, 0, ""))
        .unwrap();

    let record = store.read_record("demo", "a").unwrap();
    assert_eq!(record.status, TaskStatus::Success);
    assert_eq!(record.exit_code, 0);
    assert!(record.error.is_empty());
}

#[test]
fn missing_record_is_not_started() {
    let (_fs, store) = mock_store();

    assert_eq!(store.read("demo", "never"), TaskStatus::NotStarted);
    assert!(store.read_record("demo", "never").is_none());
}

#[test]
fn malformed_record_is_not_started() {
    let (fs, store) = mock_store();
    fs.write(&store.status_path("demo", "a"), b"{ this is not json").unwrap();

    assert_eq!(store.read("demo", "a"), TaskStatus::NotStarted);
}

#[test]
fn unknown_status_value_is_not_started() {
    let (fs, store) = mock_store();
    fs.write(
        &store.status_path("demo", "a"),
        br#"{"status": "half_done", "timestamp": "", "exit_code": 0, "error": ""}"#,
    )
    .unwrap();

    assert_eq!(store.read("demo", "a"), TaskStatus::NotStarted);
}

#[test]
fn padded_status_value_is_not_started() {
    let (fs, store) = mock_store();
    fs.write(&store.status_path("demo", "a"), br#"{"status": " success "}"#)
        .unwrap();

    assert_eq!(store.read("demo", "a"), TaskStatus::NotStarted);
}

#[test]
fn record_without_optional_fields_still_parses() {
    let (fs, store) = mock_store();
    fs.write(&store.status_path("demo", "a"), br#"{"status": "success"}"#)
        .unwrap();

    let record = store.read_record("demo", "a").unwrap();
    assert_eq!(record.status, TaskStatus::Success);
    assert_eq!(record.duration_ms, 0);
}

#[test]
fn task_status_parsing() {
    assert_eq!("success".parse::<TaskStatus>().unwrap(), TaskStatus::Success);
    assert_eq!("failed".parse::<TaskStatus>().unwrap(), TaskStatus::Failed);
    assert!(" failed ".parse::<TaskStatus>().is_err());
    assert!("Success".parse::<TaskStatus>().is_err());
    assert_eq!(TaskStatus::from_status_str("garbage"), TaskStatus::NotStarted);
    assert_eq!(TaskStatus::default(), TaskStatus::NotStarted);
    assert_eq!(TaskStatus::InProgress.to_string(), "in_progress");
}
