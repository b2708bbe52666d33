//! Integration tests for reading records and snapshots from a process root.
//!
//! The fixture tree under `tests/fixtures/proc` mimics `/proc`:
//! - `1`: complete record for init
//! - `42`: stops at `utime`
//! - `300`: stops at `rsslim` (value outside i64)
//! - `500`: empty status file
//! - `901`: comm with a space, misaligned after `comm`
//! - `77`: directory without a status file
//! - `self`, `sys`: non-numeric entries

use pidstat::{FieldValue, PidstatError, ProcStatReader, FIELD_COUNT};

const FIXTURE_ROOT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/proc");

fn reader() -> ProcStatReader {
    ProcStatReader::new(FIXTURE_ROOT)
}

#[test]
fn test_get_init_record() {
    let record = reader().get("1").expect("init record");

    assert_eq!(record.len(), FIELD_COUNT);
    assert!(record.is_complete());
    assert_eq!(record.integer("pid"), Some(1));
    assert_eq!(record.text("comm"), Some("(init)"));
    assert_eq!(record.text("state"), Some("S"));
    assert_eq!(record.integer("ppid"), Some(0));
    assert_eq!(record.integer("tty_nr"), Some(0));
    assert_eq!(record.integer("tpgid"), Some(-1));
    assert_eq!(record.integer("rss"), Some(120));
    assert_eq!(record.integer("cguest_time"), Some(0));
}

#[test]
fn test_get_missing_pid_fails() {
    let err = reader().get("77").expect_err("no status file");
    assert!(matches!(err, PidstatError::StatUnreadable { ref pid, .. } if pid == "77"));

    let err = reader().get("99999").expect_err("no such process");
    assert!(matches!(err, PidstatError::StatUnreadable { .. }));
}

#[test]
fn test_get_outcome_reports_truncation() {
    let outcome = reader().get_outcome("42").expect("kworker record");
    assert!(outcome.is_truncated());
    assert_eq!(outcome.stopped_at(), Some("utime"));

    let truncation = outcome.truncation.as_ref().expect("truncation");
    assert_eq!(truncation.index, 13);
    assert_eq!(truncation.token, "x");

    let record = outcome.into_record();
    assert_eq!(record.len(), 13);
    assert_eq!(record.integer("cmajflt"), Some(0));
    assert_eq!(record.get("utime"), None);
    assert_eq!(record.get("rss"), None);
}

#[test]
fn test_out_of_range_value_truncates() {
    let outcome = reader().get_outcome("300").expect("sshd record");
    assert_eq!(outcome.stopped_at(), Some("rsslim"));
    assert_eq!(outcome.record.integer("rss"), Some(3000));
    assert_eq!(outcome.record.get("rsslim"), None);
}

#[test]
fn test_comm_with_space_misaligns() {
    let outcome = reader().get_outcome("901").expect("tmux record");
    assert_eq!(outcome.record.text("comm"), Some("(tmux:"));
    assert_eq!(outcome.record.text("state"), Some("server)"));
    assert_eq!(outcome.stopped_at(), Some("ppid"));
}

#[test]
fn test_get_all_builds_snapshot() {
    let snapshot = reader().get_all().expect("snapshot");

    // Non-numeric entries and 77 (no status file) are left out
    assert_eq!(snapshot.pids(), vec!["1", "42", "300", "500", "901"]);
    assert!(!snapshot.contains("self"));
    assert!(!snapshot.contains("sys"));
    assert!(!snapshot.contains("77"));

    let empty = snapshot.get("500").expect("empty record kept");
    assert!(empty.is_empty());

    let init = snapshot.get("1").expect("init");
    assert_eq!(Some(init), reader().get("1").ok().as_ref());
}

#[test]
fn test_snapshot_keys_match_pid_field() {
    let snapshot = reader().get_all().expect("snapshot");
    for (pid, record) in snapshot.iter() {
        if let Some(FieldValue::Integer(v)) = record.get("pid") {
            assert_eq!(pid, v.to_string());
        }
    }
}

#[test]
fn test_get_all_missing_root_fails() {
    let reader = ProcStatReader::new(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/absent"));
    let err = reader.get_all().expect_err("missing root");
    assert!(matches!(err, PidstatError::RootUnreadable { .. }));
}

#[test]
fn test_snapshot_serializes_by_pid() {
    let snapshot = reader().get_all().expect("snapshot");
    let value = serde_json::to_value(&snapshot).expect("serialize");

    assert_eq!(value["1"]["comm"], "(init)");
    assert_eq!(value["1"]["ppid"], 0);
    assert_eq!(value["300"]["rss"], 3000);
    assert!(value["300"].get("rsslim").is_none());
    assert_eq!(value["500"], serde_json::json!({}));
}
