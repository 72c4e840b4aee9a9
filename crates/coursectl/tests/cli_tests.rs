//! CLI integration tests for coursectl
//!
//! Tests the CLI surface:
//! - coursectl run SCENARIO   logs the fault to ./errors.log and exits 3
//! - coursectl errors         unique errors, --all, --recent N, --json
//! - coursectl summary        counts by kind
//! - coursectl context        source window around each logged site

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn coursectl(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_coursectl"))
        .args(args)
        .current_dir(dir)
        .env_remove("COURSECTL_CONFIG")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run coursectl")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn run_writes_errors_log_in_working_directory() {
    let dir = tempfile::tempdir().unwrap();

    let output = coursectl(dir.path(), &["run", "divide"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("DivideByZeroError"));

    let log = fs::read_to_string(dir.path().join("errors.log")).unwrap();
    assert_eq!(log.lines().count(), 1);
    assert!(log.starts_with("[ERROR] ["));
    assert!(log.contains("[service.rs:"));
    assert!(log.contains("DivideByZeroError: Attempted to divide by zero."));
}

#[test]
fn run_prints_trace_through_controller() {
    let dir = tempfile::tempdir().unwrap();

    let output = coursectl(dir.path(), &["run", "index"]);
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    let trace = stderr
        .lines()
        .find(|line| line.starts_with("trace: "))
        .expect("trace line");
    assert!(trace.contains("service.rs:"));
    assert!(trace.contains(" <- "));
    assert!(trace.contains("controller.rs:"));
}

#[test]
fn run_divide_with_bad_input_is_a_format_fault() {
    let dir = tempfile::tempdir().unwrap();

    let output = coursectl(dir.path(), &["run", "divide", "--input", "three"]);
    assert_eq!(output.status.code(), Some(3));

    let log = fs::read_to_string(dir.path().join("errors.log")).unwrap();
    assert_eq!(log.lines().count(), 1);
    assert!(log.contains("FormatError"));
}

#[test]
fn run_success_logs_nothing() {
    let dir = tempfile::tempdir().unwrap();

    let output = coursectl(dir.path(), &["run", "index", "--input", "1"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "History");
    assert!(!dir.path().join("errors.log").exists());
}

#[test]
fn default_policy_substitutes_empty_name() {
    let dir = tempfile::tempdir().unwrap();

    let strict = coursectl(dir.path(), &["run", "normalize"]);
    assert_eq!(strict.status.code(), Some(3));

    let lenient = coursectl(dir.path(), &["run", "normalize", "--policy", "default"]);
    assert!(lenient.status.success());

    let log = fs::read_to_string(dir.path().join("errors.log")).unwrap();
    assert_eq!(log.lines().count(), 1);
}

#[test]
fn errors_lists_unique_sites() {
    let dir = tempfile::tempdir().unwrap();
    coursectl(dir.path(), &["run", "parse"]);
    coursectl(dir.path(), &["run", "parse"]);
    coursectl(dir.path(), &["run", "find"]);

    let unique = coursectl(dir.path(), &["errors"]);
    assert!(unique.status.success());
    assert_eq!(stdout(&unique).lines().count(), 2);

    let all = coursectl(dir.path(), &["errors", "--all"]);
    assert_eq!(stdout(&all).lines().count(), 3);

    let json = coursectl(dir.path(), &["errors", "--recent", "1", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&stdout(&json)).unwrap();
    assert_eq!(parsed.as_array().map(Vec::len), Some(1));
    assert_eq!(parsed[0]["kind"], "NotFoundError");
}

#[test]
fn summary_counts_by_kind() {
    let dir = tempfile::tempdir().unwrap();
    coursectl(dir.path(), &["run", "null"]);
    coursectl(dir.path(), &["run", "validate"]);

    let output = coursectl(dir.path(), &["summary"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.starts_with("2 errors at 2 sites"));
    assert!(text.contains("ArgumentNullError"));
    assert!(text.contains("NullReferenceError"));
}

#[test]
fn log_file_flag_and_config_file() {
    let dir = tempfile::tempdir().unwrap();

    coursectl(dir.path(), &["run", "index", "--log-file", "custom.log"]);
    assert!(dir.path().join("custom.log").exists());
    assert!(!dir.path().join("errors.log").exists());

    fs::write(
        dir.path().join("coursectl.toml"),
        "[logging]\nerror_log = \"from-config.log\"\n",
    )
    .unwrap();
    coursectl(dir.path(), &["run", "find"]);
    assert!(dir.path().join("from-config.log").exists());
}

#[test]
fn unreadable_config_is_a_general_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("coursectl.toml"), "[logging\n").unwrap();

    let output = coursectl(dir.path(), &["summary"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn unwritable_log_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("errors.log")).unwrap();

    let output = coursectl(dir.path(), &["run", "divide"]);
    assert_eq!(output.status.code(), Some(74));
    assert!(String::from_utf8_lossy(&output.stderr).contains("not logged"));
}

#[test]
fn empty_log_reports_nothing_recorded() {
    let dir = tempfile::tempdir().unwrap();

    let output = coursectl(dir.path(), &["errors"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "no errors recorded");
}

#[test]
fn long_version_reports_build_flavour() {
    let dir = tempfile::tempdir().unwrap();

    let output = coursectl(dir.path(), &["--version"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.starts_with("coursectl "));
    assert!(text.contains(" (debug, ") || text.contains(" (release, "));
}
