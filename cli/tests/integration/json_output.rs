//! JSON output integration tests for fcp CLI.

#[path = "../common/mod.rs"]
mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::TestFixture;
use serde_json::Value;
use std::fs;

fn parse_stdout(output: &std::process::Output) -> Value {
    let stdout = String::from_utf8(output.stdout.clone()).unwrap();
    serde_json::from_str(stdout.trim()).unwrap()
}

#[test]
fn test_json_success_summary() {
    let fx = TestFixture::new();
    fx.create_nested_structure(2, 3);

    let output = cargo_bin_cmd!("fcp")
        .args(["--output", "json"])
        .arg(fx.src.path())
        .arg(fx.dest("out"))
        .output()
        .unwrap();

    assert!(output.status.success());
    let value = parse_stdout(&output);
    assert_eq!(value["status"], "ok");
    assert_eq!(value["mode"], "execute");
    assert_eq!(value["files_copied"], 6);
    assert_eq!(value["dirs_created"], 3);
    assert!(value["duration_ms"].is_u64());
}

#[test]
fn test_json_count_only() {
    let fx = TestFixture::new();
    fx.create_nested_structure(4, 1);

    let output = cargo_bin_cmd!("fcp")
        .args(["--output", "json", "--count-only"])
        .arg(fx.src.path())
        .arg(fx.dest("out"))
        .output()
        .unwrap();

    assert!(output.status.success());
    let value = parse_stdout(&output);
    assert_eq!(value["mode"], "count");
    assert_eq!(value["files"], 4);
}

#[test]
fn test_json_failure_reports_code() {
    let fx = TestFixture::new();
    fs::write(fx.src.path().join("a.txt"), "a").unwrap();
    let dest = fx.dest("blocked");
    fs::write(&dest, "file in the way").unwrap();

    let output = cargo_bin_cmd!("fcp")
        .args(["--output", "json"])
        .arg(fx.src.path())
        .arg(&dest)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let value = parse_stdout(&output);
    assert_eq!(value["status"], "failed");
    assert_eq!(value["error_code"], "destination_failed");
    assert_eq!(value["files_copied"], 0);
}

#[test]
fn test_json_source_not_found() {
    let fx = TestFixture::new();

    let output = cargo_bin_cmd!("fcp")
        .args(["--output", "json"])
        .arg(fx.src.path().join("missing"))
        .arg(fx.dest("out"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(parse_stdout(&output)["error_code"], "source_not_found");
}
