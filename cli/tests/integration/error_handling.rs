//! Error handling integration tests for fcp CLI.
//!
//! These tests verify:
//! - Argument validation and exit codes
//! - Counting failures abort before anything is written
//! - Partial failures report the error and keep what was copied

#[path = "../common/mod.rs"]
mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::{TestFixture, count_files_recursive};
use predicates::prelude::*;
use std::fs;

#[test]
fn test_missing_destination_operand() {
    let fx = TestFixture::new();

    cargo_bin_cmd!("fcp")
        .arg(fx.src.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Missing destination operand"));
}

#[test]
fn test_source_not_found() {
    let fx = TestFixture::new();

    cargo_bin_cmd!("fcp")
        .arg("/nonexistent/path/dir")
        .arg(fx.dest("out"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Source does not exist"));

    assert!(!fx.dest("out").exists());
}

#[test]
fn test_source_is_a_file() {
    let fx = TestFixture::new();
    let file = fx.src.path().join("file.txt");
    fs::write(&file, "content").unwrap();

    cargo_bin_cmd!("fcp")
        .arg(&file)
        .arg(fx.dest("out"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Source is not a directory"));
}

#[test]
fn test_destination_is_a_file() {
    let fx = TestFixture::new();
    fs::write(fx.src.path().join("a.txt"), "a").unwrap();
    let dest = fx.dest("occupied");
    fs::write(&dest, "not a directory").unwrap();

    cargo_bin_cmd!("fcp")
        .arg(fx.src.path())
        .arg(&dest)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to create directory"));

    assert_eq!(fs::read_to_string(&dest).unwrap(), "not a directory");
}

#[cfg(unix)]
#[test]
fn test_partial_failure_keeps_copied_files() {
    use std::os::unix::fs::symlink;

    let fx = TestFixture::new();
    let src = fx.src.path();
    fs::create_dir(src.join("good")).unwrap();
    for i in 0..3 {
        fs::write(src.join(format!("good/f{i}.txt")), "ok").unwrap();
    }
    fs::create_dir(src.join("bad")).unwrap();
    symlink(src.join("nowhere"), src.join("bad/dangling")).unwrap();

    let dest = fx.dest("out");
    cargo_bin_cmd!("fcp")
        .arg(src)
        .arg(&dest)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("copy failed"))
        .stderr(predicate::str::contains("Failed to open source file"));

    assert_eq!(count_files_recursive(&dest.join("good")), 3);
}

#[cfg(unix)]
#[test]
fn test_multi_source_one_failing() {
    use std::os::unix::fs::symlink;

    let ok = TestFixture::new();
    let bad = TestFixture::new();
    fs::write(ok.src.path().join("x.txt"), "x").unwrap();
    symlink(
        bad.src.path().join("nowhere"),
        bad.src.path().join("dangling"),
    )
    .unwrap();

    let dest = ok.dest("D");
    cargo_bin_cmd!("fcp")
        .arg(ok.src.path())
        .arg(bad.src.path())
        .arg(&dest)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Copy incomplete after 1 files"));

    ok.assert_file_content(&dest.join("x.txt"), "x");
}
