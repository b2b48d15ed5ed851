//! Basic functionality integration tests for fcp CLI.

#[path = "../common/mod.rs"]
mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::{TestFixture, count_files_recursive, create_test_directory};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_recursive_directory_copy() {
    let fx = TestFixture::new();
    let src = fx.src.path();

    fs::create_dir_all(src.join("subdir/nested")).unwrap();
    fs::write(src.join("file1.txt"), "content1").unwrap();
    fs::write(src.join("subdir/file2.txt"), "content2").unwrap();
    fs::write(src.join("subdir/nested/file3.txt"), "content3").unwrap();

    let dest = fx.dest("copied");
    let mut cmd = cargo_bin_cmd!("fcp");
    cmd.arg("-q").arg(src).arg(&dest).assert().success();

    // Contents land directly in the destination
    fx.assert_file_content(&dest.join("file1.txt"), "content1");
    fx.assert_file_content(&dest.join("subdir/file2.txt"), "content2");
    fx.assert_file_content(&dest.join("subdir/nested/file3.txt"), "content3");
}

#[test]
fn test_nested_structure_all_files_copied() {
    let fx = TestFixture::new();
    fx.create_nested_structure(6, 4);

    let dest = fx.dest("out");
    let mut cmd = cargo_bin_cmd!("fcp");
    cmd.arg(fx.src.path())
        .arg(&dest)
        .assert()
        .success()
        .stdout(predicate::str::contains("Copied 24 files"));

    assert_eq!(count_files_recursive(&dest), 24);
    fx.assert_file_content(
        &dest.join("level0/level1/level2/file3.txt"),
        "content at level 2",
    );
}

#[test]
fn test_copy_multiple_sources_merge() {
    let a = TempDir::new().unwrap();
    let b = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();

    fs::write(a.path().join("x.txt"), "from a").unwrap();
    fs::write(b.path().join("y.txt"), "from b").unwrap();

    let dest = dst.path().join("D");
    let mut cmd = cargo_bin_cmd!("fcp");
    cmd.arg(a.path())
        .arg(b.path())
        .arg(&dest)
        .assert()
        .success()
        .stdout(predicate::str::contains("Copied 2 files"));

    assert_eq!(fs::read_to_string(dest.join("x.txt")).unwrap(), "from a");
    assert_eq!(fs::read_to_string(dest.join("y.txt")).unwrap(), "from b");
}

#[test]
fn test_copy_twice_overwrites() {
    let fx = TestFixture::new();
    fs::write(fx.src.path().join("file.txt"), "first, and longer").unwrap();
    let dest = fx.dest("out");

    cargo_bin_cmd!("fcp")
        .arg(fx.src.path())
        .arg(&dest)
        .assert()
        .success();

    fs::write(fx.src.path().join("file.txt"), "second").unwrap();
    cargo_bin_cmd!("fcp")
        .arg(fx.src.path())
        .arg(&dest)
        .assert()
        .success();

    fx.assert_file_content(&dest.join("file.txt"), "second");
}

#[test]
fn test_empty_subdirectories() {
    let fx = TestFixture::new();
    fs::create_dir_all(fx.src.path().join("a/b")).unwrap();
    fs::create_dir(fx.src.path().join("c")).unwrap();

    let dest = fx.dest("out");
    cargo_bin_cmd!("fcp")
        .arg(fx.src.path())
        .arg(&dest)
        .assert()
        .success()
        .stdout(predicate::str::contains("Copied 0 files"));

    assert!(dest.join("a/b").is_dir());
    assert!(dest.join("c").is_dir());
}

#[test]
fn test_small_buffer_and_jobs() {
    let fx = TestFixture::new();
    create_test_directory(&fx.src.path().join("data"), 20, 5000);

    let dest = fx.dest("out");
    cargo_bin_cmd!("fcp")
        .args(["-b", "333", "-j", "2", "--queue", "0"])
        .arg(fx.src.path())
        .arg(&dest)
        .assert()
        .success();

    assert_eq!(count_files_recursive(&dest), 20);
    assert_eq!(
        fs::read(dest.join("data/file7.txt")).unwrap(),
        "x".repeat(5000).into_bytes()
    );
}

#[test]
fn test_count_only_copies_nothing() {
    let fx = TestFixture::new();
    fx.create_nested_structure(3, 2);

    let dest = fx.dest("out");
    cargo_bin_cmd!("fcp")
        .arg("-n")
        .arg(fx.src.path())
        .arg(&dest)
        .assert()
        .success()
        .stdout(predicate::str::contains("6 files"));

    assert!(!dest.exists());
}

#[test]
fn test_quiet_mode_prints_nothing() {
    let fx = TestFixture::new();
    fs::write(fx.src.path().join("test.txt"), "content").unwrap();

    cargo_bin_cmd!("fcp")
        .arg("--quiet")
        .arg(fx.src.path())
        .arg(fx.dest("out"))
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(fx.dest("out").join("test.txt").exists());
}

#[test]
fn test_help_flag() {
    cargo_bin_cmd!("fcp")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("fcp"))
        .stdout(predicate::str::contains("--buffer-size"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("fcp")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("fcp"));
}
