//! Integration tests for canopy


use assert_cmd::Command;
use harness::{TestDir, run_canopy};
use predicates::prelude::*;

fn sample() -> TestDir {
    let dir = TestDir::new();
    dir.add_file("a.txt", "0123456789");
    dir.add_file("b.go", "package main");
    dir.add_file("sub/c.go", "package sub");
    dir.add_file("sub/deep/d.py", "print()");
    dir.add_dir("empty");
    dir.add_file(".secret", "hidden");
    dir
}

#[test]
fn test_basic_tree_output() {
    let dir = sample();
    let (stdout, _stderr, success) = run_canopy(dir.path(), &["-n"]);
    assert!(success, "canopy should succeed");
    let expected = "\
.
├── a.txt
├── b.go
├── empty
└── sub
    ├── c.go
    └── deep
        └── d.py

3 directories, 4 files
";
    assert_eq!(stdout, expected);
}

#[test]
fn test_show_all_flag() {
    let dir = sample();
    let (stdout, _, success) = run_canopy(dir.path(), &["-n"]);
    assert!(success);
    assert!(!stdout.contains(".secret"), "hidden file listed: {}", stdout);

    let (stdout, _, success) = run_canopy(dir.path(), &["-n", "-a"]);
    assert!(success);
    assert!(stdout.contains("├── .secret"), "{}", stdout);
    assert!(stdout.contains("3 directories, 5 files"));
}

#[test]
fn test_depth_limit() {
    let dir = sample();
    let (stdout, _, success) = run_canopy(dir.path(), &["-n", "-L", "1"]);
    assert!(success);
    assert!(stdout.contains("└── sub\n"), "{}", stdout);
    assert!(!stdout.contains("c.go"), "should not descend: {}", stdout);
    assert!(stdout.contains("2 directories, 2 files"));
}

#[test]
fn test_dirs_only() {
    let dir = sample();
    let (stdout, _, success) = run_canopy(dir.path(), &["-n", "-d"]);
    assert!(success);
    assert_eq!(stdout, ".\n├── empty\n└── sub\n    └── deep\n\n3 directories\n");
}

#[test]
fn test_include_pattern() {
    let dir = sample();
    let (stdout, _, success) = run_canopy(dir.path(), &["-n", "-P", r"\.go$"]);
    assert!(success);
    assert!(stdout.contains("b.go"));
    assert!(stdout.contains("c.go"));
    assert!(!stdout.contains("a.txt"));
    assert!(!stdout.contains("d.py"));
    // directories survive even when nothing inside matches
    assert!(stdout.contains("deep"));
    assert!(stdout.contains("empty"));
}

#[test]
fn test_exclude_pattern_ignore_case() {
    let dir = sample();
    let (stdout, _, success) =
        run_canopy(dir.path(), &["-n", "-I", r"\.GO$", "--ignore-case"]);
    assert!(success);
    assert!(!stdout.contains("b.go"));
    assert!(!stdout.contains("c.go"));
    assert!(stdout.contains("a.txt"));
    assert!(stdout.contains("d.py"));
}

#[test]
fn test_malformed_pattern_filters_nothing() {
    let dir = sample();
    let (stdout, _, success) = run_canopy(dir.path(), &["-n", "-P", "(unclosed"]);
    assert!(success);
    assert!(stdout.contains("a.txt"));
    assert!(stdout.contains("3 directories, 4 files"));
}

#[test]
fn test_byte_and_human_sizes() {
    let dir = TestDir::new();
    dir.add_file("ten", "0123456789");
    dir.add_file("big", &"x".repeat(1536));

    let (stdout, _, success) = run_canopy(dir.path(), &["-n", "-s", "--noreport", "big", "ten"]);
    assert!(success);
    assert_eq!(stdout, "[       1536]  big\n[         10]  ten\n");

    let (stdout, _, success) = run_canopy(dir.path(), &["-n", "-h", "--noreport", "big"]);
    assert!(success);
    assert_eq!(stdout, "[1.5K]  big\n");
}

#[test]
fn test_directory_size_is_recursive() {
    let dir = TestDir::new();
    dir.add_file("top/one", "12345");
    dir.add_file("top/inner/two", "1234567890");

    let (stdout, _, success) = run_canopy(dir.path(), &["-n", "-s", "--noreport", "top"]);
    assert!(success);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "[         15]  top");
    assert_eq!(lines[1], "├── [         10]  inner");
}

#[test]
fn test_no_indent() {
    let dir = sample();
    let (stdout, _, success) = run_canopy(dir.path(), &["-n", "-i", "--noreport"]);
    assert!(success);
    assert_eq!(stdout, ".\na.txt\nb.go\nempty\nsub\nc.go\ndeep\nd.py\n");
}

#[test]
fn test_reverse_and_dirsfirst() {
    let dir = sample();
    let (stdout, _, success) = run_canopy(dir.path(), &["-n", "-r", "-L", "1", "--noreport"]);
    assert!(success);
    assert_eq!(stdout, ".\n├── sub\n├── empty\n├── b.go\n└── a.txt\n");

    // within each group the listing order is kept, so only check grouping
    let (stdout, _, success) =
        run_canopy(dir.path(), &["-n", "--dirsfirst", "-L", "1", "--noreport"]);
    assert!(success);
    let names: Vec<&str> = stdout
        .lines()
        .skip(1)
        .map(|l| l.trim_start_matches(['├', '└', '─', ' ']))
        .collect();
    assert_eq!(names.len(), 4);
    let mut dirs = names[..2].to_vec();
    dirs.sort();
    assert_eq!(dirs, ["empty", "sub"]);
}

#[test]
fn test_version_sort() {
    let dir = TestDir::new();
    for name in ["file10", "file2", "file1"] {
        dir.add_file(name, "");
    }
    let (stdout, _, success) = run_canopy(dir.path(), &["-n", "-v", "--noreport"]);
    assert!(success);
    assert_eq!(stdout, ".\n├── file1\n├── file2\n└── file10\n");

    let (stdout, _, _) = run_canopy(dir.path(), &["-n", "--noreport"]);
    assert_eq!(stdout, ".\n├── file1\n├── file10\n└── file2\n");
}

#[test]
fn test_full_path_and_quotes() {
    let dir = sample();
    let (stdout, _, success) = run_canopy(dir.path(), &["-n", "-f", "-Q", "--noreport", "sub"]);
    assert!(success);
    assert_eq!(
        stdout,
        "\"sub\"\n├── \"sub/c.go\"\n└── \"sub/deep\"\n    └── \"sub/deep/d.py\"\n"
    );
}

#[test]
fn test_permissions_column() {
    let dir = TestDir::new();
    dir.add_file("f", "x");
    let (stdout, _, success) = run_canopy(dir.path(), &["-n", "-p", "--noreport"]);
    assert!(success);
    let line = stdout.lines().nth(1).unwrap();
    assert!(line.starts_with("└── [-rw"), "{}", line);
    assert!(line.ends_with("]  f"), "{}", line);
}

#[test]
fn test_color_always() {
    let dir = sample();
    let (stdout, _, success) = run_canopy(dir.path(), &["-C", "--noreport"]);
    assert!(success);
    let sub = stdout.lines().find(|l| l.contains("sub")).unwrap();
    assert!(sub.contains("\x1b["), "directory should be colored: {:?}", sub);
    assert!(stdout.contains("├── a.txt\n"), "plain files stay plain");
}

#[test]
fn test_color_never_when_piped() {
    let dir = sample();
    let (stdout, _, success) = run_canopy(dir.path(), &[]);
    assert!(success);
    assert!(!stdout.contains('\x1b'));
}

#[test]
fn test_multiple_roots_share_report() {
    let dir = sample();
    let (stdout, _, success) = run_canopy(dir.path(), &["-n", "sub", "empty"]);
    assert!(success);
    assert!(stdout.starts_with("sub\n"));
    assert!(stdout.contains("\nempty\n"));
    assert!(stdout.ends_with("\n1 directory, 2 files\n"), "{}", stdout);
}

#[test]
fn test_json_output() {
    let dir = sample();
    let (stdout, _, success) = run_canopy(dir.path(), &["--json", "sub"]);
    assert!(success);
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("valid json");
    let entries = value.as_array().unwrap();
    assert_eq!(entries[0]["type"], "directory");
    assert_eq!(entries[0]["name"], "sub");
    assert_eq!(entries[0]["contents"][0]["name"], "c.go");
    assert_eq!(entries[1]["type"], "report");
    assert_eq!(entries[1]["directories"], 1);
    assert_eq!(entries[1]["files"], 2);
}

#[test]
fn test_help_and_version() {
    Command::cargo_bin("canopy")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--human"));

    Command::cargo_bin("canopy")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("canopy"));
}

#[test]
fn test_conflicting_color_flags() {
    Command::cargo_bin("canopy")
        .unwrap()
        .args(["-C", "-n"])
        .assert()
        .failure();
}
