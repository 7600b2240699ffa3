//! Integration tests for the candidate sources
//!
//! These build small directory trees and config files on disk and check
//! what each source would hand to the selector.

use std::fs;
use std::io::Write;

use tempfile::{NamedTempFile, TempDir};
use toolbelt_cli::sources::{find_dirs, parse_ssh_hosts, read_lines, split_groups};

fn make_tree() -> TempDir {
    let root = TempDir::new().unwrap();
    for dir in [
        "code/toolbelt/src",
        "code/toolbelt/.git/objects",
        "code/site/node_modules/pkg",
        "notes",
        ".cache/deep",
    ] {
        fs::create_dir_all(root.path().join(dir)).unwrap();
    }
    fs::write(root.path().join("notes/todo.txt"), "x").unwrap();
    root
}

#[test]
fn test_find_dirs_skips_noise_and_files() {
    let root = make_tree();
    let dirs = find_dirs(root.path(), 3).unwrap();
    let relative: Vec<String> = dirs.iter().map(|d| d.relative()).collect();

    assert_eq!(
        relative,
        vec![
            "code",
            "code/site",
            "code/toolbelt",
            "code/toolbelt/src",
            "notes",
        ]
    );
    assert!(dirs.iter().all(|d| d.root == root.path()));
}

#[test]
fn test_find_dirs_respects_depth() {
    let root = make_tree();
    let dirs = find_dirs(root.path(), 1).unwrap();
    let relative: Vec<String> = dirs.iter().map(|d| d.relative()).collect();

    assert_eq!(relative, vec!["code", "notes"]);
}

#[test]
fn test_find_dirs_missing_root() {
    let root = make_tree();
    let result = find_dirs(&root.path().join("missing"), 3);
    assert!(result.is_err());
}

#[test]
fn test_lines_from_file_with_groups() {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(
        temp_file,
        "work: deploy\nwork: logs\n\nhome: backup\n"
    )
    .unwrap();

    let file = fs::File::open(temp_file.path()).unwrap();
    let lines = read_lines(std::io::BufReader::new(file)).unwrap();
    let lines = split_groups(lines, Some(':'));

    let groups: Vec<Option<&str>> = lines.iter().map(|l| l.group.as_deref()).collect();
    let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(groups, vec![Some("work"), Some("work"), Some("home")]);
    assert_eq!(texts, vec!["deploy", "logs", "backup"]);
}

#[test]
fn test_hosts_from_config_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(
        temp_file,
        "Host bastion\n  User admin\n\nHost *.internal\n  ProxyJump bastion\n"
    )
    .unwrap();

    let file = fs::File::open(temp_file.path()).unwrap();
    let hosts = parse_ssh_hosts(std::io::BufReader::new(file)).unwrap();
    assert_eq!(hosts, vec!["bastion"]);
}
