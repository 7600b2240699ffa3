//! Candidate sources for the selector.
//!
//! Each source materializes its whole list up front; the selector does not
//! load candidates in the background.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use log::{debug, warn};
use toolbelt_core::error::{Error, Result};
use walkdir::WalkDir;

/// Directory names never descended into.
const SKIPPED_DIRS: [&str; 4] = [".cache", ".local", "node_modules", ".git"];

/// Default SSH client config.
const DEFAULT_SSH_CONFIG_PATH: &str = "~/.ssh/config";

/// A line, optionally split into a group and an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub group: Option<String>,
    pub text: String,
}

/// Reads all non-blank lines.
pub fn read_lines<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if !line.trim().is_empty() {
            lines.push(line.to_string());
        }
    }

    Ok(lines)
}

/// Splits every line at the first `delimiter`. Lines without it have no
/// group.
#[must_use]
pub fn split_groups(lines: Vec<String>, delimiter: Option<char>) -> Vec<Line> {
    lines
        .into_iter()
        .map(|line| match delimiter.and_then(|d| line.split_once(d)) {
            Some((group, text)) => Line {
                group: Some(group.trim().to_string()),
                text: text.trim().to_string(),
            },
            None => Line {
                group: None,
                text: line,
            },
        })
        .collect()
}

/// A directory found below one of the search roots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirCandidate {
    pub root: PathBuf,
    pub path: PathBuf,
}

impl DirCandidate {
    /// The path relative to its root.
    #[must_use]
    pub fn relative(&self) -> String {
        self.path
            .strip_prefix(&self.root)
            .unwrap_or(&self.path)
            .display()
            .to_string()
    }
}

/// Lists directories up to `max_depth` levels below `root`, in walk order.
///
/// Entries that cannot be read are skipped with a warning.
pub fn find_dirs(root: &Path, max_depth: usize) -> Result<Vec<DirCandidate>> {
    if !root.is_dir() {
        return Err(Error::io_error(
            "search root".to_string(),
            root.display().to_string(),
            std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
        ));
    }

    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            !SKIPPED_DIRS
                .iter()
                .any(|skipped| entry.file_name() == *skipped)
        });

    let mut dirs = Vec::new();
    for entry in walker {
        match entry {
            Ok(entry) if entry.file_type().is_dir() => dirs.push(DirCandidate {
                root: root.to_path_buf(),
                path: entry.into_path(),
            }),
            Ok(_) => {}
            Err(e) => warn!("Skipping unreadable entry: {e}"),
        }
    }

    debug!("Found {} directories below `{}`", dirs.len(), root.display());
    Ok(dirs)
}

/// Resolves the SSH config path, expanding `~`.
#[must_use]
pub fn get_ssh_config_path(ssh_config_arg: Option<&str>) -> String {
    shellexpand::tilde(ssh_config_arg.unwrap_or(DEFAULT_SSH_CONFIG_PATH)).to_string()
}

/// Collects the concrete host aliases of an SSH config.
///
/// Patterns with wildcards or negations are left out, and each alias is
/// returned once.
pub fn parse_ssh_hosts<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut hosts = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let mut words = line.split_whitespace();
        let Some(keyword) = words.next() else {
            continue;
        };
        if !keyword.eq_ignore_ascii_case("host") {
            continue;
        }
        hosts.extend(
            words
                .filter(|pattern| !pattern.contains(['*', '?', '!']))
                .map(ToString::to_string),
        );
    }

    Ok(hosts.into_iter().unique().collect())
}
