//! Command-line argument parsing.
//!
//! Each subcommand names a candidate source; the selected candidate is
//! printed on stdout.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Default depth for the `dirs` source.
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Command-line arguments for the `tb` binary.
///
/// # Examples
///
/// ```bash
/// # Jump to a project directory
/// cd "$(tb dirs ~/projects)"
///
/// # Pick a host to connect to
/// ssh "$(tb hosts)"
///
/// # Pick a line from any command output
/// git branch --format='%(refname:short)' | tb lines
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(name = "tb", version, about, term_width = 0)]
pub struct Args {
    /// Path to the selector config YAML.
    ///
    /// If not provided, defaults to `~/.toolbelt/selector.yml`.
    #[arg(long, short = 'c', global = true)]
    pub config_path: Option<String>,

    /// Match candidates fuzzily instead of by substring.
    #[arg(long, short = 'f', global = true, action)]
    pub fuzzy: bool,

    #[command(subcommand)]
    pub source: Source,
}

#[derive(Subcommand, Debug)]
pub enum Source {
    /// Pick a line from a file, or from standard input.
    Lines {
        /// File to read; standard input when omitted.
        path: Option<PathBuf>,

        /// Split each line at the first occurrence of this character into a
        /// group and an entry, and show consecutive lines of a group together.
        #[arg(long, short = 'g')]
        group_delimiter: Option<char>,
    },

    /// Pick a directory below one or more roots.
    Dirs {
        /// Directories to search; `$HOME` when omitted.
        roots: Vec<String>,

        /// How deep to descend below each root.
        #[arg(long, short = 'd', default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },

    /// Pick a host from an SSH config file.
    Hosts {
        /// If not provided, defaults to `~/.ssh/config`.
        #[arg(long, short = 's')]
        ssh_config: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lines_with_delimiter() {
        let args = Args::parse_from(["tb", "lines", "notes.txt", "-g", ":"]);
        match args.source {
            Source::Lines {
                path,
                group_delimiter,
            } => {
                assert_eq!(path, Some(PathBuf::from("notes.txt")));
                assert_eq!(group_delimiter, Some(':'));
            }
            other => panic!("Unexpected source {other:?}"),
        }
    }

    #[test]
    fn test_parse_dirs_defaults() {
        let args = Args::parse_from(["tb", "--fuzzy", "dirs"]);
        assert!(args.fuzzy);
        match args.source {
            Source::Dirs { roots, max_depth } => {
                assert!(roots.is_empty());
                assert_eq!(max_depth, DEFAULT_MAX_DEPTH);
            }
            other => panic!("Unexpected source {other:?}"),
        }
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let args = Args::parse_from(["tb", "hosts", "-c", "/tmp/selector.yml"]);
        assert_eq!(args.config_path.as_deref(), Some("/tmp/selector.yml"));
        assert!(matches!(args.source, Source::Hosts { ssh_config: None }));
    }

    #[test]
    fn test_long_config_path_flag() {
        let args = Args::parse_from(["tb", "--config-path", "~/selector.yml", "lines"]);
        assert_eq!(args.config_path.as_deref(), Some("~/selector.yml"));
    }
}
