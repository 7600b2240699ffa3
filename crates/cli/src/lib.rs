//! Toolbelt CLI Library
//!
//! This crate provides the `tb` command line: it gathers candidates from a
//! source (lines of text, directories, SSH hosts), hands them to the
//! interactive selector in `toolbelt-core`, and prints the chosen one so
//! shell wrappers can act on it.
//!
//! # Examples
//!
//! ```bash
//! # Open a tmux session in a project directory
//! tmux new-session -c "$(tb dirs ~/code)"
//!
//! # Lines grouped by the text before the first `:`
//! printf 'work: deploy\nwork: logs\nhome: backup\n' | tb lines -g :
//! ```

pub mod cli_args;
pub mod sources;
