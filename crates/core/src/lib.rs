//! Toolbelt Core Library
//!
//! This crate provides the interactive terminal selector shared by the
//! toolbelt commands: give it a list of candidates and a way to display
//! them, and it lets the user narrow the list down by typing and pick one
//! entry with the arrow keys and Enter.
//!
//! # Key Features
//!
//! - **Direct TTY access**: works with stdin and stdout redirected
//! - **Raw mode with guaranteed restore**: on return, on error, on unwind and
//!   on SIGINT/SIGTERM
//! - **Grouping**: optional group headers between runs of candidates
//! - **Filtering**: case-insensitive substring (default) or fuzzy matching
//! - **Configuration**: colors, prompt and list height from a YAML file
//!
//! # Examples
//!
//! ```no_run
//! use toolbelt_core::select;
//!
//! let hosts = vec!["db-1".to_string(), "web-1".to_string()];
//! match select(hosts, |h: &String| h.clone(), None) {
//!     Ok(host) => println!("ssh {host}"),
//!     Err(e) if e.is_cancelled() => {}
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```

pub mod colors;
pub mod config;
pub mod error;
pub mod filter;
pub mod formatter;
pub mod render;
pub mod selector;
pub mod state;
pub mod terminal;

pub use selector::{select, select_with};
