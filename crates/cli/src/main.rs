use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::{debug, info};
use toolbelt_core::config::{self, SelectorConfig};
use toolbelt_core::error::{Error, Result};
use toolbelt_core::filter::MatchMode;
use toolbelt_core::select_with;
use toolbelt_core::terminal::Tty;

use toolbelt_cli::cli_args::{Args, Source};
use toolbelt_cli::sources::{self, DirCandidate, Line};

/// Exit status when the user backs out of the selection.
const CANCELLED_EXIT_CODE: u8 = 130;

/// Load the selector configuration and apply command-line overrides
fn initialize_config(args: &Args) -> Result<SelectorConfig> {
    let config_path = config::get_config_path(args.config_path.as_deref());
    debug!("Config path: `{config_path}`");

    let mut selector_config = config::load_config(&config_path)?;
    if args.fuzzy {
        selector_config.match_mode = MatchMode::Fuzzy;
    }

    Ok(selector_config)
}

fn pick_line(
    path: Option<&Path>,
    group_delimiter: Option<char>,
    selector_config: &SelectorConfig,
) -> Result<String> {
    let lines = match path {
        Some(path) => {
            let file = File::open(path).map_err(|e| {
                Error::io_error("input".to_string(), path.display().to_string(), e)
            })?;
            sources::read_lines(BufReader::new(file))?
        }
        None => sources::read_lines(io::stdin().lock())?,
    };
    let lines = sources::split_groups(lines, group_delimiter);

    let group = |line: &Line| line.group.clone().unwrap_or_default();
    let group_fn = group_delimiter
        .is_some()
        .then_some(&group as &dyn Fn(&Line) -> String);

    let choice = select_with(
        lines,
        |line: &Line| line.text.clone(),
        group_fn,
        selector_config,
        Tty::open,
    )?;
    Ok(choice.text)
}

fn pick_dir(
    roots: &[String],
    max_depth: usize,
    selector_config: &SelectorConfig,
) -> Result<String> {
    let roots: Vec<PathBuf> = if roots.is_empty() {
        vec![PathBuf::from(shellexpand::tilde("~").to_string())]
    } else {
        roots
            .iter()
            .map(|root| PathBuf::from(shellexpand::tilde(root).to_string()))
            .collect()
    };

    let mut dirs = Vec::new();
    for root in &roots {
        dirs.extend(sources::find_dirs(root, max_depth)?);
    }

    let group = |dir: &DirCandidate| dir.root.display().to_string();
    let group_fn = (roots.len() > 1).then_some(&group as &dyn Fn(&DirCandidate) -> String);

    // Relative paths collide across roots, so show full paths when grouping
    let choice = select_with(
        dirs,
        |dir: &DirCandidate| {
            if roots.len() > 1 {
                dir.path.display().to_string()
            } else {
                dir.relative()
            }
        },
        group_fn,
        selector_config,
        Tty::open,
    )?;
    Ok(choice.path.display().to_string())
}

fn pick_host(ssh_config: Option<&str>, selector_config: &SelectorConfig) -> Result<String> {
    let path = sources::get_ssh_config_path(ssh_config);
    let file = File::open(&path)
        .map_err(|e| Error::io_error("SSH config".to_string(), path.clone(), e))?;
    let hosts = sources::parse_ssh_hosts(BufReader::new(file))?;
    if hosts.is_empty() {
        return Err(Error::Misc(format!("No hosts found in `{path}`")));
    }

    select_with(hosts, String::clone, None, selector_config, Tty::open)
}

fn execute(args: &Args) -> Result<()> {
    let selector_config = initialize_config(args)?;

    let choice = match &args.source {
        Source::Lines {
            path,
            group_delimiter,
        } => pick_line(path.as_deref(), *group_delimiter, &selector_config)?,
        Source::Dirs { roots, max_depth } => pick_dir(roots, *max_depth, &selector_config)?,
        Source::Hosts { ssh_config } => pick_host(ssh_config.as_deref(), &selector_config)?,
    };

    info!("Selected `{choice}`");
    println!("{choice}");
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match execute(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_cancelled() => ExitCode::from(CANCELLED_EXIT_CODE),
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
