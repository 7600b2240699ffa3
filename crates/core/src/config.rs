//! Selector configuration.
//!
//! Settings live in an optional YAML file. Every field has a default, so a
//! missing file or a partial one is fine.

use std::fs;
use std::path::Path;

use crossterm::style::Color;
use leon::Template;
use log::debug;
use serde::Deserialize;

use crate::colors::{resolve_color, ColorDefinition};
use crate::error::{Error, Result};
use crate::filter::MatchMode;
use crate::render::Theme;

/// Default path for the selector configuration file
const DEFAULT_CONFIG_PATH: &str = "~/.toolbelt/selector.yml";

/// Lines around the list that are not candidates: the prompt, the spacer
/// below it, and the spacer and `[shown/total]` indicator at the bottom.
pub const CHROME_LINES: usize = 4;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SelectorConfig {
    /// Share of the terminal height used for the list.
    pub height_ratio: f32,
    pub min_height: usize,
    pub prompt: String,
    pub match_mode: MatchMode,
    /// Header line for each group; `{group}` is replaced by the group name.
    pub group_header: String,
    pub colors: ColorsConfig,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            height_ratio: 0.8,
            min_height: 5,
            prompt: "> ".to_string(),
            match_mode: MatchMode::Substring,
            group_header: "── {group} ──".to_string(),
            colors: ColorsConfig::default(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ColorsConfig {
    pub prompt: Option<ColorDefinition>,
    pub highlight: Option<ColorDefinition>,
    pub header: Option<ColorDefinition>,
    pub no_results: Option<ColorDefinition>,
    pub indicator: Option<ColorDefinition>,
}

impl SelectorConfig {
    /// Number of list rows for a terminal with `rows` lines.
    #[must_use]
    pub fn viewport_height(&self, rows: u16) -> usize {
        let rows = usize::from(rows);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let wanted = ((rows as f32 * self.height_ratio) as usize).max(self.min_height);

        wanted.min(rows.saturating_sub(CHROME_LINES)).max(1)
    }

    /// Parses the group header template. An empty template means groups get
    /// no header line.
    pub fn header_template(&self) -> Result<Option<Template<'_>>> {
        if self.group_header.is_empty() {
            return Ok(None);
        }
        Ok(Some(Template::parse(&self.group_header)?))
    }

    /// Resolves the configured colors.
    pub fn theme(&self) -> Result<Theme> {
        let colors = &self.colors;
        Ok(Theme {
            prompt_text: self.prompt.clone(),
            prompt: resolve_color(colors.prompt.as_ref(), Color::Cyan)?,
            highlight: resolve_color(colors.highlight.as_ref(), Color::Blue)?,
            header: resolve_color(colors.header.as_ref(), Color::Yellow)?,
            no_results: resolve_color(colors.no_results.as_ref(), Color::Red)?,
            indicator: resolve_color(colors.indicator.as_ref(), Color::Cyan)?,
        })
    }
}

/// Resolves the configuration file path.
///
/// Uses `config_path_arg` when given, the default path otherwise. Shell
/// expansions like `~` are resolved.
#[must_use]
pub fn get_config_path(config_path_arg: Option<&str>) -> String {
    let config_path = config_path_arg.unwrap_or(DEFAULT_CONFIG_PATH);

    shellexpand::tilde(config_path).to_string()
}

/// Loads the configuration at `path`, or the defaults if there is no file.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read, or is not valid
/// YAML for [`SelectorConfig`].
pub fn load_config(path: &str) -> Result<SelectorConfig> {
    if !Path::new(path).exists() {
        debug!("No selector config at `{path}`, using defaults");
        return Ok(SelectorConfig::default());
    }

    let contents = fs::read_to_string(path)
        .map_err(|e| Error::io_error("selector config".to_string(), path.to_string(), e))?;
    if contents.trim().is_empty() {
        return Ok(SelectorConfig::default());
    }

    let config: SelectorConfig = serde_yaml::from_str(&contents).map_err(|e| {
        Error::yaml_error(
            "reading".to_string(),
            "selector config".to_string(),
            path.to_string(),
            e,
        )
    })?;

    debug!("Loaded selector config from `{path}`");
    Ok(config)
}
