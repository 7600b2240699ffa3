//! Turns caller items into display lines.
//!
//! Items keep their order. With a grouping function, every change of group
//! starts a new section: a blank spacer (except before the first group) and
//! an optional header line rendered from a template. Runs whose group name is
//! empty get no header.

use std::collections::HashMap;

use indexmap::IndexMap;
use itertools::Itertools;
use leon::Template;
use log::warn;

use crate::error::Result;

/// Key substituted into a group header template.
pub const GROUP_KEY: &str = "group";

/// One line of the browse list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DisplayEntry {
    Item(String),
    /// Not selectable. An empty string is a spacer between groups.
    Separator(String),
}

impl DisplayEntry {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            DisplayEntry::Item(text) | DisplayEntry::Separator(text) => text,
        }
    }

    #[must_use]
    pub fn is_item(&self) -> bool {
        matches!(self, DisplayEntry::Item(_))
    }

    #[must_use]
    pub fn is_spacer(&self) -> bool {
        matches!(self, DisplayEntry::Separator(text) if text.is_empty())
    }
}

/// Display lines plus the items behind them, keyed by display string.
#[derive(Debug)]
pub struct Candidates<T> {
    pub entries: Vec<DisplayEntry>,
    pub lookup: IndexMap<String, T>,
}

impl<T> Candidates<T> {
    /// Removes and returns the item shown as `display`.
    pub fn take(&mut self, display: &str) -> Option<T> {
        self.lookup.swap_remove(display)
    }
}

/// Builds the browse list for `items`.
///
/// # Errors
///
/// Fails only when `header_template` references a key other than `group`.
pub fn format_candidates<T, D>(
    items: Vec<T>,
    to_string: D,
    to_group: Option<&dyn Fn(&T) -> String>,
    header_template: Option<&Template<'_>>,
) -> Result<Candidates<T>>
where
    D: Fn(&T) -> String,
{
    let mut candidates = Candidates {
        entries: Vec::with_capacity(items.len()),
        lookup: IndexMap::with_capacity(items.len()),
    };

    let Some(to_group) = to_group else {
        for item in items {
            push_item(&mut candidates, &to_string, item);
        }
        return Ok(candidates);
    };

    let groups = items.into_iter().chunk_by(|item| to_group(item));
    for (index, (group, members)) in (&groups).into_iter().enumerate() {
        if index > 0 {
            candidates.entries.push(DisplayEntry::Separator(String::new()));
        }
        if let Some(template) = header_template.filter(|_| !group.is_empty()) {
            candidates
                .entries
                .push(DisplayEntry::Separator(render_header(template, &group)?));
        }
        for item in members {
            push_item(&mut candidates, &to_string, item);
        }
    }

    Ok(candidates)
}

fn push_item<T, D>(candidates: &mut Candidates<T>, to_string: &D, item: T)
where
    D: Fn(&T) -> String,
{
    let display = to_string(&item);
    if candidates.lookup.contains_key(&display) {
        warn!("Duplicate candidate `{display}`; only the last one can be selected");
    }
    candidates.entries.push(DisplayEntry::Item(display.clone()));
    candidates.lookup.insert(display, item);
}

/// Renders a group header line.
pub fn render_header(template: &Template<'_>, group: &str) -> Result<String> {
    let mut context: HashMap<String, String> = HashMap::new();
    context.insert(GROUP_KEY.to_string(), group.to_string());

    Ok(template.render(&context)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(text: &str) -> DisplayEntry {
        DisplayEntry::Item(text.to_string())
    }

    fn separator(text: &str) -> DisplayEntry {
        DisplayEntry::Separator(text.to_string())
    }

    #[test]
    fn test_flat_list_has_no_separators() {
        let candidates =
            format_candidates(vec!["alpha", "beta"], |s: &&str| s.to_string(), None, None)
                .unwrap();

        assert_eq!(candidates.entries, vec![item("alpha"), item("beta")]);
        assert_eq!(candidates.lookup.get("beta"), Some(&"beta"));
    }

    #[test]
    fn test_groups_with_template() {
        let template = Template::parse("[{group}]").unwrap();
        let group = |pair: &(&str, &str)| pair.0.to_string();
        let candidates = format_candidates(
            vec![("A", "x1"), ("A", "x2"), ("B", "y1")],
            |pair: &(&str, &str)| pair.1.to_string(),
            Some(&group),
            Some(&template),
        )
        .unwrap();

        assert_eq!(
            candidates.entries,
            vec![
                separator("[A]"),
                item("x1"),
                item("x2"),
                separator(""),
                separator("[B]"),
                item("y1"),
            ]
        );
        assert_eq!(candidates.lookup.get("y1"), Some(&("B", "y1")));
    }

    #[test]
    fn test_groups_without_template_only_get_spacers() {
        let group = |n: &u32| (n / 10).to_string();
        let candidates =
            format_candidates(vec![1, 2, 11], |n: &u32| n.to_string(), Some(&group), None)
                .unwrap();

        assert_eq!(
            candidates.entries,
            vec![item("1"), item("2"), separator(""), item("11")]
        );
    }

    #[test]
    fn test_empty_group_name_has_no_header() {
        let template = Template::parse("[{group}]").unwrap();
        let group = |line: &&str| line.split_once(':').map_or("", |(g, _)| g).to_string();
        let candidates = format_candidates(
            vec!["loose", "work:deploy"],
            |line: &&str| line.to_string(),
            Some(&group),
            Some(&template),
        )
        .unwrap();

        assert_eq!(
            candidates.entries,
            vec![
                item("loose"),
                separator(""),
                separator("[work]"),
                item("work:deploy"),
            ]
        );
    }

    #[test]
    fn test_group_change_is_by_adjacency() {
        let group = |s: &&str| s[..1].to_string();
        let candidates = format_candidates(
            vec!["a1", "b1", "a2"],
            |s: &&str| s.to_string(),
            Some(&group),
            None,
        )
        .unwrap();

        // `a` appears twice because the groups are not contiguous
        assert_eq!(candidates.entries.iter().filter(|e| e.is_spacer()).count(), 2);
    }

    #[test]
    fn test_duplicate_display_collapses() {
        let mut candidates = format_candidates(
            vec![(1, "same"), (2, "same")],
            |pair: &(i32, &str)| pair.1.to_string(),
            None,
            None,
        )
        .unwrap();

        assert_eq!(candidates.entries.len(), 2);
        assert_eq!(candidates.lookup.len(), 1);
        assert_eq!(candidates.take("same"), Some((2, "same")));
    }

    #[test]
    fn test_unknown_template_key_fails() {
        let template = Template::parse("{name}").unwrap();
        let group = |s: &&str| s.to_string();
        let result = format_candidates(
            vec!["a"],
            |s: &&str| s.to_string(),
            Some(&group),
            Some(&template),
        );

        assert!(result.is_err());
    }
}
