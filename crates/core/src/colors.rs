use crossterm::style::Color;
use serde::Deserialize;

use crate::error::{Error, Result};

/// A color as written in the selector config: exactly one of the fields.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorDefinition {
    pub rgb: Option<(u8, u8, u8)>,
    pub ansi: Option<u8>,
    pub name: Option<String>,
}

impl ColorDefinition {
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::default()
        }
    }
}

/// Trait for converting color definitions to terminal colors
pub trait AsTermColor {
    fn as_crossterm_color(&self) -> Result<Option<Color>>;
}

impl AsTermColor for ColorDefinition {
    fn as_crossterm_color(&self) -> Result<Option<Color>> {
        let defined_count = [self.rgb.is_some(), self.ansi.is_some(), self.name.is_some()]
            .iter()
            .filter(|&&x| x)
            .count();

        if defined_count > 1 {
            return Err(Error::MultipleColorTypes);
        }

        Ok(match (self.rgb, self.ansi, &self.name) {
            (Some((r, g, b)), None, None) => Some(Color::Rgb { r, g, b }),
            (None, Some(ansi), None) => Some(Color::AnsiValue(ansi)),
            (None, None, Some(name)) => Some(color_from_name(name)?),
            (None, None, None) => None,
            _ => unreachable!(), // This case is prevented by the earlier check
        })
    }
}

fn color_from_name(name: &str) -> Result<Color> {
    Ok(match name.to_lowercase().as_str() {
        "black" => Color::Black,
        "darkgrey" => Color::DarkGrey,
        "red" => Color::Red,
        "darkred" => Color::DarkRed,
        "green" => Color::Green,
        "darkgreen" => Color::DarkGreen,
        "yellow" => Color::Yellow,
        "darkyellow" => Color::DarkYellow,
        "blue" => Color::Blue,
        "darkblue" => Color::DarkBlue,
        "magenta" => Color::Magenta,
        "darkmagenta" => Color::DarkMagenta,
        "cyan" => Color::Cyan,
        "darkcyan" => Color::DarkCyan,
        "white" => Color::White,
        "grey" => Color::Grey,
        "reset" => Color::Reset,
        _ => return Err(Error::UnknownColorName(name.to_string())),
    })
}

/// Resolves an optional definition, falling back to `default` when it is
/// missing or empty.
pub fn resolve_color(definition: Option<&ColorDefinition>, default: Color) -> Result<Color> {
    match definition {
        None => Ok(default),
        Some(definition) => Ok(definition.as_crossterm_color()?.unwrap_or(default)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_color() {
        let color = ColorDefinition::named("DarkCyan").as_crossterm_color().unwrap();
        assert_eq!(color, Some(Color::DarkCyan));
    }

    #[test]
    fn test_rgb_and_ansi() {
        let rgb = ColorDefinition {
            rgb: Some((1, 2, 3)),
            ..ColorDefinition::default()
        };
        assert_eq!(
            rgb.as_crossterm_color().unwrap(),
            Some(Color::Rgb { r: 1, g: 2, b: 3 })
        );

        let ansi = ColorDefinition {
            ansi: Some(240),
            ..ColorDefinition::default()
        };
        assert_eq!(ansi.as_crossterm_color().unwrap(), Some(Color::AnsiValue(240)));
    }

    #[test]
    fn test_multiple_types_rejected() {
        let color = ColorDefinition {
            ansi: Some(1),
            name: Some("red".to_string()),
            ..ColorDefinition::default()
        };
        assert!(matches!(
            color.as_crossterm_color(),
            Err(Error::MultipleColorTypes)
        ));
    }

    #[test]
    fn test_unknown_name_rejected() {
        assert!(matches!(
            ColorDefinition::named("chartreuse").as_crossterm_color(),
            Err(Error::UnknownColorName(name)) if name == "chartreuse"
        ));
    }

    #[test]
    fn test_resolve_falls_back() {
        assert_eq!(resolve_color(None, Color::Cyan).unwrap(), Color::Cyan);
        assert_eq!(
            resolve_color(Some(&ColorDefinition::default()), Color::Red).unwrap(),
            Color::Red
        );
        assert_eq!(
            resolve_color(Some(&ColorDefinition::named("blue")), Color::Red).unwrap(),
            Color::Blue
        );
    }
}
