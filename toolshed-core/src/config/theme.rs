use serde::{Deserialize, Deserializer, de};
use std::{fmt, str::FromStr};

/// `[theme]`: one color per kind of console line. Missing keys keep their default.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    pub info: ThemeColor,
    pub success: ThemeColor,
    pub warning: ThemeColor,
    pub error: ThemeColor,
    /// Main menu titles and selection prompts.
    pub title: ThemeColor,
    /// Sub-menu titles.
    pub accent: ThemeColor,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        use NamedColor::{Blue, Cyan, Green, Magenta, Red, Yellow};
        Self {
            info: ThemeColor::Named(Blue),
            success: ThemeColor::Named(Green),
            warning: ThemeColor::Named(Yellow),
            error: ThemeColor::Named(Red),
            title: ThemeColor::Named(Cyan),
            accent: ThemeColor::Named(Magenta),
        }
    }
}

/// A terminal color: one of the basic palette names or `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeColor {
    Named(NamedColor),
    Rgb(u8, u8, u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Gray,
    DarkGray,
}

impl FromStr for NamedColor {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let color = match s.to_ascii_lowercase().replace(['_', '-', ' '], "").as_str() {
            "black" => Self::Black,
            "red" => Self::Red,
            "green" => Self::Green,
            "yellow" => Self::Yellow,
            "blue" => Self::Blue,
            "magenta" => Self::Magenta,
            "cyan" => Self::Cyan,
            "white" => Self::White,
            "gray" | "grey" => Self::Gray,
            "darkgray" | "darkgrey" => Self::DarkGray,
            _ => return Err(()),
        };
        Ok(color)
    }
}

impl fmt::Display for NamedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
            Self::Gray => "gray",
            Self::DarkGray => "darkgray",
        };
        f.write_str(name)
    }
}

fn parse_hex(hex: &str) -> Option<ThemeColor> {
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(ThemeColor::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

impl FromStr for ThemeColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = match s.strip_prefix('#') {
            Some(hex) => parse_hex(hex),
            None => s.parse().ok().map(Self::Named),
        };
        parsed.ok_or_else(|| {
            format!(
                "invalid color '{s}': expected black, red, green, yellow, blue, magenta, cyan, white, gray or darkgray, or #rrggbb"
            )
        })
    }
}

impl fmt::Display for ThemeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(named) => named.fmt(f),
            Self::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

impl<'de> Deserialize<'de> for ThemeColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_from_str;

    #[test]
    fn test_missing_theme_table_uses_defaults() {
        let theme = load_config_from_str("").unwrap().theme;
        assert_eq!(theme, ThemeConfig::default());
        assert_eq!(theme.title, ThemeColor::Named(NamedColor::Cyan));
    }

    #[test]
    fn test_partial_theme_keeps_other_defaults() {
        let theme = load_config_from_str(
            r##"
[theme]
warning = "darkgray"
accent = "#00ff7f"
"##,
        )
        .unwrap()
        .theme;
        assert_eq!(theme.warning, ThemeColor::Named(NamedColor::DarkGray));
        assert_eq!(theme.accent, ThemeColor::Rgb(0, 255, 127));
        assert_eq!(theme.error, ThemeColor::Named(NamedColor::Red));
    }

    #[test]
    fn test_bad_color_names_the_value() {
        let err = load_config_from_str("[theme]\nsuccess = \"chartreuse\"\n")
            .unwrap_err()
            .to_string();
        assert!(err.contains("invalid color 'chartreuse'"), "Error was: {err}");
    }

    #[test]
    fn test_unknown_theme_key_rejected() {
        assert!(load_config_from_str("[theme]\nborder = \"blue\"\n").is_err());
    }

    #[test]
    fn test_spelling_variants() {
        for input in ["Grey", "GRAY", "gray"] {
            assert_eq!(input.parse(), Ok(ThemeColor::Named(NamedColor::Gray)));
        }
        for input in ["dark_grey", "dark-gray", "DarkGray"] {
            assert_eq!(input.parse(), Ok(ThemeColor::Named(NamedColor::DarkGray)));
        }
    }

    #[test]
    fn test_hex_validation() {
        assert_eq!("#FF8000".parse(), Ok(ThemeColor::Rgb(255, 128, 0)));
        assert!("#fff".parse::<ThemeColor>().is_err());
        assert!("#gg0000".parse::<ThemeColor>().is_err());
        assert!("#+f0000".parse::<ThemeColor>().is_err());
        assert!("#ééé".parse::<ThemeColor>().is_err());
        assert!("ff8000".parse::<ThemeColor>().is_err());
    }

    #[test]
    fn test_display_is_parseable() {
        for color in [ThemeColor::Rgb(1, 171, 255), ThemeColor::Named(NamedColor::DarkGray)] {
            assert_eq!(color.to_string().parse(), Ok(color));
        }
    }
}
