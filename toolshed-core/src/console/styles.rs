use crate::config::{NamedColor, ThemeColor, ThemeConfig};
use crossterm::style::{Color, Stylize, style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Info => "ℹ️",
            Self::Success => "✅",
            Self::Warning => "⚠️",
            Self::Error => "❌",
        }
    }
}

/// Style tokens for the console, built once from `[theme]` and injected.
#[derive(Debug, Clone)]
pub struct Styles {
    pub enabled: bool,
    pub info: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub title: Color,
    pub accent: Color,
}

impl Default for Styles {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default(), true)
    }
}

impl Styles {
    pub fn from_config(config: &ThemeConfig, enabled: bool) -> Self {
        Self {
            enabled,
            info: to_crossterm_color(&config.info),
            success: to_crossterm_color(&config.success),
            warning: to_crossterm_color(&config.warning),
            error: to_crossterm_color(&config.error),
            title: to_crossterm_color(&config.title),
            accent: to_crossterm_color(&config.accent),
        }
    }

    /// Styles that never emit escape codes.
    pub fn plain() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn color_for(&self, level: Level) -> Color {
        match level {
            Level::Info => self.info,
            Level::Success => self.success,
            Level::Warning => self.warning,
            Level::Error => self.error,
        }
    }

    pub fn paint_level(&self, level: Level, text: &str) -> String {
        self.paint(text, self.color_for(level), false)
    }

    pub fn paint_title(&self, text: &str) -> String {
        self.paint(text, self.title, true)
    }

    pub fn paint_accent(&self, text: &str) -> String {
        self.paint(text, self.accent, false)
    }

    fn paint(&self, text: &str, color: Color, bold: bool) -> String {
        if !self.enabled {
            return text.to_string();
        }
        if bold {
            style(text).with(color).bold().to_string()
        } else {
            style(text).with(color).to_string()
        }
    }
}

fn to_crossterm_color(color: &ThemeColor) -> Color {
    match color {
        ThemeColor::Rgb(r, g, b) => Color::Rgb {
            r: *r,
            g: *g,
            b: *b,
        },
        ThemeColor::Named(named) => match named {
            NamedColor::Black => Color::Black,
            NamedColor::Red => Color::Red,
            NamedColor::Green => Color::Green,
            NamedColor::Yellow => Color::Yellow,
            NamedColor::Blue => Color::Blue,
            NamedColor::Magenta => Color::Magenta,
            NamedColor::Cyan => Color::Cyan,
            NamedColor::White => Color::White,
            NamedColor::Gray => Color::Grey,
            NamedColor::DarkGray => Color::DarkGrey,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_styles_defaults() {
        let styles = Styles::default();
        assert!(styles.enabled);
        assert_eq!(styles.info, Color::Blue);
        assert_eq!(styles.success, Color::Green);
        assert_eq!(styles.warning, Color::Yellow);
        assert_eq!(styles.error, Color::Red);
        assert_eq!(styles.title, Color::Cyan);
        assert_eq!(styles.accent, Color::Magenta);
    }

    #[test]
    fn test_styles_custom() {
        let config = ThemeConfig {
            error: ThemeColor::Rgb(255, 0, 255),
            info: ThemeColor::Named(NamedColor::DarkGray),
            ..ThemeConfig::default()
        };
        let styles = Styles::from_config(&config, true);
        assert_eq!(styles.error, Color::Rgb { r: 255, g: 0, b: 255 });
        assert_eq!(styles.info, Color::DarkGrey);
        assert_eq!(styles.success, Color::Green); // default
    }

    #[test]
    fn test_disabled_styles_return_text_unchanged() {
        let styles = Styles::plain();
        assert_eq!(styles.paint_level(Level::Error, "boom"), "boom");
        assert_eq!(styles.paint_title("Menu"), "Menu");
    }
}
