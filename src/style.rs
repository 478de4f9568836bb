//! Console styles
//!
//! Level → color mapping, fixed at construction time.

use crate::error::{Result, VLogError};
use crate::logging::Level;
use crossterm::style::Color;

// Default palette
pub const COLOR_ERROR: Color = Color::Red;
pub const COLOR_WARN: Color = Color::Yellow;
pub const COLOR_INFO: Color = Color::Rgb { r: 194, g: 194, b: 194 }; // #c2c2c2
pub const COLOR_LOG: Color = Color::White;
pub const COLOR_TAG: Color = Color::Rgb { r: 128, g: 0, b: 128 }; // purple
pub const COLOR_EVENT: Color = Color::Rgb { r: 245, g: 245, b: 220 }; // beige

/// Immutable style configuration
#[derive(Debug, Clone, PartialEq)]
pub struct StyleConfig {
    pub log: Color,
    pub info: Color,
    pub warn: Color,
    pub error: Color,
    pub table: Color,
    /// Filter keyword echoes
    pub tag: Color,
    /// Named event lines
    pub event: Color,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            log: COLOR_LOG,
            info: COLOR_INFO,
            warn: COLOR_WARN,
            error: COLOR_ERROR,
            table: COLOR_LOG,
            tag: COLOR_TAG,
            event: COLOR_EVENT,
        }
    }
}

impl StyleConfig {
    pub fn level_color(&self, level: Level) -> Color {
        match level {
            Level::Log => self.log,
            Level::Info => self.info,
            Level::Warn => self.warn,
            Level::Error => self.error,
            Level::Table => self.table,
        }
    }

    /// Build from config color names
    pub fn from_config(cfg: &crate::config::DisplayConfig) -> Result<Self> {
        Ok(Self {
            log: color_field("display.log", &cfg.log)?,
            info: color_field("display.info", &cfg.info)?,
            warn: color_field("display.warn", &cfg.warn)?,
            error: color_field("display.error", &cfg.error)?,
            table: color_field("display.table", &cfg.table)?,
            tag: color_field("display.tag", &cfg.tag)?,
            event: color_field("display.event", &cfg.event)?,
        })
    }
}

fn color_field(field: &'static str, value: &str) -> Result<Color> {
    parse_color(value).ok_or_else(|| VLogError::ConfigValidation {
        field,
        reason: format!("unknown color '{}'", value),
    })
}

/// Parse a color name or `#rrggbb` hex value
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        return Some(Color::Rgb {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        });
    }

    let color = match s.to_ascii_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "grey" | "gray" => Color::Grey,
        "purple" => COLOR_TAG,
        "beige" => COLOR_EVENT,
        "reset" | "default" => Color::Reset,
        _ => return None,
    };
    Some(color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DisplayConfig;

    #[test]
    fn test_parse_color_names() {
        assert_eq!(parse_color("red"), Some(Color::Red));
        assert_eq!(parse_color("Beige"), Some(COLOR_EVENT));
        assert_eq!(parse_color("purple"), Some(COLOR_TAG));
        assert_eq!(parse_color("chartreuse"), None);
    }

    #[test]
    fn test_parse_color_hex() {
        assert_eq!(parse_color("#c2c2c2"), Some(COLOR_INFO));
        assert_eq!(parse_color("#c2c2"), None);
        assert_eq!(parse_color("#zzzzzz"), None);
    }

    #[test]
    fn test_default_config_matches_default_palette() {
        let style = StyleConfig::from_config(&DisplayConfig::default()).unwrap();
        assert_eq!(style, StyleConfig::default());
    }

    #[test]
    fn test_invalid_config_color() {
        let cfg = DisplayConfig {
            warn: "not-a-color".into(),
            ..Default::default()
        };
        assert!(matches!(
            StyleConfig::from_config(&cfg),
            Err(VLogError::ConfigValidation {
                field: "display.warn",
                ..
            })
        ));
    }

    #[test]
    fn test_level_colors() {
        let style = StyleConfig::default();
        assert_eq!(style.level_color(Level::Error), Color::Red);
        assert_eq!(style.level_color(Level::Warn), Color::Yellow);
    }
}
