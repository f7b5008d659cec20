//! Theme system for consistent UI colors across dark and light modes.
//!
//! The active palette follows the persisted [`ThemeMode`]; there is no OS
//! detection, a missing preference means dark.

use ratatui::style::Color;
use regex::Regex;
use std::sync::OnceLock;

use crate::config::ThemeMode;
use crate::content::Level;

/// Semantic color theme for the TUI.
///
/// Provides consistent colors across all UI components with support
/// for both dark and light terminal backgrounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    // Primary UI colors
    /// Primary color for borders, titles, and emphasis
    pub primary: Color,
    /// Accent color for highlights, selections, and focus states
    pub accent: Color,
    /// Success state color, also used for completed steps
    pub success: Color,
    /// Error state color
    pub error: Color,
    /// Warning state color
    pub warning: Color,

    // Text hierarchy
    /// Primary text content color
    pub text: Color,
    /// Secondary text color for labels and less important content
    pub text_secondary: Color,
    /// Muted text color for help text and dim content
    pub text_muted: Color,

    // Backgrounds
    /// Main background color
    pub background: Color,
    /// Surface color for selections and elevated elements
    pub surface: Color,

    // Difficulty badges
    /// Beginner roles and roadmaps
    pub beginner: Color,
    /// Intermediate roles and roadmaps
    pub intermediate: Color,
    /// Advanced roles and roadmaps
    pub advanced: Color,
}

impl Theme {
    /// Creates a dark theme optimized for dark terminal backgrounds.
    ///
    /// # Color Choices
    /// - Bright colors (Cyan, Yellow) for UI chrome
    /// - White text on black background for maximum contrast
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            primary: Color::Cyan,
            accent: Color::Yellow,
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,

            text: Color::White,
            text_secondary: Color::Gray,
            text_muted: Color::DarkGray,

            background: Color::Black,
            surface: Color::Rgb(30, 30, 30),

            beginner: Color::Rgb(34, 197, 94),
            intermediate: Color::Rgb(59, 130, 246),
            advanced: Color::Rgb(168, 85, 247),
        }
    }

    /// Creates a light theme optimized for light terminal backgrounds.
    ///
    /// Badge colors are darkened to stay readable on white.
    #[must_use]
    pub const fn light() -> Self {
        Self {
            primary: Color::Blue,
            accent: Color::Rgb(180, 100, 0), // Dark orange for visibility
            success: Color::Rgb(0, 128, 0),
            error: Color::Red,
            warning: Color::Rgb(200, 100, 0),

            text: Color::Black,
            text_secondary: Color::Rgb(60, 60, 60),
            text_muted: Color::Gray,

            background: Color::White,
            surface: Color::Rgb(230, 230, 230),

            beginner: Color::Rgb(21, 128, 61),
            intermediate: Color::Rgb(29, 78, 216),
            advanced: Color::Rgb(126, 34, 206),
        }
    }

    /// Palette for a theme mode.
    #[must_use]
    pub const fn from_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    /// Badge color for a difficulty level.
    #[must_use]
    pub const fn level_color(&self, level: Level) -> Color {
        match level {
            Level::Beginner => self.beginner,
            Level::Intermediate => self.intermediate,
            Level::Advanced => self.advanced,
        }
    }

    /// Terminal color for a role's CSS color string, ignoring alpha.
    ///
    /// Accepts `rgb(r, g, b)`, `rgba(r, g, b, a)` and `#rrggbb`; anything else
    /// falls back to the primary color.
    #[must_use]
    pub fn role_color(&self, css: &str) -> Color {
        parse_css_color(css).unwrap_or(self.primary)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_mode(ThemeMode::default())
    }
}

fn rgb_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(r"^rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*(?:,\s*[\d.]+\s*)?\)$")
                .ok()
        })
        .as_ref()
}

fn parse_css_color(css: &str) -> Option<Color> {
    let css = css.trim();
    if let Some(hex) = css.strip_prefix('#') {
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        return Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?));
    }

    let caps = rgb_pattern()?.captures(css)?;
    let channel = |i: usize| caps.get(i)?.as_str().parse::<u8>().ok();
    Some(Color::Rgb(channel(1)?, channel(2)?, channel(3)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_mode() {
        assert_eq!(Theme::from_mode(ThemeMode::Dark), Theme::dark());
        assert_eq!(Theme::from_mode(ThemeMode::Light), Theme::light());
        assert_eq!(Theme::default(), Theme::dark());
    }

    #[test]
    fn test_theme_contrast() {
        let dark = Theme::dark();
        assert_eq!(dark.text, Color::White);
        assert_eq!(dark.background, Color::Black);

        let light = Theme::light();
        assert_eq!(light.text, Color::Black);
        assert_eq!(light.background, Color::White);
        // Yellow is unreadable on white
        assert_ne!(light.accent, Color::Yellow);
    }

    #[test]
    fn test_level_colors_distinct() {
        for theme in [Theme::dark(), Theme::light()] {
            let colors: Vec<Color> = Level::ALL.iter().map(|&l| theme.level_color(l)).collect();
            assert_ne!(colors[0], colors[1]);
            assert_ne!(colors[1], colors[2]);
            assert_ne!(colors[0], colors[2]);
        }
    }

    #[test]
    fn test_role_color_parsing() {
        let theme = Theme::dark();
        assert_eq!(
            theme.role_color("rgba(34, 197, 94, 0.8)"),
            Color::Rgb(34, 197, 94)
        );
        assert_eq!(theme.role_color("rgb(1,2,3)"), Color::Rgb(1, 2, 3));
        assert_eq!(theme.role_color("#ff8000"), Color::Rgb(255, 128, 0));
        assert_eq!(theme.role_color("rgba(300, 0, 0, 1)"), theme.primary);
        assert_eq!(theme.role_color("bg-gradient"), theme.primary);
        assert_eq!(theme.role_color("#fff"), theme.primary);
    }
}
