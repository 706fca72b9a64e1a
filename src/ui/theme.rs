//! # Theme System
//!
//! Named accent palettes for status and message output.
//!
//! ## Overview
//!
//! The [`Theme`] struct defines the handful of colors the status header and
//! flow messages use. Instead of hardcoding `crossterm::style::Color` values,
//! printing code references theme fields. The grid menu itself is monochrome
//! reverse-video and never consults the theme. The active theme is chosen in
//! the config file or with `--theme`.
//!
//! ## Built-in Themes
//!
//! Three themes ship built in:
//!
//! - **Classic** (default) - the terminal's own 16-color palette
//! - **Ocean** - cool truecolor blues
//! - **Ember** - warm truecolor oranges

use crossterm::style::Color;

/// Accent colors used by status and message output, grouped by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Human-readable name matched against config and `--theme`.
    pub name: &'static str,

    /// Application title and highlights.
    pub accent: Color,
    /// Branch names and success notices.
    pub success: Color,
    /// Pending changes and cautions.
    pub warning: Color,
    /// Failed git commands.
    pub error: Color,
    /// De-emphasized detail lines.
    pub dim: Color,
}

impl Theme {
    /// Return the list of all built-in themes.
    pub fn all() -> &'static [Theme] {
        &BUILT_IN_THEMES
    }

    /// Find a built-in theme by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<&'static Theme> {
        BUILT_IN_THEMES
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// Return the default theme (Classic).
    pub fn default_theme() -> &'static Theme {
        &BUILT_IN_THEMES[0]
    }
}

// ---------------------------------------------------------------------------
// Built-in theme definitions
// ---------------------------------------------------------------------------

static BUILT_IN_THEMES: [Theme; 3] = [
    // 0 - Classic (default); ANSI colors, so it follows the terminal scheme
    Theme {
        name: "Classic",
        accent: Color::Cyan,
        success: Color::Green,
        warning: Color::Yellow,
        error: Color::Red,
        dim: Color::DarkGrey,
    },
    // 1 - Ocean
    Theme {
        name: "Ocean",
        accent: Color::Rgb { r: 137, g: 180, b: 250 },
        success: Color::Rgb { r: 148, g: 226, b: 213 },
        warning: Color::Rgb { r: 249, g: 226, b: 175 },
        error: Color::Rgb { r: 243, g: 139, b: 168 },
        dim: Color::Rgb { r: 108, g: 112, b: 134 },
    },
    // 2 - Ember
    Theme {
        name: "Ember",
        accent: Color::Rgb { r: 250, g: 179, b: 135 },
        success: Color::Rgb { r: 166, g: 227, b: 161 },
        warning: Color::Rgb { r: 249, g: 226, b: 175 },
        error: Color::Rgb { r: 235, g: 160, b: 172 },
        dim: Color::Rgb { r: 127, g: 132, b: 156 },
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_themes_count() {
        assert_eq!(Theme::all().len(), 3);
    }

    #[test]
    fn test_default_is_classic() {
        assert_eq!(Theme::default_theme().name, "Classic");
    }

    #[test]
    fn test_by_name_case_insensitive() {
        assert!(Theme::by_name("classic").is_some());
        assert!(Theme::by_name("OCEAN").is_some());
        assert!(Theme::by_name("ember").is_some());
        assert!(Theme::by_name("nonexistent").is_none());
    }

    #[test]
    fn test_all_themes_have_distinct_names() {
        let names: Vec<&str> = Theme::all().iter().map(|t| t.name).collect();
        let mut unique = names.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(names.len(), unique.len(), "duplicate theme names found");
    }
}
