//! Theme management and ANSI escape sequence generation.
//!
//! This module defines the color scheme system for the plugin, supporting both
//! built-in themes (Catppuccin variants) and custom themes loaded from TOML files.
//! It provides utilities for converting hex colors to ANSI escape sequences.
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha`: Dark theme with warm tones (default)
//! - `catppuccin-latte`: Light theme with soft pastels
//! - `monochrome`: Grayscale palette compiled into the binary
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! cursor_fg = "#f5c2e7"
//! search_bar_border = "#f5c2e7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! chip_fg = "#a6adc8"
//! chip_active_fg = "#1e1e2e"
//! chip_active_bg = "#89b4fa"
//! map_grid = "#313244"
//! marker_fg = "#fab387"
//! marker_selected_fg = "#f38ba8"
//! marker_emphasis_fg = "#f9e2af"
//! device_fg = "#89dceb"
//! overlay_border = "#cba6f7"
//! overlay_title = "#cba6f7"
//! rating_fg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! ```
//!
//! # Example
//!
//! ```rust
//! use truckmap::ui::theme::Theme;
//!
//! let theme = Theme::from_name("catppuccin-mocha").unwrap();
//! println!("{}", Theme::fg(&theme.colors.header_fg));
//! println!("{}Bold Text{}", Theme::bold(), Theme::reset());
//! ```

use crate::domain::error::{Result, TruckmapError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "catppuccin-mocha";

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements.
///
/// All colors are specified as hex strings (e.g., "#cdd6f4").
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Header text color.
    pub header_fg: String,
    /// Optional header background color.
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Normal text color.
    pub text_normal: String,
    /// Dimmed text color (footer, secondary info).
    pub text_dim: String,

    /// Border and separator line color.
    pub border: String,

    /// Selected card foreground color.
    pub selection_fg: String,
    /// Selected card background color.
    pub selection_bg: String,
    /// Border of the card or marker under the keyboard cursor.
    pub cursor_fg: String,

    /// Search bar border color.
    pub search_bar_border: String,
    /// Search match highlight foreground.
    pub match_highlight_fg: String,
    /// Search match highlight background.
    pub match_highlight_bg: String,

    /// Inactive category chip text.
    pub chip_fg: String,
    /// Active category chip text.
    pub chip_active_fg: String,
    /// Active category chip background.
    pub chip_active_bg: String,

    /// Map background dots.
    pub map_grid: String,
    /// Marker at rest.
    pub marker_fg: String,
    /// Marker of the selected truck.
    pub marker_selected_fg: String,
    /// Marker while its pulse is raised.
    pub marker_emphasis_fg: String,
    /// Device location marker.
    pub device_fg: String,

    /// Detail overlay border.
    pub overlay_border: String,
    /// Detail overlay title.
    pub overlay_title: String,

    /// Star rating color.
    pub rating_fg: String,

    /// Empty state message color.
    pub empty_state_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Returns `None` if the theme name is unknown.
    ///
    /// ```rust
    /// use truckmap::ui::theme::Theme;
    ///
    /// let theme = Theme::from_name("catppuccin-latte").unwrap();
    /// assert_eq!(theme.name, "catppuccin-latte");
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            "monochrome" => return Some(Self::monochrome()),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`TruckmapError::Theme`] if the file cannot be read or its
    /// content is not a complete theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref()).map_err(|e| {
            TruckmapError::Theme(format!("failed to read {}: {e}", path.as_ref().display()))
        })?;

        toml::from_str(&contents).map_err(|e| TruckmapError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// Grayscale palette that needs no theme file.
    #[must_use]
    pub fn monochrome() -> Self {
        let gray = |hex: &str| hex.to_string();
        Self {
            name: "monochrome".to_string(),
            colors: ThemeColors {
                header_fg: gray("#ffffff"),
                header_bg: None,
                text_normal: gray("#d0d0d0"),
                text_dim: gray("#808080"),
                border: gray("#505050"),
                selection_fg: gray("#000000"),
                selection_bg: gray("#d0d0d0"),
                cursor_fg: gray("#ffffff"),
                search_bar_border: gray("#a0a0a0"),
                match_highlight_fg: gray("#000000"),
                match_highlight_bg: gray("#ffffff"),
                chip_fg: gray("#a0a0a0"),
                chip_active_fg: gray("#000000"),
                chip_active_bg: gray("#ffffff"),
                map_grid: gray("#3a3a3a"),
                marker_fg: gray("#d0d0d0"),
                marker_selected_fg: gray("#ffffff"),
                marker_emphasis_fg: gray("#ffffff"),
                device_fg: gray("#a0a0a0"),
                overlay_border: gray("#ffffff"),
                overlay_title: gray("#ffffff"),
                rating_fg: gray("#d0d0d0"),
                empty_state_fg: gray("#a0a0a0"),
            },
        }
    }

    /// Converts a hex color to RGB tuple.
    ///
    /// Strips `#` prefix if present, validates length, and parses hex digits.
    /// Returns `(255, 255, 255)` (white) on parse errors.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// Generates an ANSI 24-bit foreground color escape sequence.
    ///
    /// ```rust
    /// use truckmap::ui::theme::Theme;
    ///
    /// assert_eq!(Theme::fg("#ff8000"), "\u{1b}[38;2;255;128;0m");
    /// ```
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// Generates an ANSI 24-bit background color escape sequence.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    /// Returns the ANSI bold escape sequence (`\x1b[1m`).
    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    /// Returns the ANSI dim escape sequence (`\x1b[2m`).
    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Returns the ANSI reset escape sequence (`\x1b[0m`).
    ///
    /// Clears all styling (colors, bold, dim, etc.).
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns the default theme (Catppuccin Mocha), or [`Theme::monochrome`]
    /// if the embedded file fails to parse.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).unwrap_or_else(Self::monochrome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_themes_parse() {
        for name in ["catppuccin-mocha", "catppuccin-latte", "monochrome"] {
            let theme = Theme::from_name(name).unwrap();
            assert_eq!(theme.name, name);
        }
        assert_eq!(Theme::default().name, DEFAULT_THEME);
    }

    #[test]
    fn theme_file_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mono = Theme::monochrome();
        file.write_all(toml::to_string(&mono).unwrap().as_bytes()).unwrap();
        assert_eq!(Theme::from_file(file.path()).unwrap(), mono);
    }

    #[test]
    fn incomplete_theme_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"name = \"half\"\n[colors]\nheader_fg = \"#ffffff\"\n").unwrap();
        let err = Theme::from_file(file.path()).unwrap_err();
        assert!(matches!(err, TruckmapError::Theme(_)));
        assert!(Theme::from_file("/nonexistent/theme.toml").is_err());
    }

    #[test]
    fn malformed_hex_falls_back_to_white() {
        assert_eq!(Theme::fg("#zzz"), "\u{1b}[38;2;255;255;255m");
        assert_eq!(Theme::bg("1e1e2e"), "\u{1b}[48;2;30;30;46m");
    }
}
