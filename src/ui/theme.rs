//! Theme management and ANSI escape sequence generation.
//!
//! Themes are TOML documents. Two are built in and embedded at compile time;
//! custom ones are read from disk with [`Theme::from_file`].
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha`: Dark theme with warm tones (default)
//! - `catppuccin-latte`: Light theme with soft pastels
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! focus_border = "#f5c2e7"
//! suggestion_fg = "#1e1e2e"
//! suggestion_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! error_fg = "#f38ba8"
//! ```
//!
//! # Example
//!
//! ```rust
//! use bingeshelf::Theme;
//!
//! let theme = Theme::from_name("catppuccin-latte").unwrap();
//! println!("{}Bold{}", Theme::bold(), Theme::reset());
//! ```

use crate::domain::{Result, ShelfError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions as hex strings (e.g. `"#cdd6f4"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Header text color.
    pub header_fg: String,
    /// Optional header background color.
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Selected row foreground color.
    pub selection_fg: String,
    /// Selected row background color.
    pub selection_bg: String,

    /// Normal text color.
    pub text_normal: String,
    /// Dimmed text color (footer, secondary info).
    pub text_dim: String,

    /// Border and separator line color.
    pub border: String,
    /// Border of the focused search control.
    pub focus_border: String,

    /// Focused suggestion row foreground.
    pub suggestion_fg: String,
    /// Focused suggestion row background.
    pub suggestion_bg: String,

    /// Empty state message color.
    pub empty_state_fg: String,
    /// Not-found view accent.
    pub error_fg: String,
}

impl ThemeColors {
    /// Grey palette used when no theme can be loaded.
    fn monochrome() -> Self {
        let grey = |hex: &str| hex.to_string();
        Self {
            header_fg: grey("#ffffff"),
            header_bg: None,
            selection_fg: grey("#000000"),
            selection_bg: grey("#c0c0c0"),
            text_normal: grey("#e0e0e0"),
            text_dim: grey("#808080"),
            border: grey("#606060"),
            focus_border: grey("#ffffff"),
            suggestion_fg: grey("#000000"),
            suggestion_bg: grey("#a0a0a0"),
            empty_state_fg: grey("#c0c0c0"),
            error_fg: grey("#ffffff"),
        }
    }
}

impl Theme {
    /// Loads a built-in theme by name, or `None` for unknown names.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ShelfError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| ShelfError::Theme(format!("cannot read {}: {e}", path.display())))?;

        toml::from_str(&contents)
            .map_err(|e| ShelfError::Theme(format!("cannot parse {}: {e}", path.display())))
    }

    /// Parses `#rrggbb`; anything else is white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// ANSI 24-bit foreground escape for `hex`.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background escape for `hex`.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn underline() -> &'static str {
        "\u{001b}[4m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Catppuccin Mocha, or a grey palette if the embedded file is broken.
    fn default() -> Self {
        Self::from_name("catppuccin-mocha").unwrap_or_else(|| Self {
            name: "monochrome".to_string(),
            colors: ThemeColors::monochrome(),
        })
    }
}
