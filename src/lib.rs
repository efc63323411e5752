//! Bingeshelf: a Zellij plugin for browsing and playing videos served by a
//! video backend.
//!
//! - Lists the backend's videos with size, length and age
//! - Searches with fuzzy autosuggest under the search box
//! - Navigates between a home list, per-video views and a not-found view
//! - Plays a video by opening the configured player on the backend's stream

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← keys, web requests,
//! └─────────────────────────────────────────────────────┘    timers, panes
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event handling and view mount hooks              │
//! │  - Video store, autosuggest, focus                  │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Router        │   │ API Client    │
//! │ (ui/)         │   │ (router.rs)   │   │ (api/)        │
//! │ - Rendering   │   │ - Path → view │   │ - listVideos  │
//! │ - Theming     │   │ - History     │   │ - Stream URLs │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (video, errors) · Infrastructure (paths)    │
//! │  Observability (OpenTelemetry → OTLP JSON file)     │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/bingeshelf.wasm" {
//!         api_url "http://media.local:8080"
//!         player "mpv"
//!         start_path "/"
//!         theme "catppuccin-latte"
//!         trace_level "debug"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use bingeshelf::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_render, actions) = handle_event(&mut state, &Event::Navigate("/".to_string()))?;
//! assert!(matches!(actions.last(), Some(Action::WebRequest(_))));
//! # Ok::<(), bingeshelf::ShelfError>(())
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod router;
pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, Focus, TimerQueue, TimerTask};
pub use domain::{Result, ShelfError, Video};
pub use router::{Route, Router};
pub use ui::Theme;

use std::collections::BTreeMap;

const DEFAULT_API_URL: &str = "http://localhost:8080";
const DEFAULT_PLAYER: &str = "mpv";
const DEFAULT_START_PATH: &str = "/";

/// Plugin configuration parsed from Zellij's configuration system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the video backend, without a trailing slash.
    pub api_url: String,

    /// Command opened on a stream URL to play it.
    pub player: String,

    /// Path shown once permissions are granted.
    pub start_path: String,

    /// Built-in theme name (`catppuccin-mocha`, `catppuccin-latte`).
    /// Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            player: DEFAULT_PLAYER.to_string(),
            start_path: DEFAULT_START_PATH.to_string(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Blank values fall back to defaults. `theme_file` may start with `~`.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use bingeshelf::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_url".to_string(), "http://nas:9000/".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.api_url, "http://nas:9000");
    /// assert_eq!(config.player, "mpv");
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let value = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
        };

        let api_url = value("api_url")
            .map(|url| url.trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .to_string();

        let start_path = value("start_path").map_or_else(
            || DEFAULT_START_PATH.to_string(),
            |path| {
                if path.starts_with('/') {
                    path.to_string()
                } else {
                    format!("/{path}")
                }
            },
        );

        Self {
            api_url,
            player: value("player").unwrap_or(DEFAULT_PLAYER).to_string(),
            start_path,
            theme_name: value("theme").map(String::from),
            theme_file: value("theme_file").map(infrastructure::expand_tilde),
            trace_level: value("trace_level").map(String::from),
        }
    }
}

/// Builds the initial state: theme resolved, store empty, router on `/`.
///
/// Theme errors are logged and fall back to the default theme.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(api_url = %config.api_url, "initializing bingeshelf plugin");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            Theme::from_file(theme_file).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme, using default");
                Theme::default()
            })
        },
    );

    AppState::new(api::VideoApi::new(config.api_url.clone()), theme)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_configuration_uses_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
        assert_eq!(
            Config::from_zellij(&map(&[("api_url", "  "), ("player", "")])),
            Config::default()
        );
    }

    #[test]
    fn values_are_normalized() {
        let config = Config::from_zellij(&map(&[
            ("api_url", "http://nas:9000//"),
            ("player", "vlc"),
            ("start_path", "video/a.mp4/type/mp4"),
            ("theme_file", "~/dusk.toml"),
            ("trace_level", "debug"),
        ]));

        assert_eq!(config.api_url, "http://nas:9000");
        assert_eq!(config.player, "vlc");
        assert_eq!(config.start_path, "/video/a.mp4/type/mp4");
        assert_eq!(config.theme_file.as_deref(), Some("/host/dusk.toml"));
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn initialize_points_the_store_at_the_backend() {
        let config = Config {
            api_url: "http://nas:9000".to_string(),
            theme_name: Some("catppuccin-latte".to_string()),
            ..Config::default()
        };

        let state = initialize(&config);
        assert_eq!(state.store.api().base_url(), "http://nas:9000");
        assert_eq!(state.theme.name, "catppuccin-latte");
        assert_eq!(state.route(), &Route::Home);
    }

    #[test]
    fn unreadable_theme_file_falls_back() {
        let config = Config {
            theme_file: Some("/nonexistent/theme.toml".to_string()),
            ..Config::default()
        };
        assert_eq!(initialize(&config).theme, Theme::default());
    }
}
