//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed
//! by the renderer. They hold display-ready strings only; no business logic.
//!
//! # Example
//!
//! ```rust
//! use bingeshelf::ui::viewmodel::{FooterInfo, HeaderInfo, NotFoundView, Screen, UIViewModel};
//!
//! let vm = UIViewModel {
//!     header: HeaderInfo { title: " Not found ".to_string() },
//!     footer: FooterInfo { keybindings: "Esc: back".to_string() },
//!     screen: Screen::NotFound(NotFoundView { path: "/nope".to_string() }),
//! };
//! assert!(matches!(vm.screen, Screen::NotFound(_)));
//! ```

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// Header information (title).
    pub header: HeaderInfo,

    /// Footer information (keybindings).
    pub footer: FooterInfo,

    /// Route-specific content.
    pub screen: Screen,
}

/// Content of the view selected by the router.
#[derive(Debug, Clone)]
pub enum Screen {
    /// Video listing with search.
    Home(HomeView),
    /// One video and its stream.
    Video(VideoView),
    /// Unmatched path.
    NotFound(NotFoundView),
}

/// Home view content.
#[derive(Debug, Clone)]
pub struct HomeView {
    /// Search input and its controls.
    pub search_bar: SearchBarInfo,

    /// Suggestion rows; `None` while the panel is hidden.
    pub suggestions: Option<Vec<SuggestionItem>>,

    /// Table rows in the visible window.
    pub display_items: Vec<DisplayItem>,

    /// Index of the selected row within `display_items`.
    pub selected_index: usize,

    /// Message shown instead of the table when there is nothing to list.
    pub empty_state: Option<EmptyState>,
}

/// One row of the video table.
#[derive(Debug, Clone)]
pub struct DisplayItem {
    /// Display name, truncated to the name column.
    pub name: String,

    /// File extension.
    pub ext: String,

    /// Human-readable size.
    pub size: String,

    /// Human-readable duration.
    pub duration: String,

    /// Relative creation time.
    pub added: String,

    /// Whether this row is selected.
    pub is_selected: bool,
}

/// One row of the autosuggest panel.
#[derive(Debug, Clone)]
pub struct SuggestionItem {
    /// Suggested video title.
    pub title: String,

    /// Whether this row holds focus.
    pub is_focused: bool,
}

/// Search bar display information.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    /// Current input text.
    pub query: String,

    /// Whether the input holds focus.
    pub input_focused: bool,

    /// Whether the search button holds focus.
    pub button_focused: bool,

    /// Whether the clear control holds focus.
    pub clear_focused: bool,
}

/// Video view content.
#[derive(Debug, Clone)]
pub struct VideoView {
    /// File name from the route.
    pub name: String,

    /// Extension from the route.
    pub ext: String,

    /// Stream locator handed to the player.
    pub stream_url: String,

    /// MIME type of the stream.
    pub mime: String,

    /// Size, if the video is in the store.
    pub size: Option<String>,

    /// Duration, if the video is in the store.
    pub duration: Option<String>,

    /// Description from the video's metadata.
    pub description: Option<String>,

    /// Tags from the video's metadata.
    pub tags: Vec<String>,

    /// Languages of the subtitle tracks passed to the player.
    pub subtitles: Vec<String>,
}

/// Not-found view content.
#[derive(Debug, Clone)]
pub struct NotFoundView {
    /// The path that matched no route.
    pub path: String,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone)]
pub struct EmptyState {
    /// Primary message (e.g., "No videos yet").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}
