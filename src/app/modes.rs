//! Focus state of the search controls.
//!
//! The home view mirrors the element identifiers of the original web page
//! so the autosuggest rules can be expressed in the same terms:
//!
//! | Focus               | Element id            |
//! |---------------------|-----------------------|
//! | `SearchInput`       | `search-input`        |
//! | `SearchResult(n)`   | `search-result-<n>`   |
//! | `SearchButton`      | `search-button`       |
//! | `Clear`             | `clear`               |
//! | `Body`              | `body`                |
//!
//! # Example
//!
//! ```rust
//! use bingeshelf::Focus;
//!
//! let focus = Focus::from_element_id("search-result-2");
//! assert_eq!(focus, Focus::SearchResult(2));
//! assert!(focus.keeps_autosuggest_open());
//! ```

/// Identifier of the search input.
pub const SEARCH_INPUT_ID: &str = "search-input";

/// Identifier prefix of suggestion rows.
pub const SEARCH_RESULT_PREFIX: &str = "search-result-";

/// Identifier of the search button.
pub const SEARCH_BUTTON_ID: &str = "search-button";

/// Identifier of the clear control.
pub const CLEAR_ID: &str = "clear";

/// Identifier reported for anything outside the search controls.
pub const BODY_ID: &str = "body";

/// The element holding keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The video list (page body). Navigation keys move the selection.
    #[default]
    Body,

    /// The search input. Characters edit the query.
    SearchInput,

    /// One row of the autosuggest panel, zero-based.
    SearchResult(usize),

    /// The search button. Enter commits the query.
    SearchButton,

    /// The clear control. Enter empties the query.
    Clear,
}

impl Focus {
    /// Element identifier of this focus target.
    #[must_use]
    pub fn element_id(&self) -> String {
        match self {
            Self::Body => BODY_ID.to_string(),
            Self::SearchInput => SEARCH_INPUT_ID.to_string(),
            Self::SearchResult(n) => format!("{SEARCH_RESULT_PREFIX}{n}"),
            Self::SearchButton => SEARCH_BUTTON_ID.to_string(),
            Self::Clear => CLEAR_ID.to_string(),
        }
    }

    /// Parses an element identifier. Unknown identifiers map to `Body`.
    #[must_use]
    pub fn from_element_id(id: &str) -> Self {
        match id {
            SEARCH_INPUT_ID => Self::SearchInput,
            SEARCH_BUTTON_ID => Self::SearchButton,
            CLEAR_ID => Self::Clear,
            _ => id
                .strip_prefix(SEARCH_RESULT_PREFIX)
                .and_then(|n| n.parse().ok())
                .map_or(Self::Body, Self::SearchResult),
        }
    }

    /// Whether focus on this element keeps the autosuggest panel open.
    ///
    /// True for the search input, any suggestion row, the search button and
    /// the clear control.
    #[must_use]
    pub const fn keeps_autosuggest_open(&self) -> bool {
        matches!(
            self,
            Self::SearchInput | Self::SearchResult(_) | Self::SearchButton | Self::Clear
        )
    }

    /// Next element in tab order.
    ///
    /// Suggestion rows are part of the order only while `results` rows are
    /// shown.
    #[must_use]
    pub const fn next(self, results: usize) -> Self {
        match self {
            Self::Body => Self::SearchInput,
            Self::SearchInput if results > 0 => Self::SearchResult(0),
            Self::SearchResult(n) if n + 1 < results => Self::SearchResult(n + 1),
            Self::SearchInput | Self::SearchResult(_) => Self::SearchButton,
            Self::SearchButton => Self::Clear,
            Self::Clear => Self::Body,
        }
    }

    /// Previous element in tab order.
    #[must_use]
    pub const fn previous(self, results: usize) -> Self {
        match self {
            Self::Body => Self::Clear,
            Self::Clear => Self::SearchButton,
            Self::SearchButton if results > 0 => Self::SearchResult(results - 1),
            Self::SearchResult(n) if n > 0 => Self::SearchResult(n - 1),
            Self::SearchButton | Self::SearchResult(_) => Self::SearchInput,
            Self::SearchInput => Self::Body,
        }
    }
}
