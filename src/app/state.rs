//! Application state management and view model computation.
//!
//! [`AppState`] is the single source of truth for the plugin: the video
//! store, the router, the search controls and the list selection. The event
//! handler mutates it; the renderer reads it through
//! [`AppState::compute_viewmodel`].
//!
//! # Example
//!
//! ```rust
//! use bingeshelf::api::VideoApi;
//! use bingeshelf::app::AppState;
//! use bingeshelf::Theme;
//!
//! let state = AppState::new(VideoApi::new("http://localhost:8080"), Theme::default());
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert!(viewmodel.header.title.contains("Videos"));
//! ```

use super::autosuggest::AutosuggestPanel;
use super::modes::Focus;
use super::store::VideoStore;
use crate::api::VideoApi;
use crate::domain::Video;
use crate::router::{Route, Router};
use crate::ui::components::name_column_width;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    DisplayItem, EmptyState, FooterInfo, HeaderInfo, HomeView, NotFoundView, Screen,
    SearchBarInfo, SuggestionItem, UIViewModel, VideoView,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Rows taken by chrome on the home view: blank, header, border, search
/// box (3), table header, border, footer.
const HOME_CHROME_ROWS: usize = 9;

/// Shortens `text` to `max` characters, marking the cut with `...`.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Fetched videos.
    pub store: VideoStore,

    /// Current view and navigation history.
    pub router: Router,

    /// Element holding focus on the home view.
    pub focus: Focus,

    /// Text in the search input.
    pub search_input: String,

    /// Query applied to the list; set by the search button or Enter.
    pub committed_query: String,

    /// Suggestion panel state.
    pub autosuggest: AutosuggestPanel,

    /// Videos shown in the home list after the committed query.
    pub filtered_videos: Vec<Video>,

    /// Zero-based selection within `filtered_videos`.
    pub selected_index: usize,

    /// Color scheme for UI rendering.
    pub theme: Theme,
}

impl AppState {
    /// Creates a state with an empty store on the home route.
    #[must_use]
    pub fn new(api: VideoApi, theme: Theme) -> Self {
        Self {
            store: VideoStore::new(api),
            router: Router::new(),
            focus: Focus::Body,
            search_input: String::new(),
            committed_query: String::new(),
            autosuggest: AutosuggestPanel::default(),
            filtered_videos: Vec::new(),
            selected_index: 0,
            theme,
        }
    }

    /// The route currently displayed.
    #[must_use]
    pub const fn route(&self) -> &Route {
        self.router.current()
    }

    /// Whether a video view is displayed.
    #[must_use]
    pub const fn showing_video(&self) -> bool {
        matches!(self.route(), Route::Video { .. })
    }

    /// Moves the list selection down, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        if self.filtered_videos.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.filtered_videos.len();
    }

    /// Moves the list selection up, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        if self.filtered_videos.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.filtered_videos.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// The highlighted video in the list, if any.
    #[must_use]
    pub fn selected_video(&self) -> Option<&Video> {
        self.filtered_videos.get(self.selected_index)
    }

    /// Recomputes `filtered_videos` from the store and the committed query.
    ///
    /// All whitespace-separated tokens must fuzzy-match the display name.
    /// The selection is clamped to the new bounds.
    pub fn apply_search_filter(&mut self) {
        let _span = tracing::debug_span!(
            "apply_search_filter",
            total_videos = self.store.videos().len(),
            query_len = self.committed_query.len()
        )
        .entered();

        let tokens: Vec<String> = self
            .committed_query
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();

        self.filtered_videos = if tokens.is_empty() {
            self.store.videos().to_vec()
        } else {
            let matcher = SkimMatcherV2::default();
            self.store
                .videos()
                .iter()
                .filter(|video| {
                    let name = video.display_name().to_lowercase();
                    tokens.iter().all(|t| matcher.fuzzy_match(&name, t).is_some())
                })
                .cloned()
                .collect()
        };

        if self.filtered_videos.is_empty() {
            self.selected_index = 0;
        } else {
            self.selected_index = self.selected_index.min(self.filtered_videos.len() - 1);
        }

        tracing::debug!(filtered_count = self.filtered_videos.len(), "search filter applied");
    }

    /// Computes a renderable view model for the current route.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        match self.route() {
            Route::Home => self.compute_home(rows, cols),
            Route::Video { name, ext } => self.compute_video(name, ext),
            Route::NotFound { path } => self.compute_not_found(path),
        }
    }

    fn compute_home(&self, rows: usize, cols: usize) -> UIViewModel {
        let name_width = name_column_width(cols);

        let available_rows = rows.saturating_sub(HOME_CHROME_ROWS);

        let mut visible_start = self.selected_index.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(self.filtered_videos.len());
        if visible_end - visible_start < available_rows
            && self.filtered_videos.len() >= available_rows
        {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let display_items = self.filtered_videos[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(offset, video)| DisplayItem {
                name: truncate(video.display_name(), name_width),
                ext: video.extension.clone(),
                size: video.size_label(),
                duration: video.duration_label(),
                added: video.added_ago(),
                is_selected: self.focus == Focus::Body
                    && visible_start + offset == self.selected_index,
            })
            .collect();

        let empty_state = if self.store.videos().is_empty() {
            Some(EmptyState {
                message: "No videos yet".to_string(),
                subtitle: "Press r to reload the list".to_string(),
            })
        } else if self.filtered_videos.is_empty() {
            Some(EmptyState {
                message: "Nothing matches your search".to_string(),
                subtitle: "Press c to clear the query".to_string(),
            })
        } else {
            None
        };

        let suggestions = if self.autosuggest.is_visible() {
            Some(
                self.autosuggest
                    .results()
                    .iter()
                    .enumerate()
                    .map(|(i, s)| SuggestionItem {
                        title: s.title.clone(),
                        is_focused: self.focus == Focus::SearchResult(i),
                    })
                    .collect(),
            )
        } else {
            None
        };

        let title = if self.committed_query.is_empty() {
            format!(" Videos ({}) ", self.filtered_videos.len())
        } else {
            format!(
                " Videos matching \"{}\" ({}) ",
                self.committed_query,
                self.filtered_videos.len()
            )
        };

        UIViewModel {
            header: HeaderInfo { title },
            footer: self.compute_footer(),
            screen: Screen::Home(HomeView {
                search_bar: SearchBarInfo {
                    query: self.search_input.clone(),
                    input_focused: self.focus == Focus::SearchInput,
                    button_focused: self.focus == Focus::SearchButton,
                    clear_focused: self.focus == Focus::Clear,
                },
                suggestions,
                display_items,
                selected_index: self.selected_index.saturating_sub(visible_start),
                empty_state,
            }),
        }
    }

    fn compute_video(&self, name: &str, ext: &str) -> UIViewModel {
        let source = self.store.api().stream_source(name, ext);
        let video = self.store.find(name, ext);

        let title = video.map_or(name, Video::display_name).to_string();
        let details = video.and_then(|v| v.video_metadata.as_ref());

        UIViewModel {
            header: HeaderInfo {
                title: format!(" {title} "),
            },
            footer: self.compute_footer(),
            screen: Screen::Video(VideoView {
                name: name.to_string(),
                ext: ext.to_string(),
                stream_url: source.url,
                mime: source.mime,
                size: video.map(Video::size_label),
                duration: video.map(Video::duration_label),
                description: details.and_then(|d| d.description.clone()),
                tags: details.map(|d| d.tags.clone()).unwrap_or_default(),
                subtitles: self
                    .store
                    .tracks(name)
                    .iter()
                    .map(|track| track.language.clone())
                    .collect(),
            }),
        }
    }

    fn compute_not_found(&self, path: &str) -> UIViewModel {
        UIViewModel {
            header: HeaderInfo {
                title: " Not found ".to_string(),
            },
            footer: self.compute_footer(),
            screen: Screen::NotFound(NotFoundView {
                path: path.to_string(),
            }),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.route(), self.focus) {
            (Route::Home, Focus::SearchInput) => {
                "Type to search  Enter: search  Tab: next  Esc: list".to_string()
            }
            (Route::Home, Focus::SearchResult(_)) => {
                "j/k: move  Enter: open  Tab: next  Esc: list".to_string()
            }
            (Route::Home, Focus::SearchButton | Focus::Clear) => {
                "Enter: activate  Tab: next  Esc: list".to_string()
            }
            (Route::Home, Focus::Body) => {
                "j/k: navigate  Enter: open  /: search  c: clear  r: reload  q: quit".to_string()
            }
            (Route::Video { .. }, _) => "Enter/p: play  Esc: back  h: home  q: quit".to_string(),
            (Route::NotFound { .. }, _) => "Esc: back  h: home  q: quit".to_string(),
        };

        FooterInfo { keybindings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(names: &[&str]) -> AppState {
        let mut state = AppState::new(VideoApi::new("http://localhost:8080"), Theme::default());
        state
            .store
            .set_videos(names.iter().map(|n| Video::new(*n, "mp4")).collect());
        state.apply_search_filter();
        state
    }

    #[test]
    fn truncate_marks_cut_names() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a-very-long-name", 10), "a-very-...");
    }

    #[test]
    fn selection_wraps_both_ways() {
        let mut state = state_with(&["a.mp4", "b.mp4", "c.mp4"]);
        state.move_selection_up();
        assert_eq!(state.selected_index, 2);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn committed_query_filters_and_clamps_selection() {
        let mut state = state_with(&["alpha.mp4", "beta.mp4", "alphabet.mp4"]);
        state.selected_index = 2;

        state.committed_query = "beta".to_string();
        state.apply_search_filter();

        assert_eq!(state.filtered_videos.len(), 1);
        assert_eq!(state.selected_index, 0);
        assert_eq!(state.selected_video().map(|v| v.file_name.as_str()), Some("beta.mp4"));
    }

    #[test]
    fn home_viewmodel_lists_videos_in_store_order() {
        let state = state_with(&["z.mp4", "a.mp4"]);
        let vm = state.compute_viewmodel(24, 80);

        let Screen::Home(home) = vm.screen else {
            panic!("expected home screen");
        };
        let names: Vec<&str> = home.display_items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["z.mp4", "a.mp4"]);
        assert!(home.empty_state.is_none());
        assert!(home.suggestions.is_none());
    }

    #[test]
    fn empty_store_shows_empty_state() {
        let state = state_with(&[]);
        let Screen::Home(home) = state.compute_viewmodel(24, 80).screen else {
            panic!("expected home screen");
        };
        assert!(home.empty_state.is_some());
    }

    #[test]
    fn video_viewmodel_builds_stream_reference() {
        let mut state = state_with(&["abc"]);
        state.router.navigate("/video/abc/type/mp4");

        let Screen::Video(video) = state.compute_viewmodel(24, 80).screen else {
            panic!("expected video screen");
        };
        assert_eq!(video.stream_url, "http://localhost:8080/api/stream?v=abc");
        assert_eq!(video.mime, "video/mp4");
        assert!(video.size.is_some());
    }

    #[test]
    fn video_viewmodel_works_without_store_entry() {
        let mut state = state_with(&[]);
        state.router.navigate("/video/unknown.webm/type/webm");

        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.header.title, " unknown.webm ");
        let Screen::Video(video) = vm.screen else {
            panic!("expected video screen");
        };
        assert!(video.size.is_none());
    }

    #[test]
    fn video_viewmodel_lists_subtitle_languages() {
        let mut state = state_with(&["abc.mp4"]);
        state.router.navigate("/video/abc.mp4/type/mp4");
        let request = state.store.request_tracks("abc.mp4");
        state.store.settle_tracks(&crate::api::ApiResponse {
            status: 200,
            body: br#"{"hu":"abc.hu.vtt","en":"abc.en.vtt"}"#.to_vec(),
            context: request.context,
        });

        let Screen::Video(video) = state.compute_viewmodel(24, 80).screen else {
            panic!("expected video screen");
        };
        assert_eq!(video.subtitles, vec!["en".to_string(), "hu".to_string()]);
    }

    #[test]
    fn not_found_viewmodel_echoes_path() {
        let mut state = state_with(&[]);
        state.router.navigate("/unknown/xyz");

        let Screen::NotFound(view) = state.compute_viewmodel(24, 80).screen else {
            panic!("expected not found screen");
        };
        assert_eq!(view.path, "/unknown/xyz");
    }
}
