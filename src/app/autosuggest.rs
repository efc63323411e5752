//! Autosuggest panel under the search input.
//!
//! Two rules decide when the panel disappears:
//!
//! - [`AutosuggestPanel::close_autosuggest`] runs on blur. It schedules a
//!   check [`CLOSE_DELAY`] later; if by then focus has not moved to another
//!   search control, the panel is emptied and hidden. The delay lets focus
//!   travel from the input to a suggestion row without closing the panel.
//! - [`AutosuggestPanel::hide_suggest`] runs on every input change and hides
//!   the panel at once while the query is two characters or shorter.
//!
//! Suggestions come from the store: up to [`MAX_SUGGESTIONS`] videos whose
//! display name fuzzy-matches the query.

use super::actions::TimerTask;
use super::modes::Focus;
use crate::domain::Video;
use crate::router::Route;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::time::Duration;

/// Delay between a blur and the close check.
pub const CLOSE_DELAY: Duration = Duration::from_millis(100);

/// Queries up to this many characters never show suggestions.
pub const HIDE_AT_OR_BELOW: usize = 2;

/// Maximum number of suggestion rows.
pub const MAX_SUGGESTIONS: usize = 10;

/// Queries are truncated to this many characters before matching.
pub const MAX_QUERY_LEN: usize = 30;

/// One suggestion row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// Text shown in the row.
    pub title: String,

    /// Where activating the row navigates to.
    pub route: Route,
}

/// Visibility and contents of the suggestion panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutosuggestPanel {
    visible: bool,
    results: Vec<Suggestion>,
}

impl AutosuggestPanel {
    /// Whether the panel is displayed.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Current rows, whether or not the panel is visible.
    #[must_use]
    pub fn results(&self) -> &[Suggestion] {
        &self.results
    }

    /// Rows reachable by focus: none while hidden.
    #[must_use]
    pub fn visible_results(&self) -> usize {
        if self.visible {
            self.results.len()
        } else {
            0
        }
    }

    /// Fills the panel from `videos` for `query` and shows it.
    ///
    /// Does nothing for queries of two characters or fewer; those are
    /// handled by [`AutosuggestPanel::hide_suggest`].
    pub fn populate(&mut self, query: &str, videos: &[Video]) {
        let query: String = query.chars().take(MAX_QUERY_LEN).collect();
        if query.chars().count() <= HIDE_AT_OR_BELOW {
            return;
        }

        let matcher = SkimMatcherV2::default();
        let needle = query.to_lowercase();

        let mut scored: Vec<(i64, &Video)> = videos
            .iter()
            .filter_map(|video| {
                matcher
                    .fuzzy_match(&video.display_name().to_lowercase(), &needle)
                    .map(|score| (score, video))
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        self.results = scored
            .into_iter()
            .take(MAX_SUGGESTIONS)
            .map(|(_, video)| Suggestion {
                title: video.display_name().to_string(),
                route: Route::Video {
                    name: video.file_name.clone(),
                    ext: video.extension.clone(),
                },
            })
            .collect();
        self.visible = true;

        tracing::trace!(query = %query, results = self.results.len(), "autosuggest populated");
    }

    /// Blur handler: returns the delayed close check to schedule.
    #[must_use]
    pub const fn close_autosuggest(&self) -> TimerTask {
        TimerTask::CloseAutosuggest
    }

    /// Runs the delayed close check against the element focused now.
    ///
    /// Returns whether the panel changed.
    pub fn on_close_timer(&mut self, focus: Focus) -> bool {
        if focus.keeps_autosuggest_open() {
            tracing::trace!(focus = %focus.element_id(), "autosuggest kept open");
            return false;
        }

        let changed = self.visible || !self.results.is_empty();
        self.results.clear();
        self.visible = false;
        changed
    }

    /// Input-change handler: hides the panel for short queries.
    ///
    /// Uses the live length of `input` in characters. Longer inputs leave
    /// visibility untouched. Returns whether the panel changed.
    pub fn hide_suggest(&mut self, input: &str) -> bool {
        if input.chars().count() <= HIDE_AT_OR_BELOW && self.visible {
            self.visible = false;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn videos(names: &[&str]) -> Vec<Video> {
        names.iter().map(|n| Video::new(*n, "mp4")).collect()
    }

    fn shown_panel() -> AutosuggestPanel {
        let mut panel = AutosuggestPanel::default();
        panel.populate("holiday", &videos(&["holiday-2019.mp4", "holiday-2020.mp4"]));
        assert!(panel.is_visible());
        panel
    }

    #[test]
    fn short_inputs_hide_the_panel() {
        for input in ["", "h", "ho"] {
            let mut panel = shown_panel();
            assert!(panel.hide_suggest(input));
            assert!(!panel.is_visible(), "{input:?}");
        }
    }

    #[test]
    fn long_inputs_leave_visibility_untouched() {
        let mut panel = shown_panel();
        assert!(!panel.hide_suggest("hol"));
        assert!(panel.is_visible());

        let mut hidden = AutosuggestPanel::default();
        assert!(!hidden.hide_suggest("holiday"));
        assert!(!hidden.is_visible());
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let mut panel = shown_panel();
        assert!(panel.hide_suggest("őű"));
        assert!(!panel.is_visible());
    }

    #[test]
    fn close_check_keeps_panel_for_search_controls() {
        for focus in [
            Focus::SearchInput,
            Focus::SearchResult(2),
            Focus::SearchButton,
            Focus::Clear,
        ] {
            let mut panel = shown_panel();
            assert!(!panel.on_close_timer(focus));
            assert!(panel.is_visible());
            assert_eq!(panel.results().len(), 2);
        }
    }

    #[test]
    fn close_check_clears_and_hides_for_other_focus() {
        let mut panel = shown_panel();
        assert_eq!(panel.close_autosuggest(), TimerTask::CloseAutosuggest);
        assert!(panel.on_close_timer(Focus::Body));
        assert!(!panel.is_visible());
        assert!(panel.results().is_empty());
    }

    #[test]
    fn populate_caps_results_and_links_to_video_routes() {
        let names: Vec<String> = (0..15).map(|i| format!("episode-{i:02}.mkv")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();

        let mut panel = AutosuggestPanel::default();
        panel.populate("episode", &videos(&refs));

        assert_eq!(panel.results().len(), MAX_SUGGESTIONS);
        assert!(matches!(
            &panel.results()[0].route,
            Route::Video { ext, .. } if ext == "mp4"
        ));
    }

    #[test]
    fn populate_ignores_short_queries_and_shows_empty_matches() {
        let mut panel = AutosuggestPanel::default();
        panel.populate("ep", &videos(&["episode.mkv"]));
        assert!(!panel.is_visible());

        panel.populate("zzz", &videos(&["episode.mkv"]));
        assert!(panel.is_visible());
        assert!(panel.results().is_empty());
        assert_eq!(panel.visible_results(), 0);
    }
}
