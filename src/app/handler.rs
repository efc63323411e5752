//! Event handling and state transition logic.
//!
//! The plugin shim translates Zellij events (keys, web responses, timers)
//! into [`Event`]s and feeds them to [`handle_event`], which mutates
//! [`AppState`] and returns whether to re-render plus the [`Action`]s to
//! execute.
//!
//! # Event Types
//!
//! - **Navigation**: `Start`, `Navigate`, `Back`, `GoHome`, `Activate`
//! - **List**: `KeyDown`, `KeyUp`, `Reload`
//! - **Search**: `FocusSearch`, `FocusNext`, `FocusPrevious`, `FocusBody`,
//!   `Char`, `Backspace`, `ClearSearch`
//! - **Playback**: `Play`
//! - **Runtime**: `VideosResponse`, `VideoResponse`, `TracksResponse`,
//!   `TimerElapsed`
//!
//! # Mount hooks
//!
//! Entering the home view fetches the listing. Entering a video view looks
//! up the video when neither the listing nor an earlier lookup has it, and
//! fetches its subtitle tracks once.
//!
//! # Example
//!
//! ```rust
//! use bingeshelf::api::VideoApi;
//! use bingeshelf::app::{handle_event, Action, AppState, Event};
//! use bingeshelf::Theme;
//!
//! let mut state = AppState::new(VideoApi::new("http://localhost:8080"), Theme::default());
//! let (_render, actions) = handle_event(&mut state, &Event::Navigate("/".to_string()))?;
//! assert!(matches!(actions[0], Action::WebRequest(_)));
//! # Ok::<(), bingeshelf::ShelfError>(())
//! ```

use super::actions::{Action, TimerTask};
use super::modes::Focus;
use super::state::AppState;
use crate::api::ApiResponse;
use crate::domain::Result;
use crate::router::Route;

/// Events triggered by user input or completed runtime work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Shows the first view. Leaves no history behind.
    Start(String),
    /// Resolves a path and shows the matching view.
    Navigate(String),
    /// Returns to the previous view, or hides the plugin without history.
    Back,
    /// Shows the home view.
    GoHome,

    /// Moves down in the list or the suggestion panel.
    KeyDown,
    /// Moves up in the list or the suggestion panel.
    KeyUp,
    /// Enter on the focused element.
    Activate,
    /// Fetches the video list again.
    Reload,
    /// Plays the video of the current video view.
    Play,
    /// Hides the plugin.
    CloseFocus,

    /// Moves focus to the search input.
    FocusSearch,
    /// Moves focus to the next search control.
    FocusNext,
    /// Moves focus to the previous search control.
    FocusPrevious,
    /// Moves focus back to the list.
    FocusBody,
    /// Appends a character to the search input.
    Char(char),
    /// Removes the last character of the search input.
    Backspace,
    /// Empties the search input and the committed query.
    ClearSearch,

    /// A list request completed.
    VideosResponse(ApiResponse),
    /// A single-video lookup completed.
    VideoResponse(ApiResponse),
    /// A subtitle track lookup completed.
    TracksResponse(ApiResponse),
    /// A scheduled timer fired.
    TimerElapsed(TimerTask),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// `(should_render, actions)`. Actions are executed in order by the shim.
///
/// # Errors
///
/// Currently infallible; the `Result` lets the shim log failures uniformly.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?EventName(event)).entered();

    match event {
        Event::Start(path) => {
            state.router.replace(path);
            Ok((true, mount(state)))
        }
        Event::Navigate(path) => Ok((true, navigate(state, path))),
        Event::Back => {
            if state.router.back().is_none() {
                tracing::debug!("no history to go back to, hiding");
                return Ok((false, vec![Action::CloseFocus]));
            }
            Ok((true, mount(state)))
        }
        Event::GoHome => Ok((true, navigate(state, "/"))),
        Event::KeyDown => Ok(move_vertically(state, true)),
        Event::KeyUp => Ok(move_vertically(state, false)),
        Event::Activate => Ok(activate(state)),
        Event::Reload => {
            if *state.route() != Route::Home {
                return Ok((false, vec![]));
            }
            Ok((false, vec![Action::WebRequest(state.store.request_videos())]))
        }
        Event::Play => Ok((false, play(state).into_iter().collect())),
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::FocusSearch => Ok((true, set_focus(state, Focus::SearchInput))),
        Event::FocusNext => {
            let next = state.focus.next(state.autosuggest.visible_results());
            Ok((true, set_focus(state, next)))
        }
        Event::FocusPrevious => {
            let previous = state.focus.previous(state.autosuggest.visible_results());
            Ok((true, set_focus(state, previous)))
        }
        Event::FocusBody => Ok((true, set_focus(state, Focus::Body))),
        Event::Char(c) => {
            if state.focus != Focus::SearchInput {
                return Ok((false, vec![]));
            }
            state.search_input.push(*c);
            tracing::trace!(query = %state.search_input, "search input updated");
            input_changed(state);
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if state.focus != Focus::SearchInput || state.search_input.pop().is_none() {
                return Ok((false, vec![]));
            }
            input_changed(state);
            Ok((true, vec![]))
        }
        Event::ClearSearch => {
            clear_search(state);
            Ok((true, vec![]))
        }
        Event::VideosResponse(response) => {
            let _settle_span = tracing::debug_span!("settle_videos", status = response.status).entered();

            if !state.store.settle(response) {
                return Ok((false, vec![]));
            }

            state.apply_search_filter();
            Ok((*state.route() == Route::Home, vec![]))
        }
        Event::VideoResponse(response) => {
            let settled = state.store.settle_video(response);
            Ok((settled && state.showing_video(), vec![]))
        }
        Event::TracksResponse(response) => {
            let settled = state.store.settle_tracks(response);
            Ok((settled && state.showing_video(), vec![]))
        }
        Event::TimerElapsed(TimerTask::CloseAutosuggest) => {
            let changed = state.autosuggest.on_close_timer(state.focus);
            Ok((changed, vec![]))
        }
    }
}

/// Debug formatting of an event without its payload bytes.
struct EventName<'a>(&'a Event);

impl std::fmt::Debug for EventName<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Event::VideosResponse(response) => write!(f, "VideosResponse({})", response.status),
            Event::VideoResponse(response) => write!(f, "VideoResponse({})", response.status),
            Event::TracksResponse(response) => write!(f, "TracksResponse({})", response.status),
            other => write!(f, "{other:?}"),
        }
    }
}

/// Resolves `path` and runs the mount hook of the resulting view.
fn navigate(state: &mut AppState, path: &str) -> Vec<Action> {
    state.router.navigate(path);
    mount(state)
}

/// Runs the mount hook of the current view.
fn mount(state: &mut AppState) -> Vec<Action> {
    match state.route().clone() {
        Route::Home => mount_home(state),
        Route::Video { name, ext } => mount_video(state, &name, &ext),
        Route::NotFound { .. } => vec![],
    }
}

/// Home mount hook: resets focus and fetches the list.
fn mount_home(state: &mut AppState) -> Vec<Action> {
    let mut actions = set_focus(state, Focus::Body);
    actions.push(Action::WebRequest(state.store.request_videos()));
    actions
}

/// Video mount hook: fetches what the store does not know yet.
fn mount_video(state: &mut AppState, name: &str, ext: &str) -> Vec<Action> {
    let mut actions = Vec::new();
    if state.store.find(name, ext).is_none() {
        actions.push(Action::WebRequest(state.store.request_video(name)));
    }
    if !state.store.has_tracks(name) {
        actions.push(Action::WebRequest(state.store.request_tracks(name)));
    }
    actions
}

/// Moves focus, scheduling the autosuggest close check when a search
/// control loses it.
fn set_focus(state: &mut AppState, focus: Focus) -> Vec<Action> {
    let previous = std::mem::replace(&mut state.focus, focus);
    if previous == focus || !previous.keeps_autosuggest_open() {
        return vec![];
    }

    tracing::trace!(from = %previous.element_id(), to = %focus.element_id(), "search control blurred");
    vec![Action::ScheduleTimer(state.autosuggest.close_autosuggest())]
}

fn move_vertically(state: &mut AppState, down: bool) -> (bool, Vec<Action>) {
    if *state.route() != Route::Home {
        return (false, vec![]);
    }

    let results = state.autosuggest.visible_results();
    match (state.focus, down) {
        (Focus::Body, true) => {
            state.move_selection_down();
            (true, vec![])
        }
        (Focus::Body, false) => {
            state.move_selection_up();
            (true, vec![])
        }
        (Focus::SearchInput, true) if results > 0 => {
            (true, set_focus(state, Focus::SearchResult(0)))
        }
        (Focus::SearchResult(n), true) if n + 1 < results => {
            (true, set_focus(state, Focus::SearchResult(n + 1)))
        }
        (Focus::SearchResult(0), false) => (true, set_focus(state, Focus::SearchInput)),
        (Focus::SearchResult(n), false) => (true, set_focus(state, Focus::SearchResult(n - 1))),
        _ => (false, vec![]),
    }
}

fn activate(state: &mut AppState) -> (bool, Vec<Action>) {
    match state.route() {
        Route::Video { .. } => return (false, play(state).into_iter().collect()),
        Route::NotFound { .. } => return (false, vec![]),
        Route::Home => {}
    }

    match state.focus {
        Focus::Body => {
            let Some(video) = state.selected_video() else {
                tracing::debug!("no video selected");
                return (false, vec![]);
            };
            let path = Route::Video {
                name: video.file_name.clone(),
                ext: video.extension.clone(),
            }
            .path();
            (true, navigate(state, &path))
        }
        Focus::SearchInput | Focus::SearchButton => {
            state.committed_query = state.search_input.trim().to_string();
            tracing::debug!(query = %state.committed_query, "search committed");
            state.apply_search_filter();
            (true, set_focus(state, Focus::Body))
        }
        Focus::SearchResult(n) => {
            let Some(suggestion) = state.autosuggest.results().get(n) else {
                return (false, vec![]);
            };
            let path = suggestion.route.path();
            let mut actions = set_focus(state, Focus::Body);
            actions.extend(navigate(state, &path));
            (true, actions)
        }
        Focus::Clear => {
            clear_search(state);
            (true, vec![])
        }
    }
}

/// Input-change hook: refills the suggestions, then hides them for short
/// queries.
fn input_changed(state: &mut AppState) {
    state
        .autosuggest
        .populate(&state.search_input, state.store.videos());
    state.autosuggest.hide_suggest(&state.search_input);
}

fn clear_search(state: &mut AppState) {
    state.search_input.clear();
    state.committed_query.clear();
    state.autosuggest.hide_suggest(&state.search_input);
    state.apply_search_filter();
}

fn play(state: &AppState) -> Option<Action> {
    let Route::Video { name, ext } = state.route() else {
        return None;
    };

    let mut source = state.store.api().stream_source(name, ext);
    source.subtitles = state.store.tracks(name).to_vec();
    let title = state
        .store
        .find(name, ext)
        .map_or(name.as_str(), |v| v.display_name())
        .to_string();

    tracing::debug!(
        url = %source.url,
        mime = %source.mime,
        subtitle_count = source.subtitles.len(),
        "playing video"
    );
    Some(Action::PlayVideo { title, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::VideoApi;
    use crate::domain::Video;
    use crate::ui::theme::Theme;

    fn state() -> AppState {
        AppState::new(VideoApi::new("http://localhost:8080"), Theme::default())
    }

    fn run(state: &mut AppState, event: Event) -> (bool, Vec<Action>) {
        handle_event(state, &event).unwrap()
    }

    fn requests(actions: &[Action]) -> Vec<crate::api::ApiRequest> {
        actions
            .iter()
            .filter_map(|a| match a {
                Action::WebRequest(r) => Some(r.clone()),
                _ => None,
            })
            .collect()
    }

    fn respond(request: &crate::api::ApiRequest, names: &[&str]) -> Event {
        let videos: Vec<Video> = names.iter().map(|n| Video::new(*n, "mp4")).collect();
        Event::VideosResponse(ApiResponse {
            status: 200,
            body: serde_json::to_vec(&videos).unwrap(),
            context: request.context.clone(),
        })
    }

    fn loaded(names: &[&str]) -> AppState {
        let mut state = state();
        let (_, actions) = run(&mut state, Event::Navigate("/".to_string()));
        let request = requests(&actions).remove(0);
        run(&mut state, respond(&request, names));
        state
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            run(state, Event::Char(c));
        }
    }

    #[test]
    fn home_mount_fetches_and_renders_the_list() {
        let mut state = state();
        let (render, actions) = run(&mut state, Event::Navigate("/".to_string()));
        assert!(render);

        let request = requests(&actions).remove(0);
        assert_eq!(request.url, "http://localhost:8080/api/video");

        let (render, _) = run(&mut state, respond(&request, &["b.mp4", "a.mp4"]));
        assert!(render);
        let names: Vec<&str> = state.filtered_videos.iter().map(|v| v.file_name.as_str()).collect();
        assert_eq!(names, vec!["b.mp4", "a.mp4"]);
    }

    #[test]
    fn failed_fetch_is_silent_and_keeps_the_list() {
        let mut state = loaded(&["kept.mp4"]);
        let (_, actions) = run(&mut state, Event::Reload);
        let request = requests(&actions).remove(0);

        let (render, actions) = run(
            &mut state,
            Event::VideosResponse(ApiResponse {
                status: 502,
                body: b"bad gateway".to_vec(),
                context: request.context,
            }),
        );

        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(state.store.videos().len(), 1);
    }

    #[test]
    fn overlapping_fetches_resolve_last_write_wins() {
        let mut state = state();
        let (_, first) = run(&mut state, Event::Navigate("/".to_string()));
        let (_, second) = run(&mut state, Event::Reload);
        let first = requests(&first).remove(0);
        let second = requests(&second).remove(0);

        run(&mut state, respond(&second, &["second.mp4"]));
        run(&mut state, respond(&first, &["first.mp4"]));

        assert_eq!(state.store.videos()[0].file_name, "first.mp4");
    }

    #[test]
    fn not_found_view_does_not_fetch() {
        let mut state = state();
        let (_, actions) = run(&mut state, Event::Navigate("/unknown/xyz".to_string()));
        assert!(requests(&actions).is_empty());
        assert!(matches!(state.route(), Route::NotFound { .. }));
    }

    #[test]
    fn direct_video_path_looks_up_the_video_and_its_tracks() {
        let mut state = state();
        let (_, actions) = run(&mut state, Event::Start("/video/abc.mp4/type/mp4".to_string()));

        let urls: Vec<String> = requests(&actions).into_iter().map(|r| r.url).collect();
        assert_eq!(
            urls,
            vec![
                "http://localhost:8080/api/video/abc.mp4".to_string(),
                "http://localhost:8080/api/track/info/abc.mp4".to_string(),
            ]
        );

        let [lookup, tracks]: [crate::api::ApiRequest; 2] = requests(&actions).try_into().unwrap();
        let mut video = Video::new("abc.mp4", "mp4");
        video.size = 2_000_000;
        let (render, _) = run(
            &mut state,
            Event::VideoResponse(ApiResponse {
                status: 200,
                body: serde_json::to_vec(&video).unwrap(),
                context: lookup.context,
            }),
        );
        assert!(render);
        assert!(state.store.videos().is_empty());
        assert_eq!(state.store.find("abc.mp4", "mp4"), Some(&video));

        let (render, _) = run(
            &mut state,
            Event::TracksResponse(ApiResponse {
                status: 200,
                body: br#"{"en":"abc.en.vtt"}"#.to_vec(),
                context: tracks.context,
            }),
        );
        assert!(render);

        run(&mut state, Event::Navigate("/".to_string()));
        let (_, actions) = run(&mut state, Event::Back);
        assert!(matches!(state.route(), Route::Video { .. }));
        assert!(requests(&actions).is_empty());
    }

    #[test]
    fn listed_video_only_fetches_tracks() {
        let mut state = loaded(&["abc.mp4"]);
        let (_, actions) = run(&mut state, Event::Activate);

        let urls: Vec<String> = requests(&actions).into_iter().map(|r| r.url).collect();
        assert_eq!(urls, vec!["http://localhost:8080/api/track/info/abc.mp4".to_string()]);
    }

    #[test]
    fn back_without_history_hides_the_plugin() {
        let mut state = state();
        run(&mut state, Event::Start("/".to_string()));
        assert!(!state.router.can_go_back());

        let (render, actions) = run(&mut state, Event::Back);
        assert!(!render);
        assert_eq!(actions, vec![Action::CloseFocus]);
        assert_eq!(state.route(), &Route::Home);
    }

    #[test]
    fn going_back_home_remounts_it() {
        let mut state = loaded(&["abc.mp4"]);
        run(&mut state, Event::Activate);
        assert_eq!(
            state.route(),
            &Route::Video { name: "abc.mp4".to_string(), ext: "mp4".to_string() }
        );

        let (_, actions) = run(&mut state, Event::Back);
        assert_eq!(state.route(), &Route::Home);
        assert_eq!(requests(&actions).len(), 1);
    }

    #[test]
    fn video_view_plays_the_stream() {
        let mut state = loaded(&["abc.mp4"]);
        run(&mut state, Event::Navigate("/video/abc.mp4/type/mp4".to_string()));

        let (_, actions) = run(&mut state, Event::Play);
        let [Action::PlayVideo { title, source }] = actions.as_slice() else {
            panic!("expected a single play action, got {actions:?}");
        };
        assert_eq!(title, "abc.mp4");
        assert_eq!(source.url, "http://localhost:8080/api/stream?v=abc.mp4");
        assert_eq!(source.mime, "video/mp4");
        assert!(source.subtitles.is_empty());
    }

    #[test]
    fn play_hands_subtitles_to_the_player() {
        let mut state = loaded(&["abc.mp4"]);
        let (_, actions) = run(&mut state, Event::Navigate("/video/abc.mp4/type/mp4".to_string()));
        let tracks = requests(&actions).remove(0);
        run(
            &mut state,
            Event::TracksResponse(ApiResponse {
                status: 200,
                body: br#"{"hu":"abc.hu.vtt"}"#.to_vec(),
                context: tracks.context,
            }),
        );

        let (_, actions) = run(&mut state, Event::Play);
        let [Action::PlayVideo { source, .. }] = actions.as_slice() else {
            panic!("expected a single play action, got {actions:?}");
        };
        assert_eq!(
            source.player_args(),
            vec![
                "http://localhost:8080/api/stream?v=abc.mp4".to_string(),
                "--sub-file=http://localhost:8080/api/track/abc.hu.vtt".to_string(),
            ]
        );
    }

    #[test]
    fn play_outside_video_view_does_nothing() {
        let mut state = loaded(&["abc.mp4"]);
        let (_, actions) = run(&mut state, Event::Play);
        assert!(actions.is_empty());
    }

    #[test]
    fn typing_shows_suggestions_and_short_input_hides_them() {
        let mut state = loaded(&["holiday-2019.mp4", "holiday-2020.mp4", "work.mp4"]);
        run(&mut state, Event::FocusSearch);

        type_text(&mut state, "ho");
        assert!(!state.autosuggest.is_visible());

        type_text(&mut state, "l");
        assert!(state.autosuggest.is_visible());
        assert_eq!(state.autosuggest.results().len(), 2);

        run(&mut state, Event::Backspace);
        assert!(!state.autosuggest.is_visible());
    }

    #[test]
    fn blur_schedules_the_close_check() {
        let mut state = loaded(&["holiday.mp4"]);
        run(&mut state, Event::FocusSearch);
        type_text(&mut state, "hol");

        let (_, actions) = run(&mut state, Event::FocusBody);
        assert_eq!(actions, vec![Action::ScheduleTimer(TimerTask::CloseAutosuggest)]);
        assert!(state.autosuggest.is_visible());

        let (render, _) = run(&mut state, Event::TimerElapsed(TimerTask::CloseAutosuggest));
        assert!(render);
        assert!(!state.autosuggest.is_visible());
        assert!(state.autosuggest.results().is_empty());
    }

    #[test]
    fn moving_into_the_results_keeps_the_panel() {
        let mut state = loaded(&["holiday-2019.mp4", "holiday-2020.mp4", "holiday-2021.mp4"]);
        run(&mut state, Event::FocusSearch);
        type_text(&mut state, "holiday");

        let (_, actions) = run(&mut state, Event::KeyDown);
        assert_eq!(actions.len(), 1);
        run(&mut state, Event::KeyDown);
        run(&mut state, Event::KeyDown);
        assert_eq!(state.focus, Focus::SearchResult(2));

        run(&mut state, Event::TimerElapsed(TimerTask::CloseAutosuggest));
        run(&mut state, Event::TimerElapsed(TimerTask::CloseAutosuggest));
        assert!(state.autosuggest.is_visible());
        assert_eq!(state.autosuggest.results().len(), 3);
    }

    #[test]
    fn activating_a_suggestion_opens_its_video() {
        let mut state = loaded(&["holiday.mp4", "work.mp4"]);
        run(&mut state, Event::FocusSearch);
        type_text(&mut state, "work");
        run(&mut state, Event::KeyDown);

        let (_, actions) = run(&mut state, Event::Activate);
        assert_eq!(
            state.route(),
            &Route::Video { name: "work.mp4".to_string(), ext: "mp4".to_string() }
        );
        assert!(actions.contains(&Action::ScheduleTimer(TimerTask::CloseAutosuggest)));
    }

    #[test]
    fn committing_and_clearing_the_search() {
        let mut state = loaded(&["alpha.mp4", "beta.mp4"]);
        run(&mut state, Event::FocusSearch);
        type_text(&mut state, "beta");

        run(&mut state, Event::Activate);
        assert_eq!(state.committed_query, "beta");
        assert_eq!(state.filtered_videos.len(), 1);
        assert_eq!(state.focus, Focus::Body);

        run(&mut state, Event::ClearSearch);
        assert!(state.search_input.is_empty());
        assert_eq!(state.filtered_videos.len(), 2);
    }

    #[test]
    fn characters_outside_the_input_are_ignored() {
        let mut state = loaded(&["a.mp4"]);
        let (render, _) = run(&mut state, Event::Char('x'));
        assert!(!render);
        assert!(state.search_input.is_empty());
    }

    #[test]
    fn tab_cycles_through_search_controls() {
        let mut state = loaded(&["a.mp4"]);
        run(&mut state, Event::FocusNext);
        assert_eq!(state.focus, Focus::SearchInput);
        run(&mut state, Event::FocusNext);
        assert_eq!(state.focus, Focus::SearchButton);
        run(&mut state, Event::FocusNext);
        assert_eq!(state.focus, Focus::Clear);
        let (_, actions) = run(&mut state, Event::FocusNext);
        assert_eq!(state.focus, Focus::Body);
        assert_eq!(actions, vec![Action::ScheduleTimer(TimerTask::CloseAutosuggest)]);
    }
}
