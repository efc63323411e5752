//! Top-level rendering coordinator.
//!
//! Computes the view model, lets the component for the current screen fill
//! a frame buffer, and writes the frame to stdout in one go.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Screen, UIViewModel};

/// Renders the plugin UI to stdout.
///
/// Does not clear the screen; Zellij hands the plugin a fresh pane each
/// render.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let frame = render_to_string(state, rows, cols);
    print!("{frame}");
}

/// Renders a frame without printing it.
#[must_use]
pub fn render_to_string(state: &AppState, rows: usize, cols: usize) -> String {
    let viewmodel = state.compute_viewmodel(rows, cols);
    let mut frame = String::new();
    render_viewmodel(&mut frame, &viewmodel, &state.theme, rows, cols);
    frame
}

fn render_viewmodel(out: &mut String, vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    match &vm.screen {
        Screen::Home(home) => components::render_home(out, vm, home, theme, cols, rows),
        Screen::Video(video) => components::render_video_view(out, vm, video, theme, cols, rows),
        Screen::NotFound(view) => components::render_not_found_view(out, vm, view, theme, cols, rows),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::VideoApi;
    use crate::domain::Video;
    use crate::ui::helpers::strip_ansi;

    fn state() -> AppState {
        AppState::new(VideoApi::new("http://localhost:8080"), Theme::default())
    }

    #[test]
    fn home_frame_lists_videos() {
        let mut state = state();
        state
            .store
            .set_videos(vec![Video::new("pilot.mkv", "mkv"), Video::new("finale.mkv", "mkv")]);
        state.apply_search_filter();

        let plain = strip_ansi(&render_to_string(&state, 24, 100));
        assert!(plain.contains("NAME"));
        assert!(plain.contains("pilot.mkv"));
        assert!(plain.contains("finale.mkv"));
        assert!(plain.contains("Videos (2)"));
    }

    #[test]
    fn empty_home_frame_shows_hint() {
        let plain = strip_ansi(&render_to_string(&state(), 24, 100));
        assert!(plain.contains("No videos yet"));
        assert!(!plain.contains("LENGTH"));
    }

    #[test]
    fn video_and_not_found_frames() {
        let mut state = state();
        state.router.navigate("/video/abc/type/mp4");
        let plain = strip_ansi(&render_to_string(&state, 24, 100));
        assert!(plain.contains("api/stream?v=abc"));

        state.router.navigate("/nowhere");
        let plain = strip_ansi(&render_to_string(&state, 24, 100));
        assert!(plain.contains("404"));
        assert!(plain.contains("/nowhere"));
    }
}
