//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the library and the Zellij plugin API.
//! Zellij events become library [`Event`]s; returned [`Action`]s become
//! host calls.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Register for Key, `WebRequestResult`, `Timer` and
//!    permission events
//! 3. **Permissions granted**: Show the configured start path without
//!    history, mounting its view
//! 4. **Update**: Handle events, execute actions
//! 5. **Render**: Call library render function
//!
//! # Event Mapping
//!
//! - `Key` → navigation, search and playback events, depending on the
//!   current view and focus
//! - `WebRequestResult` → `Event::VideosResponse`, `Event::VideoResponse` or
//!   `Event::TracksResponse` by the request kind in its context
//! - `Timer` → `Event::TimerElapsed` for the oldest pending timer
//!
//! # Keybindings
//!
//! Global:
//! - `Ctrl+n` / `Ctrl+p`: Move down / up
//!
//! Home, list focused:
//! - `j`/`Down`, `k`/`Up`: Move selection
//! - `Enter`: Open the selected video
//! - `/`: Focus the search input
//! - `Tab` / `Shift+Tab`: Cycle through the search controls
//! - `c`: Clear the search
//! - `r`: Reload the list
//! - `Esc`: Back, or hide the plugin when there is no history
//! - `q`: Hide the plugin
//!
//! Home, search control focused:
//! - characters / `Backspace`: Edit the query (input only)
//! - `Down`/`Up`: Move between the input and the suggestions
//! - `Enter`: Search, open a suggestion, or clear
//! - `Esc`: Back to the list
//!
//! Video view:
//! - `Enter`/`p`: Play, with the video's subtitle tracks
//! - `Esc`/`b`: Back, or hide the plugin when there is no history
//! - `h`: Home
//! - `q`: Hide the plugin

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use std::path::PathBuf;
use zellij_tile::prelude::*;

use bingeshelf::api::client::{GET_VIDEO, LIST_VIDEOS, TRACK_INFO};
use bingeshelf::api::{ApiResponse, RequestContext};
use bingeshelf::{handle_event, Action, Config, Event, Focus, Route, TimerQueue};

register_plugin!(State);

/// Plugin state wrapper.
///
/// Wraps the library's `AppState` with what only the shim needs: the
/// player command and the queue of scheduled timers.
struct State {
    /// Core application state from library layer.
    app: bingeshelf::AppState,

    /// Player command opened on stream URLs.
    player: String,

    /// Path shown once permissions are granted.
    start_path: String,

    /// Scheduled timers awaiting their `Timer` event.
    timers: TimerQueue,
}

impl Default for State {
    fn default() -> Self {
        let config = Config::default();
        Self {
            app: bingeshelf::initialize(&config),
            player: config.player,
            start_path: config.start_path,
            timers: TimerQueue::default(),
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, builds state, requests permissions and
    /// subscribes to events.
    ///
    /// # Permissions
    ///
    /// - `WebAccess`: Query the video backend
    /// - `RunCommands`: Open the player pane
    /// - `ChangeApplicationState`: Hide the plugin pane
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        bingeshelf::observability::init_tracing(&config);

        let _guard = tracing::debug_span!("plugin_load").entered();

        tracing::debug!(api_url = %config.api_url, player = %config.player, "parsed configuration");
        self.app = bingeshelf::initialize(&config);
        self.player.clone_from(&config.player);
        self.start_path.clone_from(&config.start_path);

        request_permission(&[
            PermissionType::WebAccess,
            PermissionType::RunCommands,
            PermissionType::ChangeApplicationState,
        ]);

        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::Timer,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Translates a Zellij event, runs it through the library and executes
    /// the resulting actions. Returns whether to re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        // A response continues the trace of the span that sent its request,
        // so the context must be current before the update span opens.
        let _remote_parent = match &event {
            zellij_tile::prelude::Event::WebRequestResult(_, _, _, context) => {
                RequestContext::from_map(context)
                    .ok()
                    .and_then(|c| c.trace)
                    .and_then(|trace| trace.attach())
            }
            _ => None,
        };

        let event_name = Self::get_event_name(&event);
        let _guard = tracing::debug_span!("plugin_update_event", event_type = %event_name).entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_result_event(status, body, context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::Timer(_elapsed) => match self.timers.fire() {
                Some(task) => Event::TimerElapsed(task),
                None => {
                    tracing::debug!("timer fired with nothing pending");
                    return false;
                }
            },
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => {
                match permissions {
                    PermissionStatus::Granted => {
                        tracing::debug!(start_path = %self.start_path, "permissions granted");
                        Event::Start(self.start_path.clone())
                    }
                    PermissionStatus::Denied => {
                        tracing::warn!("permissions denied - the video list cannot be fetched");
                        return false;
                    }
                }
            }
            _ => return false,
        };

        self.dispatch(&our_event)
    }

    fn render(&mut self, rows: usize, cols: usize) {
        bingeshelf::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn dispatch(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.app, event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for action in actions {
                    self.execute_action(&action);
                }
                should_render
            }
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                false
            }
        }
    }

    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events for the current view and
    /// focus.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::trace!(bare_key = ?key.bare_key, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                _ => None,
            };
        }

        match self.app.route() {
            Route::Home => self.map_home_key(key),
            Route::Video { .. } => Some(match key.bare_key {
                BareKey::Enter | BareKey::Char('p') => Event::Play,
                BareKey::Esc | BareKey::Char('b') | BareKey::Backspace => Event::Back,
                BareKey::Char('h') => Event::GoHome,
                BareKey::Char('q') => Event::CloseFocus,
                _ => return None,
            }),
            Route::NotFound { .. } => Some(match key.bare_key {
                BareKey::Esc | BareKey::Char('b') | BareKey::Backspace => Event::Back,
                BareKey::Char('h') | BareKey::Enter => Event::GoHome,
                BareKey::Char('q') => Event::CloseFocus,
                _ => return None,
            }),
        }
    }

    fn map_home_key(&self, key: &KeyWithModifier) -> Option<Event> {
        if key.bare_key == BareKey::Tab {
            return Some(if key.has_modifiers(&[KeyModifier::Shift]) {
                Event::FocusPrevious
            } else {
                Event::FocusNext
            });
        }

        Some(match (self.app.focus, key.bare_key) {
            (Focus::SearchInput, BareKey::Char(c)) => Event::Char(c),
            (Focus::SearchInput, BareKey::Backspace) => Event::Backspace,
            (Focus::Body, BareKey::Esc) => Event::Back,
            (_, BareKey::Esc) => Event::FocusBody,
            (_, BareKey::Down | BareKey::Char('j')) => Event::KeyDown,
            (_, BareKey::Up | BareKey::Char('k')) => Event::KeyUp,
            (_, BareKey::Enter) => Event::Activate,
            (_, BareKey::Char('/')) => Event::FocusSearch,
            (Focus::Body, BareKey::Char('c')) => Event::ClearSearch,
            (Focus::Body, BareKey::Char('r')) => Event::Reload,
            (Focus::Body, BareKey::Char('q')) => Event::CloseFocus,
            _ => return None,
        })
    }

    /// Maps a finished web request to an application event.
    ///
    /// Responses without a recognizable context are dropped.
    fn map_web_result_event(
        status: u16,
        body: Vec<u8>,
        context: BTreeMap<String, String>,
    ) -> Option<Event> {
        let request = match RequestContext::from_map(&context) {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!(error = %e, "ignoring web response without request context");
                return None;
            }
        };

        tracing::debug!(
            request = %request.kind,
            request_id = request.request_id,
            status,
            body_len = body.len(),
            "web request finished"
        );

        let response = ApiResponse {
            status,
            body,
            context,
        };
        match request.kind.as_str() {
            LIST_VIDEOS => Some(Event::VideosResponse(response)),
            GET_VIDEO => Some(Event::VideoResponse(response)),
            TRACK_INFO => Some(Event::TracksResponse(response)),
            other => {
                tracing::debug!(request = %other, "ignoring response of unknown kind");
                None
            }
        }
    }

    /// Executes an action returned from event handling.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::WebRequest(request) => {
                tracing::debug!(url = %request.url, "sending web request");
                web_request(
                    request.url.clone(),
                    HttpVerb::Get,
                    request.headers.clone(),
                    vec![],
                    request.context.clone(),
                );
            }
            Action::ScheduleTimer(task) => {
                let delay = self.timers.schedule(*task);
                tracing::trace!(pending = self.timers.len(), "timer scheduled");
                set_timeout(delay.as_secs_f64());
            }
            Action::PlayVideo { title, source } => {
                tracing::info!(
                    title = %title,
                    url = %source.url,
                    subtitle_count = source.subtitles.len(),
                    player = %self.player,
                    "opening player"
                );
                open_command_pane_floating(
                    CommandToRun {
                        path: PathBuf::from(&self.player),
                        args: source.player_args(),
                        cwd: None,
                    },
                    None,
                    BTreeMap::new(),
                );
            }
        }
    }
}
