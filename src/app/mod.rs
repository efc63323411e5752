//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (`main.rs`) and the API, router and UI
//! layers. Data flows one way:
//!
//! ```text
//! Keys / Web responses / Timers → Events → handle_event → State → Actions
//!          ↑                                                        ↓
//!          └────────────── web_request / set_timeout ───────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`autosuggest`]: Suggestion panel and its close/hide rules
//! - [`handler`]: Event processing and view mount hooks
//! - [`modes`]: Focus targets of the search controls
//! - [`state`]: Central application state and view model computation
//! - [`store`]: Fetched video collection
//!
//! # Example
//!
//! ```rust
//! use bingeshelf::api::VideoApi;
//! use bingeshelf::app::{handle_event, AppState, Event};
//! use bingeshelf::Theme;
//!
//! let mut state = AppState::new(VideoApi::new("http://localhost:8080"), Theme::default());
//! let (_render, _actions) = handle_event(&mut state, &Event::KeyDown)?;
//! # Ok::<(), bingeshelf::ShelfError>(())
//! ```

pub mod actions;
pub mod autosuggest;
pub mod handler;
pub mod modes;
pub mod state;
pub mod store;

pub use actions::{Action, TimerQueue, TimerTask};
pub use autosuggest::{AutosuggestPanel, Suggestion};
pub use handler::{handle_event, Event};
pub use modes::Focus;
pub use state::AppState;
pub use store::VideoStore;
