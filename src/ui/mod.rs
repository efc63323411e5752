//! Terminal rendering layer.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → components → frame → stdout
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Display-ready types per screen
//! - [`renderer`]: Entry point choosing the screen layout
//! - [`components`]: Header, footer, search, table, video and not-found parts
//! - [`helpers`]: Cursor positioning and width-aware padding
//! - [`theme`]: Color schemes and ANSI escapes

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{Screen, UIViewModel};
