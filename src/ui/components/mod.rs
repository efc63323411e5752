//! Composable UI component renderers.
//!
//! Each component appends to a frame buffer and returns the next free row.
//!
//! # Components
//!
//! - [`header`]: Title bar
//! - [`footer`]: Keybinding hints
//! - [`search`]: Search box with its button and clear controls, and the
//!   autosuggest panel
//! - [`table`]: Video list (NAME, TYPE, SIZE, LENGTH, ADDED)
//! - [`empty`]: Message shown instead of an empty table
//! - [`video`]: Details and stream of one video
//! - [`not_found`]: Unmatched path
//!
//! # Layouts
//!
//! ```text
//! Home                     Video                 Not found
//! [blank]                  [blank]               [blank]
//! [Header]                 [Header]              [Header]
//! [Border]                 [Border]              [Border]
//! [Search box, 3 lines]    [Detail lines]        [Message]
//! [Table headers]
//! [Table rows | empty]
//! [Border]                 [Border]              [Border]
//! [Footer]                 [Footer]              [Footer]
//! ```

mod empty;
mod footer;
mod header;
mod not_found;
mod search;
mod table;
mod video;

pub use table::name_column_width;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{HomeView, NotFoundView, UIViewModel, VideoView};

use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use not_found::render_not_found;
use search::{render_search_bar, render_suggestions};
use table::{render_table_headers, render_table_rows};

/// Draws a full-width horizontal rule. Returns the next free row.
fn render_border(out: &mut String, row: usize, color: &str, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(color));
    out.push_str(&"─".repeat(cols));
    out.push_str(Theme::reset());
    row + 1
}

/// Header and rule at the top. Returns the first content row.
fn render_top(out: &mut String, vm: &UIViewModel, theme: &Theme, cols: usize) -> usize {
    let row = render_header(out, 2, &vm.header, theme, cols);
    render_border(out, row, &theme.colors.border, cols)
}

/// Rule and footer pinned to the last two rows.
fn render_bottom(out: &mut String, vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let footer_row = rows.saturating_sub(1);
    render_border(out, footer_row.saturating_sub(1), &theme.colors.border, cols);
    render_footer(out, footer_row, &vm.footer, theme, cols);
}

pub fn render_home(
    out: &mut String,
    vm: &UIViewModel,
    home: &HomeView,
    theme: &Theme,
    cols: usize,
    rows: usize,
) {
    let mut current_row = render_top(out, vm, theme, cols);
    current_row = render_search_bar(out, current_row, &home.search_bar, theme, cols);
    let panel_row = current_row;

    if let Some(empty) = &home.empty_state {
        render_empty_state(out, current_row, empty, theme, cols);
    } else {
        current_row = render_table_headers(out, current_row, theme, cols);
        render_table_rows(out, current_row, &home.display_items, theme, cols);
    }

    // Drawn last so the panel sits over the table.
    if let Some(suggestions) = &home.suggestions {
        render_suggestions(out, panel_row, suggestions, theme, cols);
    }

    render_bottom(out, vm, theme, cols, rows);
}

pub fn render_video_view(
    out: &mut String,
    vm: &UIViewModel,
    video: &VideoView,
    theme: &Theme,
    cols: usize,
    rows: usize,
) {
    let current_row = render_top(out, vm, theme, cols);
    video::render_video(out, current_row, video, theme, cols);
    render_bottom(out, vm, theme, cols, rows);
}

pub fn render_not_found_view(
    out: &mut String,
    vm: &UIViewModel,
    view: &NotFoundView,
    theme: &Theme,
    cols: usize,
    rows: usize,
) {
    let current_row = render_top(out, vm, theme, cols);
    render_not_found(out, current_row, view, theme, cols);
    render_bottom(out, vm, theme, cols, rows);
}
