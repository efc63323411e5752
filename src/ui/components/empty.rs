//! Empty state component renderer.
//!
//! Shown in place of the video table when the store holds nothing yet or
//! the committed query filters everything out.

use crate::ui::helpers::{position_cursor, push_centered};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the message and its subtitle on two centered lines starting
/// two rows below `row`.
pub fn render_empty_state(
    out: &mut String,
    row: usize,
    empty: &EmptyState,
    theme: &Theme,
    cols: usize,
) {
    position_cursor(out, row + 2, 1);
    out.push_str(&Theme::fg(&theme.colors.empty_state_fg));
    push_centered(out, &empty.message, cols);
    out.push_str(Theme::reset());

    position_cursor(out, row + 3, 1);
    out.push_str(Theme::dim());
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    push_centered(out, &empty.subtitle, cols);
    out.push_str(Theme::reset());
}
