//! Not-found view renderer.

use crate::ui::helpers::{position_cursor, push_centered};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::NotFoundView;

pub fn render_not_found(out: &mut String, row: usize, view: &NotFoundView, theme: &Theme, cols: usize) {
    position_cursor(out, row + 2, 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.error_fg));
    push_centered(out, "404 - nothing lives here", cols);
    out.push_str(Theme::reset());

    position_cursor(out, row + 3, 1);
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    push_centered(out, &view.path, cols);
    out.push_str(Theme::reset());
}
