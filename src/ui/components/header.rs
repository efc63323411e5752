//! Header component renderer.

use crate::ui::helpers::{position_cursor, push_centered};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the title centered and bold across the full width.
///
/// Returns the next free row.
pub fn render_header(
    out: &mut String,
    row: usize,
    header: &HeaderInfo,
    theme: &Theme,
    cols: usize,
) -> usize {
    position_cursor(out, row, 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        out.push_str(&Theme::bg(bg));
    }

    push_centered(out, &header.title, cols);

    out.push_str(Theme::reset());
    row + 1
}
