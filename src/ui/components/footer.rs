//! Footer component renderer.
//!
//! Shows the keybinding hints for the current view and focus, centered and
//! dimmed. Hints wider than the pane are clipped.

use crate::ui::helpers::{position_cursor, push_centered};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

pub fn render_footer(
    out: &mut String,
    row: usize,
    footer: &FooterInfo,
    theme: &Theme,
    cols: usize,
) -> usize {
    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    push_centered(out, &footer.keybindings, cols);
    out.push_str(Theme::reset());
    row + 1
}
