//! Search bar and autosuggest panel renderers.
//!
//! ```text
//!      ┌──────────────────────────────────────────┐
//!      │ Search: holi            [ Search ] [ x ] │
//!      └──────────────────────────────────────────┘
//!      │ holiday-2019                             │   ← suggestions overlay
//!      │ holiday-2020                             │     the table below
//!      └──────────────────────────────────────────┘
//! ```

use crate::ui::helpers::{pad_right, position_cursor, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{SearchBarInfo, SuggestionItem};

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 5;

const SEARCH_BUTTON: &str = "[ Search ]";
const CLEAR_BUTTON: &str = "[ x ]";

fn inner_width(cols: usize) -> usize {
    cols.saturating_sub(SEARCH_BOX_MARGIN * 2).saturating_sub(2)
}

fn push_edge(out: &mut String, row: usize, color: &str, left: char, fill: char, right: char, inner: usize) {
    position_cursor(out, row, 1);
    out.push_str(&" ".repeat(SEARCH_BOX_MARGIN));
    out.push_str(&Theme::fg(color));
    out.push(left);
    out.push_str(&fill.to_string().repeat(inner));
    out.push(right);
    out.push_str(Theme::reset());
}

fn push_control(out: &mut String, label: &str, focused: bool, theme: &Theme) {
    if focused {
        out.push_str(Theme::bold());
        out.push_str(Theme::underline());
        out.push_str(&Theme::fg(&theme.colors.focus_border));
    } else {
        out.push_str(&Theme::fg(&theme.colors.text_dim));
    }
    out.push_str(label);
    out.push_str(Theme::reset());
}

/// Renders the 3-line search box. Returns the row after it.
pub fn render_search_bar(
    out: &mut String,
    row: usize,
    search: &SearchBarInfo,
    theme: &Theme,
    cols: usize,
) -> usize {
    let inner = inner_width(cols);
    let border = if search.input_focused {
        &theme.colors.focus_border
    } else {
        &theme.colors.border
    };

    push_edge(out, row, border, '┌', '─', '┐', inner);

    let controls_len = width(SEARCH_BUTTON) + 1 + width(CLEAR_BUTTON) + 1;
    let cursor = if search.input_focused { "_" } else { "" };
    let text = format!(" Search: {}{cursor}", search.query);

    position_cursor(out, row + 1, 1);
    out.push_str(&" ".repeat(SEARCH_BOX_MARGIN));
    out.push_str(&Theme::fg(border));
    out.push('│');
    out.push_str(&Theme::fg(&theme.colors.text_normal));
    out.push_str(&pad_right(&text, inner.saturating_sub(controls_len)));
    push_control(out, SEARCH_BUTTON, search.button_focused, theme);
    out.push(' ');
    push_control(out, CLEAR_BUTTON, search.clear_focused, theme);
    out.push(' ');
    out.push_str(&Theme::fg(border));
    out.push('│');
    out.push_str(Theme::reset());

    push_edge(out, row + 2, border, '└', '─', '┘', inner);

    row + 3
}

/// Draws the suggestion rows starting at `row`, over whatever is there.
///
/// An empty list renders a single "no matches" row.
pub fn render_suggestions(
    out: &mut String,
    row: usize,
    suggestions: &[SuggestionItem],
    theme: &Theme,
    cols: usize,
) -> usize {
    let inner = inner_width(cols);
    let mut current_row = row;

    let push_row = |out: &mut String, row: usize, text: &str, focused: bool| {
        position_cursor(out, row, 1);
        out.push_str(&" ".repeat(SEARCH_BOX_MARGIN));
        out.push_str(&Theme::fg(&theme.colors.border));
        out.push('│');
        if focused {
            out.push_str(&Theme::fg(&theme.colors.suggestion_fg));
            out.push_str(&Theme::bg(&theme.colors.suggestion_bg));
        } else {
            out.push_str(&Theme::fg(&theme.colors.text_normal));
        }
        out.push_str(&pad_right(&format!(" {text}"), inner));
        out.push_str(Theme::reset());
        out.push_str(&Theme::fg(&theme.colors.border));
        out.push('│');
        out.push_str(Theme::reset());
    };

    if suggestions.is_empty() {
        push_row(out, current_row, "no matches", false);
        current_row += 1;
    }
    for item in suggestions {
        push_row(out, current_row, &item.title, item.is_focused);
        current_row += 1;
    }

    push_edge(out, current_row, &theme.colors.border, '└', '─', '┘', inner);
    current_row + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::helpers::strip_ansi;

    #[test]
    fn search_bar_shows_query_and_controls() {
        let mut out = String::new();
        let search = SearchBarInfo {
            query: "holi".to_string(),
            input_focused: true,
            button_focused: false,
            clear_focused: false,
        };
        let next = render_search_bar(&mut out, 4, &search, &Theme::default(), 60);

        assert_eq!(next, 7);
        let plain = strip_ansi(&out);
        assert!(plain.contains("Search: holi_"));
        assert!(plain.contains(SEARCH_BUTTON));
        assert!(plain.contains(CLEAR_BUTTON));
    }

    #[test]
    fn suggestions_render_rows_and_empty_marker() {
        let mut out = String::new();
        let items = vec![
            SuggestionItem { title: "holiday-2019".to_string(), is_focused: false },
            SuggestionItem { title: "holiday-2020".to_string(), is_focused: true },
        ];
        let next = render_suggestions(&mut out, 7, &items, &Theme::default(), 60);
        assert_eq!(next, 10);
        assert!(strip_ansi(&out).contains("holiday-2020"));

        let mut out = String::new();
        render_suggestions(&mut out, 7, &[], &Theme::default(), 60);
        assert!(strip_ansi(&out).contains("no matches"));
    }
}
