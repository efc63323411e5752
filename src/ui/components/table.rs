//! Video table renderer.
//!
//! Five columns: NAME, TYPE, SIZE, LENGTH and ADDED. NAME takes whatever
//! width the fixed columns leave over.

use crate::ui::helpers::{pad_right, position_cursor, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

const TYPE_WIDTH: usize = 5;
const SIZE_WIDTH: usize = 9;
const LENGTH_WIDTH: usize = 9;
const ADDED_WIDTH: usize = 13;

/// Fixed columns plus the four separating spaces.
const FIXED_COLUMNS: usize = TYPE_WIDTH + SIZE_WIDTH + LENGTH_WIDTH + ADDED_WIDTH + 4;

const MIN_NAME_WIDTH: usize = 12;

/// Width of the NAME column for a pane `cols` wide.
#[must_use]
pub fn name_column_width(cols: usize) -> usize {
    cols.saturating_sub(FIXED_COLUMNS).max(MIN_NAME_WIDTH)
}

fn push_columns(out: &mut String, cells: [&str; 5], name_width: usize, cols: usize) {
    let line = format!(
        "{} {} {:>size$} {:>length$} {}",
        pad_right(cells[0], name_width),
        pad_right(cells[1], TYPE_WIDTH),
        cells[2],
        cells[3],
        pad_right(cells[4], ADDED_WIDTH),
        size = SIZE_WIDTH,
        length = LENGTH_WIDTH,
    );
    out.push_str(&line);
    out.push_str(&" ".repeat(cols.saturating_sub(width(&line))));
}

pub fn render_table_headers(out: &mut String, row: usize, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    push_columns(
        out,
        ["NAME", "TYPE", "SIZE", "LENGTH", "ADDED"],
        name_column_width(cols),
        cols,
    );
    out.push_str(Theme::reset());
    row + 1
}

/// Renders one line per item; the selected one gets the selection colors
/// across the full width.
pub fn render_table_rows(
    out: &mut String,
    row: usize,
    items: &[DisplayItem],
    theme: &Theme,
    cols: usize,
) -> usize {
    let name_width = name_column_width(cols);
    let mut current_row = row;

    for item in items {
        position_cursor(out, current_row, 1);
        if item.is_selected {
            out.push_str(&Theme::fg(&theme.colors.selection_fg));
            out.push_str(&Theme::bg(&theme.colors.selection_bg));
        } else {
            out.push_str(&Theme::fg(&theme.colors.text_normal));
        }

        push_columns(
            out,
            [&item.name, &item.ext, &item.size, &item.duration, &item.added],
            name_width,
            cols,
        );

        out.push_str(Theme::reset());
        current_row += 1;
    }

    current_row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::helpers::strip_ansi;

    fn item(name: &str, selected: bool) -> DisplayItem {
        DisplayItem {
            name: name.to_string(),
            ext: "mkv".to_string(),
            size: "1.2 GB".to_string(),
            duration: "1:02:03".to_string(),
            added: "2 days ago".to_string(),
            is_selected: selected,
        }
    }

    #[test]
    fn name_column_absorbs_spare_width() {
        assert_eq!(name_column_width(100), 100 - FIXED_COLUMNS);
        assert_eq!(name_column_width(20), MIN_NAME_WIDTH);
    }

    #[test]
    fn rows_fill_the_pane_width() {
        let mut out = String::new();
        let next = render_table_rows(&mut out, 8, &[item("pilot", true)], &Theme::default(), 80);
        assert_eq!(next, 9);

        let plain = strip_ansi(&out);
        assert_eq!(width(&plain), 80);
        assert!(plain.starts_with("pilot"));
        assert!(plain.contains("1:02:03"));
        assert!(plain.contains("2 days ago"));
    }
}
