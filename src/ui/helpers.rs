//! Shared rendering utilities.
//!
//! Components write into a frame buffer (`String`) instead of stdout so a
//! whole frame is emitted with a single `print!` and can be inspected in
//! tests. Widths are counted in characters, not bytes.

use std::fmt::Write;

/// Appends the escape that moves the cursor to `row`, `col` (1-indexed).
pub fn position_cursor(out: &mut String, row: usize, col: usize) {
    let _ = write!(out, "\u{1b}[{row};{col}H");
}

/// Display width of `text` in terminal cells, one per character.
#[must_use]
pub fn width(text: &str) -> usize {
    text.chars().count()
}

/// Cuts `text` to at most `max` characters.
#[must_use]
pub fn clip(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Left-aligns `text` in a field of `field` characters, clipping overflow.
#[must_use]
pub fn pad_right(text: &str, field: usize) -> String {
    let clipped = clip(text, field);
    let fill = field.saturating_sub(width(&clipped));
    format!("{clipped}{}", " ".repeat(fill))
}

/// Appends `text` centered in a line of `cols` characters.
pub fn push_centered(out: &mut String, text: &str, cols: usize) {
    let text = clip(text, cols);
    let len = width(&text);
    let left = cols.saturating_sub(len) / 2;

    out.push_str(&" ".repeat(left));
    out.push_str(&text);
    out.push_str(&" ".repeat(cols.saturating_sub(left + len)));
}

/// Removes ANSI escape sequences, leaving the visible text.
#[cfg(test)]
pub fn strip_ansi(frame: &str) -> String {
    let mut plain = String::new();
    let mut chars = frame.chars();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            for next in chars.by_ref() {
                if next.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            plain.push(c);
        }
    }
    plain
}
