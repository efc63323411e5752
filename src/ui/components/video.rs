//! Video view renderer.
//!
//! Lists what is known about one video and the stream the player will
//! open. Fields missing from the store are left out.

use crate::ui::helpers::{clip, pad_right, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::VideoView;

const LABEL_WIDTH: usize = 10;

fn push_field(out: &mut String, row: usize, label: &str, value: &str, theme: &Theme, cols: usize) {
    position_cursor(out, row, 3);
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&pad_right(label, LABEL_WIDTH));
    out.push_str(&Theme::fg(&theme.colors.text_normal));
    out.push_str(&clip(value, cols.saturating_sub(LABEL_WIDTH + 3)));
    out.push_str(Theme::reset());
}

/// Renders the detail lines starting at `row`. Returns the next free row.
pub fn render_video(out: &mut String, row: usize, video: &VideoView, theme: &Theme, cols: usize) -> usize {
    let mut fields: Vec<(&str, String)> = vec![
        ("File", video.name.clone()),
        ("Type", video.ext.clone()),
    ];
    if let Some(size) = &video.size {
        fields.push(("Size", size.clone()));
    }
    if let Some(duration) = &video.duration {
        fields.push(("Length", duration.clone()));
    }
    if !video.tags.is_empty() {
        fields.push(("Tags", video.tags.join(", ")));
    }
    if !video.subtitles.is_empty() {
        fields.push(("Subtitles", video.subtitles.join(", ")));
    }
    fields.push(("Stream", video.stream_url.clone()));
    fields.push(("Format", video.mime.clone()));

    let mut current_row = row + 1;
    for (label, value) in &fields {
        push_field(out, current_row, label, value, theme, cols);
        current_row += 1;
    }

    if let Some(description) = &video.description {
        current_row += 1;
        position_cursor(out, current_row, 3);
        out.push_str(&Theme::fg(&theme.colors.text_normal));
        out.push_str(&clip(description, cols.saturating_sub(4)));
        out.push_str(Theme::reset());
        current_row += 1;
    }

    current_row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::helpers::strip_ansi;

    #[test]
    fn optional_fields_are_skipped() {
        let view = VideoView {
            name: "abc.mp4".to_string(),
            ext: "mp4".to_string(),
            stream_url: "http://localhost:8080/api/stream?v=abc.mp4".to_string(),
            mime: "video/mp4".to_string(),
            size: None,
            duration: None,
            description: None,
            tags: vec![],
            subtitles: vec![],
        };

        let mut out = String::new();
        let next = render_video(&mut out, 4, &view, &Theme::default(), 100);
        let plain = strip_ansi(&out);

        assert_eq!(next, 9);
        assert!(plain.contains("api/stream?v=abc.mp4"));
        assert!(plain.contains("video/mp4"));
        assert!(!plain.contains("Size"));
        assert!(!plain.contains("Subtitles"));
    }

    #[test]
    fn subtitle_languages_are_listed() {
        let view = VideoView {
            name: "abc.mp4".to_string(),
            ext: "mp4".to_string(),
            stream_url: "http://localhost:8080/api/stream?v=abc.mp4".to_string(),
            mime: "video/mp4".to_string(),
            size: Some("2.0 MB".to_string()),
            duration: None,
            description: None,
            tags: vec![],
            subtitles: vec!["en".to_string(), "hu".to_string()],
        };

        let mut out = String::new();
        render_video(&mut out, 4, &view, &Theme::default(), 100);
        let plain = strip_ansi(&out);

        assert!(plain.contains("Subtitles en, hu"));
    }
}
