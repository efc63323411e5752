//! Video records as delivered by the backend's listing endpoint.
//!
//! The backend serializes its video model in camelCase. Only the fields the
//! plugin renders are typed; everything else is kept verbatim in
//! [`Video::extra`] so records pass through the store unchanged.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

const MILLIS_PER_SECOND: i64 = 1000;
const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3600;
const SECONDS_PER_DAY: i64 = 86400;

const MICROS_PER_SECOND: i64 = 1_000_000;

/// Shown for sizes and durations the backend could not determine.
const UNKNOWN: &str = "-";

/// Units used by [`Video::size_label`], powers of 1000.
const SIZE_UNITS: [&str; 5] = ["B", "kB", "MB", "GB", "TB"];

/// One playable video.
///
/// `file_name` is the identifying name used in routes and stream locators;
/// `extension` selects the media type. `size` is in bytes, `duration` in
/// microseconds, `created` and `last_accessed` in Unix milliseconds.
///
/// `size` and `duration` are signed: the backend reports a negative
/// duration when its demuxer cannot determine one. Missing or `null`
/// values decode as their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub file_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub extension: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub size: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration: i64,
    #[serde(default)]
    pub created: Option<i64>,
    #[serde(default)]
    pub last_accessed: Option<i64>,
    #[serde(default)]
    pub video_metadata: Option<VideoDetails>,

    /// Backend fields this layer does not interpret.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Descriptive metadata a user attached to a video on the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetails {
    #[serde(default)]
    pub video_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

/// Decodes `null` the same way as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Video {
    /// Creates a bare record with only a file name and extension.
    ///
    /// # Examples
    ///
    /// ```
    /// use bingeshelf::Video;
    ///
    /// let video = Video::new("holiday.mp4", "mp4");
    /// assert_eq!(video.display_name(), "holiday.mp4");
    /// ```
    #[must_use]
    pub fn new(file_name: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            extension: extension.into(),
            ..Self::default()
        }
    }

    /// Returns the user-assigned title, falling back to the file name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.video_metadata
            .as_ref()
            .and_then(|details| details.video_name.as_deref())
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.file_name)
    }

    /// Returns the size as a human-readable string using decimal units, or
    /// `"-"` for a negative size.
    ///
    /// # Examples
    ///
    /// ```
    /// use bingeshelf::Video;
    ///
    /// let mut video = Video::new("a.mkv", "mkv");
    /// video.size = 1_500_000;
    /// assert_eq!(video.size_label(), "1.5 MB");
    /// ```
    #[must_use]
    pub fn size_label(&self) -> String {
        if self.size < 0 {
            return UNKNOWN.to_string();
        }

        #[allow(clippy::cast_precision_loss)]
        let mut value = self.size as f64;
        let mut unit = 0;
        while value >= 1000.0 && unit < SIZE_UNITS.len() - 1 {
            value /= 1000.0;
            unit += 1;
        }

        if unit == 0 {
            format!("{} {}", self.size, SIZE_UNITS[0])
        } else {
            format!("{value:.1} {}", SIZE_UNITS[unit])
        }
    }

    /// Returns the duration as `h:mm:ss`, or `m:ss` under an hour.
    ///
    /// A negative duration means the backend could not read it and renders
    /// as `"-"`.
    #[must_use]
    pub fn duration_label(&self) -> String {
        if self.duration < 0 {
            return UNKNOWN.to_string();
        }

        let total = self.duration / MICROS_PER_SECOND;
        let hours = total / 3600;
        let minutes = (total % 3600) / 60;
        let seconds = total % 60;

        if hours > 0 {
            format!("{hours}:{minutes:02}:{seconds:02}")
        } else {
            format!("{minutes}:{seconds:02}")
        }
    }

    /// Returns how long ago the file was created on the server.
    ///
    /// The format follows the elapsed time:
    /// - unknown creation time: `"-"`
    /// - under a minute: `"just now"`
    /// - under an hour: `"Xm ago"`
    /// - under a day: `"Xh ago"`
    /// - otherwise: `"Xd ago"`
    #[must_use]
    pub fn added_ago(&self) -> String {
        let Some(created_ms) = self.created else {
            return UNKNOWN.to_string();
        };

        let now = chrono::Utc::now().timestamp();
        let diff = now - created_ms / MILLIS_PER_SECOND;

        if diff < SECONDS_PER_MINUTE {
            "just now".to_string()
        } else if diff < SECONDS_PER_HOUR {
            format!("{}m ago", diff / SECONDS_PER_MINUTE)
        } else if diff < SECONDS_PER_DAY {
            format!("{}h ago", diff / SECONDS_PER_HOUR)
        } else {
            format!("{}d ago", diff / SECONDS_PER_DAY)
        }
    }
}
