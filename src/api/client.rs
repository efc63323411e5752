//! Video API requests and response decoding.
//!
//! # Endpoints
//!
//! - `GET {base}/api/video`: JSON list of video records
//! - `GET {base}/api/video/<file name>`: one video record
//! - `GET {base}/api/track/info/<file name>`: subtitle languages of a video,
//!   as a JSON object mapping language key to track file name
//! - `{base}/api/track/<track file>`: one WebVTT subtitle track
//! - `{base}/api/stream?v=<file name>`: byte-range stream of one video
//!
//! The listing body is accepted either as a bare JSON array or wrapped in a
//! `{"data": [...]}` envelope.

use super::context::RequestContext;
use crate::domain::{Result, ShelfError, Video};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Context kind tagging list requests.
pub const LIST_VIDEOS: &str = "list_videos";

/// Context kind tagging single-video lookups.
pub const GET_VIDEO: &str = "get_video";

/// Context kind tagging subtitle track lookups.
pub const TRACK_INFO: &str = "track_info";

const LIST_PATH: &str = "/api/video";
const STREAM_PATH: &str = "/api/stream";
const TRACK_INFO_PATH: &str = "/api/track/info";
const TRACK_PATH: &str = "/api/track";

/// Player flag attaching an external subtitle file.
const SUBTITLE_FLAG: &str = "--sub-file=";

/// A web request ready to be issued by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// Absolute URL to `GET`.
    pub url: String,

    /// Request headers.
    pub headers: BTreeMap<String, String>,

    /// Context echoed back with the response.
    pub context: BTreeMap<String, String>,
}

/// A completed web request as delivered by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,

    /// Raw response body.
    pub body: Vec<u8>,

    /// Context map of the originating [`ApiRequest`].
    pub context: BTreeMap<String, String>,
}

/// A subtitle track served alongside a video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleTrack {
    /// Language key, e.g. `en`.
    pub language: String,

    /// URL of the WebVTT file.
    pub url: String,
}

/// A playable reference handed to the external player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaSource {
    /// Stream URL.
    pub url: String,

    /// MIME type, `video/<ext>`.
    pub mime: String,

    /// Subtitle tracks to load with the stream.
    pub subtitles: Vec<SubtitleTrack>,
}

impl MediaSource {
    /// Command line arguments for the player: the stream URL followed by
    /// one `--sub-file=` flag per subtitle track.
    #[must_use]
    pub fn player_args(&self) -> Vec<String> {
        std::iter::once(self.url.clone())
            .chain(
                self.subtitles
                    .iter()
                    .map(|track| format!("{SUBTITLE_FLAG}{}", track.url)),
            )
            .collect()
    }
}

/// Accepted shapes of the listing body.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListBody {
    Envelope { data: Vec<Video> },
    Bare(Vec<Video>),
}

/// Builds requests against a single backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoApi {
    base_url: String,
}

impl VideoApi {
    /// Creates a client for `base_url`, ignoring trailing slashes.
    ///
    /// # Examples
    ///
    /// ```
    /// use bingeshelf::api::VideoApi;
    ///
    /// let api = VideoApi::new("http://nas.local:8080/");
    /// assert_eq!(api.base_url(), "http://nas.local:8080");
    /// ```
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Backend base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the "list videos" request. Single attempt, no retry.
    #[must_use]
    pub fn list_videos(&self, request_id: u64) -> ApiRequest {
        Self::json_request(
            format!("{}{LIST_PATH}", self.base_url),
            RequestContext::new(LIST_VIDEOS, request_id),
        )
    }

    /// Builds the lookup of a single video record by file name.
    #[must_use]
    pub fn get_video(&self, name: &str, request_id: u64) -> ApiRequest {
        Self::json_request(
            format!("{}{LIST_PATH}/{}", self.base_url, urlencoding::encode(name)),
            RequestContext::new(GET_VIDEO, request_id).with_subject(name),
        )
    }

    /// Builds the lookup of the subtitle tracks of a video.
    #[must_use]
    pub fn track_info(&self, name: &str, request_id: u64) -> ApiRequest {
        Self::json_request(
            format!("{}{TRACK_INFO_PATH}/{}", self.base_url, urlencoding::encode(name)),
            RequestContext::new(TRACK_INFO, request_id).with_subject(name),
        )
    }

    fn json_request(url: String, context: RequestContext) -> ApiRequest {
        let mut headers = BTreeMap::new();
        headers.insert("Accept".to_string(), "application/json".to_string());

        ApiRequest {
            url,
            headers,
            context: context.to_map(),
        }
    }

    fn check_status(response: &ApiResponse) -> Result<()> {
        if (200..300).contains(&response.status) {
            Ok(())
        } else {
            Err(ShelfError::Fetch(format!(
                "server answered {}",
                response.status
            )))
        }
    }

    /// Decodes a listing response into the backend's ordered records.
    ///
    /// # Errors
    ///
    /// Returns [`ShelfError::Fetch`] if the status is not 2xx or the body is
    /// not a list of video records.
    pub fn decode_videos(response: &ApiResponse) -> Result<Vec<Video>> {
        Self::check_status(response)?;

        match serde_json::from_slice::<ListBody>(&response.body) {
            Ok(ListBody::Envelope { data } | ListBody::Bare(data)) => Ok(data),
            Err(e) => Err(ShelfError::Fetch(format!("undecodable body: {e}"))),
        }
    }

    /// Decodes a single-video response.
    ///
    /// # Errors
    ///
    /// Returns [`ShelfError::Fetch`] if the status is not 2xx (the backend
    /// answers 404 for unknown names) or the body is not a video record.
    pub fn decode_video(response: &ApiResponse) -> Result<Video> {
        Self::check_status(response)?;
        serde_json::from_slice(&response.body)
            .map_err(|e| ShelfError::Fetch(format!("undecodable video: {e}")))
    }

    /// Decodes a track info response into tracks ordered by language.
    ///
    /// # Errors
    ///
    /// Returns [`ShelfError::Fetch`] if the status is not 2xx or the body is
    /// not an object of track file names.
    pub fn decode_tracks(&self, response: &ApiResponse) -> Result<Vec<SubtitleTrack>> {
        Self::check_status(response)?;

        let tracks: BTreeMap<String, String> = serde_json::from_slice(&response.body)
            .map_err(|e| ShelfError::Fetch(format!("undecodable track info: {e}")))?;

        Ok(tracks
            .into_iter()
            .map(|(language, file)| SubtitleTrack {
                language,
                url: self.track_url(&file),
            })
            .collect())
    }

    /// URL of a subtitle track file.
    #[must_use]
    pub fn track_url(&self, track_file: &str) -> String {
        format!("{}{TRACK_PATH}/{}", self.base_url, urlencoding::encode(track_file))
    }

    /// Builds the stream locator for a video route's parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// use bingeshelf::api::VideoApi;
    ///
    /// let api = VideoApi::new("http://nas.local:8080");
    /// let source = api.stream_source("my film.mkv", "mkv");
    /// assert_eq!(source.url, "http://nas.local:8080/api/stream?v=my%20film.mkv");
    /// assert_eq!(source.mime, "video/mkv");
    /// ```
    #[must_use]
    pub fn stream_source(&self, name: &str, ext: &str) -> MediaSource {
        MediaSource {
            url: format!(
                "{}{STREAM_PATH}?v={}",
                self.base_url,
                urlencoding::encode(name)
            ),
            mime: format!("video/{ext}"),
            subtitles: Vec::new(),
        }
    }
}
