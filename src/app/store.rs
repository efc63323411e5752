//! Session-wide video store.
//!
//! [`VideoStore`] owns the video collection for the lifetime of the plugin.
//! The collection starts empty and is only ever replaced as a whole by
//! [`VideoStore::set_videos`], so it is always either empty or the exact
//! payload of the most recently settled successful fetch.
//!
//! Fetching is split in two halves because the plugin runtime performs the
//! network call: [`VideoStore::request_videos`] produces the request and
//! [`VideoStore::settle`] consumes the response. Overlapping requests are not
//! sequenced; the response settled last wins.
//!
//! Videos opened directly by path, and the subtitle tracks of opened videos,
//! are looked up one at a time and cached by file name next to the listing.
//! They never touch the listing itself.

use crate::api::{ApiRequest, ApiResponse, RequestContext, SubtitleTrack, VideoApi};
use crate::domain::Video;
use std::collections::BTreeMap;

/// Owner of the fetched video collection.
#[derive(Debug, Clone)]
pub struct VideoStore {
    api: VideoApi,
    videos: Vec<Video>,
    revision: u64,
    next_request_id: u64,
    looked_up: BTreeMap<String, Video>,
    tracks: BTreeMap<String, Vec<SubtitleTrack>>,
}

impl VideoStore {
    /// Creates an empty store fetching from `api`.
    #[must_use]
    pub const fn new(api: VideoApi) -> Self {
        Self {
            api,
            videos: Vec::new(),
            revision: 0,
            next_request_id: 1,
            looked_up: BTreeMap::new(),
            tracks: BTreeMap::new(),
        }
    }

    /// The current collection, in backend order.
    #[must_use]
    pub fn videos(&self) -> &[Video] {
        &self.videos
    }

    /// Bumped every time the collection is replaced.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// The API client requests are built with.
    #[must_use]
    pub const fn api(&self) -> &VideoApi {
        &self.api
    }

    /// Starts a fetch of the video listing.
    ///
    /// Returns the request for the runtime to perform; its response must be
    /// passed to [`VideoStore::settle`].
    pub fn request_videos(&mut self) -> ApiRequest {
        let request_id = self.next_id();
        tracing::debug!(request_id, "requesting video list");
        self.api.list_videos(request_id)
    }

    fn next_id(&mut self) -> u64 {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        request_id
    }

    /// Applies the response of a [`VideoStore::request_videos`] call.
    ///
    /// On success the collection is replaced; on failure the error is logged
    /// and the collection is left untouched. Returns whether the collection
    /// was replaced.
    pub fn settle(&mut self, response: &ApiResponse) -> bool {
        let request_id = RequestContext::from_map(&response.context)
            .map(|context| context.request_id)
            .ok();

        match VideoApi::decode_videos(response) {
            Ok(videos) => {
                tracing::debug!(
                    request_id = ?request_id,
                    video_count = videos.len(),
                    "video list received"
                );
                self.set_videos(videos);
                true
            }
            Err(e) => {
                tracing::error!(request_id = ?request_id, error = %e, "listing videos failed");
                false
            }
        }
    }

    /// Replaces the whole collection.
    pub fn set_videos(&mut self, videos: Vec<Video>) {
        self.videos = videos;
        self.revision += 1;
    }

    /// Finds a video by route parameters, in the listing first and then
    /// among single lookups.
    #[must_use]
    pub fn find(&self, name: &str, ext: &str) -> Option<&Video> {
        self.videos
            .iter()
            .find(|v| v.file_name == name && v.extension == ext)
            .or_else(|| self.looked_up.get(name).filter(|v| v.extension == ext))
    }

    /// Starts a lookup of one video by file name.
    pub fn request_video(&mut self, name: &str) -> ApiRequest {
        let request_id = self.next_id();
        tracing::debug!(request_id, name = %name, "requesting video");
        self.api.get_video(name, request_id)
    }

    /// Applies the response of a [`VideoStore::request_video`] call.
    /// Returns whether a record was cached.
    pub fn settle_video(&mut self, response: &ApiResponse) -> bool {
        match VideoApi::decode_video(response) {
            Ok(video) => {
                tracing::debug!(name = %video.file_name, "video received");
                self.looked_up.insert(video.file_name.clone(), video);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "video lookup failed");
                false
            }
        }
    }

    /// Subtitle tracks known for a video; empty until its lookup settles.
    #[must_use]
    pub fn tracks(&self, name: &str) -> &[SubtitleTrack] {
        self.tracks.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Whether the tracks of `name` have been looked up.
    #[must_use]
    pub fn has_tracks(&self, name: &str) -> bool {
        self.tracks.contains_key(name)
    }

    /// Starts a lookup of the subtitle tracks of a video.
    pub fn request_tracks(&mut self, name: &str) -> ApiRequest {
        let request_id = self.next_id();
        tracing::debug!(request_id, name = %name, "requesting subtitle tracks");
        self.api.track_info(name, request_id)
    }

    /// Applies the response of a [`VideoStore::request_tracks`] call.
    /// Returns whether tracks were recorded.
    pub fn settle_tracks(&mut self, response: &ApiResponse) -> bool {
        let Some(name) = RequestContext::from_map(&response.context)
            .ok()
            .and_then(|context| context.subject)
        else {
            tracing::warn!("track info response without a video name");
            return false;
        };

        match self.api.decode_tracks(response) {
            Ok(tracks) => {
                tracing::debug!(name = %name, track_count = tracks.len(), "subtitle tracks received");
                self.tracks.insert(name, tracks);
                true
            }
            Err(e) => {
                tracing::warn!(name = %name, error = %e, "subtitle lookup failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn store() -> VideoStore {
        VideoStore::new(VideoApi::new("http://localhost:8080"))
    }

    fn ok_response(request: &ApiRequest, names: &[&str]) -> ApiResponse {
        let videos: Vec<Video> = names.iter().map(|n| Video::new(*n, "mp4")).collect();
        ApiResponse {
            status: 200,
            body: serde_json::to_vec(&videos).unwrap(),
            context: request.context.clone(),
        }
    }

    fn names(store: &VideoStore) -> Vec<&str> {
        store.videos().iter().map(|v| v.file_name.as_str()).collect()
    }

    #[test]
    fn starts_empty() {
        let store = store();
        assert!(store.videos().is_empty());
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn successful_fetch_replaces_collection_exactly() {
        let mut store = store();
        store.set_videos(vec![Video::new("old.mp4", "mp4")]);

        let request = store.request_videos();
        assert!(store.settle(&ok_response(&request, &["c.mp4", "a.mp4", "b.mp4"])));

        assert_eq!(names(&store), vec!["c.mp4", "a.mp4", "b.mp4"]);
    }

    #[test]
    fn failed_fetch_leaves_collection_unchanged() {
        let mut store = store();
        store.set_videos(vec![Video::new("kept.mp4", "mp4")]);
        let revision = store.revision();

        let request = store.request_videos();
        let failure = ApiResponse {
            status: 503,
            body: Vec::new(),
            context: request.context,
        };

        assert!(!store.settle(&failure));
        assert_eq!(names(&store), vec!["kept.mp4"]);
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn last_settled_response_wins() {
        let mut store = store();

        let first = store.request_videos();
        let second = store.request_videos();
        assert_ne!(first.context, second.context);

        store.settle(&ok_response(&second, &["second.mp4"]));
        store.settle(&ok_response(&first, &["first.mp4"]));

        assert_eq!(names(&store), vec!["first.mp4"]);
    }

    #[test]
    fn response_without_context_still_settles() {
        let mut store = store();
        let response = ApiResponse {
            status: 200,
            body: b"[]".to_vec(),
            context: BTreeMap::new(),
        };

        store.set_videos(vec![Video::new("x.mp4", "mp4")]);
        assert!(store.settle(&response));
        assert!(store.videos().is_empty());
    }

    #[test]
    fn looked_up_video_is_found_without_touching_the_listing() {
        let mut store = store();
        let request = store.request_video("direct.webm");
        let context = RequestContext::from_map(&request.context).unwrap();
        assert_eq!(context.subject.as_deref(), Some("direct.webm"));

        let response = ApiResponse {
            status: 200,
            body: serde_json::to_vec(&Video::new("direct.webm", "webm")).unwrap(),
            context: request.context,
        };
        assert!(store.settle_video(&response));

        assert!(store.videos().is_empty());
        assert_eq!(store.revision(), 0);
        assert!(store.find("direct.webm", "webm").is_some());
        assert!(store.find("direct.webm", "mp4").is_none());
    }

    #[test]
    fn tracks_are_recorded_per_video() {
        let mut store = store();
        assert!(!store.has_tracks("movie.mp4"));

        let request = store.request_tracks("movie.mp4");
        let response = ApiResponse {
            status: 200,
            body: br#"{"en":"movie.en.vtt"}"#.to_vec(),
            context: request.context,
        };
        assert!(store.settle_tracks(&response));

        assert!(store.has_tracks("movie.mp4"));
        assert_eq!(store.tracks("movie.mp4")[0].language, "en");
        assert!(store.tracks("other.mp4").is_empty());
    }

    #[test]
    fn failed_track_lookup_records_nothing() {
        let mut store = store();
        let request = store.request_tracks("gone.mp4");
        let response = ApiResponse {
            status: 404,
            body: Vec::new(),
            context: request.context,
        };

        assert!(!store.settle_tracks(&response));
        assert!(!store.has_tracks("gone.mp4"));
    }

    #[test]
    fn set_videos_is_idempotent() {
        let mut store = store();
        let videos = vec![Video::new("a.mp4", "mp4"), Video::new("b.mkv", "mkv")];

        store.set_videos(videos.clone());
        store.set_videos(videos.clone());

        assert_eq!(store.videos(), videos.as_slice());
    }
}
