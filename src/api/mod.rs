//! Client for the backend video API.
//!
//! The plugin runtime owns the network: requests are described here as
//! [`ApiRequest`] values, executed by the plugin shim through Zellij's
//! `web_request`, and handed back as [`ApiResponse`] events. This module
//! builds the requests and decodes the responses.
//!
//! - [`client`]: `VideoApi` with the list, video and track requests,
//!   response decoding, and stream and subtitle locators
//! - [`context`]: request context carried through the runtime, including
//!   trace ids for span correlation

pub mod client;
pub mod context;

pub use client::{ApiRequest, ApiResponse, MediaSource, SubtitleTrack, VideoApi};
pub use context::{RequestContext, TraceContext};
