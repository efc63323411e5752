//! Domain layer for the bingeshelf plugin.
//!
//! Holds the types shared by every other layer, free of Zellij APIs:
//!
//! - [`error`]: Error type and result alias
//! - [`video`]: Video records as sent by the backend, plus display helpers
//!
//! # Examples
//!
//! ```
//! use bingeshelf::domain::{Result, Video};
//!
//! fn first_name(videos: &[Video]) -> Result<Option<&str>> {
//!     Ok(videos.first().map(|v| v.file_name.as_str()))
//! }
//! ```

pub mod error;
pub mod video;

pub use error::{Result, ShelfError};
pub use video::{Video, VideoDetails};
