//! Error types for the bingeshelf plugin.
//!
//! All fallible operations in the crate return [`Result`], backed by the
//! [`ShelfError`] enum. Variants are derived with `thiserror`.

use thiserror::Error;

/// The main error type for bingeshelf operations.
///
/// Only [`ShelfError::Fetch`] is a domain failure (the video listing could
/// not be obtained). The others cover theme files and malformed plugin or
/// request configuration.
///
/// # Examples
///
/// ```
/// use bingeshelf::ShelfError;
///
/// let err = ShelfError::Fetch("server answered 503".to_string());
/// assert_eq!(err.to_string(), "Fetch failed: server answered 503");
/// ```
#[derive(Debug, Error)]
pub enum ShelfError {
    /// Listing videos from the backend failed.
    ///
    /// Covers transport failures, non-success status codes and bodies that
    /// do not decode into video records. The string describes which one.
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for bingeshelf operations.
pub type Result<T> = std::result::Result<T, ShelfError>;
