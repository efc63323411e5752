//! Path-to-view routing.
//!
//! The route table is fixed and evaluated in order:
//!
//! | Pattern                  | Route                 |
//! |--------------------------|-----------------------|
//! | `/`                      | [`Route::Home`]       |
//! | `/video/:name/type/:ext` | [`Route::Video`]      |
//! | `*`                      | [`Route::NotFound`]   |
//!
//! Parameters are single, non-empty path segments and are percent-decoded.
//! Query strings and fragments do not take part in matching.
//!
//! [`Router`] adds a navigation history on top so the plugin can go back
//! to the previous view. The history holds at most [`MAX_HISTORY`] routes.

/// A resolved view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Video listing.
    Home,

    /// A single video, identified by its file name and extension.
    Video {
        /// File name of the video.
        name: String,
        /// Extension selecting the media type.
        ext: String,
    },

    /// Fallback for any unmatched path.
    NotFound {
        /// The path as requested.
        path: String,
    },
}

impl Route {
    /// Resolves `path` against the route table.
    ///
    /// # Examples
    ///
    /// ```
    /// use bingeshelf::Route;
    ///
    /// assert_eq!(Route::resolve("/"), Route::Home);
    /// assert_eq!(
    ///     Route::resolve("/video/abc/type/mp4"),
    ///     Route::Video { name: "abc".into(), ext: "mp4".into() },
    /// );
    /// assert!(matches!(Route::resolve("/unknown/xyz"), Route::NotFound { .. }));
    /// ```
    #[must_use]
    pub fn resolve(path: &str) -> Self {
        let trimmed = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let trimmed = if trimmed.len() > 1 {
            trimmed.strip_suffix('/').unwrap_or(trimmed)
        } else {
            trimmed
        };

        if trimmed.is_empty() || trimmed == "/" {
            return Self::Home;
        }

        let segments: Vec<&str> = match trimmed.strip_prefix('/') {
            Some(rest) => rest.split('/').collect(),
            None => return Self::not_found(path),
        };

        match segments.as_slice() {
            ["video", name, "type", ext] if !name.is_empty() && !ext.is_empty() => Self::Video {
                name: decode_segment(name),
                ext: decode_segment(ext),
            },
            _ => Self::not_found(path),
        }
    }

    /// Renders the route back into its canonical path.
    ///
    /// # Examples
    ///
    /// ```
    /// use bingeshelf::Route;
    ///
    /// let route = Route::Video { name: "my film.mkv".into(), ext: "mkv".into() };
    /// assert_eq!(route.path(), "/video/my%20film.mkv/type/mkv");
    /// assert_eq!(Route::resolve(&route.path()), route);
    /// ```
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Video { name, ext } => format!(
                "/video/{}/type/{}",
                urlencoding::encode(name),
                urlencoding::encode(ext)
            ),
            Self::NotFound { path } => path.clone(),
        }
    }

    fn not_found(path: &str) -> Self {
        Self::NotFound {
            path: path.to_string(),
        }
    }
}

/// Number of routes [`Router`] remembers for going back.
pub const MAX_HISTORY: usize = 50;

/// Percent-decodes a path segment, keeping it raw if it is not UTF-8.
fn decode_segment(segment: &str) -> String {
    urlencoding::decode(segment).map_or_else(|_| segment.to_string(), |s| s.into_owned())
}

/// Current route plus the routes visited before it.
#[derive(Debug, Clone)]
pub struct Router {
    current: Route,
    history: Vec<Route>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Creates a router positioned on [`Route::Home`] with no history.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: Route::Home,
            history: Vec::new(),
        }
    }

    /// The route currently displayed.
    #[must_use]
    pub const fn current(&self) -> &Route {
        &self.current
    }

    /// Resolves `path`, makes it current and returns it.
    ///
    /// The previous route is pushed onto the history unless it equals the
    /// new one. Beyond [`MAX_HISTORY`] entries the oldest is dropped.
    pub fn navigate(&mut self, path: &str) -> &Route {
        let route = Route::resolve(path);
        tracing::debug!(path = %path, route = ?route, "navigating");
        if route != self.current {
            let previous = std::mem::replace(&mut self.current, route);
            if self.history.len() == MAX_HISTORY {
                self.history.remove(0);
            }
            self.history.push(previous);
        }
        &self.current
    }

    /// Resolves `path` and makes it current without recording history.
    pub fn replace(&mut self, path: &str) -> &Route {
        self.current = Route::resolve(path);
        tracing::debug!(path = %path, route = ?self.current, "replacing route");
        &self.current
    }

    /// Returns to the previous route, if there is one.
    pub fn back(&mut self) -> Option<&Route> {
        let previous = self.history.pop()?;
        self.current = previous;
        Some(&self.current)
    }

    /// Whether [`Router::back`] would change the route.
    #[must_use]
    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }
}
