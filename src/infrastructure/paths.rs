//! Paths inside the Zellij plugin sandbox.
//!
//! Zellij mounts the host directory Zellij was started from (usually the
//! user's home) at `/host`, and plugins can only touch files below it.

use std::path::PathBuf;

const HOST_ROOT: &str = "/host";
const TRACE_FILE: &str = "bingeshelf-otlp.json";

/// Plugin data directory, `/host/.local/share/zellij/bingeshelf`.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT)
        .join(".local/share/zellij")
        .join("bingeshelf")
}

/// OTLP trace file inside the data directory.
#[must_use]
pub fn trace_file() -> PathBuf {
    get_data_dir().join(TRACE_FILE)
}

/// Maps `~` and `~/...` to the sandbox mount; other paths are unchanged.
///
/// ```
/// use bingeshelf::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dusk.toml"), "/host/themes/dusk.toml");
/// assert_eq!(expand_tilde("/etc/dusk.toml"), "/etc/dusk.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => HOST_ROOT.to_string(),
        Some(rest) if rest.starts_with('/') => format!("{HOST_ROOT}{rest}"),
        _ => path.to_string(),
    }
}
