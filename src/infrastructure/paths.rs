//! Path handling for the Zellij plugin sandbox.
//!
//! Inside the sandbox the host filesystem is reachable under `/host`, which
//! points at the directory Zellij was started from (usually the home
//! directory). Configured paths use `~` for that root.

use std::path::PathBuf;

const HOST_ROOT: &str = "/host";

/// Directory holding the trace file.
///
/// Resolves to `/host/.local/share/zellij/truckmap` in the sandbox.
///
/// ```
/// use truckmap::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/truckmap"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT).join(".local/share/zellij").join("truckmap")
}

/// Maps a `~`-prefixed path onto the sandbox host root.
///
/// ```
/// use truckmap::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/trucks.json"), "/host/trucks.json");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/data/trucks.json"), "/data/trucks.json");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => HOST_ROOT.to_string(),
        Some(rest) if rest.starts_with('/') => format!("{HOST_ROOT}{rest}"),
        _ => path.to_string(),
    }
}

/// Inverse of [`expand_tilde`] for display: shows sandbox paths as `~/...`.
///
/// ```
/// use truckmap::infrastructure::display_path;
///
/// assert_eq!(display_path("/host/trucks.json"), "~/trucks.json");
/// assert_eq!(display_path("~/trucks.json"), "~/trucks.json");
/// assert_eq!(display_path("/hostname/x"), "/hostname/x");
/// ```
#[must_use]
pub fn display_path(path: &str) -> String {
    let expanded = expand_tilde(path);
    match expanded.strip_prefix(HOST_ROOT) {
        Some("") => "~".to_string(),
        Some(rest) if rest.starts_with('/') => format!("~{rest}"),
        _ => expanded,
    }
}
