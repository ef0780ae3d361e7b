//! Path helpers for the app's data directory.

use std::path::PathBuf;

const DATA_SUBDIR: &str = ".local/share/slavgorod-bus";

/// Returns the default data directory, `~/.local/share/slavgorod-bus`.
///
/// Falls back to a relative `.slavgorod-bus` directory when `$HOME` is unset.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    std::env::var_os("HOME").map_or_else(
        || PathBuf::from(".slavgorod-bus"),
        |home| PathBuf::from(home).join(DATA_SUBDIR),
    )
}

/// Expands a leading `~` against `$HOME`.
///
/// Paths without a leading tilde, and all paths when `$HOME` is unset, are
/// returned unchanged.
///
/// ```
/// use slavgorod_bus::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), std::path::PathBuf::from("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let Some(home) = std::env::var_os("HOME") else {
        return PathBuf::from(path);
    };

    if path == "~" {
        PathBuf::from(home)
    } else if let Some(rest) = path.strip_prefix("~/") {
        PathBuf::from(home).join(rest)
    } else {
        PathBuf::from(path)
    }
}
