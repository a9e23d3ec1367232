//! Sandbox path handling.
//!
//! `/host` is the cwd of the last focused terminal, or the directory Zellij was
//! started from. From a home-directory terminal the data directory therefore
//! resolves to `~/.local/share/zellij/zodo`.

use std::path::PathBuf;

/// File name of the task store inside the data directory.
pub const DATA_FILE_NAME: &str = "todos.json";

/// Returns the Zodo data directory, `/host/.local/share/zellij/zodo`.
///
/// # Examples
///
/// ```
/// use zodo::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/zodo"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("zodo")
}

/// Returns the default task store path.
#[must_use]
pub fn default_data_file() -> PathBuf {
    get_data_dir().join(DATA_FILE_NAME)
}

/// Maps `~` onto the sandbox's `/host` mount.
///
/// # Examples
///
/// ```
/// use zodo::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/notes/todos.json"), "/host/notes/todos.json");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/tmp/todos.json"), "/tmp/todos.json");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => "/host".to_string(),
        Some(rest) if rest.starts_with('/') => format!("/host{rest}"),
        _ => path.to_string(),
    }
}
