use std::{env, path::PathBuf};

/// Resolve the session directory from `SEGUE_SESSION_DIR` or XDG defaults.
pub fn resolve_session_dir() -> Option<PathBuf> {
    if let Some(dir) = env::var_os("SEGUE_SESSION_DIR") {
        return Some(PathBuf::from(dir));
    }
    default_session_dir()
}

/// Compute the default session directory under `$XDG_DATA_HOME/segue/session`
/// or `~/.local/share/segue/session` when `XDG_DATA_HOME` is not set.
pub fn default_session_dir() -> Option<PathBuf> {
    let data_home = if let Some(xdg) = env::var_os("XDG_DATA_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".local").join("share"))
    } else {
        None
    };

    data_home.map(|d| d.join("segue").join("session"))
}
