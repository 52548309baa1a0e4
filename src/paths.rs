//! Path utilities for tilde expansion and config file discovery.
//!
//! Use [`expand_tilde`] before any filesystem operation on user-provided paths.
//! Use [`collapse_tilde`] when displaying paths back to the user.

use std::path::{Path, PathBuf};

use crate::environ::BaseEnv;
use crate::platform::Fs;

/// Expand `~` or `~/...` at the start of a path to the user's home directory.
///
/// Returns the path unchanged if it doesn't start with `~` or if the home
/// directory cannot be determined.
pub fn expand_tilde(path: &str, fs: &impl Fs) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = fs.home_dir() {
            return home.join(rest);
        }
    } else if path == "~"
        && let Some(home) = fs.home_dir()
    {
        return home;
    }
    PathBuf::from(path)
}

/// Collapse the user's home directory prefix back to `~/...` for display.
///
/// Returns the full path string if the home directory cannot be determined
/// or the path is not under it.
pub fn collapse_tilde(path: &Path, fs: &impl Fs) -> String {
    if let Some(home) = fs.home_dir()
        && let Ok(rest) = path.strip_prefix(&home)
    {
        return format!("~/{}", rest.display());
    }
    path.display().to_string()
}

/// Candidate configuration files, lowest precedence first:
/// `$XDG_CONFIG_HOME/multistack` (or `~/.config/multistack`),
/// `~/.multistack`, then `.multistack` in the working directory.
///
/// Entries that need the home directory are skipped when it is unknown.
pub fn config_search_paths(fs: &impl Fs, env: &BaseEnv) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    let home = fs.home_dir();

    let xdg = env
        .get("XDG_CONFIG_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| home.as_ref().map(|h| h.join(".config")));
    if let Some(xdg) = xdg {
        paths.push(xdg.join("multistack"));
    }
    if let Some(home) = &home {
        paths.push(home.join(".multistack"));
    }
    if let Ok(cwd) = fs.current_dir() {
        let local = cwd.join(".multistack");
        if !paths.contains(&local) {
            paths.push(local);
        }
    }
    paths
}
