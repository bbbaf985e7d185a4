//! Platform directory helpers for config, preferences and the debug log.

use std::ffi::OsString;
use std::path::PathBuf;

/// Directory name used under the platform data and config roots.
pub const APP_DIR: &str = "firstrun";

/// Debug log file, in the OS temp directory.
#[must_use]
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join("firstrun.log")
}

#[cfg(windows)]
fn home_from(env: &mut impl FnMut(&'static str) -> Option<OsString>) -> Option<PathBuf> {
    env("USERPROFILE").or_else(|| env("HOME")).map(PathBuf::from)
}

#[cfg(not(windows))]
fn home_from(env: &mut impl FnMut(&'static str) -> Option<OsString>) -> Option<PathBuf> {
    env("HOME").map(PathBuf::from)
}

#[cfg(windows)]
fn data_root_from(env: &mut impl FnMut(&'static str) -> Option<OsString>) -> Option<PathBuf> {
    env("LOCALAPPDATA").or_else(|| env("APPDATA")).map(PathBuf::from)
}

#[cfg(not(windows))]
fn data_root_from(env: &mut impl FnMut(&'static str) -> Option<OsString>) -> Option<PathBuf> {
    env("XDG_DATA_HOME").map(PathBuf::from).or_else(|| {
        home_from(env).map(|home| {
            if cfg!(target_os = "macos") {
                home.join("Library").join("Application Support")
            } else {
                home.join(".local").join("share")
            }
        })
    })
}

#[cfg(windows)]
fn config_root_from(env: &mut impl FnMut(&'static str) -> Option<OsString>) -> Option<PathBuf> {
    env("APPDATA").map(PathBuf::from)
}

#[cfg(not(windows))]
fn config_root_from(env: &mut impl FnMut(&'static str) -> Option<OsString>) -> Option<PathBuf> {
    env("XDG_CONFIG_HOME").map(PathBuf::from).or_else(|| {
        home_from(env).map(|home| {
            if cfg!(target_os = "macos") {
                home.join("Library").join("Application Support")
            } else {
                home.join(".config")
            }
        })
    })
}

/// Directory holding persisted preferences, e.g. `~/.local/share/firstrun`.
///
/// Falls back to the working directory when no platform root can be found.
#[must_use]
pub fn data_dir() -> PathBuf {
    let mut env = |key: &'static str| std::env::var_os(key);
    data_root_from(&mut env)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Directory holding the config file, e.g. `~/.config/firstrun`.
#[must_use]
pub fn config_dir() -> PathBuf {
    let mut env = |key: &'static str| std::env::var_os(key);
    config_root_from(&mut env)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}
