//! Config file discovery
//!
//! Configuration is read from two places, later entries overriding
//! earlier ones:
//! 1. `<config_dir>/gh-release-train/config.toml` (e.g.
//!    `~/.config/gh-release-train/config.toml` on Linux)
//! 2. `.gh-release-train.toml` in the current working directory, or the
//!    path given on the command line

use std::path::{Path, PathBuf};

const APP_NAME: &str = "gh-release-train";
const CONFIG_FILE: &str = ".gh-release-train.toml";

/// Get the path to the global config file, if a config directory exists
/// on this platform
pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join(APP_NAME).join("config.toml"))
}

/// Get the path to the local config file (CWD dotfile unless overridden)
pub fn local_config_path(local_override: Option<&Path>) -> PathBuf {
    match local_override {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(CONFIG_FILE),
    }
}

/// All config file candidates in merge order (global first)
pub fn candidate_paths(local_override: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(2);
    if let Some(global) = global_config_path() {
        paths.push(global);
    }
    paths.push(local_config_path(local_override));
    paths
}
