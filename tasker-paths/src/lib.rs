//! Where tasker keeps its files.
//!
//! Config and data follow the XDG base directory layout on every platform,
//! so `tasker` finds the same files on macOS and Linux.

use std::path::{Path, PathBuf};

const APP_DIR: &str = "tasker";

/// `$XDG_CONFIG_HOME/tasker`, falling back to `~/.config/tasker`
pub fn config_dir() -> PathBuf {
    xdg_dir("XDG_CONFIG_HOME", Path::new(".config"))
}

/// `$XDG_DATA_HOME/tasker`, falling back to `~/.local/share/tasker`
pub fn data_dir() -> PathBuf {
    xdg_dir("XDG_DATA_HOME", Path::new(".local/share"))
}

/// Agent snapshots, one JSON file per agent
pub fn snapshots_dir() -> PathBuf {
    data_dir().join("agents")
}

fn xdg_dir(var: &str, home_relative: &Path) -> PathBuf {
    let base = match std::env::var_os(var) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => dirs::home_dir()
            .map(|home| home.join(home_relative))
            .unwrap_or_else(|| home_relative.to_path_buf()),
    };
    base.join(APP_DIR)
}
