//! Configuration file discovery.
//!
//! Finds the `.haudoi.toml` closest to a starting directory, falling back to
//! the global `~/.haudoi.toml` if present.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".haudoi.toml";

/// Discovers the configuration file that applies to `cwd`.
///
/// Walks up from `cwd` to the filesystem root and returns the first
/// `.haudoi.toml` found. Otherwise returns `~/.haudoi.toml` if it exists.
/// Returns `None` when neither is present.
pub fn discover_config_file(cwd: &Path) -> Option<PathBuf> {
    discover_with_global(cwd, global_config_path().as_deref())
}

/// Discovery with an explicit global path.
fn discover_with_global(cwd: &Path, global: Option<&Path>) -> Option<PathBuf> {
    cwd.ancestors()
        .map(|dir| dir.join(CONFIG_FILENAME))
        .find(|path| path.is_file())
        .or_else(|| global.filter(|path| path.is_file()).map(Path::to_path_buf))
}

/// Returns the path to the global configuration file (`~/.haudoi.toml`).
///
/// Returns `None` if the home directory cannot be determined.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// Checks if a path is the global configuration file.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|global| path == global)
}
