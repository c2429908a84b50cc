//! XDG Base Directory support for docmodal.

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "docmodal";

/// Get the configuration directory following XDG conventions.
///
/// Returns `$XDG_CONFIG_HOME/docmodal` or `~/.config/docmodal`.
pub fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|p| p.join(APP_NAME))
        .context("Failed to determine config directory")
}

/// Get the cache directory following XDG conventions.
///
/// Returns `$XDG_CACHE_HOME/docmodal` or `~/.cache/docmodal`.
/// Log files are written here.
pub fn get_cache_dir() -> Result<PathBuf> {
    dirs::cache_dir()
        .map(|p| p.join(APP_NAME))
        .context("Failed to determine cache directory")
}
