//! Configuration file management.
//!
//! Handles loading the optional TOML configuration file and writing a
//! commented default.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{AppConfig, AppError, Result};

/// Default configuration file content.
const DEFAULT_CONFIG: &str = r#"# bookmarksync configuration
# Auto-generated - edit as needed

[sync]
# Backends taking part in a sync, in the order they are written to.
backends = ["gtk", "kde", "qt"]

[paths]
# Home directory the standard store locations are resolved against
# (defaults to the current user's home).
# home = "/home/user"

# Per-store overrides.
# gtk_bookmarks = "/home/user/.config/gtk-3.0/bookmarks"
# kde_places = "/home/user/.local/share/user-places.xbel"
# qt_config = "/home/user/.config/QtProject.conf"
"#;

/// Load configuration from `path`, or from the default location.
///
/// A missing file yields the default configuration.
///
/// # Errors
/// Returns error if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let config_path = path.map_or_else(AppConfig::default_config_path, Path::to_path_buf);

    if config_path.exists() {
        load_config_from_file(&config_path)
    } else {
        if path.is_some() {
            tracing::warn!(path = %config_path.display(), "Config file not found, using defaults");
        }
        Ok(AppConfig::default())
    }
}

/// Load configuration from a specific file.
///
/// # Errors
/// Returns error if file cannot be read or parsed.
pub fn load_config_from_file(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::io(format!("Failed to read config file: {}", path.display()), e))?;

    let config = toml::from_str(&content).map_err(|e| AppError::Config {
        message: format!("Failed to parse config file: {e}"),
    })?;

    tracing::debug!(path = %path.display(), "Configuration loaded");

    Ok(config)
}

/// Create the default configuration file if it doesn't exist.
///
/// Returns the path and whether a file was written.
///
/// # Errors
/// Returns error if file cannot be created.
pub fn ensure_config_exists(path: Option<&Path>) -> Result<(PathBuf, bool)> {
    let config_path = path.map_or_else(AppConfig::default_config_path, Path::to_path_buf);

    if config_path.exists() {
        return Ok((config_path, false));
    }

    // Ensure parent directory exists
    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| AppError::io("Failed to create config directory", e))?;
    }

    fs::write(&config_path, DEFAULT_CONFIG)
        .map_err(|e| AppError::io("Failed to create default config", e))?;

    tracing::info!(path = %config_path.display(), "Created default configuration");

    Ok((config_path, true))
}
