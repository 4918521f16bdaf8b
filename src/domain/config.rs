//! Application configuration.
//!
//! Everything is optional: an empty config resolves the standard store
//! locations under the user's home directory and registers all backends.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{AppError, BackendKind, Result};

/// GTK bookmarks, relative to home.
pub const GTK_BOOKMARKS_PATH: &str = ".config/gtk-3.0/bookmarks";
/// KDE user places, relative to home.
pub const KDE_PLACES_PATH: &str = ".local/share/user-places.xbel";
/// Qt file dialog settings, relative to home.
pub const QT_CONFIG_PATH: &str = ".config/QtProject.conf";

/// Sync configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Registered backends, in fan-out order.
    #[serde(default = "default_backends")]
    pub backends: Vec<BackendKind>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            backends: default_backends(),
        }
    }
}

fn default_backends() -> Vec<BackendKind> {
    BackendKind::ALL.to_vec()
}

/// Path overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathConfig {
    /// Home directory the default store paths are resolved against.
    #[serde(default)]
    pub home: Option<PathBuf>,
    /// GTK bookmarks file.
    #[serde(default)]
    pub gtk_bookmarks: Option<PathBuf>,
    /// KDE `user-places.xbel`.
    #[serde(default)]
    pub kde_places: Option<PathBuf>,
    /// `QtProject.conf`.
    #[serde(default)]
    pub qt_config: Option<PathBuf>,
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Sync configuration.
    #[serde(default)]
    pub sync: SyncConfig,

    /// Path configuration.
    #[serde(default)]
    pub paths: PathConfig,
}

impl AppConfig {
    /// Configuration rooted at a specific home directory.
    #[must_use]
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self {
            paths: PathConfig {
                home: Some(home.into()),
                ..PathConfig::default()
            },
            ..Self::default()
        }
    }

    /// Resolve the home directory.
    ///
    /// # Errors
    /// Returns error if no home is configured and none can be determined.
    pub fn home_dir(&self) -> Result<PathBuf> {
        self.paths
            .home
            .clone()
            .or_else(dirs::home_dir)
            .ok_or_else(|| AppError::Config {
                message: "Could not determine home directory".into(),
            })
    }

    /// Resolve the store path of a backend.
    ///
    /// # Errors
    /// Returns error if the path depends on an unresolvable home directory.
    pub fn store_path(&self, kind: BackendKind) -> Result<PathBuf> {
        let (configured, relative) = match kind {
            BackendKind::Gtk => (&self.paths.gtk_bookmarks, GTK_BOOKMARKS_PATH),
            BackendKind::Kde => (&self.paths.kde_places, KDE_PLACES_PATH),
            BackendKind::Qt => (&self.paths.qt_config, QT_CONFIG_PATH),
        };

        match configured {
            Some(path) => Ok(path.clone()),
            None => Ok(self.home_dir()?.join(Path::new(relative))),
        }
    }

    /// Default location of the configuration file.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("bookmarksync")
            .join("config.toml")
    }
}
