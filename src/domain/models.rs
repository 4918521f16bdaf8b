//! Domain models for synchronized places.
//!
//! A [`Place`] is the format-independent bookmark every backend translates
//! to and from.

use serde::{Deserialize, Serialize};

/// URI scheme prefix for local filesystem targets.
pub const FILE_SCHEME: &str = "file://";

/// A bookmarked location shown in file-picker sidebars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    /// Display name; may be empty.
    #[serde(default)]
    pub label: String,
    /// Target URI, e.g. `file:///home/user/Documents` or `sftp://host/path`.
    pub target: String,
}

impl Place {
    /// Create a place from a label and target URI.
    pub fn new(label: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: target.into(),
        }
    }

    /// Whether the target points at the local filesystem.
    #[must_use]
    pub fn is_local(&self) -> bool {
        self.target.starts_with(FILE_SCHEME)
    }
}

/// The supported bookmark stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// GTK plain-list bookmarks.
    Gtk,
    /// KDE XBEL user places.
    Kde,
    /// Qt file dialog shortcuts.
    Qt,
}

impl BackendKind {
    /// All backends in their canonical order.
    pub const ALL: [Self; 3] = [Self::Gtk, Self::Kde, Self::Qt];

    /// Stable lowercase identifier.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Gtk => "gtk",
            Self::Kde => "kde",
            Self::Qt => "qt",
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for BackendKind {
    type Err = crate::domain::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gtk" => Ok(Self::Gtk),
            "kde" => Ok(Self::Kde),
            "qt" => Ok(Self::Qt),
            _ => Err(crate::domain::AppError::UnknownBackend {
                name: s.to_string(),
            }),
        }
    }
}

/// Result of writing to one destination during a sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The destination was replaced with this many places.
    Written(usize),
    /// The write failed; the message is kept for reporting.
    Failed(String),
}

/// Per-destination entry of a [`SyncReport`].
#[derive(Debug, Clone)]
pub struct DestinationReport {
    /// Backend name.
    pub backend: &'static str,
    /// What happened.
    pub outcome: WriteOutcome,
}

/// Summary of one fan-out sync.
#[derive(Debug, Clone)]
pub struct SyncReport {
    /// Backend the places were read from.
    pub source: &'static str,
    /// Number of places read from the source.
    pub place_count: usize,
    /// Outcomes in registry order, source excluded.
    pub destinations: Vec<DestinationReport>,
}

impl SyncReport {
    /// Number of destinations that failed.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.destinations
            .iter()
            .filter(|d| matches!(d.outcome, WriteOutcome::Failed(_)))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_kind_parse_is_case_insensitive() {
        assert_eq!("GTK".parse::<BackendKind>().unwrap(), BackendKind::Gtk);
        assert_eq!("Kde".parse::<BackendKind>().unwrap(), BackendKind::Kde);
        assert_eq!("qt".parse::<BackendKind>().unwrap(), BackendKind::Qt);
        assert!("gnome".parse::<BackendKind>().is_err());
    }

    #[test]
    fn test_place_is_local() {
        assert!(Place::new("", "file:///a/b").is_local());
        assert!(!Place::new("x", "sftp://host/x").is_local());
    }
}
