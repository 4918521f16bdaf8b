//! KDE user places backend.
//!
//! `~/.local/share/user-places.xbel` mixes entries created by the user with
//! system items (Home, Trash, Recent, ...) that Dolphin manages itself.
//! Replacing the store merges: system items stay, user entries are swapped.

use std::path::{Path, PathBuf};

use crate::domain::{BookmarkBackend, Place, Result};

use super::store;
use super::xbel::XbelDocument;

/// Backend for the KDE XBEL places file.
#[derive(Debug, Clone)]
pub struct KdeBackend {
    path: PathBuf,
}

impl KdeBackend {
    /// Create a backend for the XBEL file at `path`.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn load(&self) -> Result<Option<XbelDocument>> {
        store::read_optional(&self.path)?
            .map(|content| XbelDocument::parse(&content))
            .transpose()
    }

    /// Load the current document for merging.
    ///
    /// Any failure is logged and treated as an empty document, so a corrupt
    /// file loses its system items on the next write.
    fn load_for_merge(&self) -> XbelDocument {
        match self.load() {
            Ok(doc) => doc.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Could not read existing places; system items will not be preserved"
                );
                XbelDocument::default()
            }
        }
    }
}

impl BookmarkBackend for KdeBackend {
    fn name(&self) -> &'static str {
        "kde"
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn read_places(&self) -> Result<Vec<Place>> {
        Ok(self
            .load()?
            .map(|doc| doc.user_places())
            .unwrap_or_default())
    }

    fn replace(&self, places: &[Place]) -> Result<()> {
        let merged = self.load_for_merge().with_user_places(places);
        let xml = merged.to_xml()?;

        store::write_atomic(&self.path, xml.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const ONE_SYSTEM_ONE_USER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xbel>
  <bookmark href="trash:/">
    <title>Trash</title>
    <info>
      <metadata owner="http://www.kde.org">
        <isSystemItem>true</isSystemItem>
      </metadata>
    </info>
  </bookmark>
  <bookmark href="file:///home/user/Work">
    <title>Work</title>
    <info>
      <metadata owner="http://www.kde.org"/>
    </info>
  </bookmark>
</xbel>
"#;

    fn backend_with(dir: &Path, content: Option<&str>) -> KdeBackend {
        let backend = KdeBackend::new(dir.join(".local/share/user-places.xbel"));
        if let Some(content) = content {
            fs::create_dir_all(backend.path().parent().unwrap()).unwrap();
            fs::write(backend.path(), content).unwrap();
        }
        backend
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempdir().unwrap();
        assert!(backend_with(dir.path(), None).read_places().unwrap().is_empty());
    }

    #[test]
    fn test_read_excludes_system_items() {
        let dir = tempdir().unwrap();
        let backend = backend_with(dir.path(), Some(ONE_SYSTEM_ONE_USER));

        assert_eq!(
            backend.read_places().unwrap(),
            vec![Place::new("Work", "file:///home/user/Work")]
        );
    }

    #[test]
    fn test_replace_with_empty_keeps_only_system_item() {
        let dir = tempdir().unwrap();
        let backend = backend_with(dir.path(), Some(ONE_SYSTEM_ONE_USER));

        backend.replace(&[]).unwrap();

        let content = fs::read_to_string(backend.path()).unwrap();
        let doc = XbelDocument::parse(&content).unwrap();
        let bookmarks: Vec<_> = doc.bookmarks().collect();
        assert_eq!(bookmarks.len(), 1);
        assert_eq!(bookmarks[0].attribute("href"), Some("trash:/"));
        assert!(bookmarks[0].is_system_item());
        assert!(backend.read_places().unwrap().is_empty());
    }

    #[test]
    fn test_replace_creates_file_with_header() {
        let dir = tempdir().unwrap();
        let backend = backend_with(dir.path(), None);
        let places = vec![
            Place::new("Docs", "file:///home/user/Documents"),
            Place::new("Remote", "sftp://host/srv"),
        ];

        backend.replace(&places).unwrap();

        let content = fs::read_to_string(backend.path()).unwrap();
        assert!(content.starts_with(crate::infrastructure::xbel::XBEL_HEADER));
        assert_eq!(backend.read_places().unwrap(), places);
    }

    #[test]
    fn test_replace_keeps_label_spacing() {
        let dir = tempdir().unwrap();
        let backend = backend_with(dir.path(), Some(ONE_SYSTEM_ONE_USER));
        let places = vec![Place::new("  Spaced  ", "file:///home/user/Spaced")];

        backend.replace(&places).unwrap();

        assert_eq!(backend.read_places().unwrap(), places);
    }

    #[test]
    fn test_replace_over_corrupt_file_proceeds() {
        let dir = tempdir().unwrap();
        let backend = backend_with(dir.path(), Some("<xbel><bookmark"));

        assert!(backend.read_places().is_err());

        backend.replace(&[Place::new("Tmp", "file:///tmp")]).unwrap();
        assert_eq!(
            backend.read_places().unwrap(),
            vec![Place::new("Tmp", "file:///tmp")]
        );
    }
}
