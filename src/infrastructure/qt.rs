//! Qt file dialog backend.
//!
//! Qt keeps its sidebar in `~/.config/QtProject.conf` as a single
//! `[FileDialog] shortcuts` key: plain local paths joined by `", "`, with no
//! labels and no remote locations. Every other section and key in the file
//! belongs to Qt and is left as found.
//!
//! Qt writes its own value syntax (`@ByteArray(\0\xff...)`, quoted name
//! filters), so values are read and written verbatim: no quote stripping
//! and no backslash escapes in either direction.

use std::path::{Path, PathBuf};

use ini::{EscapePolicy, Ini, ParseOption, WriteOption};

use crate::domain::{AppError, BookmarkBackend, Place, Result, FILE_SCHEME};

use super::store;

const SECTION: &str = "FileDialog";
const SHORTCUTS_KEY: &str = "shortcuts";
const SEPARATOR: &str = ", ";

/// Backend for Qt file dialog shortcuts.
#[derive(Debug, Clone)]
pub struct QtBackend {
    path: PathBuf,
}

impl QtBackend {
    /// Create a backend for the settings file at `path`.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn load(&self) -> Result<Option<Ini>> {
        store::read_optional(&self.path)?
            .map(|content| {
                Ini::load_from_str_opt(&content, verbatim_parse()).map_err(AppError::ini)
            })
            .transpose()
    }
}

impl BookmarkBackend for QtBackend {
    fn name(&self) -> &'static str {
        "qt"
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn read_places(&self) -> Result<Vec<Place>> {
        let Some(ini) = self.load()? else {
            return Ok(Vec::new());
        };

        let shortcuts = ini
            .section(Some(SECTION))
            .and_then(|s| s.get(SHORTCUTS_KEY))
            .unwrap_or_default();

        Ok(shortcuts
            .split(SEPARATOR)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|path| Place::new(basename(path), format!("{FILE_SCHEME}{path}")))
            .collect())
    }

    fn replace(&self, places: &[Place]) -> Result<()> {
        let mut ini = self.load()?.unwrap_or_default();

        let shortcuts: Vec<String> = places
            .iter()
            .filter(|place| place.is_local())
            .map(|place| {
                let path = &place.target[FILE_SCHEME.len()..];
                urlencoding::decode(path).map_or_else(|_| path.to_string(), |s| s.into_owned())
            })
            .collect();

        let dropped = places.len() - shortcuts.len();
        if dropped > 0 {
            tracing::debug!(dropped, "Skipping non-local places unsupported by Qt");
        }

        let joined = shortcuts.join(SEPARATOR);
        // Overwrite in place so the key keeps its position in the section.
        let existing = ini
            .section_mut(Some(SECTION))
            .and_then(|props| props.iter_mut().find(|(key, _)| *key == SHORTCUTS_KEY));
        match existing {
            Some((_, value)) => *value = joined,
            None => {
                ini.with_section(Some(SECTION)).set(SHORTCUTS_KEY, joined);
            }
        }

        let mut out = Vec::new();
        ini.write_to_opt(&mut out, verbatim_write())
            .map_err(|e| AppError::io("Failed to serialize Qt settings", e))?;

        store::write_atomic(&self.path, &out)
    }
}

fn verbatim_parse() -> ParseOption {
    ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    }
}

fn verbatim_write() -> WriteOption {
    WriteOption {
        escape_policy: EscapePolicy::Nothing,
        ..WriteOption::default()
    }
}

/// Final path component, as-is.
fn basename(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map_or_else(|| path.to_string(), |name| name.to_string_lossy().into_owned())
}
