//! GTK bookmarks backend.
//!
//! `~/.config/gtk-3.0/bookmarks` holds one `target [label]` per line and
//! nothing else, so replacing it is a plain overwrite.

use std::path::{Path, PathBuf};

use crate::domain::{BookmarkBackend, Place, Result};

use super::store;

/// Backend for the GTK plain-list bookmarks file.
#[derive(Debug, Clone)]
pub struct GtkBackend {
    path: PathBuf,
}

impl GtkBackend {
    /// Create a backend for the bookmarks file at `path`.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl BookmarkBackend for GtkBackend {
    fn name(&self) -> &'static str {
        "gtk"
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn read_places(&self) -> Result<Vec<Place>> {
        let Some(content) = store::read_optional(&self.path)? else {
            return Ok(Vec::new());
        };

        Ok(content.lines().filter_map(parse_line).collect())
    }

    fn replace(&self, places: &[Place]) -> Result<()> {
        let mut out = String::new();
        for place in places {
            out.push_str(&format_line(place));
            out.push('\n');
        }

        store::write_atomic(&self.path, out.as_bytes())
    }
}

/// Parse one bookmarks line. Blank lines yield `None`.
fn parse_line(line: &str) -> Option<Place> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (target, label) = match line.split_once(' ') {
        Some((target, label)) => (target, label.to_string()),
        None => (line, derive_label(line)),
    };

    Some(Place::new(label, target))
}

fn format_line(place: &Place) -> String {
    if place.label.is_empty() {
        place.target.clone()
    } else {
        format!("{} {}", place.target, place.label)
    }
}

/// Derive a label from the last path segment of a URI.
///
/// The path is percent-decoded, reduced to its base name, and the base name
/// is decoded once more with `+` read as a space. A URI with no path gets
/// `.` and a root path gets `/`.
fn derive_label(target: &str) -> String {
    let path = decode_or_raw(uri_path(target));
    let base = base_name(&path).replace('+', " ");

    decode_or_raw(&base)
}

fn decode_or_raw(s: &str) -> String {
    urlencoding::decode(s).map_or_else(|_| s.to_string(), |d| d.into_owned())
}

/// The path component of a URI, without query or fragment.
///
/// Opaque URIs (`mailto:x`) have no path.
fn uri_path(target: &str) -> &str {
    let target = target.split(['?', '#']).next().unwrap_or(target);

    if let Some((_, rest)) = target.split_once("://") {
        // Skip the authority
        return rest.find('/').map_or("", |i| &rest[i..]);
    }

    match target.split_once(':') {
        Some((scheme, path)) if is_scheme(scheme) => {
            if path.starts_with('/') {
                path
            } else {
                ""
            }
        }
        _ => target,
    }
}

fn is_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Last element of a slash-separated path, ignoring trailing slashes.
fn base_name(path: &str) -> &str {
    if path.is_empty() {
        return ".";
    }
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/";
    }
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}
