//! File helpers shared by the store adapters.
//!
//! Stores are read whole and written whole: a missing file reads as `None`,
//! and writes go through a temp file in the same directory that is renamed
//! over the target.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::domain::{AppError, Result};

/// Read a store file, treating absence as `None`.
///
/// Invalid UTF-8 is replaced rather than rejected.
///
/// # Errors
/// Returns error for any failure other than the file not existing.
pub fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(AppError::io(format!("Failed to read {}", path.display()), e)),
    }
}

/// Atomically replace `path` with `content`, creating parent directories.
///
/// Permissions of an existing file are kept.
///
/// # Errors
/// Returns error if the directory, temp file or rename fails. The target is
/// left untouched on failure.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    fs::create_dir_all(parent).map_err(|e| {
        AppError::io(format!("Failed to create directory {}", parent.display()), e)
    })?;

    let mut tmp = NamedTempFile::new_in(parent)
        .map_err(|e| AppError::io(format!("Failed to create temp file in {}", parent.display()), e))?;

    tmp.write_all(content)
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| AppError::io("Failed to write temp file", e))?;

    if let Ok(metadata) = fs::metadata(path) {
        tmp.as_file()
            .set_permissions(metadata.permissions())
            .map_err(|e| AppError::io("Failed to copy file permissions", e))?;
    }

    tmp.persist(path)
        .map_err(|e| AppError::io(format!("Failed to replace {}", path.display()), e.error))?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "Store written");

    Ok(())
}
