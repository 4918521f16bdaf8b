//! Construction of the backend set from configuration.

use crate::domain::{AppConfig, BackendKind, BookmarkBackend, Result};

use super::{GtkBackend, KdeBackend, QtBackend};

/// Build the adapter for one backend kind.
///
/// # Errors
/// Returns error if the store path cannot be resolved.
pub fn build_backend(config: &AppConfig, kind: BackendKind) -> Result<Box<dyn BookmarkBackend>> {
    let path = config.store_path(kind)?;
    tracing::debug!(backend = %kind, path = %path.display(), "Registering backend");

    Ok(match kind {
        BackendKind::Gtk => Box::new(GtkBackend::new(path)),
        BackendKind::Kde => Box::new(KdeBackend::new(path)),
        BackendKind::Qt => Box::new(QtBackend::new(path)),
    })
}

/// Build every configured backend, in configured order.
///
/// Duplicate entries are registered once.
///
/// # Errors
/// Returns error if any store path cannot be resolved.
pub fn build_backends(config: &AppConfig) -> Result<Vec<Box<dyn BookmarkBackend>>> {
    let mut seen = Vec::new();
    let mut backends = Vec::new();

    for &kind in &config.sync.backends {
        if seen.contains(&kind) {
            continue;
        }
        seen.push(kind);
        backends.push(build_backend(config, kind)?);
    }

    Ok(backends)
}
