//! Fan-out synchronization between bookmark stores.
//!
//! One backend is read, and its places are written to every other registered
//! backend. A failing destination is reported and skipped; only a failing
//! source read aborts the sync.

use crate::domain::{
    AppConfig, AppError, BackendKind, BookmarkBackend, DestinationReport, Place, Result,
    SyncReport, WriteOutcome,
};
use crate::infrastructure::build_backends;

/// Service owning the backend registry for one run.
pub struct SyncService {
    backends: Vec<Box<dyn BookmarkBackend>>,
}

impl SyncService {
    /// Create a service from the configured backends.
    ///
    /// # Errors
    /// Returns error if a store path cannot be resolved.
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self::with_backends(build_backends(config)?))
    }

    /// Create with an explicit registry. Iteration follows the given order.
    #[must_use]
    pub fn with_backends(backends: Vec<Box<dyn BookmarkBackend>>) -> Self {
        Self { backends }
    }

    /// Registered backends, in fan-out order.
    pub fn backends(&self) -> impl Iterator<Item = &dyn BookmarkBackend> {
        self.backends.iter().map(AsRef::as_ref)
    }

    /// Look up a backend by name (case-insensitive).
    ///
    /// # Errors
    /// Returns error if no registered backend has that name.
    pub fn backend(&self, name: &str) -> Result<&dyn BookmarkBackend> {
        let kind: BackendKind = name.parse()?;
        self.backends()
            .find(|b| b.name() == kind.name())
            .ok_or_else(|| AppError::UnknownBackend {
                name: name.to_string(),
            })
    }

    /// Read the places of one backend.
    ///
    /// # Errors
    /// Returns error if the backend is unknown or its store cannot be read.
    pub fn places(&self, name: &str) -> Result<Vec<Place>> {
        self.backend(name)?.read_places()
    }

    /// Propagate the places of `name` to every other backend.
    ///
    /// # Errors
    /// Returns error if the backend is unknown or its store cannot be read.
    /// Destination failures are recorded in the report instead.
    pub fn sync_from(&self, name: &str) -> Result<SyncReport> {
        let source = self.backend(name)?;
        let source_name = source.name();

        tracing::info!(source = source_name, "Starting sync");

        let places = source.read_places().map_err(|e| {
            tracing::error!(source = source_name, error = %e, "Failed to read source places");
            e
        })?;

        tracing::info!(source = source_name, count = places.len(), "Read places");

        let destinations: Vec<DestinationReport> = self
            .backends()
            .filter(|b| b.name() != source_name)
            .map(|dest| {
                let outcome = match dest.replace(&places) {
                    Ok(()) => {
                        tracing::info!(destination = dest.name(), count = places.len(), "Synced");
                        WriteOutcome::Written(places.len())
                    }
                    Err(e) => {
                        tracing::warn!(destination = dest.name(), error = %e, "Failed to sync");
                        WriteOutcome::Failed(e.to_string())
                    }
                };
                DestinationReport {
                    backend: dest.name(),
                    outcome,
                }
            })
            .collect();

        let report = SyncReport {
            source: source_name,
            place_count: places.len(),
            destinations,
        };

        tracing::info!(
            source = source_name,
            destinations = report.destinations.len(),
            failures = report.failure_count(),
            "Sync completed"
        );

        Ok(report)
    }
}
