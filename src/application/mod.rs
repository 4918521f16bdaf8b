//! Application layer - use cases and orchestration.
//!
//! This layer contains the sync orchestrator and the formatting of its
//! results for the terminal.

pub mod formatter;
pub mod sync_service;

pub use formatter::{
    format_backend_paths, format_places_json, format_places_plain, format_places_table,
    format_sync_report, OutputFormat,
};
pub use sync_service::SyncService;
