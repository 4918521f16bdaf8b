//! Domain layer - core types and the backend contract.
//!
//! This layer contains pure domain models and error types
//! without any I/O.

pub mod backend;
pub mod config;
pub mod error;
pub mod models;

pub use backend::BookmarkBackend;
pub use config::AppConfig;
pub use error::{AppError, Result};
pub use models::{
    BackendKind, DestinationReport, Place, SyncReport, WriteOutcome, FILE_SCHEME,
};
