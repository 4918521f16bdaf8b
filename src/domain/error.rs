//! Domain-level error types for bookmarksync.
//!
//! All errors are typed with `thiserror` and carry enough context to be
//! reported directly to the user by the CLI shell.

use thiserror::Error;

/// Application-level errors.
#[derive(Error, Debug)]
pub enum AppError {
    /// Backend name not present in the registry.
    #[error("Unknown backend: {name} (expected one of: gtk, kde, qt)")]
    UnknownBackend { name: String },

    /// IO operation failed.
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Malformed XBEL document.
    #[error("XML error: {message}")]
    Xml { message: String },

    /// Malformed INI document.
    #[error("INI error: {message}")]
    Ini { message: String },

    /// Configuration or environment error.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// JSON serialization failed.
    #[error("JSON error: {message}")]
    JsonSerialize {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },
}

impl AppError {
    /// Create an IO error with context.
    pub fn io(message: impl Into<String>, err: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(err),
        }
    }

    /// Create an XML error from any reader/writer failure.
    pub fn xml(err: impl std::fmt::Display) -> Self {
        Self::Xml {
            message: err.to_string(),
        }
    }

    /// Create an INI error from any parser failure.
    pub fn ini(err: impl std::fmt::Display) -> Self {
        Self::Ini {
            message: err.to_string(),
        }
    }

    /// Create a JSON serialization error.
    pub fn json_serialize(err: serde_json::Error) -> Self {
        Self::JsonSerialize {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

/// Result type alias using `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
