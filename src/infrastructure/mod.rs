//! Infrastructure layer - store adapters and filesystem access.
//!
//! This layer handles all I/O operations.

pub mod config;
pub mod gtk;
pub mod kde;
pub mod qt;
pub mod registry;
pub mod store;
pub mod xbel;

pub use config::{ensure_config_exists, load_config};
pub use gtk::GtkBackend;
pub use kde::KdeBackend;
pub use qt::QtBackend;
pub use registry::build_backends;
