//! The contract every bookmark store adapter fulfils.

use std::path::Path;

use super::{Place, Result};

/// A bookmark store that can be read into, and replaced from, a list of places.
///
/// Implementations hold no state across calls: each call loads the store,
/// works on it in memory and writes it back as a whole.
pub trait BookmarkBackend {
    /// Stable lowercase identifier (`gtk`, `kde`, `qt`).
    fn name(&self) -> &'static str;

    /// Location of the backing file.
    fn path(&self) -> &Path;

    /// Read the user-owned places in on-disk order.
    ///
    /// # Errors
    /// Returns error if the store exists but cannot be read or parsed.
    /// A missing store yields an empty list.
    fn read_places(&self) -> Result<Vec<Place>>;

    /// Replace the user-owned places with `places`, keeping anything the
    /// store owns but this tool does not model.
    ///
    /// # Errors
    /// Returns error if the store cannot be written.
    fn replace(&self, places: &[Place]) -> Result<()>;
}
