//! Catalog source abstraction.
//!
//! The truck catalog is supplied from outside the core. A [`CatalogSource`]
//! hands over the complete ordered list once; the core never writes back.

use crate::domain::error::Result;
use crate::domain::Catalog;

/// Anything that can produce a validated truck catalog.
///
/// Implemented by [`crate::catalog::JsonCatalogSource`] for JSON files on the
/// host filesystem.
pub trait CatalogSource: Send {
    /// Loads the whole catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read or a catalog invariant
    /// is violated.
    fn load(&self) -> Result<Catalog>;

    /// Short human-readable description for logs.
    fn describe(&self) -> String;
}
