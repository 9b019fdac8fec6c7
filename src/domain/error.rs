//! Error types for the Truckmap plugin.
//!
//! This module defines the centralized error type [`TruckmapError`] and a type alias
//! [`Result`] for convenient error handling throughout the plugin. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! Nothing in the selection/filter core is fallible. Errors only arise at the
//! edges: reading a catalog file, a location fix or a theme file. Callers log
//! them and fall back to the built-in catalog and the default viewport.

use thiserror::Error;

/// The main error type for Truckmap plugin operations.
///
/// # Examples
///
/// ```
/// use truckmap::domain::TruckmapError;
///
/// fn load() -> Result<(), TruckmapError> {
///     Err(TruckmapError::Catalog("duplicate truck id 3".to_string()))
/// }
///
/// assert!(load().unwrap_err().to_string().contains("duplicate"));
/// ```
#[derive(Debug, Error)]
pub enum TruckmapError {
    /// A catalog file could not be parsed or violates a catalog invariant.
    ///
    /// Raised for malformed JSON, duplicate ids, non-finite coordinates and
    /// ratings outside `0..=5`.
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// A device location fix could not be read or parsed.
    #[error("Location error: {0}")]
    Location(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Automatically converts from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),
}

/// A specialized `Result` type for Truckmap operations.
pub type Result<T> = std::result::Result<T, TruckmapError>;
