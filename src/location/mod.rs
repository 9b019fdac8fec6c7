//! Device location providers.
//!
//! Location is resolved exactly once per request on the worker thread and
//! posted back to the plugin as a single viewport-seed event.
//!
//! # Modules
//!
//! - `provider`: [`LocationProvider`] trait, [`FixedLocation`], [`LocationSource`]
//! - `file`: [`FileLocation`] reading a JSON fix from disk

pub mod file;
pub mod provider;

pub use file::FileLocation;
pub use provider::{locate, resolve, FixedLocation, LocationProvider, LocationSource, Permission};
