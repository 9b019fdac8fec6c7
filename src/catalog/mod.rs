//! Catalog sources feeding the truck list.
//!
//! The catalog is supplied once at mount and is read-only to the rest of the
//! plugin. It either comes from a JSON file (loaded on the worker thread) or
//! from the trucks compiled into the plugin.
//!
//! # Modules
//!
//! - `source`: [`CatalogSource`] trait
//! - `json`: JSON file implementation
//! - `builtin`: default trucks

pub mod builtin;
pub mod json;
pub mod source;

pub use builtin::{builtin_catalog, builtin_trucks};
pub use json::JsonCatalogSource;
pub use source::CatalogSource;
