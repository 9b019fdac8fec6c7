//! Domain layer for the Truckmap plugin.
//!
//! This module contains the core domain types and pure business rules,
//! independent of Zellij-specific APIs or infrastructure concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`truck`]: Truck records, identities, cuisines and coordinates
//! - [`catalog`]: Validated, ordered truck collection
//! - [`filter`]: Search/category filtering
//! - [`region`]: Map regions and grid projection

pub mod catalog;
pub mod error;
pub mod filter;
pub mod region;
pub mod truck;

pub use catalog::Catalog;
pub use error::{Result, TruckmapError};
pub use filter::{filter, match_range, FilterState};
pub use region::Region;
pub use truck::{Coordinate, Cuisine, TruckId, TruckRecord};
