//! JSON file catalog source.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "trucks": [
//!     {
//!       "id": 1,
//!       "name": "Taco Town",
//!       "cuisine": "Tacos",
//!       "rating": 4.5,
//!       "views": 120,
//!       "latitude": 37.78825,
//!       "longitude": -122.4324,
//!       "description": "Street tacos",
//!       "logo": "T"
//!     }
//!   ]
//! }
//! ```
//!
//! A bare top-level array of trucks is accepted as well.

use super::source::CatalogSource;
use crate::domain::error::{Result, TruckmapError};
use crate::domain::{Catalog, TruckRecord};
use serde::Deserialize;
use std::path::PathBuf;

/// Highest catalog file version this build understands.
const SUPPORTED_VERSION: u32 = 1;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Versioned {
        version: u32,
        trucks: Vec<TruckRecord>,
    },
    Bare(Vec<TruckRecord>),
}

/// Reads the catalog from a JSON file on every [`CatalogSource::load`].
#[derive(Debug, Clone)]
pub struct JsonCatalogSource {
    file_path: PathBuf,
}

impl JsonCatalogSource {
    #[must_use]
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    /// Parses catalog JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`TruckmapError::Catalog`] for malformed JSON, an unsupported
    /// version, or a violated catalog invariant.
    pub fn parse(contents: &str) -> Result<Catalog> {
        let file: CatalogFile = serde_json::from_str(contents)
            .map_err(|e| TruckmapError::Catalog(format!("failed to parse JSON: {e}")))?;

        let trucks = match file {
            CatalogFile::Versioned { version, trucks } => {
                if version > SUPPORTED_VERSION {
                    return Err(TruckmapError::Catalog(format!(
                        "unsupported catalog version {version}"
                    )));
                }
                trucks
            }
            CatalogFile::Bare(trucks) => trucks,
        };

        tracing::debug!(truck_count = trucks.len(), "parsed catalog file");
        Catalog::new(trucks)
    }
}

impl CatalogSource for JsonCatalogSource {
    fn load(&self) -> Result<Catalog> {
        let _span = tracing::debug_span!("json_catalog_load", path = ?self.file_path).entered();

        let contents = std::fs::read_to_string(&self.file_path)?;
        let catalog = Self::parse(&contents)?;

        tracing::debug!(truck_count = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    fn describe(&self) -> String {
        format!("catalog file {}", self.file_path.display())
    }
}
