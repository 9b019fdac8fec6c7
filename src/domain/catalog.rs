//! Ordered, identity-checked truck collection.

use super::error::{Result, TruckmapError};
use super::truck::{TruckId, TruckRecord};
use std::collections::HashSet;

/// Immutable-per-load ordered sequence of trucks.
///
/// Construction through [`Catalog::new`] enforces the catalog invariants:
/// unique ids, valid coordinates and ratings within `0..=5`. The order of the
/// input is preserved and is the order every derived view keeps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    trucks: Vec<TruckRecord>,
}

impl Catalog {
    /// Validates and wraps a list of trucks.
    ///
    /// # Errors
    ///
    /// Returns [`TruckmapError::Catalog`] on a duplicate id, an invalid
    /// coordinate or an out-of-range rating.
    pub fn new(trucks: Vec<TruckRecord>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(trucks.len());
        for truck in &trucks {
            if !seen.insert(truck.id) {
                return Err(TruckmapError::Catalog(format!("duplicate truck id {}", truck.id)));
            }
            if !truck.coordinate.is_valid() {
                return Err(TruckmapError::Catalog(format!(
                    "truck {} has an invalid coordinate",
                    truck.id
                )));
            }
            if !(0.0..=5.0).contains(&truck.rating) {
                return Err(TruckmapError::Catalog(format!(
                    "truck {} rating {} is outside 0..=5",
                    truck.id, truck.rating
                )));
            }
        }
        Ok(Self { trucks })
    }

    #[must_use]
    pub fn trucks(&self) -> &[TruckRecord] {
        &self.trucks
    }

    #[must_use]
    pub fn get(&self, id: TruckId) -> Option<&TruckRecord> {
        self.trucks.iter().find(|t| t.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: TruckId) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.trucks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trucks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinate, Cuisine};

    fn truck(id: i64, rating: f64, latitude: f64) -> TruckRecord {
        TruckRecord {
            id: TruckId(id),
            name: format!("truck-{id}"),
            description: None,
            cuisine: Cuisine::Tacos,
            rating,
            popularity: 0,
            coordinate: Coordinate::new(latitude, -122.0),
            logo: None,
        }
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = Catalog::new(vec![truck(1, 4.0, 37.0), truck(1, 3.0, 37.1)]).unwrap_err();
        assert!(err.to_string().contains("duplicate truck id 1"));
    }

    #[test]
    fn rejects_bad_rating_and_coordinate() {
        assert!(Catalog::new(vec![truck(1, 5.5, 37.0)]).is_err());
        assert!(Catalog::new(vec![truck(1, 4.0, f64::NAN)]).is_err());
    }

    #[test]
    fn lookup_by_identity() {
        let catalog = Catalog::new(vec![truck(7, 4.0, 37.0), truck(3, 1.0, 37.2)]).unwrap();
        assert_eq!(catalog.get(TruckId(3)).map(|t| t.rating), Some(1.0));
        assert!(!catalog.contains(TruckId(-1)));
        assert_eq!(catalog.len(), 2);
    }
}
