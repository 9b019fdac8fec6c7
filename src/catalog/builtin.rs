//! Catalog compiled into the plugin, used when no catalog file is configured
//! or the configured one cannot be loaded.

use crate::domain::{Catalog, Coordinate, Cuisine, TruckId, TruckRecord};

/// The three default trucks around Union Square, San Francisco.
#[must_use]
pub fn builtin_trucks() -> Vec<TruckRecord> {
    vec![
        TruckRecord {
            id: TruckId(1),
            name: "Taco Town".to_string(),
            description: Some("Street tacos with handmade tortillas and three salsas.".to_string()),
            cuisine: Cuisine::Tacos,
            rating: 4.5,
            popularity: 120,
            coordinate: Coordinate::new(37.78825, -122.4324),
            logo: None,
        },
        TruckRecord {
            id: TruckId(2),
            name: "Burger Boss".to_string(),
            description: Some("Smash burgers, crinkle fries and thick shakes.".to_string()),
            cuisine: Cuisine::Burgers,
            rating: 4.2,
            popularity: 95,
            coordinate: Coordinate::new(37.78855, -122.4312),
            logo: None,
        },
        TruckRecord {
            id: TruckId(3),
            name: "Vegan Vibes".to_string(),
            description: Some("Plant-based bowls and wraps, everything made to order.".to_string()),
            cuisine: Cuisine::Vegan,
            rating: 4.8,
            popularity: 110,
            coordinate: Coordinate::new(37.78725, -122.4334),
            logo: None,
        },
    ]
}

/// Returns the built-in catalog.
///
/// ```
/// let catalog = truckmap::catalog::builtin_catalog();
/// assert_eq!(catalog.len(), 3);
/// ```
#[must_use]
pub fn builtin_catalog() -> Catalog {
    // Built-in data satisfies the catalog invariants.
    Catalog::new(builtin_trucks()).unwrap_or_default()
}
