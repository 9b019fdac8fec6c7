//! Truck domain model.
//!
//! A [`TruckRecord`] is one point of interest shown both as a map marker and as
//! a card in the horizontal list. Records are immutable once a catalog is
//! loaded; identity is carried by [`TruckId`] and never by list position.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable identity of a truck for the lifetime of a screen session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TruckId(pub i64);

impl fmt::Display for TruckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Closed set of cuisine categories a truck can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cuisine {
    Tacos,
    Burgers,
    Vegan,
}

impl Cuisine {
    /// All categories in chip order.
    pub const ALL: [Self; 3] = [Self::Tacos, Self::Burgers, Self::Vegan];

    /// Display label, identical to the serialized name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Tacos => "Tacos",
            Self::Burgers => "Burgers",
            Self::Vegan => "Vegan",
        }
    }

    /// Fallback logo glyph for trucks that do not carry their own.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Tacos => "T",
            Self::Burgers => "B",
            Self::Vegan => "V",
        }
    }

    /// Returns the category following `current` in chip order, wrapping to
    /// "no category" after the last one.
    ///
    /// ```
    /// use truckmap::domain::Cuisine;
    ///
    /// assert_eq!(Cuisine::cycle(None), Some(Cuisine::Tacos));
    /// assert_eq!(Cuisine::cycle(Some(Cuisine::Vegan)), None);
    /// ```
    #[must_use]
    pub fn cycle(current: Option<Self>) -> Option<Self> {
        match current {
            None => Some(Self::ALL[0]),
            Some(cuisine) => {
                let idx = Self::ALL.iter().position(|c| *c == cuisine).unwrap_or(0);
                Self::ALL.get(idx + 1).copied()
            }
        }
    }
}

impl fmt::Display for Cuisine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Cuisine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown cuisine: {s}"))
    }
}

/// A geographic point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Both components are finite and inside the valid degree ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Parses a `"lat,lon"` pair as used in plugin configuration.
    ///
    /// ```
    /// use truckmap::domain::Coordinate;
    ///
    /// let c = Coordinate::parse("37.78825, -122.4324").unwrap();
    /// assert_eq!(c, Coordinate::new(37.78825, -122.4324));
    /// assert!(Coordinate::parse("north").is_none());
    /// ```
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let (lat, lon) = s.split_once(',')?;
        let coordinate = Self::new(lat.trim().parse().ok()?, lon.trim().parse().ok()?);
        coordinate.is_valid().then_some(coordinate)
    }
}

/// An immutable truck entry.
///
/// The serialized form flattens the coordinate and accepts `views` as an alias
/// for `popularity`, matching hand-written catalog files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TruckRecord {
    pub id: TruckId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub cuisine: Cuisine,
    pub rating: f64,
    #[serde(alias = "views", default)]
    pub popularity: u32,
    #[serde(flatten)]
    pub coordinate: Coordinate,
    #[serde(default)]
    pub logo: Option<String>,
}

impl TruckRecord {
    /// Logo glyph to draw on the marker and the card.
    #[must_use]
    pub fn logo_glyph(&self) -> &str {
        self.logo.as_deref().unwrap_or_else(|| self.cuisine.glyph())
    }
}
