//! Device location provider abstraction.
//!
//! A provider first grants or denies access, then (if granted) may produce a
//! coordinate. Neither step is allowed to fault the caller: denial and failure
//! both mean "no coordinate", which is the steady state the screen expects.

use crate::domain::Coordinate;
use serde::{Deserialize, Serialize};

use super::file::FileLocation;

/// Outcome of a permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Permission {
    Granted,
    Denied,
}

/// Source of device coordinates.
pub trait LocationProvider {
    /// Asks for access to the device location.
    fn request_permission(&mut self) -> Permission;

    /// Current coordinate, or `None` if it cannot be determined.
    fn current_coordinate(&mut self) -> Option<Coordinate>;
}

/// Runs the permission-then-coordinate flow once, reporting both outcomes.
///
/// The coordinate is only asked for after a grant.
pub fn locate(provider: &mut dyn LocationProvider) -> (Permission, Option<Coordinate>) {
    match provider.request_permission() {
        Permission::Granted => {
            let coordinate = provider.current_coordinate();
            tracing::debug!(coordinate = ?coordinate, "location resolved");
            (Permission::Granted, coordinate)
        }
        Permission::Denied => {
            tracing::debug!("location permission denied");
            (Permission::Denied, None)
        }
    }
}

/// Coordinate from [`locate`], with denial and failure both as `None`.
///
/// ```
/// use truckmap::domain::Coordinate;
/// use truckmap::location::{resolve, FixedLocation};
///
/// let mut provider = FixedLocation::new(Coordinate::new(40.7, -74.0));
/// assert_eq!(resolve(&mut provider), Some(Coordinate::new(40.7, -74.0)));
/// ```
pub fn resolve(provider: &mut dyn LocationProvider) -> Option<Coordinate> {
    locate(provider).1
}

/// A provider that always reports the same configured coordinate.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation {
    coordinate: Coordinate,
}

impl FixedLocation {
    #[must_use]
    pub const fn new(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }
}

impl LocationProvider for FixedLocation {
    fn request_permission(&mut self) -> Permission {
        if self.coordinate.is_valid() {
            Permission::Granted
        } else {
            Permission::Denied
        }
    }

    fn current_coordinate(&mut self) -> Option<Coordinate> {
        Some(self.coordinate)
    }
}

/// Serializable description of where the worker should look for a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LocationSource {
    /// A coordinate given directly in the plugin configuration.
    Fixed(Coordinate),
    /// A JSON location fix on the host filesystem.
    File(String),
}

impl LocationSource {
    /// Builds the provider for this source.
    #[must_use]
    pub fn provider(&self) -> Box<dyn LocationProvider> {
        match self {
            Self::Fixed(coordinate) => Box::new(FixedLocation::new(*coordinate)),
            Self::File(path) => Box::new(FileLocation::new(path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Refusing {
        asked_for_coordinate: bool,
    }

    impl LocationProvider for Refusing {
        fn request_permission(&mut self) -> Permission {
            Permission::Denied
        }

        fn current_coordinate(&mut self) -> Option<Coordinate> {
            self.asked_for_coordinate = true;
            Some(Coordinate::new(0.0, 0.0))
        }
    }

    #[test]
    fn denial_yields_no_coordinate_without_asking() {
        let mut provider = Refusing {
            asked_for_coordinate: false,
        };
        assert_eq!(locate(&mut provider), (Permission::Denied, None));
        assert!(!provider.asked_for_coordinate);
    }

    #[test]
    fn invalid_fixed_coordinate_is_denied() {
        let mut provider = FixedLocation::new(Coordinate::new(f64::NAN, 0.0));
        assert_eq!(provider.request_permission(), Permission::Denied);
        assert_eq!(resolve(&mut provider), None);
    }
}
