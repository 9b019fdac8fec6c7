//! Rectangular geographic regions shown by the map surface.

use super::truck::Coordinate;
use serde::{Deserialize, Serialize};

/// A map viewport: center plus latitude/longitude spans in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub center_latitude: f64,
    pub center_longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl Region {
    /// A square-span region centered on `center`.
    #[must_use]
    pub const fn centered(center: Coordinate, span: f64) -> Self {
        Self {
            center_latitude: center.latitude,
            center_longitude: center.longitude,
            latitude_delta: span,
            longitude_delta: span,
        }
    }

    #[must_use]
    pub const fn center(&self) -> Coordinate {
        Coordinate::new(self.center_latitude, self.center_longitude)
    }

    /// Component-wise linear interpolation, `t` clamped to `0..=1`.
    #[must_use]
    pub fn lerp(&self, to: &Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: f64, b: f64| (b - a).mul_add(t, a);
        Self {
            center_latitude: mix(self.center_latitude, to.center_latitude),
            center_longitude: mix(self.center_longitude, to.center_longitude),
            latitude_delta: mix(self.latitude_delta, to.latitude_delta),
            longitude_delta: mix(self.longitude_delta, to.longitude_delta),
        }
    }

    #[must_use]
    pub fn contains(&self, point: Coordinate) -> bool {
        (point.latitude - self.center_latitude).abs() <= self.latitude_delta / 2.0
            && (point.longitude - self.center_longitude).abs() <= self.longitude_delta / 2.0
    }

    /// Maps a coordinate to a `(row, col)` cell of a `rows` x `cols` grid
    /// covering this region, north at row 0.
    ///
    /// Returns `None` when the point is outside the region or the grid is empty.
    ///
    /// ```
    /// use truckmap::domain::{Coordinate, Region};
    ///
    /// let region = Region::centered(Coordinate::new(10.0, 20.0), 2.0);
    /// assert_eq!(region.project(Coordinate::new(10.0, 20.0), 11, 21), Some((5, 10)));
    /// assert_eq!(region.project(Coordinate::new(12.0, 20.0), 11, 21), None);
    /// ```
    #[must_use]
    pub fn project(&self, point: Coordinate, rows: usize, cols: usize) -> Option<(usize, usize)> {
        if rows == 0 || cols == 0 || !self.contains(point) {
            return None;
        }
        let north = self.center_latitude + self.latitude_delta / 2.0;
        let west = self.center_longitude - self.longitude_delta / 2.0;
        let y = (north - point.latitude) / self.latitude_delta;
        let x = (point.longitude - west) / self.longitude_delta;

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
        let cell = |fraction: f64, len: usize| ((fraction * (len - 1) as f64).round() as usize).min(len - 1);

        Some((cell(y, rows), cell(x, cols)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = Region::centered(Coordinate::new(0.0, 0.0), 0.01);
        let b = Region::centered(Coordinate::new(1.0, 2.0), 0.005);
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
        let mid = a.lerp(&b, 0.5);
        assert!((mid.center_latitude - 0.5).abs() < 1e-12);
        assert!((mid.longitude_delta - 0.0075).abs() < 1e-12);
    }

    #[test]
    fn projection_orients_north_up_west_left() {
        let region = Region::centered(Coordinate::new(0.0, 0.0), 2.0);
        assert_eq!(region.project(Coordinate::new(1.0, -1.0), 5, 5), Some((0, 0)));
        assert_eq!(region.project(Coordinate::new(-1.0, 1.0), 5, 5), Some((4, 4)));
        assert_eq!(region.project(Coordinate::new(0.0, 0.0), 0, 5), None);
    }
}
