//! Map viewport ownership and animated region transitions.
//!
//! The [`ViewportController`] is the only writer of the map region. Callers
//! request a new region and move on; the controller interpolates towards it as
//! the screen clock advances and never reports completion.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use truckmap::app::viewport::{ViewportController, ViewportSettings};
//! use truckmap::domain::Coordinate;
//!
//! let mut viewport = ViewportController::new(ViewportSettings::default());
//! let focus = viewport.region_focusing(Coordinate::new(37.78855, -122.4312));
//! viewport.animate_to(focus, Duration::ZERO);
//! assert!(viewport.is_animating());
//!
//! viewport.advance(Duration::from_millis(500));
//! assert_eq!(viewport.region(), focus);
//! ```

use crate::domain::{Coordinate, Region};
use std::time::Duration;

/// Center used until a device location is known.
pub const FALLBACK_CENTER: Coordinate = Coordinate::new(37.78825, -122.4324);

/// Street-level span in degrees.
pub const STANDARD_SPAN: f64 = 0.01;

/// Span used when zooming in on a single truck.
pub const FOCUS_SPAN: f64 = 0.005;

/// Duration of a region transition.
pub const TRANSITION: Duration = Duration::from_millis(500);

/// Tunable viewport parameters, overridable through plugin configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSettings {
    pub fallback: Coordinate,
    pub standard_span: f64,
    pub focus_span: f64,
    pub transition: Duration,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            fallback: FALLBACK_CENTER,
            standard_span: STANDARD_SPAN,
            focus_span: FOCUS_SPAN,
            transition: TRANSITION,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Transition {
    from: Region,
    to: Region,
    started_at: Duration,
}

/// Owns the region displayed by the map surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportController {
    settings: ViewportSettings,
    region: Region,
    transition: Option<Transition>,
}

impl ViewportController {
    /// Creates a controller showing [`Self::default_region`].
    #[must_use]
    pub fn new(settings: ViewportSettings) -> Self {
        let region = Region::centered(settings.fallback, settings.standard_span);
        Self {
            settings,
            region,
            transition: None,
        }
    }

    #[must_use]
    pub const fn settings(&self) -> &ViewportSettings {
        &self.settings
    }

    /// Region shown before any location is known.
    #[must_use]
    pub const fn default_region(&self) -> Region {
        Region::centered(self.settings.fallback, self.settings.standard_span)
    }

    /// Street-level region centered on the device.
    #[must_use]
    pub const fn region_for_device_location(&self, coordinate: Coordinate) -> Region {
        Region::centered(coordinate, self.settings.standard_span)
    }

    /// Tighter region centered on a single truck.
    #[must_use]
    pub const fn region_focusing(&self, coordinate: Coordinate) -> Region {
        Region::centered(coordinate, self.settings.focus_span)
    }

    /// Region currently displayed, possibly mid-transition.
    #[must_use]
    pub const fn region(&self) -> Region {
        self.region
    }

    /// Region the viewport is settling towards.
    #[must_use]
    pub fn target(&self) -> Region {
        self.transition.map_or(self.region, |t| t.to)
    }

    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Replaces the region immediately, dropping any in-flight transition.
    pub fn jump_to(&mut self, region: Region) {
        tracing::debug!(?region, "viewport jump");
        self.region = region;
        self.transition = None;
    }

    /// Starts a transition from the displayed region to `region`.
    ///
    /// A transition already in flight is overwritten; the new one starts from
    /// wherever the old one had reached at `now`.
    pub fn animate_to(&mut self, region: Region, now: Duration) {
        self.advance(now);

        if self.settings.transition.is_zero() {
            self.jump_to(region);
            return;
        }

        tracing::debug!(from = ?self.region, to = ?region, "viewport transition started");
        self.transition = Some(Transition {
            from: self.region,
            to: region,
            started_at: now,
        });
    }

    /// Moves the displayed region forward to `now`.
    ///
    /// Returns `true` if the displayed region changed.
    pub fn advance(&mut self, now: Duration) -> bool {
        let Some(transition) = self.transition else {
            return false;
        };

        let elapsed = now.saturating_sub(transition.started_at);
        let progress = elapsed.as_secs_f64() / self.settings.transition.as_secs_f64();

        if progress >= 1.0 {
            self.region = transition.to;
            self.transition = None;
        } else {
            self.region = transition.from.lerp(&transition.to, ease_in_out(progress));
        }
        true
    }
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new(ViewportSettings::default())
    }
}

/// Cubic ease-in-out on `0..=1`.
fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0f64).mul_add(t, 2.0).powi(3) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRUCK: Coordinate = Coordinate::new(37.78855, -122.4312);

    #[test]
    fn default_region_uses_fallback_and_standard_span() {
        let viewport = ViewportController::default();
        let region = viewport.region();
        assert_eq!(region, viewport.default_region());
        assert_eq!(region.center(), FALLBACK_CENTER);
        assert!((region.latitude_delta - STANDARD_SPAN).abs() < f64::EPSILON);
    }

    #[test]
    fn focus_region_is_tighter_than_device_region() {
        let viewport = ViewportController::default();
        let focus = viewport.region_focusing(TRUCK);
        let device = viewport.region_for_device_location(TRUCK);
        assert_eq!(focus.center(), TRUCK);
        assert!(focus.latitude_delta < device.latitude_delta);
    }

    #[test]
    fn transition_is_gradual_then_settles() {
        let mut viewport = ViewportController::default();
        let start = viewport.region();
        let focus = viewport.region_focusing(TRUCK);

        viewport.animate_to(focus, Duration::from_secs(1));
        assert_eq!(viewport.region(), start);
        assert_eq!(viewport.target(), focus);

        assert!(viewport.advance(Duration::from_millis(1250)));
        let mid = viewport.region();
        assert_ne!(mid, start);
        assert_ne!(mid, focus);

        viewport.advance(Duration::from_millis(1500));
        assert_eq!(viewport.region(), focus);
        assert!(!viewport.is_animating());
        assert!(!viewport.advance(Duration::from_secs(2)));
    }

    #[test]
    fn retarget_starts_from_displayed_region() {
        let mut viewport = ViewportController::default();
        let first = viewport.region_focusing(TRUCK);
        let second = viewport.region_focusing(Coordinate::new(37.78725, -122.4334));

        viewport.animate_to(first, Duration::ZERO);
        viewport.animate_to(second, Duration::from_millis(250));
        let reached = viewport.region();
        assert_ne!(reached, first);

        viewport.advance(Duration::from_millis(250 + 500));
        assert_eq!(viewport.region(), second);
    }

    #[test]
    fn jump_cancels_transition() {
        let mut viewport = ViewportController::default();
        viewport.animate_to(viewport.region_focusing(TRUCK), Duration::ZERO);

        let device = viewport.region_for_device_location(Coordinate::new(40.0, -74.0));
        viewport.jump_to(device);
        assert!(!viewport.is_animating());

        viewport.advance(Duration::from_secs(5));
        assert_eq!(viewport.region(), device);
    }

    #[test]
    fn zero_duration_transition_jumps() {
        let mut viewport = ViewportController::new(ViewportSettings {
            transition: Duration::ZERO,
            ..ViewportSettings::default()
        });
        let focus = viewport.region_focusing(TRUCK);
        viewport.animate_to(focus, Duration::ZERO);
        assert_eq!(viewport.region(), focus);
        assert!(!viewport.is_animating());
    }

    #[test]
    fn easing_is_monotonic_with_fixed_endpoints() {
        assert!(ease_in_out(0.0).abs() < f64::EPSILON);
        assert!((ease_in_out(1.0) - 1.0).abs() < f64::EPSILON);
        let samples: Vec<f64> = (0..=20).map(|i| ease_in_out(f64::from(i) / 20.0)).collect();
        assert!(samples.windows(2).all(|w| w[0] <= w[1]));
    }
}
