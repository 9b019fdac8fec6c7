//! Selection synchronization between the map and the card list.
//!
//! [`SelectionCoordinator`] is the state machine behind the screen. It owns
//! the selected truck, the overlay flag and the handles every selection drives:
//! the [`ViewportController`], the [`EmphasisAnimator`] and the [`ListScroll`].
//! Rendering reads these through the accessors; only the transitions below
//! write them.
//!
//! # Transitions
//!
//! ```text
//!            select_from_list(id)          select_from_map(id)
//!   Idle ───────────────────────▶ Selected ◀──────────────────── Idle
//!    ▲        focus viewport      overlay=false   pulse marker       │
//!    │                                            scroll list        │
//!    │                                            overlay=true       │
//!    └──────────────── dismiss_overlay() ◀──────────────────────────┘
//! ```
//!
//! Ids missing from the catalog are ignored. A filter change never touches
//! the selection.

use super::emphasis::EmphasisAnimator;
use super::viewport::{ViewportController, ViewportSettings};
use crate::domain::{Catalog, Coordinate, Region, TruckId, TruckRecord};
use std::time::Duration;

/// Scroll position of the horizontal card list: the index of the centered card
/// within the visible (filtered) sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListScroll {
    index: usize,
}

impl ListScroll {
    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }

    pub fn scroll_to(&mut self, index: usize) {
        self.index = index;
    }

    /// Moves one card forward, wrapping at `len`.
    pub fn next(&mut self, len: usize) {
        if len > 0 {
            self.index = (self.index + 1) % len;
        }
    }

    /// Moves one card back, wrapping at `len`.
    pub fn prev(&mut self, len: usize) {
        if len > 0 {
            self.index = self.index.checked_sub(1).unwrap_or(len - 1).min(len - 1);
        }
    }

    /// Keeps the index inside a list of `len` cards.
    pub fn clamp(&mut self, len: usize) {
        self.index = self.index.min(len.saturating_sub(1));
    }
}

/// Owner of the selection and of every handle a selection drives.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionCoordinator {
    selected: Option<TruckId>,
    overlay_visible: bool,
    viewport: ViewportController,
    emphasis: EmphasisAnimator,
    list_scroll: ListScroll,
}

impl SelectionCoordinator {
    /// Idle coordinator showing the default region.
    #[must_use]
    pub fn new(settings: ViewportSettings) -> Self {
        Self {
            selected: None,
            overlay_visible: false,
            viewport: ViewportController::new(settings),
            emphasis: EmphasisAnimator::new(),
            list_scroll: ListScroll::default(),
        }
    }

    /// List-card tap: select and focus the map, without opening the overlay.
    ///
    /// Returns `false` (leaving all state untouched) if `id` is not in the
    /// catalog.
    pub fn select_from_list(
        &mut self,
        catalog: &Catalog,
        visible: &[TruckRecord],
        id: TruckId,
        now: Duration,
    ) -> bool {
        let _span = tracing::debug_span!("select_from_list", truck_id = %id).entered();

        let Some(truck) = catalog.get(id) else {
            tracing::debug!("ignoring selection of unknown truck");
            return false;
        };

        self.selected = Some(id);
        self.overlay_visible = false;
        if let Some(index) = position_of(visible, id) {
            self.list_scroll.scroll_to(index);
        }
        let focus = self.viewport.region_focusing(truck.coordinate);
        self.viewport.animate_to(focus, now);

        tracing::debug!(truck_name = %truck.name, "truck selected from list");
        true
    }

    /// Map-marker tap: select, pulse the marker, bring its card into view and
    /// open the overlay.
    ///
    /// Returns `false` (leaving all state untouched) if `id` is not in the
    /// catalog.
    pub fn select_from_map(
        &mut self,
        catalog: &Catalog,
        visible: &[TruckRecord],
        id: TruckId,
        now: Duration,
    ) -> bool {
        let _span = tracing::debug_span!("select_from_map", truck_id = %id).entered();

        let Some(truck) = catalog.get(id) else {
            tracing::debug!("ignoring selection of unknown truck");
            return false;
        };

        self.selected = Some(id);
        self.emphasis.pulse(id, now);
        if let Some(index) = position_of(visible, id) {
            self.list_scroll.scroll_to(index);
        }
        self.overlay_visible = true;

        tracing::debug!(truck_name = %truck.name, "truck selected from map");
        true
    }

    /// Closes the overlay and clears the selection.
    ///
    /// No-op unless the overlay is visible.
    pub fn dismiss_overlay(&mut self) -> bool {
        if !self.overlay_visible {
            return false;
        }
        tracing::debug!(truck_id = ?self.selected, "overlay dismissed");
        self.overlay_visible = false;
        self.selected = None;
        true
    }

    /// Replaces the viewport with the device-centered region.
    ///
    /// Overrides any focus-in still in flight.
    pub fn seed_viewport(&mut self, coordinate: Coordinate) {
        let region = self.viewport.region_for_device_location(coordinate);
        tracing::debug!(?region, "viewport seeded from device location");
        self.viewport.jump_to(region);
    }

    /// Drops a selection whose truck is no longer in `catalog`.
    ///
    /// Returns `true` if the selection was cleared.
    pub fn retain_in(&mut self, catalog: &Catalog) -> bool {
        match self.selected {
            Some(id) if !catalog.contains(id) => {
                tracing::debug!(truck_id = %id, "selected truck left the catalog");
                self.selected = None;
                self.overlay_visible = false;
                true
            }
            _ => false,
        }
    }

    /// Advances viewport and emphasis animations to `now`.
    pub fn advance(&mut self, now: Duration) -> bool {
        let viewport_changed = self.viewport.advance(now);
        let emphasis_changed = self.emphasis.advance(now);
        viewport_changed || emphasis_changed
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.viewport.is_animating() || self.emphasis.is_animating()
    }

    #[must_use]
    pub const fn selected_truck_id(&self) -> Option<TruckId> {
        self.selected
    }

    #[must_use]
    pub const fn overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    #[must_use]
    pub const fn viewport_region(&self) -> Region {
        self.viewport.region()
    }

    #[must_use]
    pub fn emphasis_scale(&self, id: TruckId) -> f64 {
        self.emphasis.scale(id)
    }

    #[must_use]
    pub const fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    #[must_use]
    pub const fn emphasis(&self) -> &EmphasisAnimator {
        &self.emphasis
    }

    #[must_use]
    pub const fn list_scroll(&self) -> ListScroll {
        self.list_scroll
    }

    pub fn list_scroll_mut(&mut self) -> &mut ListScroll {
        &mut self.list_scroll
    }
}

impl Default for SelectionCoordinator {
    fn default() -> Self {
        Self::new(ViewportSettings::default())
    }
}

fn position_of(visible: &[TruckRecord], id: TruckId) -> Option<usize> {
    visible.iter().position(|truck| truck.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::emphasis::{PEAK_SCALE, REST_SCALE};
    use crate::catalog::builtin_catalog;

    fn setup() -> (SelectionCoordinator, Catalog) {
        (SelectionCoordinator::default(), builtin_catalog())
    }

    #[test]
    fn starts_idle_on_default_region() {
        let (coordinator, _) = setup();
        assert_eq!(coordinator.selected_truck_id(), None);
        assert!(!coordinator.overlay_visible());
        assert_eq!(coordinator.viewport_region(), coordinator.viewport().default_region());
        assert!(!coordinator.is_animating());
    }

    #[test]
    fn list_selection_focuses_without_overlay() {
        let (mut coordinator, catalog) = setup();
        let visible = catalog.trucks().to_vec();

        assert!(coordinator.select_from_list(&catalog, &visible, TruckId(3), Duration::ZERO));
        assert_eq!(coordinator.selected_truck_id(), Some(TruckId(3)));
        assert!(!coordinator.overlay_visible());
        assert_eq!(coordinator.list_scroll().index(), 2);

        let truck = catalog.get(TruckId(3)).unwrap();
        assert_eq!(coordinator.viewport().target(), coordinator.viewport().region_focusing(truck.coordinate));
        assert!(coordinator.emphasis().active_pulses().is_empty());

        coordinator.advance(Duration::from_secs(1));
        assert_eq!(coordinator.viewport_region().center(), truck.coordinate);
    }

    #[test]
    fn map_selection_opens_overlay_and_pulses_once() {
        let (mut coordinator, catalog) = setup();
        let visible = catalog.trucks().to_vec();

        assert!(coordinator.select_from_map(&catalog, &visible, TruckId(2), Duration::ZERO));
        assert_eq!(coordinator.selected_truck_id(), Some(TruckId(2)));
        assert!(coordinator.overlay_visible());
        assert_eq!(coordinator.list_scroll().index(), 1);
        assert_eq!(coordinator.emphasis().active_pulses(), vec![TruckId(2)]);
        assert!(!coordinator.viewport().is_animating());

        coordinator.advance(Duration::from_millis(290));
        assert!((coordinator.emphasis_scale(TruckId(2)) - PEAK_SCALE).abs() < f64::EPSILON);
        coordinator.advance(Duration::from_millis(1500));
        assert!((coordinator.emphasis_scale(TruckId(2)) - REST_SCALE).abs() < f64::EPSILON);
    }

    #[test]
    fn dismiss_after_map_selection_returns_to_idle() {
        let (mut coordinator, catalog) = setup();
        let visible = catalog.trucks().to_vec();
        coordinator.select_from_map(&catalog, &visible, TruckId(2), Duration::ZERO);

        assert!(coordinator.dismiss_overlay());
        assert_eq!(coordinator.selected_truck_id(), None);
        assert!(!coordinator.overlay_visible());
    }

    #[test]
    fn dismiss_without_overlay_is_noop() {
        let (mut coordinator, catalog) = setup();
        let visible = catalog.trucks().to_vec();
        assert!(!coordinator.dismiss_overlay());

        coordinator.select_from_list(&catalog, &visible, TruckId(1), Duration::ZERO);
        assert!(!coordinator.dismiss_overlay());
        assert_eq!(coordinator.selected_truck_id(), Some(TruckId(1)));
    }

    #[test]
    fn list_selection_closes_open_overlay() {
        let (mut coordinator, catalog) = setup();
        let visible = catalog.trucks().to_vec();
        coordinator.select_from_map(&catalog, &visible, TruckId(2), Duration::ZERO);
        coordinator.select_from_list(&catalog, &visible, TruckId(1), Duration::ZERO);
        assert_eq!(coordinator.selected_truck_id(), Some(TruckId(1)));
        assert!(!coordinator.overlay_visible());
    }

    #[test]
    fn unknown_ids_leave_state_unchanged() {
        let (mut coordinator, catalog) = setup();
        let visible = catalog.trucks().to_vec();
        coordinator.select_from_map(&catalog, &visible, TruckId(2), Duration::ZERO);
        let before = coordinator.clone();

        assert!(!coordinator.select_from_map(&catalog, &visible, TruckId(-1), Duration::ZERO));
        assert!(!coordinator.select_from_list(&catalog, &visible, TruckId(-1), Duration::ZERO));
        assert_eq!(coordinator, before);
    }

    #[test]
    fn selection_of_filtered_out_truck_keeps_scroll() {
        let (mut coordinator, catalog) = setup();
        let visible: Vec<TruckRecord> = catalog.trucks()[..1].to_vec();
        coordinator.select_from_map(&catalog, &visible, TruckId(3), Duration::ZERO);
        assert_eq!(coordinator.selected_truck_id(), Some(TruckId(3)));
        assert_eq!(coordinator.list_scroll().index(), 0);
    }

    #[test]
    fn seed_overrides_focus_in() {
        let (mut coordinator, catalog) = setup();
        let visible = catalog.trucks().to_vec();
        coordinator.select_from_list(&catalog, &visible, TruckId(3), Duration::ZERO);

        let device = Coordinate::new(40.7128, -74.006);
        coordinator.seed_viewport(device);
        coordinator.advance(Duration::from_secs(2));
        assert_eq!(
            coordinator.viewport_region(),
            coordinator.viewport().region_for_device_location(device)
        );
        assert_eq!(coordinator.selected_truck_id(), Some(TruckId(3)));
    }

    #[test]
    fn catalog_replacement_clears_missing_selection() {
        let (mut coordinator, catalog) = setup();
        let visible = catalog.trucks().to_vec();
        coordinator.select_from_map(&catalog, &visible, TruckId(2), Duration::ZERO);

        let smaller = Catalog::new(vec![catalog.trucks()[0].clone()]).unwrap();
        assert!(coordinator.retain_in(&smaller));
        assert_eq!(coordinator.selected_truck_id(), None);
        assert!(!coordinator.overlay_visible());
        assert!(!coordinator.retain_in(&smaller));
    }

    #[test]
    fn list_scroll_wraps_and_clamps() {
        let mut scroll = ListScroll::default();
        scroll.prev(3);
        assert_eq!(scroll.index(), 2);
        scroll.next(3);
        assert_eq!(scroll.index(), 0);
        scroll.scroll_to(5);
        scroll.clamp(2);
        assert_eq!(scroll.index(), 1);
        scroll.clamp(0);
        assert_eq!(scroll.index(), 0);
        scroll.next(0);
        assert_eq!(scroll.index(), 0);
    }
}
