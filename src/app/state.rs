//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the central state container for the
//! screen. It owns the catalog, the filter inputs and their derived view, the
//! [`SelectionCoordinator`] with every handle a selection drives, the one-shot
//! location task and the screen clock.
//!
//! # Architecture
//!
//! `AppState` separates core data (catalog, filter state) from derived state
//! (filtered trucks, cursors) and recomputes the derived part after every
//! change to its inputs. View models are computed on demand from state
//! snapshots; nothing rendered is stored.
//!
//! # Example
//!
//! ```rust
//! use truckmap::app::viewport::ViewportSettings;
//! use truckmap::app::AppState;
//! use truckmap::catalog::builtin_catalog;
//! use truckmap::domain::{Cuisine, FilterState};
//! use truckmap::ui::Theme;
//!
//! let mut state = AppState::new(builtin_catalog(), Theme::default(), ViewportSettings::default());
//! state.set_filter_state(FilterState::new("", Some(Cuisine::Tacos)));
//! assert_eq!(state.filtered_trucks.len(), 1);
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert_eq!(viewmodel.cards.len(), 1);
//! ```

use super::modes::{InputMode, SearchFocus, Surface};
use super::selection::SelectionCoordinator;
use super::task::LocationTask;
use super::viewport::ViewportSettings;
use crate::domain::{filter, match_range, Catalog, Cuisine, FilterState, Region, TruckId, TruckRecord};
use crate::infrastructure::paths::display_path;
use crate::location::LocationSource;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    CardItem, ChipInfo, EmptyState, FooterInfo, HeaderInfo, MapMarker, MapView, OverlayInfo, SearchBarInfo,
    UIViewModel,
};
use std::time::Duration;

/// Width of one card in columns, borders included.
pub const CARD_WIDTH: usize = 26;

/// Height of the card strip in rows, borders included.
pub const CARD_HEIGHT: usize = 5;

const CARD_GAP: usize = 1;

/// Where the current catalog came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogOrigin {
    /// Trucks compiled into the plugin.
    #[default]
    Builtin,
    /// A catalog file was requested from the worker and has not arrived yet.
    Pending,
    /// The configured catalog file.
    File,
    /// The configured file could not be used; built-in trucks are shown.
    Fallback,
}

/// Central application state container.
///
/// Mutated by the event handler in response to user input, timer ticks and
/// worker responses.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Catalog currently shown, in catalog order.
    pub catalog: Catalog,

    /// Search text and category chip.
    pub filter: FilterState,

    /// Catalog subsequence passing `filter`.
    ///
    /// Recomputed by [`Self::apply_filter`] whenever the catalog or the filter
    /// changes. Both surfaces render this sequence.
    pub filtered_trucks: Vec<TruckRecord>,

    /// Selection state machine and its viewport, emphasis and list handles.
    pub selection: SelectionCoordinator,

    /// Current input handling mode.
    pub input_mode: InputMode,

    /// Surface holding the keyboard cursor.
    pub focus: Surface,

    /// Index into `filtered_trucks` of the marker under the map cursor.
    ///
    /// The list cursor is the list scroll position owned by `selection`.
    pub map_cursor: usize,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    /// Screen clock, advanced by timer ticks.
    pub clock: Duration,

    /// Whether a frame timer is outstanding.
    pub frame_scheduled: bool,

    /// One-shot device location request.
    pub location: LocationTask,

    /// Where `catalog` came from.
    pub catalog_origin: CatalogOrigin,

    /// Configured catalog file, loaded by the worker once permissions are granted.
    pub catalog_file: Option<String>,

    /// Configured device location source.
    pub location_source: Option<LocationSource>,

    next_request_id: u64,
}

impl AppState {
    /// Creates a screen in its initial state: idle selection, default
    /// viewport, empty filter, cursor on the first card.
    #[must_use]
    pub fn new(catalog: Catalog, theme: Theme, viewport: ViewportSettings) -> Self {
        let mut state = Self {
            catalog,
            filter: FilterState::default(),
            filtered_trucks: vec![],
            selection: SelectionCoordinator::new(viewport),
            input_mode: InputMode::Normal,
            focus: Surface::default(),
            map_cursor: 0,
            theme,
            clock: Duration::ZERO,
            frame_scheduled: false,
            location: LocationTask::default(),
            catalog_origin: CatalogOrigin::default(),
            catalog_file: None,
            location_source: None,
            next_request_id: 0,
        };
        state.apply_filter();
        state
    }

    /// Replaces the filter inputs and recomputes the filtered view.
    ///
    /// The selection is kept even if the selected truck is filtered out.
    pub fn set_filter_state(&mut self, filter: FilterState) {
        self.filter = filter;
        self.apply_filter();
    }

    /// Recomputes `filtered_trucks` and clamps both cursors.
    ///
    /// When the selected truck is still visible the list scrolls to it.
    pub fn apply_filter(&mut self) {
        let _span = tracing::debug_span!(
            "apply_filter",
            total_trucks = self.catalog.len(),
            search_len = self.filter.search_text.len(),
            category = ?self.filter.category
        )
        .entered();

        self.filtered_trucks = filter(self.catalog.trucks(), &self.filter);
        let len = self.filtered_trucks.len();

        let selected_index = self
            .selection
            .selected_truck_id()
            .and_then(|id| self.visible_index_of(id));
        let scroll = self.selection.list_scroll_mut();
        match selected_index {
            Some(index) => scroll.scroll_to(index),
            None => scroll.clamp(len),
        }
        self.map_cursor = self.map_cursor.min(len.saturating_sub(1));

        tracing::debug!(filtered_count = len, "filter applied");
    }

    /// Swaps in a new catalog, dropping a selection that no longer exists.
    pub fn replace_catalog(&mut self, catalog: Catalog, origin: CatalogOrigin) {
        tracing::debug!(truck_count = catalog.len(), ?origin, "replacing catalog");
        self.catalog = catalog;
        self.catalog_origin = origin;
        self.selection.retain_in(&self.catalog);
        self.apply_filter();
    }

    /// List-card tap on `id`. Returns `false` for an unknown id.
    pub fn select_from_list(&mut self, id: TruckId) -> bool {
        let selected = self
            .selection
            .select_from_list(&self.catalog, &self.filtered_trucks, id, self.clock);
        if selected {
            self.sync_map_cursor(id);
        }
        selected
    }

    /// Map-marker tap on `id`. Returns `false` for an unknown id.
    pub fn select_from_map(&mut self, id: TruckId) -> bool {
        let selected = self
            .selection
            .select_from_map(&self.catalog, &self.filtered_trucks, id, self.clock);
        if selected {
            self.sync_map_cursor(id);
        }
        selected
    }

    /// Closes the overlay and clears the selection, if the overlay is open.
    pub fn dismiss_overlay(&mut self) -> bool {
        self.selection.dismiss_overlay()
    }

    /// Moves the cursor of the focused surface forward, wrapping at the end.
    pub fn move_cursor_next(&mut self) {
        let len = self.filtered_trucks.len();
        match self.focus {
            Surface::List => self.selection.list_scroll_mut().next(len),
            Surface::Map => {
                if len > 0 {
                    self.map_cursor = (self.map_cursor + 1) % len;
                }
            }
        }
    }

    /// Moves the cursor of the focused surface back, wrapping at the start.
    pub fn move_cursor_prev(&mut self) {
        let len = self.filtered_trucks.len();
        match self.focus {
            Surface::List => self.selection.list_scroll_mut().prev(len),
            Surface::Map => {
                if len > 0 {
                    self.map_cursor = self.map_cursor.checked_sub(1).unwrap_or(len - 1);
                }
            }
        }
    }

    /// Truck under the cursor of the focused surface.
    #[must_use]
    pub fn cursor_truck(&self) -> Option<&TruckRecord> {
        let index = match self.focus {
            Surface::List => self.selection.list_scroll().index(),
            Surface::Map => self.map_cursor,
        };
        self.filtered_trucks.get(index)
    }

    /// Record of the selected truck, looked up in the full catalog.
    #[must_use]
    pub fn selected_truck(&self) -> Option<&TruckRecord> {
        self.selection
            .selected_truck_id()
            .and_then(|id| self.catalog.get(id))
    }

    #[must_use]
    pub const fn selected_truck_id(&self) -> Option<TruckId> {
        self.selection.selected_truck_id()
    }

    #[must_use]
    pub const fn overlay_visible(&self) -> bool {
        self.selection.overlay_visible()
    }

    #[must_use]
    pub const fn viewport_region(&self) -> Region {
        self.selection.viewport_region()
    }

    #[must_use]
    pub fn emphasis_scale(&self, id: TruckId) -> f64 {
        self.selection.emphasis_scale(id)
    }

    /// Allocates the id for the next location request.
    pub fn next_request_id(&mut self) -> u64 {
        self.next_request_id += 1;
        self.next_request_id
    }

    /// Moves the screen clock forward and advances every animation.
    ///
    /// Returns `true` if anything visible changed.
    pub fn advance_clock(&mut self, elapsed: Duration) -> bool {
        self.clock += elapsed;
        self.selection.advance(self.clock)
    }

    fn visible_index_of(&self, id: TruckId) -> Option<usize> {
        self.filtered_trucks.iter().position(|t| t.id == id)
    }

    fn sync_map_cursor(&mut self, id: TruckId) {
        if let Some(index) = self.visible_index_of(id) {
            self.map_cursor = index;
        }
    }

    /// Computes a renderable UI view model for a `rows` x `cols` pane.
    ///
    /// The map takes whatever height the chrome leaves; the card strip is a
    /// fixed-height window centered on the list scroll position.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let map_rows = self.calculate_map_rows(rows);

        UIViewModel {
            header: self.compute_header(),
            search_bar: self.compute_search_bar(),
            chips: self.compute_chips(),
            map: self.compute_map(map_rows, cols),
            cards: self.compute_cards(cols),
            overlay: self.compute_overlay(),
            empty_state: self.compute_empty_state(),
            footer: self.compute_footer(),
            focus: self.focus,
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let source = match self.catalog_origin {
            CatalogOrigin::Builtin => "built-in catalog".to_string(),
            CatalogOrigin::Pending => format!(
                "loading {}",
                self.catalog_file.as_deref().map(display_path).unwrap_or_default()
            ),
            CatalogOrigin::File => self.catalog_file.as_deref().map(display_path).unwrap_or_default(),
            CatalogOrigin::Fallback => "built-in catalog (fallback)".to_string(),
        };

        let location = match self.location {
            LocationTask::Idle | LocationTask::Cancelled => None,
            LocationTask::Pending { .. } => Some("locating"),
            LocationTask::Resolved(_) => Some("near you"),
            LocationTask::Unavailable => Some("location unavailable"),
            LocationTask::Denied => Some("location denied"),
        };

        let status = match location {
            Some(location) => format!("{source} | {location}"),
            None => source,
        };

        HeaderInfo {
            title: format!(" Food Trucks ({}) ", self.filtered_trucks.len()),
            status,
        }
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        match self.input_mode {
            InputMode::Search(focus) => Some(SearchBarInfo {
                query: self.filter.search_text.clone(),
                is_typing: focus == SearchFocus::Typing,
            }),
            InputMode::Normal => None,
        }
    }

    fn compute_chips(&self) -> Vec<ChipInfo> {
        Cuisine::ALL
            .iter()
            .zip('1'..)
            .map(|(&cuisine, key)| ChipInfo {
                key,
                label: cuisine.label().to_string(),
                is_active: self.filter.category == Some(cuisine),
            })
            .collect()
    }

    fn compute_map(&self, rows: usize, cols: usize) -> MapView {
        let region = self.viewport_region();
        let selected = self.selected_truck_id();
        let cursor_id = match self.focus {
            Surface::Map => self.filtered_trucks.get(self.map_cursor).map(|t| t.id),
            Surface::List => None,
        };

        let markers = self
            .filtered_trucks
            .iter()
            .filter_map(|truck| {
                let (row, col) = region.project(truck.coordinate, rows, cols)?;
                Some(MapMarker {
                    id: truck.id,
                    row,
                    col,
                    logo: truck.logo_glyph().to_string(),
                    scale: self.emphasis_scale(truck.id),
                    is_selected: selected == Some(truck.id),
                    has_cursor: cursor_id == Some(truck.id),
                })
            })
            .collect();

        let device = match self.location {
            LocationTask::Resolved(coordinate) => region.project(coordinate, rows, cols),
            _ => None,
        };

        MapView {
            rows,
            cols,
            markers,
            device,
            caption: format!(
                " {:.5}, {:.5}  span {:.4} ",
                region.center_latitude, region.center_longitude, region.latitude_delta
            ),
        }
    }

    /// Cards visible around the list scroll position.
    ///
    /// The window keeps the scroll position centered and shifts at either end
    /// so the strip stays full whenever enough cards exist.
    fn compute_cards(&self, cols: usize) -> Vec<CardItem> {
        let total = self.filtered_trucks.len();
        if total == 0 {
            return vec![];
        }

        let capacity = (cols / (CARD_WIDTH + CARD_GAP)).max(1);
        let scroll = self.selection.list_scroll().index().min(total - 1);

        let mut start = scroll.saturating_sub(capacity / 2);
        let end = (start + capacity).min(total);
        if end - start < capacity && total >= capacity {
            start = end.saturating_sub(capacity);
        }

        let selected = self.selected_truck_id();
        let highlight = !self.filter.search_text.is_empty();

        self.filtered_trucks[start..end]
            .iter()
            .enumerate()
            .map(|(offset, truck)| {
                let name = truncate(&truck.name, CARD_WIDTH - 6);
                let name_len = name.chars().count();
                let highlight_ranges = if highlight {
                    match_range(&truck.name, &self.filter.search_text)
                        .filter(|&(start, _)| start < name_len)
                        .map(|(start, end)| vec![(start, end.min(name_len))])
                        .unwrap_or_default()
                } else {
                    vec![]
                };

                CardItem {
                    id: truck.id,
                    name,
                    logo: truck.logo_glyph().to_string(),
                    cuisine: truck.cuisine.label().to_string(),
                    rating: format_rating(truck.rating),
                    popularity: format_popularity(truck.popularity),
                    is_selected: selected == Some(truck.id),
                    has_cursor: self.focus == Surface::List && start + offset == scroll,
                    highlight_ranges,
                }
            })
            .collect()
    }

    fn compute_overlay(&self) -> Option<OverlayInfo> {
        if !self.overlay_visible() {
            return None;
        }
        let truck = self.selected_truck()?;
        Some(OverlayInfo {
            title: truck.name.clone(),
            logo: truck.logo_glyph().to_string(),
            cuisine: truck.cuisine.label().to_string(),
            rating: format_rating(truck.rating),
            popularity: format_popularity(truck.popularity),
            description: truck.description.clone().unwrap_or_default(),
        })
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        if !self.filtered_trucks.is_empty() {
            return None;
        }

        let state = if self.catalog_origin == CatalogOrigin::Pending {
            EmptyState {
                message: "Loading trucks".to_string(),
                subtitle: "Reading the catalog file in the background".to_string(),
            }
        } else if self.catalog.is_empty() {
            EmptyState {
                message: "No trucks in the catalog".to_string(),
                subtitle: "Point catalog_file at a JSON truck list".to_string(),
            }
        } else {
            EmptyState {
                message: "No trucks match".to_string(),
                subtitle: "Esc clears the search and category".to_string(),
            }
        };
        Some(state)
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if self.overlay_visible() {
            "Esc/Enter: close details  q: quit"
        } else {
            match self.input_mode {
                InputMode::Search(SearchFocus::Typing) => {
                    "Esc: exit search  Enter: browse results  Ctrl+n/p: move  Type to filter"
                }
                InputMode::Search(SearchFocus::Navigating) => {
                    "Esc: exit search  /: edit query  h/l: move  Tab: map/list  Enter: select"
                }
                InputMode::Normal => {
                    "h/l: move  Tab: map/list  Enter: select  /: search  c/1-3/0: category  q: quit"
                }
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    /// Rows left for the map after the chrome: blank line, header, border,
    /// chips, border, card strip, border and footer, plus a 3-row search bar in
    /// search mode.
    const fn calculate_map_rows(&self, total_rows: usize) -> usize {
        let chrome = 7 + CARD_HEIGHT;
        match self.input_mode {
            InputMode::Normal => total_rows.saturating_sub(chrome),
            InputMode::Search(_) => total_rows.saturating_sub(chrome + 3),
        }
    }
}

fn format_rating(rating: f64) -> String {
    format!("★ {rating:.1}")
}

fn format_popularity(popularity: u32) -> String {
    format!("{popularity} views")
}

/// Shortens `text` to at most `max` characters, marking the cut with `…`.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
