//! View model types representing renderable UI state.
//!
//! View models are computed from application state by
//! `AppState::compute_viewmodel()` and consumed by the renderer. They contain no
//! business logic, only display-ready data: projected marker cells, windowed
//! cards with highlight ranges, and the overlay contents.
//!
//! # Example
//!
//! ```rust
//! use truckmap::app::modes::Surface;
//! use truckmap::ui::viewmodel::{FooterInfo, HeaderInfo, MapView, UIViewModel};
//!
//! let vm = UIViewModel {
//!     header: HeaderInfo {
//!         title: " Food Trucks (0) ".to_string(),
//!         status: "built-in catalog".to_string(),
//!     },
//!     search_bar: None,
//!     chips: vec![],
//!     map: MapView::default(),
//!     cards: vec![],
//!     overlay: None,
//!     empty_state: None,
//!     footer: FooterInfo { keybindings: "q: quit".to_string() },
//!     focus: Surface::List,
//! };
//! assert!(vm.cards.is_empty());
//! ```

use crate::app::modes::Surface;
use crate::domain::TruckId;

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct UIViewModel {
    /// Header information (title, data source and location status).
    pub header: HeaderInfo,

    /// Search input, present while search mode is active.
    pub search_bar: Option<SearchBarInfo>,

    /// Category chips in chip order.
    pub chips: Vec<ChipInfo>,

    /// Map surface: projected markers within the current viewport.
    pub map: MapView,

    /// Windowed strip of cards around the list scroll position.
    pub cards: Vec<CardItem>,

    /// Detail overlay for the selected truck.
    pub overlay: Option<OverlayInfo>,

    /// Replaces the card strip when no card can be shown.
    pub empty_state: Option<EmptyState>,

    /// Footer information (keybindings, help text).
    pub footer: FooterInfo,

    /// Surface holding the keyboard cursor.
    pub focus: Surface,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text, including the visible truck count.
    pub title: String,

    /// Right-aligned status: catalog source and location state.
    pub status: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}

/// Empty state message shown in place of the card strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No trucks match").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Search bar display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Current search text.
    pub query: String,

    /// Whether keystrokes edit the query (cursor shown).
    pub is_typing: bool,
}

/// One category chip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipInfo {
    /// Key that toggles the chip.
    pub key: char,

    pub label: String,

    pub is_active: bool,
}

/// Map surface contents, sized to the area the renderer will draw.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapView {
    /// Grid height in rows.
    pub rows: usize,

    /// Grid width in columns.
    pub cols: usize,

    /// Markers inside the viewport, in catalog order.
    pub markers: Vec<MapMarker>,

    /// Grid cell of the device location, when known and visible.
    pub device: Option<(usize, usize)>,

    /// Short description of the displayed region (center and span).
    pub caption: String,
}

/// A truck marker projected onto the map grid.
#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub id: TruckId,

    /// Grid row, 0 at the top (north).
    pub row: usize,

    /// Grid column, 0 at the left (west).
    pub col: usize,

    /// Logo glyph drawn for the marker.
    pub logo: String,

    /// Emphasis scale in `1.0..=1.5`.
    pub scale: f64,

    pub is_selected: bool,

    /// Whether the map cursor rests on this marker.
    pub has_cursor: bool,
}

/// One card of the horizontal list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardItem {
    pub id: TruckId,

    /// Name, truncated to the card width.
    pub name: String,

    pub logo: String,

    pub cuisine: String,

    /// Formatted rating (e.g., "★ 4.5").
    pub rating: String,

    /// Formatted popularity (e.g., "120 views").
    pub popularity: String,

    pub is_selected: bool,

    /// Whether the list cursor (scroll position) rests on this card.
    pub has_cursor: bool,

    /// Character ranges of `name` matching the search text.
    ///
    /// Each tuple is `(start_index, end_index)` in UTF-8 character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Detail overlay for the selected truck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayInfo {
    pub title: String,
    pub logo: String,
    pub cuisine: String,
    pub rating: String,
    pub popularity: String,
    pub description: String,
}
