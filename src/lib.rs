//! Truckmap: a Zellij plugin showing food trucks on a map and in a card list.
//!
//! Truckmap draws a terminal map with one marker per truck above a horizontal
//! strip of cards, and keeps the two in sync:
//! - Picking a card focuses the map on that truck
//! - Picking a marker pulses it, scrolls its card into view and opens a detail overlay
//! - Live filtering by name and cuisine chip applies to both surfaces
//! - An optional device location seeds the initial map region
//! - Catalog files and location fixes are read on a Zellij worker thread

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling and frame scheduling              │
//! │  - Selection, viewport and emphasis handles         │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Catalog &     │   │ Worker Layer  │
//! │ (ui/)         │   │ Location      │   │ (worker/)     │
//! │ - Map grid    │   │ - JSON files  │   │ - File reads  │
//! │ - Card strip  │   │ - Built-ins   │   │ - IPC bridge  │
//! │ - Theming     │   │ - Providers   │   │ - Trace ctx   │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Sandbox paths (infrastructure/)                  │
//! │  - Trucks, catalog, filter, regions (domain/)       │
//! │  - Error types (domain/error)                       │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing                            │
//! │  - File-based OTLP export                           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/truckmap.wasm" {
//!         catalog_file "~/trucks.json"
//!         location "37.7749,-122.4194"
//!         fallback_location "37.78825,-122.4324"
//!         map_span "0.01"
//!         focus_span "0.005"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Plugin Load** (`main.rs`): parse configuration, initialize tracing,
//!    create `AppState`, request permissions, subscribe to events
//! 2. **Permission Result**: post `LoadCatalog` and `ResolveLocation` to the
//!    worker, or fall back to the built-in catalog and the default region
//! 3. **Worker Responses**: replace the catalog; seed the viewport once
//! 4. **Rendering**: compute the view model, draw header, chips, map, cards
//!    and footer
//!
//! # Example
//!
//! ```rust
//! use truckmap::{handle_event, initialize, Config, Event};
//! use truckmap::domain::TruckId;
//!
//! let mut state = initialize(&Config::default());
//! let (_render, actions) = handle_event(&mut state, &Event::SelectFromMap(TruckId(2)))?;
//! assert!(state.overlay_visible());
//! assert_eq!(actions.len(), 1); // animation frame request
//! # Ok::<(), truckmap::TruckmapError>(())
//! ```
//!
//! # Platform Support
//!
//! - **Target**: `wasm32-wasip1` (Zellij WASM runtime)
//! - **Terminal**: Any ANSI-capable terminal emulator with 24-bit color

pub mod app;
pub mod catalog;
pub mod domain;
pub mod infrastructure;
pub mod location;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, SearchFocus, Surface};
pub use domain::{Coordinate, Cuisine, FilterState, Result, TruckId, TruckRecord, TruckmapError};
pub use ui::Theme;

use app::state::CatalogOrigin;
use app::viewport::{ViewportSettings, FALLBACK_CENTER, FOCUS_SPAN, STANDARD_SPAN, TRANSITION};
use domain::Catalog;
use location::LocationSource;
use std::collections::BTreeMap;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// Every value is optional in the layout; unparseable values fall back to
/// their defaults with a debug log.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// JSON catalog file to load on the worker thread.
    ///
    /// When unset the built-in catalog is shown immediately.
    pub catalog_file: Option<String>,

    /// Center of the map until a device location is known.
    pub fallback_location: Coordinate,

    /// Fixed device location (`"lat,lon"`).
    ///
    /// Takes precedence over `location_file`.
    pub location: Option<Coordinate>,

    /// JSON location fix file (`{"latitude", "longitude", "timestamp"}`).
    pub location_file: Option<String>,

    /// Span in degrees of the default and device regions.
    pub map_span: f64,

    /// Span in degrees when focusing a single truck.
    pub focus_span: f64,

    /// Built-in theme name to use.
    ///
    /// Options: `catppuccin-mocha`, `catppuccin-latte`, `monochrome`. Ignored
    /// if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file.
    ///
    /// Takes precedence over `theme_name`. See [`ui::theme`] for format.
    pub theme_file: Option<String>,

    /// Filter directive for tracing (e.g. `info`, `truckmap=debug`).
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_file: None,
            fallback_location: FALLBACK_CENTER,
            location: None,
            location_file: None,
            map_span: STANDARD_SPAN,
            focus_span: FOCUS_SPAN,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// # Parsing Rules
    ///
    /// - Empty values count as unset
    /// - `fallback_location`, `location`: `"lat,lon"` in decimal degrees
    /// - `map_span`, `focus_span`: positive degrees, at most 180
    /// - `focus_span` must be smaller than `map_span`; otherwise the default
    ///   focus span is used if it is smaller, else half of `map_span`
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use truckmap::{Config, Coordinate};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("location".to_string(), "40.7128, -74.006".to_string());
    /// map.insert("focus_span".to_string(), "0.002".to_string());
    /// map.insert("map_span".to_string(), "wide".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.location, Some(Coordinate::new(40.7128, -74.006)));
    /// assert_eq!(config.focus_span, 0.002);
    /// assert_eq!(config.map_span, 0.01);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let value = |key: &str| {
            config
                .get(key)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(String::from)
        };
        let coordinate = |key: &str| {
            value(key).and_then(|raw| {
                let parsed = Coordinate::parse(&raw);
                if parsed.is_none() {
                    tracing::debug!(key, value = %raw, "ignoring invalid coordinate");
                }
                parsed
            })
        };
        let span = |key: &str, default: f64| {
            value(key)
                .and_then(|raw| raw.parse::<f64>().ok())
                .filter(|s| s.is_finite() && *s > 0.0 && *s <= 180.0)
                .unwrap_or(default)
        };

        let map_span = span("map_span", defaults.map_span);
        let mut focus_span = span("focus_span", defaults.focus_span);
        if focus_span >= map_span {
            let tighter = if defaults.focus_span < map_span {
                defaults.focus_span
            } else {
                map_span / 2.0
            };
            tracing::debug!(focus_span, map_span, tighter, "focus span must be tighter than map span");
            focus_span = tighter;
        }

        Self {
            catalog_file: value("catalog_file"),
            fallback_location: coordinate("fallback_location").unwrap_or(defaults.fallback_location),
            location: coordinate("location"),
            location_file: value("location_file"),
            map_span,
            focus_span,
            theme_name: value("theme"),
            theme_file: value("theme_file"),
            trace_level: value("trace_level"),
        }
    }

    /// Viewport parameters derived from this configuration.
    #[must_use]
    pub const fn viewport_settings(&self) -> ViewportSettings {
        ViewportSettings {
            fallback: self.fallback_location,
            standard_span: self.map_span,
            focus_span: self.focus_span,
            transition: TRANSITION,
        }
    }

    /// Where the worker should look for the device location, if anywhere.
    #[must_use]
    pub fn location_source(&self) -> Option<LocationSource> {
        self.location.map(LocationSource::Fixed).or_else(|| {
            self.location_file
                .as_ref()
                .map(|path| LocationSource::File(path.clone()))
        })
    }

    fn theme(&self) -> Theme {
        self.theme_file.as_ref().map_or_else(
            || {
                self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                    Theme::from_name(theme_name).unwrap_or_else(|| {
                        tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                        Theme::default()
                    })
                })
            },
            |theme_file| {
                Theme::from_file(infrastructure::expand_tilde(theme_file)).unwrap_or_else(|e| {
                    tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                    Theme::default()
                })
            },
        )
    }
}

/// Creates the initial screen state for `config`.
///
/// With a `catalog_file` the catalog starts empty and pending until the
/// worker answers; otherwise the built-in catalog is shown right away.
///
/// ```rust
/// use truckmap::{initialize, Config};
///
/// let state = initialize(&Config::default());
/// assert_eq!(state.filtered_trucks.len(), 3);
/// assert_eq!(state.selected_truck_id(), None);
/// ```
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(?config, "initializing truckmap plugin");

    let (catalog, origin) = if config.catalog_file.is_some() {
        (Catalog::default(), CatalogOrigin::Pending)
    } else {
        (catalog::builtin_catalog(), CatalogOrigin::Builtin)
    };

    let mut state = AppState::new(catalog, config.theme(), config.viewport_settings());
    state.catalog_origin = origin;
    state.catalog_file.clone_from(&config.catalog_file);
    state.location_source = config.location_source();
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_config_uses_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = Config::from_zellij(&map(&[
            ("fallback_location", "somewhere"),
            ("location", "95.0,0.0"),
            ("map_span", "-1"),
            ("catalog_file", "  "),
        ]));
        assert_eq!(config.fallback_location, FALLBACK_CENTER);
        assert_eq!(config.location, None);
        assert!((config.map_span - STANDARD_SPAN).abs() < f64::EPSILON);
        assert_eq!(config.catalog_file, None);
    }

    #[test]
    fn focus_span_stays_tighter_than_map_span() {
        let config = Config::from_zellij(&map(&[("focus_span", "0.5")]));
        assert!((config.focus_span - FOCUS_SPAN).abs() < f64::EPSILON);
        assert!(config.focus_span < config.map_span);

        let config = Config::from_zellij(&map(&[("map_span", "0.004")]));
        assert!((config.focus_span - 0.002).abs() < 1e-12);

        let config = Config::from_zellij(&map(&[("map_span", "0.02"), ("focus_span", "0.02")]));
        assert!((config.focus_span - FOCUS_SPAN).abs() < f64::EPSILON);

        let settings = Config::from_zellij(&map(&[("focus_span", "1")])).viewport_settings();
        assert!(settings.focus_span < settings.standard_span);
    }

    #[test]
    fn fixed_location_wins_over_file() {
        let config = Config::from_zellij(&map(&[("location", "1.0,2.0"), ("location_file", "~/fix.json")]));
        assert_eq!(
            config.location_source(),
            Some(LocationSource::Fixed(Coordinate::new(1.0, 2.0)))
        );

        let config = Config::from_zellij(&map(&[("location_file", "~/fix.json")]));
        assert_eq!(
            config.location_source(),
            Some(LocationSource::File("~/fix.json".to_string()))
        );
    }

    #[test]
    fn viewport_settings_follow_config() {
        let config = Config::from_zellij(&map(&[("fallback_location", "10,20"), ("map_span", "0.02")]));
        let state = initialize(&config);
        let region = state.viewport_region();
        assert_eq!(region.center(), Coordinate::new(10.0, 20.0));
        assert!((region.latitude_delta - 0.02).abs() < f64::EPSILON);
    }

    #[test]
    fn catalog_file_starts_pending() {
        let config = Config::from_zellij(&map(&[("catalog_file", "~/trucks.json"), ("theme", "nope")]));
        let state = initialize(&config);
        assert_eq!(state.catalog_origin, CatalogOrigin::Pending);
        assert!(state.catalog.is_empty());
        assert_eq!(state.catalog_file.as_deref(), Some("~/trucks.json"));
        assert_eq!(state.theme, Theme::default());
    }
}
