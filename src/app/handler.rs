//! Event handling and state transition logic.
//!
//! This module implements the event handler that processes user input, timer
//! ticks, permission results and worker responses, translating them into state
//! changes and action sequences.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the plugin runtime or worker thread
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods
//! 4. Actions are collected and returned for execution
//! 5. While an animation is in flight a single frame timer is requested
//!
//! # Event Types
//!
//! - **Navigation**: `CursorNext`, `CursorPrev`, `ToggleFocus`, `Activate`
//! - **Surface taps**: `SelectFromList`, `SelectFromMap`, `DismissOverlay`
//! - **Filtering**: `SearchMode`, `Char`, `Backspace`, category events, `SetFilter`
//! - **System**: `Tick`, `PermissionResult`, `CancelLocation`
//! - **Worker**: `WorkerResponse` with typed message variants
//!
//! # Example
//!
//! ```rust
//! use truckmap::app::{handle_event, AppState, Event};
//! use truckmap::app::viewport::ViewportSettings;
//! use truckmap::catalog::builtin_catalog;
//! use truckmap::domain::TruckId;
//! use truckmap::ui::Theme;
//!
//! let mut state = AppState::new(builtin_catalog(), Theme::default(), ViewportSettings::default());
//! let (render, actions) = handle_event(&mut state, &Event::SelectFromMap(TruckId(2)))?;
//! assert!(render);
//! assert!(state.overlay_visible());
//! assert_eq!(actions.len(), 1); // frame timer for the pulse
//! # Ok::<(), truckmap::TruckmapError>(())
//! ```

use super::modes::{InputMode, SearchFocus, Surface};
use super::state::CatalogOrigin;
use crate::app::{Action, AppState};
use crate::catalog::builtin_catalog;
use crate::domain::error::Result;
use crate::domain::{Catalog, Cuisine, FilterState, TruckId};
use crate::worker::{WorkerMessage, WorkerResponse};
use std::time::Duration;

/// Seconds between animation frames.
pub const FRAME_INTERVAL: f64 = 1.0 / 30.0;

/// Events triggered by user input, host callbacks, or worker responses.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Moves the cursor of the focused surface forward (wraps).
    CursorNext,
    /// Moves the cursor of the focused surface back (wraps).
    CursorPrev,
    /// Moves keyboard focus between the map and the card list.
    ToggleFocus,
    /// Taps the item under the cursor, or closes an open overlay.
    Activate,
    /// Hides the plugin pane.
    CloseFocus,

    /// Enters search mode with typing focus.
    SearchMode,
    /// Focuses the search input field (from navigating mode).
    FocusSearchBar,
    /// Focuses the filtered results (from typing mode).
    FocusResults,
    /// Exits search mode and clears the search text.
    ExitSearch,
    /// Appends a character to the search text.
    Char(char),
    /// Removes the last character from the search text.
    Backspace,
    /// Dismisses the overlay, else exits search, else clears the filter.
    Escape,

    /// Advances the category chip (Tacos → Burgers → Vegan → none).
    CycleCategory,
    /// Toggles one category chip.
    ToggleCategory(Cuisine),
    /// Clears the category chip.
    ClearCategory,
    /// Replaces the whole filter state.
    SetFilter(FilterState),

    /// A card in the list was tapped.
    SelectFromList(TruckId),
    /// A marker on the map was tapped.
    SelectFromMap(TruckId),
    /// The overlay's close control was used.
    DismissOverlay,

    /// Host timer fired; advances the screen clock.
    Tick {
        /// Time since the timer was scheduled.
        elapsed: Duration,
    },

    /// Result of the host permission request.
    ///
    /// Gates every worker request: catalog file loading and location lookup.
    PermissionResult {
        granted: bool,
    },

    /// Abandons a pending location request.
    CancelLocation,

    /// Wraps a response from the background worker thread.
    WorkerResponse(WorkerResponse),
}

impl Event {
    /// Keyboard navigation and filtering, suppressed while the overlay is open.
    #[must_use]
    pub const fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::CursorNext
                | Self::CursorPrev
                | Self::ToggleFocus
                | Self::SearchMode
                | Self::FocusSearchBar
                | Self::FocusResults
                | Self::Char(_)
                | Self::Backspace
                | Self::CycleCategory
                | Self::ToggleCategory(_)
                | Self::ClearCategory
        )
    }
}

/// Processes an event, mutates application state, and returns whether to
/// re-render plus the actions to execute.
///
/// After the event is applied, a [`Action::ScheduleFrame`] is appended if an
/// animation is in flight and no frame timer is outstanding.
///
/// # Errors
///
/// Returns errors from state mutation methods; none of the current
/// transitions fail.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    let (render, mut actions) = dispatch(state, event)?;

    if state.selection.is_animating() && !state.frame_scheduled {
        tracing::trace!("scheduling animation frame");
        state.frame_scheduled = true;
        actions.push(Action::ScheduleFrame(FRAME_INTERVAL));
    }

    Ok((render, actions))
}

#[allow(clippy::too_many_lines)]
fn dispatch(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    if state.overlay_visible() && event.is_navigation() {
        tracing::debug!("overlay open, ignoring navigation");
        return Ok((false, vec![]));
    }

    match event {
        Event::CursorNext => {
            state.move_cursor_next();
            Ok((true, vec![]))
        }
        Event::CursorPrev => {
            state.move_cursor_prev();
            Ok((true, vec![]))
        }
        Event::ToggleFocus => {
            state.focus = state.focus.toggle();
            tracing::debug!(focus = ?state.focus, "focus toggled");
            Ok((true, vec![]))
        }
        Event::Activate => {
            if state.dismiss_overlay() {
                return Ok((true, vec![]));
            }

            let Some(id) = state.cursor_truck().map(|t| t.id) else {
                tracing::debug!("no truck under cursor");
                return Ok((false, vec![]));
            };

            let selected = match state.focus {
                Surface::List => state.select_from_list(id),
                Surface::Map => state.select_from_map(id),
            };
            Ok((selected, vec![]))
        }
        Event::CloseFocus => {
            state.location.cancel();
            Ok((false, vec![Action::CloseFocus]))
        }

        Event::SearchMode => {
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusSearchBar => {
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            if state.filter.search_text.is_empty() {
                state.input_mode = InputMode::Normal;
            } else {
                state.input_mode = InputMode::Search(SearchFocus::Navigating);
            }
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            exit_search(state);
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if state.input_mode != InputMode::Search(SearchFocus::Typing) {
                return Ok((false, vec![]));
            }
            let mut filter = state.filter.clone();
            filter.search_text.push(*c);
            tracing::trace!(search_text = %filter.search_text, "search text updated");
            state.set_filter_state(filter);
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Search(SearchFocus::Typing) {
                return Ok((false, vec![]));
            }
            let mut filter = state.filter.clone();
            if filter.search_text.pop().is_none() {
                return Ok((false, vec![]));
            }
            state.set_filter_state(filter);
            Ok((true, vec![]))
        }
        Event::Escape => {
            if state.dismiss_overlay() {
                return Ok((true, vec![]));
            }
            if matches!(state.input_mode, InputMode::Search(_)) {
                exit_search(state);
                return Ok((true, vec![]));
            }
            if state.filter.is_empty() {
                return Ok((false, vec![]));
            }
            tracing::debug!("clearing filter");
            state.set_filter_state(FilterState::default());
            Ok((true, vec![]))
        }

        Event::CycleCategory => {
            let filter = FilterState {
                category: Cuisine::cycle(state.filter.category),
                ..state.filter.clone()
            };
            state.set_filter_state(filter);
            Ok((true, vec![]))
        }
        Event::ToggleCategory(cuisine) => {
            let filter = state.filter.toggle_category(*cuisine);
            state.set_filter_state(filter);
            Ok((true, vec![]))
        }
        Event::ClearCategory => {
            if state.filter.category.is_none() {
                return Ok((false, vec![]));
            }
            let filter = FilterState {
                category: None,
                ..state.filter.clone()
            };
            state.set_filter_state(filter);
            Ok((true, vec![]))
        }
        Event::SetFilter(filter) => {
            if &state.filter == filter {
                return Ok((false, vec![]));
            }
            state.set_filter_state(filter.clone());
            Ok((true, vec![]))
        }

        Event::SelectFromList(id) => Ok((state.select_from_list(*id), vec![])),
        Event::SelectFromMap(id) => Ok((state.select_from_map(*id), vec![])),
        Event::DismissOverlay => Ok((state.dismiss_overlay(), vec![])),

        Event::Tick { elapsed } => {
            state.frame_scheduled = false;
            Ok((state.advance_clock(*elapsed), vec![]))
        }

        Event::PermissionResult { granted } => Ok(handle_permission_result(state, *granted)),
        Event::CancelLocation => Ok((state.location.cancel(), vec![])),

        Event::WorkerResponse(response) => Ok(handle_worker_response(state, response)),
    }
}

fn exit_search(state: &mut AppState) {
    tracing::debug!(search_text = %state.filter.search_text, "exiting search mode");
    state.input_mode = InputMode::Normal;
    let filter = FilterState {
        search_text: String::new(),
        ..state.filter.clone()
    };
    state.set_filter_state(filter);
}

/// Starts the configured worker requests, or settles on the fallbacks.
fn handle_permission_result(state: &mut AppState, granted: bool) -> (bool, Vec<Action>) {
    tracing::debug!(granted, "permission result");
    let mut actions = vec![];

    if granted {
        if let Some(path) = state.catalog_file.clone() {
            actions.push(Action::PostToWorker(WorkerMessage::load_catalog(path)));
        }
        if let Some(source) = state.location_source.clone() {
            if !state.location.is_pending() {
                let request_id = state.next_request_id();
                state.location.start(request_id);
                actions.push(Action::PostToWorker(WorkerMessage::resolve_location(request_id, source)));
            }
        }
    } else {
        if state.location_source.is_some() {
            state.location.deny();
        }
        if state.catalog_origin == CatalogOrigin::Pending {
            state.replace_catalog(builtin_catalog(), CatalogOrigin::Fallback);
        }
    }

    (true, actions)
}

fn handle_worker_response(state: &mut AppState, response: &WorkerResponse) -> (bool, Vec<Action>) {
    match response {
        WorkerResponse::CatalogLoaded { trucks } => match Catalog::new(trucks.clone()) {
            Ok(catalog) => {
                if state.catalog_origin == CatalogOrigin::File && state.catalog == catalog {
                    tracing::debug!("catalog unchanged, skipping render");
                    return (false, vec![]);
                }
                state.replace_catalog(catalog, CatalogOrigin::File);
                (true, vec![])
            }
            Err(e) => {
                tracing::error!(error = %e, "worker returned an invalid catalog");
                state.replace_catalog(builtin_catalog(), CatalogOrigin::Fallback);
                (true, vec![])
            }
        },
        WorkerResponse::CatalogFailed { message } => {
            tracing::error!("Catalog load failed: {}", message);
            state.replace_catalog(builtin_catalog(), CatalogOrigin::Fallback);
            (true, vec![])
        }
        WorkerResponse::LocationResolved {
            request_id,
            permission,
            coordinate,
        } => {
            let was_pending = state.location.is_pending();
            if let Some(coordinate) = state.location.complete(*request_id, *permission, *coordinate) {
                state.selection.seed_viewport(coordinate);
            }
            (was_pending && !state.location.is_pending(), vec![])
        }
        WorkerResponse::Error { message } => {
            tracing::error!("Worker error: {}", message);
            if state.catalog_origin == CatalogOrigin::Pending {
                state.replace_catalog(builtin_catalog(), CatalogOrigin::Fallback);
            }
            (true, vec![])
        }
    }
}
