//! Zellij plugin wrapper and entry point.
//!
//! This module is the thin integration layer between the Truckmap library and
//! the Zellij plugin system. It implements `ZellijPlugin` and `ZellijWorker`,
//! translates host events into library events and executes the returned
//! actions.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────┐
//! │   Zellij Main Thread    │
//! │  ┌──────────────────┐   │
//! │  │  State (plugin)  │   │  ← Screen state, event handling
//! │  └──────────────────┘   │
//! │          │              │
//! │          │ IPC          │
//! │          ▼              │
//! │  ┌──────────────────┐   │
//! │  │  Worker          │   │  ← Catalog and location file reads
//! │  │ (worker thread)  │   │
//! │  └──────────────────┘   │
//! └─────────────────────────┘
//! ```
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Register for Key, `Timer`, `CustomMessage` and permission events
//! 3. **Permission**: Ask the worker for the catalog and the device location
//! 4. **Update**: Handle events, delegate to library layer, schedule frames
//! 5. **Render**: Call library render function
//!
//! # Keybindings
//!
//! Global (all modes):
//! - `Ctrl+n`: Next truck
//! - `Ctrl+p`: Previous truck
//!
//! In normal mode and while navigating search results:
//! - `l`/`j`/`Right`/`Down`: Next truck
//! - `h`/`k`/`Left`/`Up`: Previous truck
//! - `Tab`: Switch between map and cards
//! - `Enter`: Tap the truck under the cursor, or close the detail overlay
//! - `/`: Search
//! - `c`: Cycle cuisine chip
//! - `1`-`3`: Toggle a cuisine chip, `0`: clear it
//! - `Esc`: Close overlay, leave search, clear filters
//! - `q`: Close plugin (normal mode)
//!
//! While typing a search:
//! - Characters and `Backspace` edit the query
//! - `Enter`/`Down`: Move to the results
//! - `Esc`: Leave search

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use zellij_tile::prelude::*;
use zellij_tile::shim::{post_message_to, post_message_to_plugin};

use truckmap::worker::{TruckmapWorker, WorkerMessage, WorkerResponse, WORKER_MESSAGE_NAME};
use truckmap::{handle_event, Action, Config, Cuisine, Event, InputMode, SearchFocus};

register_plugin!(State);
register_worker!(Worker, truckmap_worker, TRUCKMAP_WORKER);

/// Plugin state wrapper.
///
/// Wraps the library's `AppState` with Zellij-specific concerns like worker
/// communication.
struct State {
    /// Core application state from library layer.
    app: truckmap::AppState,

    /// Worker thread identifier for IPC messaging.
    worker_name: String,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: truckmap::initialize(&Config::default()),
            worker_name: WORKER_MESSAGE_NAME.to_string(),
        }
    }
}

impl ZellijPlugin for State {
    /// Initializes the plugin on load.
    ///
    /// # Permissions
    ///
    /// Requests:
    /// - `ReadApplicationState`: Read pane state
    /// - `ChangeApplicationState`: Hide the plugin pane
    /// - `FullHdAccess`: Read the catalog and location files
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        truckmap::observability::init_tracing(&config);

        let _guard = tracing::debug_span!("plugin_load").entered();

        tracing::debug!(?config, "parsed configuration");
        self.app = truckmap::initialize(&config);

        tracing::debug!("requesting permissions");
        request_permission(&[
            PermissionType::ReadApplicationState,
            PermissionType::ChangeApplicationState,
            PermissionType::FullHdAccess,
        ]);

        subscribe(&[
            EventType::Key,
            EventType::Timer,
            EventType::CustomMessage,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Handles incoming Zellij events.
    ///
    /// Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let span = tracing::trace_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Timer(elapsed) => Event::Tick {
                elapsed: Duration::try_from_secs_f64(elapsed).unwrap_or_default(),
            },
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match self.map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                let granted = matches!(status, PermissionStatus::Granted);
                if !granted {
                    tracing::warn!("permissions denied - using built-in catalog");
                }
                Event::PermissionResult { granted }
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::trace!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled"
                );
                for a in actions {
                    self.execute_action(&a);
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        truckmap::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if key.bare_key == BareKey::Char('n') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::CursorNext);
        }
        if key.bare_key == BareKey::Char('p') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::CursorPrev);
        }

        if self.app.input_mode == InputMode::Search(SearchFocus::Typing) {
            return Some(match key.bare_key {
                BareKey::Esc => Event::Escape,
                BareKey::Enter | BareKey::Down => Event::FocusResults,
                BareKey::Backspace => Event::Backspace,
                BareKey::Right => Event::CursorNext,
                BareKey::Left => Event::CursorPrev,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            });
        }

        Some(match key.bare_key {
            BareKey::Right | BareKey::Down | BareKey::Char('l' | 'j') => Event::CursorNext,
            BareKey::Left | BareKey::Up | BareKey::Char('h' | 'k') => Event::CursorPrev,
            BareKey::Tab => Event::ToggleFocus,
            BareKey::Enter => Event::Activate,
            BareKey::Esc => Event::Escape,
            BareKey::Char('/') => match self.app.input_mode {
                InputMode::Normal => Event::SearchMode,
                InputMode::Search(_) => Event::FocusSearchBar,
            },
            BareKey::Char('c') => Event::CycleCategory,
            BareKey::Char('0') => Event::ClearCategory,
            BareKey::Char(c @ '1'..='9') => {
                let index = c.to_digit(10)? as usize - 1;
                Event::ToggleCategory(*Cuisine::ALL.get(index)?)
            }
            BareKey::Char('q') if self.app.input_mode == InputMode::Normal => Event::CloseFocus,
            _ => return None,
        })
    }

    /// Maps custom message events to application events.
    fn map_custom_message_event(&self, message: &str, payload: &str) -> Option<Event> {
        tracing::debug!(message_name = %message, payload_len = payload.len(), "custom message event");

        if message == self.worker_name {
            match serde_json::from_str::<WorkerResponse>(payload) {
                Ok(response) => {
                    tracing::debug!(response = ?response, "worker response received");
                    Some(Event::WorkerResponse(response))
                }
                Err(e) => {
                    tracing::debug!(error = %e, "failed to deserialize worker response");
                    None
                }
            }
        } else {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            None
        }
    }

    /// Posts a message to the worker thread.
    ///
    /// Serialization errors are logged, not propagated.
    fn post_worker_message(&self, message: &WorkerMessage) {
        match serde_json::to_string(&message) {
            Ok(payload) => {
                tracing::debug!(payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(self.worker_name.clone()),
                    name: self.worker_name.clone(),
                    payload,
                });
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to serialize worker message");
            }
        }
    }

    /// Executes an action returned from event handling.
    #[tracing::instrument(level = "trace", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::PostToWorker(ref message) => {
                self.post_worker_message(message);
            }
            Action::ScheduleFrame(seconds) => {
                set_timeout(*seconds);
            }
        }
    }
}

/// Worker thread entry point.
///
/// Wraps [`TruckmapWorker`] so the library stays free of Zellij shim calls.
/// Tracing is set up by the library from the filter the plugin forwards with
/// each traced message.
#[derive(Default, Serialize, Deserialize)]
struct Worker {
    #[serde(skip)]
    inner: TruckmapWorker,
}

impl ZellijWorker<'_> for Worker {
    /// Handles a serialized [`WorkerMessage`] and posts the response back
    /// under the same message name.
    fn on_message(&mut self, message: String, payload: String) {
        if let Some(payload) = self.inner.handle_payload(&payload) {
            post_message_to_plugin(PluginMessage {
                name: message,
                payload,
                worker_name: None,
            });
        }
    }
}
