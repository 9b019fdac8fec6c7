//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the plugin runtime (main.rs) and the domain,
//! catalog and worker layers. It owns the screen's state machine and the
//! animation handles the selection drives.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! Keys/Timer/Permissions → Events → Event Handler → State Mutations → Actions → Side Effects
//!                                         ↑                                  ↓
//!                                         └──────── Worker Responses ────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and frame scheduling
//! - [`modes`]: Input mode and surface focus types
//! - [`state`]: Central state container and view model computation
//! - [`selection`]: Selection synchronization state machine
//! - [`viewport`]: Map region ownership and animated transitions
//! - [`emphasis`]: Per-truck marker pulse animation
//! - [`task`]: One-shot location request lifecycle
//!
//! # Example
//!
//! ```rust
//! use truckmap::app::{handle_event, AppState, Event};
//! use truckmap::app::viewport::ViewportSettings;
//! use truckmap::catalog::builtin_catalog;
//! use truckmap::ui::Theme;
//!
//! let mut state = AppState::new(builtin_catalog(), Theme::default(), ViewportSettings::default());
//! let (render, _actions) = handle_event(&mut state, &Event::CursorNext)?;
//! assert!(render);
//! # Ok::<(), truckmap::TruckmapError>(())
//! ```

pub mod actions;
pub mod emphasis;
pub mod handler;
pub mod modes;
pub mod selection;
pub mod state;
pub mod task;
pub mod viewport;

#[cfg(test)]
mod scenarios;

pub use actions::Action;
pub use emphasis::EmphasisAnimator;
pub use handler::{handle_event, Event, FRAME_INTERVAL};
pub use modes::{InputMode, SearchFocus, Surface};
pub use selection::{ListScroll, SelectionCoordinator};
pub use state::{AppState, CatalogOrigin};
pub use task::LocationTask;
pub use viewport::{ViewportController, ViewportSettings};
