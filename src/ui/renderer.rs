//! Top-level rendering coordinator.
//!
//! The renderer follows a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: Delegate to the component renderers
//!
//! # Example
//!
//! ```rust,no_run
//! use truckmap::app::viewport::ViewportSettings;
//! use truckmap::app::AppState;
//! use truckmap::catalog::builtin_catalog;
//! use truckmap::ui::{render, Theme};
//!
//! let state = AppState::new(builtin_catalog(), Theme::default(), ViewportSettings::default());
//! render(&state, 24, 80); // Render to stdout
//! ```

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI to stdout.
///
/// Prints ANSI-styled output using absolute cursor positioning. Does not
/// clear the screen.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let _span = tracing::trace_span!("render", rows, cols).entered();
    let viewmodel = state.compute_viewmodel(rows, cols);
    components::render_screen(&viewmodel, &state.theme, cols);
}
