//! User interface rendering layer with component-based architecture.
//!
//! This module turns application state into ANSI-styled terminal output
//! through composable rendering components, with TOML theme support.
//!
//! # Architecture
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (highlighting, widths, markers)
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    CardItem, ChipInfo, EmptyState, FooterInfo, HeaderInfo, MapMarker, MapView, OverlayInfo, SearchBarInfo,
    UIViewModel,
};
