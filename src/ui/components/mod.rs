//! Composable UI component renderers.
//!
//! Each component renders one part of the screen at a given row and returns
//! the next free row, so the layout is a straight sequence of calls.
//!
//! # Components
//!
//! - [`header`]: Title bar with catalog and location status
//! - [`search`]: Search input box and category chips
//! - [`map`]: Character-grid map with markers
//! - [`overlay`]: Detail box drawn over the map
//! - [`cards`]: Horizontal card strip
//! - [`empty`]: Message shown in place of the card strip
//! - [`footer`]: Keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Search Bar - 3 lines, search mode only]
//! [Chips]
//! [Map - remaining rows, overlay on top]
//! [Border]
//! [Cards or Empty State - 5 lines]
//! [Border]
//! [Footer]
//! ```

pub mod cards;
pub mod empty;
pub mod footer;
pub mod header;
pub mod map;
pub mod overlay;
pub mod search;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use cards::render_cards;
use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use map::render_map;
use overlay::render_overlay;
use search::{render_chips, render_search_bar};

/// Renders a horizontal border line at `row` and returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the whole screen.
///
/// The map height comes from the view model, which was computed for the same
/// pane size, so the footer lands on the last row.
pub fn render_screen(vm: &UIViewModel, theme: &Theme, cols: usize) {
    let mut current_row = 2; // Start at row 2 (skip blank line at row 1)

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    if let Some(search) = &vm.search_bar {
        current_row = render_search_bar(current_row, search, theme, cols);
    }
    current_row = render_chips(current_row, &vm.chips, vm.focus, theme, cols);

    let map_top = current_row;
    current_row = render_map(current_row, &vm.map, theme);
    if let Some(overlay) = &vm.overlay {
        render_overlay(map_top, vm.map.rows, overlay, theme, cols);
    }

    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = match &vm.empty_state {
        Some(empty) => render_empty_state(current_row, empty, theme, cols),
        None => render_cards(current_row, &vm.cards, theme, cols),
    };
    current_row = render_border(current_row, &theme.colors.border, cols);
    render_footer(current_row, &vm.footer, theme, cols);
}
