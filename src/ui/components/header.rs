//! Header component renderer.
//!
//! Renders the title bar: the title on the left and the catalog/location
//! status on the right, using the header colors.

use crate::ui::helpers::{display_width, fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header bar at `row` and returns the next free row.
///
/// ```text
/// [title][padding][status ]
/// ```
///
/// The status is dropped when both do not fit.
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title_len = display_width(&header.title);
    let status = format!("{} ", header.status);
    let status_len = display_width(&status);

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    if title_len + status_len < cols {
        print!("{}", header.title);
        print!("{}", " ".repeat(cols - title_len - status_len));
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_dim));
        if let Some(bg) = &theme.colors.header_bg {
            print!("{}", Theme::bg(bg));
        }
        print!("{status}");
    } else {
        print!("{}", fit(&header.title, cols));
    }

    print!("{}", Theme::reset());
    row + 1
}
