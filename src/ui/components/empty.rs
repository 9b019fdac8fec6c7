//! Empty state component renderer.
//!
//! Shown in place of the card strip when there is no card to draw: the
//! catalog is still loading, is empty, or nothing passes the filter.

use crate::app::state::CARD_HEIGHT;
use crate::ui::helpers::{display_width, fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the empty state in the card strip starting at `row` and returns
/// the next free row.
///
/// ```text
/// [blank line]
/// [left padding] MESSAGE [right padding]
/// [left padding] subtitle [right padding]
/// [blank lines]
/// ```
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    for line in 0..CARD_HEIGHT {
        position_cursor(row + line, 1);
        print!("{}", " ".repeat(cols));
    }

    let message = fit(&empty.message, display_width(&empty.message).min(cols));
    let msg_padding = cols.saturating_sub(display_width(&message)) / 2;

    position_cursor(row + 1, 1 + msg_padding);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.empty_state_fg));
    print!("{message}");
    print!("{}", Theme::reset());

    let subtitle = fit(&empty.subtitle, display_width(&empty.subtitle).min(cols));
    let sub_padding = cols.saturating_sub(display_width(&subtitle)) / 2;

    position_cursor(row + 2, 1 + sub_padding);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{subtitle}");
    print!("{}", Theme::reset());

    row + CARD_HEIGHT
}
