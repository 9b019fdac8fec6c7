//! Search bar and category chip renderers.

use crate::app::modes::Surface;
use crate::ui::helpers::{display_width, fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ChipInfo, SearchBarInfo};

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 5;

/// Renders the 3-line search input box at `row` and returns the next free row.
///
/// ```text
/// [margin] ┌──────────────────┐ [margin]
/// [margin] │ Search: veg▏     │ [margin]
/// [margin] └──────────────────┘ [margin]
/// ```
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let caret = if search.is_typing { "▏" } else { "" };
    let search_text = fit(&format!(" Search: {}{caret}", search.query), inner_width);

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("│");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{search_text}");
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}

/// Renders the chip row with the focused surface on the right, and returns
/// the next free row.
///
/// ```text
///  1 Tacos  2 Burgers  3 Vegan                    focus: list
/// ```
pub fn render_chips(row: usize, chips: &[ChipInfo], focus: Surface, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!(" ");
    let mut used = 1;

    for chip in chips {
        let label = format!(" {} {} ", chip.key, chip.label);
        let width = display_width(&label) + 1;
        if used + width > cols {
            break;
        }
        if chip.is_active {
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(&theme.colors.chip_active_fg));
            print!("{}", Theme::bg(&theme.colors.chip_active_bg));
        } else {
            print!("{}", Theme::fg(&theme.colors.chip_fg));
        }
        print!("{label}");
        print!("{} ", Theme::reset());
        used += width;
    }

    let focus_label = match focus {
        Surface::Map => "focus: map ",
        Surface::List => "focus: list ",
    };
    let focus_width = display_width(focus_label);
    if used + focus_width <= cols {
        print!("{}", " ".repeat(cols - used - focus_width));
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{focus_label}");
        print!("{}", Theme::reset());
    } else {
        print!("{}", " ".repeat(cols.saturating_sub(used)));
    }

    row + 1
}
