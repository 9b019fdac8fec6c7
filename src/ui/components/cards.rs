//! Horizontal card strip renderer.
//!
//! Each card is a bordered box [`CARD_WIDTH`] columns wide and
//! [`CARD_HEIGHT`] rows tall:
//!
//! ```text
//! ╭────────────────────────╮
//! │ T Taco Town            │
//! │ Tacos          ★ 4.5   │
//! │ 120 views              │
//! ╰────────────────────────╯
//! ```
//!
//! The card under the list cursor gets a heavy border in the cursor color;
//! the selected card is drawn in the selection colors.

use crate::app::state::{CARD_HEIGHT, CARD_WIDTH};
use crate::ui::helpers::{display_width, fit, position_cursor, render_highlighted_text};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::CardItem;

const CARD_GAP: usize = 1;

/// Inner text lines of a card, each exactly `CARD_WIDTH - 2` wide.
///
/// The first line is returned as `(prefix, name, suffix)` so the renderer can
/// highlight inside the name.
#[must_use]
pub fn card_lines(card: &CardItem) -> ((String, String, String), String, String) {
    let inner = CARD_WIDTH - 2;

    let prefix = format!(" {} ", card.logo);
    let name_width = inner.saturating_sub(display_width(&prefix) + 1);
    let name = fit(&card.name, name_width).trim_end().to_string();
    let suffix = " ".repeat(inner - display_width(&prefix) - display_width(&name));

    let rating_width = display_width(&card.rating) + 1;
    let details = format!(
        " {}{}",
        fit(&card.cuisine, inner.saturating_sub(rating_width + 1)),
        fit(&card.rating, rating_width)
    );
    let popularity = fit(&format!(" {}", card.popularity), inner);

    ((prefix, name, suffix), fit(&details, inner), popularity)
}

/// Renders the card strip at `row` and returns the next free row.
///
/// Cards are centered horizontally; rows below the cards are cleared.
pub fn render_cards(row: usize, cards: &[CardItem], theme: &Theme, cols: usize) -> usize {
    let strip_width = cards.len() * (CARD_WIDTH + CARD_GAP);
    let left = cols.saturating_sub(strip_width) / 2 + 1;

    for line in 0..CARD_HEIGHT {
        position_cursor(row + line, 1);
        print!("{}", " ".repeat(cols));
    }

    for (index, card) in cards.iter().enumerate() {
        let col = left + index * (CARD_WIDTH + CARD_GAP);
        render_card(row, col, card, theme);
    }

    row + CARD_HEIGHT
}

fn render_card(row: usize, col: usize, card: &CardItem, theme: &Theme) {
    let inner = CARD_WIDTH - 2;
    let (top, side, bottom) = if card.has_cursor {
        (("┏", "┓"), "┃", ("┗", "┛"))
    } else {
        (("╭", "╮"), "│", ("╰", "╯"))
    };
    let horizontal = if card.has_cursor { "━" } else { "─" };
    let border = if card.has_cursor {
        &theme.colors.cursor_fg
    } else {
        &theme.colors.border
    };
    let (text_fg, text_bg) = if card.is_selected {
        (&theme.colors.selection_fg, Some(theme.colors.selection_bg.as_str()))
    } else {
        (&theme.colors.text_normal, None)
    };

    let ((prefix, name, suffix), details, popularity) = card_lines(card);

    position_cursor(row, col);
    print!("{}{}{}{}", Theme::fg(border), top.0, horizontal.repeat(inner), top.1);

    let open_line = |line: usize| {
        position_cursor(row + line, col);
        print!("{}{side}", Theme::fg(border));
        print!("{}", Theme::fg(text_fg));
        if let Some(bg) = text_bg {
            print!("{}", Theme::bg(bg));
        }
    };
    let close_line = || {
        print!("{}", Theme::reset());
        print!("{}{side}", Theme::fg(border));
    };

    open_line(1);
    print!("{}{prefix}", Theme::bold());
    render_highlighted_text(&name, &card.highlight_ranges, theme, text_fg, text_bg);
    print!("{suffix}");
    close_line();

    open_line(2);
    let rating_at = details.rfind(&card.rating).unwrap_or(details.len());
    print!("{}", &details[..rating_at]);
    if text_bg.is_none() {
        print!("{}", Theme::fg(&theme.colors.rating_fg));
    }
    print!("{}", &details[rating_at..]);
    close_line();

    open_line(3);
    print!("{}{popularity}", Theme::dim());
    close_line();

    position_cursor(row + 4, col);
    print!("{}{}{}{}", Theme::fg(border), bottom.0, horizontal.repeat(inner), bottom.1);
    print!("{}", Theme::reset());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TruckId;

    fn card(name: &str) -> CardItem {
        CardItem {
            id: TruckId(1),
            name: name.to_string(),
            logo: "T".to_string(),
            cuisine: "Tacos".to_string(),
            rating: "★ 4.5".to_string(),
            popularity: "120 views".to_string(),
            is_selected: false,
            has_cursor: false,
            highlight_ranges: vec![],
        }
    }

    #[test]
    fn card_lines_fill_the_inner_width() {
        let ((prefix, name, suffix), details, popularity) = card_lines(&card("Taco Town"));
        let inner = CARD_WIDTH - 2;

        assert_eq!(prefix, " T ");
        assert_eq!(name, "Taco Town");
        assert_eq!(display_width(&prefix) + display_width(&name) + display_width(&suffix), inner);
        assert_eq!(display_width(&details), inner);
        assert!(details.starts_with(" Tacos"));
        assert!(details.trim_end().ends_with("★ 4.5"));
        assert_eq!(popularity.trim_end(), " 120 views");
    }

    #[test]
    fn long_names_are_cut() {
        let ((_, name, _), _, _) = card_lines(&card("The Extremely Long Truck Name"));
        assert!(name.ends_with('…'));
        assert!(display_width(&name) <= CARD_WIDTH - 6);
    }
}
