//! Detail overlay renderer.
//!
//! A bordered box drawn over the center of the map while a truck picked on
//! the map is selected.

use crate::ui::helpers::{display_width, fit, position_cursor, wrap};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::OverlayInfo;

const MAX_WIDTH: usize = 48;
const MIN_WIDTH: usize = 20;
const CLOSE_HINT: &str = "Esc/Enter: close";

/// Inner text lines of the overlay for an inner width of `inner`.
///
/// The description is wrapped and cut to fit within `max_lines`.
#[must_use]
pub fn overlay_lines(overlay: &OverlayInfo, inner: usize, max_lines: usize) -> Vec<String> {
    let mut lines = vec![
        fit(&format!(" {} {}", overlay.logo, overlay.title), inner),
        fit(
            &format!(" {}  {}  {}", overlay.cuisine, overlay.rating, overlay.popularity),
            inner,
        ),
        " ".repeat(inner),
    ];

    let description_room = max_lines.saturating_sub(lines.len() + 2);
    let mut description = wrap(&overlay.description, inner.saturating_sub(2));
    if description.len() > description_room {
        description.truncate(description_room);
        if let Some(last) = description.last_mut() {
            *last = fit(&format!("{last}…"), inner.saturating_sub(2));
        }
    }
    lines.extend(description.iter().map(|line| fit(&format!(" {line}"), inner)));

    lines.push(" ".repeat(inner));
    let hint_pad = inner.saturating_sub(display_width(CLOSE_HINT) + 1);
    lines.push(fit(&format!("{}{CLOSE_HINT} ", " ".repeat(hint_pad)), inner));
    lines
}

/// Renders the overlay centered within the `height` rows starting at `top`.
pub fn render_overlay(top: usize, height: usize, overlay: &OverlayInfo, theme: &Theme, cols: usize) {
    let width = cols.saturating_sub(4).min(MAX_WIDTH);
    if width < MIN_WIDTH || height < 4 {
        return;
    }
    let inner = width - 2;
    let lines = overlay_lines(overlay, inner, height - 2);
    let box_height = lines.len() + 2;

    let row = top + height.saturating_sub(box_height) / 2;
    let col = (cols - width) / 2 + 1;

    position_cursor(row, col);
    print!("{}", Theme::fg(&theme.colors.overlay_border));
    print!("╭{}╮", "─".repeat(inner));

    for (offset, line) in lines.iter().enumerate() {
        position_cursor(row + 1 + offset, col);
        print!("{}│", Theme::fg(&theme.colors.overlay_border));
        match offset {
            0 => print!("{}{}{line}", Theme::bold(), Theme::fg(&theme.colors.overlay_title)),
            1 => print!("{}{line}", Theme::fg(&theme.colors.rating_fg)),
            _ if offset + 1 == lines.len() => print!("{}{line}", Theme::fg(&theme.colors.text_dim)),
            _ => print!("{}{line}", Theme::fg(&theme.colors.text_normal)),
        }
        print!("{}", Theme::reset());
        print!("{}│", Theme::fg(&theme.colors.overlay_border));
    }

    position_cursor(row + box_height - 1, col);
    print!("╰{}╯", "─".repeat(inner));
    print!("{}", Theme::reset());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overlay() -> OverlayInfo {
        OverlayInfo {
            title: "Burger Boss".to_string(),
            logo: "B".to_string(),
            cuisine: "Burgers".to_string(),
            rating: "★ 4.2".to_string(),
            popularity: "95 views".to_string(),
            description: "Smash burgers, crinkle fries and thick shakes.".to_string(),
        }
    }

    #[test]
    fn lines_have_the_inner_width() {
        let lines = overlay_lines(&overlay(), 30, 20);
        assert!(lines.iter().all(|l| display_width(l) == 30));
        assert!(lines[0].starts_with(" B Burger Boss"));
        assert!(lines[1].contains("★ 4.2"));
        assert!(lines.last().unwrap().trim_end().ends_with(CLOSE_HINT));
    }

    #[test]
    fn long_description_is_cut_to_the_available_rows() {
        let lines = overlay_lines(&overlay(), 20, 7);
        assert_eq!(lines.len(), 7);
        assert!(lines[4].trim_end().ends_with('…'));
    }
}
