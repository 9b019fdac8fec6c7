//! Shared rendering utilities and helpers.
//!
//! Low-level helpers used across UI components: cursor positioning, match
//! highlighting, and the character-width arithmetic every fixed-width
//! component relies on. Widths are counted in characters, not bytes, so
//! glyphs like `★` and `…` pad correctly.

use crate::ui::theme::Theme;

/// Scale above which a marker is drawn with brackets.
const LARGE_MARKER_SCALE: f64 = 1.35;

/// Scale above which a marker is drawn with parentheses.
const MEDIUM_MARKER_SCALE: f64 = 1.15;

/// Positions the cursor at a specific row and column.
///
/// Uses ANSI escape sequence `\u{1b}[{row};{col}H`. Coordinates are 1-indexed.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of terminal columns `text` occupies, one per character.
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.chars().count()
}

/// Truncates or right-pads `text` to exactly `width` characters.
///
/// ```rust
/// use truckmap::ui::helpers::fit;
///
/// assert_eq!(fit("Taco", 6), "Taco  ");
/// assert_eq!(fit("Burger Boss", 6), "Burge…");
/// ```
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let len = display_width(text);
    if len <= width {
        let mut out = text.to_string();
        out.push_str(&" ".repeat(width - len));
        return out;
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

/// Greedy word wrap to lines of at most `width` characters.
///
/// Words longer than `width` are cut with [`fit`].
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let word = if display_width(word) > width {
            fit(word, width)
        } else {
            word.to_string()
        };

        if line.is_empty() {
            line = word;
        } else if display_width(&line) + 1 + display_width(&word) <= width {
            line.push(' ');
            line.push_str(&word);
        } else {
            lines.push(std::mem::replace(&mut line, word));
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Marker text for a logo at the given emphasis scale.
///
/// The terminal cannot scale a glyph, so growth is shown by framing it:
/// `T` at rest, `(T)` while growing, `[T]` near the peak.
///
/// ```rust
/// use truckmap::ui::helpers::marker_glyph;
///
/// assert_eq!(marker_glyph("T", 1.0), "T");
/// assert_eq!(marker_glyph("T", 1.5), "[T]");
/// ```
#[must_use]
pub fn marker_glyph(logo: &str, scale: f64) -> String {
    if scale >= LARGE_MARKER_SCALE {
        format!("[{logo}]")
    } else if scale >= MEDIUM_MARKER_SCALE {
        format!("({logo})")
    } else {
        logo.to_string()
    }
}

/// Renders text with highlighted character ranges for search matches.
///
/// Ranges use character indices with an exclusive end. After each highlighted
/// section the `restore_fg` color (and `restore_bg`, if any) is re-applied so
/// the surrounding style continues.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    restore_fg: &str,
    restore_bg: Option<&str>,
) {
    if ranges.is_empty() {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start > current_pos {
            let normal_section: String = chars[current_pos..start].iter().collect();
            print!("{normal_section}");
        }

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());

        print!("{}", Theme::fg(restore_fg));
        if let Some(bg) = restore_bg {
            print!("{}", Theme::bg(bg));
        }

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_counts_characters() {
        assert_eq!(fit("★ 4.5", 6), "★ 4.5 ");
        assert_eq!(fit("abc", 0), "");
        assert_eq!(display_width(&fit("Crème Brûlée", 5)), 5);
    }

    #[test]
    fn wrap_breaks_on_words() {
        assert_eq!(
            wrap("Smash burgers, crinkle fries and thick shakes.", 16),
            vec!["Smash burgers,", "crinkle fries", "and thick", "shakes."]
        );
        assert_eq!(wrap("supercalifragilistic", 6), vec!["super…"]);
        assert!(wrap("   ", 10).is_empty());
    }

    #[test]
    fn marker_grows_with_scale() {
        assert_eq!(marker_glyph("B", 1.0), "B");
        assert_eq!(marker_glyph("B", 1.2), "(B)");
        assert_eq!(marker_glyph("B", 1.35), "[B]");
    }
}
