//! Map surface renderer.
//!
//! The map is a character grid: faint dots for orientation, an `@` for the
//! device, and one marker per visible truck at its projected cell. Markers
//! grow with their emphasis scale (see [`marker_glyph`]). The grid is built
//! first and printed row by row, emitting a color escape only when the color
//! changes.

use crate::ui::helpers::{display_width, marker_glyph, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{MapMarker, MapView};

const GRID_ROW_STEP: usize = 2;
const GRID_COL_STEP: usize = 6;
const GRID_DOT: char = '·';
const DEVICE: char = '@';
const CURSOR: char = '▸';

/// One drawn cell of the map grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell<'a> {
    pub ch: char,
    pub color: &'a str,
    pub bold: bool,
}

/// Builds the `map.rows` x `map.cols` grid of cells.
///
/// Markers are drawn in paint order: plain ones first, then the selected one,
/// then any raised by a pulse, so the emphasized marker is never hidden.
#[must_use]
pub fn build_grid<'a>(map: &MapView, theme: &'a Theme) -> Vec<Vec<Cell<'a>>> {
    let blank = Cell {
        ch: ' ',
        color: &theme.colors.map_grid,
        bold: false,
    };
    let mut grid: Vec<Vec<Cell<'a>>> = (0..map.rows)
        .map(|r| {
            (0..map.cols)
                .map(|c| {
                    if r % GRID_ROW_STEP == 0 && c % GRID_COL_STEP == 0 {
                        Cell { ch: GRID_DOT, ..blank }
                    } else {
                        blank
                    }
                })
                .collect()
        })
        .collect();

    if let Some((row, col)) = map.device {
        put(&mut grid, row, col, DEVICE, &theme.colors.device_fg, true);
    }

    let mut markers: Vec<&MapMarker> = map.markers.iter().collect();
    markers.sort_by_key(|m| (m.scale > 1.0, m.is_selected, m.has_cursor));

    for marker in markers {
        let glyph = marker_glyph(&marker.logo, marker.scale);
        let width = display_width(&glyph);
        let start = marker.col.saturating_sub(width / 2).min(map.cols.saturating_sub(width));

        let color = if marker.scale > 1.0 {
            &theme.colors.marker_emphasis_fg
        } else if marker.is_selected {
            &theme.colors.marker_selected_fg
        } else {
            &theme.colors.marker_fg
        };
        let bold = marker.is_selected || marker.has_cursor;

        for (offset, ch) in glyph.chars().enumerate() {
            put(&mut grid, marker.row, start + offset, ch, color, bold);
        }
        if marker.has_cursor && start > 0 {
            put(&mut grid, marker.row, start - 1, CURSOR, &theme.colors.cursor_fg, true);
        }
    }

    if let Some(last) = grid.last_mut() {
        let width = display_width(&map.caption);
        if width <= last.len() {
            let start = last.len() - width;
            for (offset, ch) in map.caption.chars().enumerate() {
                last[start + offset] = Cell {
                    ch,
                    color: &theme.colors.text_dim,
                    bold: false,
                };
            }
        }
    }

    grid
}

fn put<'a>(grid: &mut [Vec<Cell<'a>>], row: usize, col: usize, ch: char, color: &'a str, bold: bool) {
    if let Some(cell) = grid.get_mut(row).and_then(|r| r.get_mut(col)) {
        *cell = Cell { ch, color, bold };
    }
}

/// Renders the map starting at `row` and returns the next free row.
pub fn render_map(row: usize, map: &MapView, theme: &Theme) -> usize {
    let grid = build_grid(map, theme);

    for (offset, cells) in grid.iter().enumerate() {
        position_cursor(row + offset, 1);
        let mut current: Option<(&str, bool)> = None;
        for cell in cells {
            if current != Some((cell.color, cell.bold)) {
                print!("{}", Theme::reset());
                if cell.bold {
                    print!("{}", Theme::bold());
                }
                print!("{}", Theme::fg(cell.color));
                current = Some((cell.color, cell.bold));
            }
            print!("{}", cell.ch);
        }
        print!("{}", Theme::reset());
    }

    row + map.rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TruckId;

    fn marker(id: i64, row: usize, col: usize, scale: f64) -> MapMarker {
        MapMarker {
            id: TruckId(id),
            row,
            col,
            logo: "T".to_string(),
            scale,
            is_selected: false,
            has_cursor: false,
        }
    }

    fn row_text(grid: &[Vec<Cell<'_>>], row: usize) -> String {
        grid[row].iter().map(|c| c.ch).collect()
    }

    #[test]
    fn markers_land_on_their_cells() {
        let theme = Theme::default();
        let map = MapView {
            rows: 4,
            cols: 12,
            markers: vec![marker(1, 1, 3, 1.0), marker(2, 1, 8, 1.5)],
            device: Some((3, 0)),
            caption: String::new(),
        };
        let grid = build_grid(&map, &theme);

        assert_eq!(row_text(&grid, 1), "   T   [T]  ");
        assert_eq!(grid[1][8].color, theme.colors.marker_emphasis_fg);
        assert_eq!(grid[3][0].ch, DEVICE);
        assert_eq!(grid[0][6].ch, GRID_DOT);
    }

    #[test]
    fn cursor_and_caption() {
        let theme = Theme::default();
        let mut focused = marker(1, 0, 5, 1.0);
        focused.has_cursor = true;
        let map = MapView {
            rows: 2,
            cols: 10,
            markers: vec![focused],
            device: None,
            caption: " 1.0 ".to_string(),
        };
        let grid = build_grid(&map, &theme);
        assert_eq!(grid[0][4].ch, CURSOR);
        assert!(grid[0][5].bold);
        assert!(row_text(&grid, 1).ends_with(" 1.0 "));
    }

    #[test]
    fn wide_marker_is_kept_inside_the_grid() {
        let theme = Theme::default();
        let map = MapView {
            rows: 1,
            cols: 5,
            markers: vec![marker(1, 0, 4, 1.5)],
            device: None,
            caption: String::new(),
        };
        let grid = build_grid(&map, &theme);
        assert_eq!(row_text(&grid, 0), "· [T]");
        assert_eq!(grid[0][0].ch, GRID_DOT);
    }
}
