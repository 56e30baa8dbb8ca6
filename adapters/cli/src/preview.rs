//! Terminal preview that outlines structural tiles with box-drawing glyphs.

use ghost_maze_core::{Cell, CellCoord, Grid, TileVariant};
use ghost_maze_system_classification::TileMap;

/// Renders `grid` using the variants in `tiles`, one line per row.
pub(crate) fn render(grid: &Grid, tiles: &TileMap) -> String {
    let mut out = String::with_capacity(grid.len() * 3 + grid.rows() as usize);
    for row in 0..grid.rows() {
        for column in 0..grid.columns() {
            let coord = CellCoord::new(row, column);
            let cell = grid.cell(coord).unwrap_or(Cell::Empty);
            out.push(glyph(cell, tiles.get(coord)));
        }
        out.push('\n');
    }
    out
}

fn glyph(cell: Cell, variant: Option<TileVariant>) -> char {
    match (cell, variant) {
        (Cell::GhostDoor, _) => '═',
        (Cell::Empty | Cell::Corridor, _) | (_, None) => ' ',
        (Cell::GhostBox, Some(TileVariant::Other)) => '░',
        (_, Some(variant)) => outline(variant),
    }
}

fn outline(variant: TileVariant) -> char {
    match variant {
        TileVariant::TopLeft => '┌',
        TileVariant::Top | TileVariant::Bottom => '─',
        TileVariant::TopRight => '┐',
        TileVariant::Right | TileVariant::Left => '│',
        TileVariant::BottomRight => '┘',
        TileVariant::BottomLeft => '└',
        TileVariant::Other => '█',
    }
}
