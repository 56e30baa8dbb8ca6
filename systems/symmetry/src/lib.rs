#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure geometry that expands a carved half-grid into a full level.

use ghost_maze_core::{Cell, CellCoord, Grid};

/// Expands a half-grid into a level twice as tall and twice as wide.
///
/// The half-grid lands in the far quadrant with corridor markers collapsed
/// to empty floor. That quadrant is reflected across the vertical centre
/// line, and the resulting lower half is reflected across the horizontal
/// centre line. The result is unchanged by a 180° rotation about its centre.
#[must_use]
pub fn mirror(half: &Grid) -> Grid {
    let (half_rows, half_columns) = half.dimensions();
    let rows = half_rows * 2;
    let columns = half_columns * 2;
    let mut full = Grid::empty(rows, columns);

    for (coord, cell) in half.iter() {
        let cell = if cell == Cell::Corridor {
            Cell::Empty
        } else {
            cell
        };
        full.set(
            CellCoord::new(half_rows + coord.row(), half_columns + coord.column()),
            cell,
        );
    }

    for row in half_rows..rows {
        for column in 0..half_columns {
            let source = CellCoord::new(row, columns - 1 - column);
            if let Some(cell) = full.cell(source) {
                full.set(CellCoord::new(row, column), cell);
            }
        }
    }

    for row in 0..half_rows {
        for column in 0..columns {
            let source = CellCoord::new(rows - 1 - row, column);
            if let Some(cell) = full.cell(source) {
                full.set(CellCoord::new(row, column), cell);
            }
        }
    }

    full
}
