#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Acceptance checks applied to every candidate level.
//!
//! A candidate passes when its free-space fraction lies inside the configured
//! bounds and every free cell can reach every other free cell with
//! four-directional moves. Ghost compartment and door cells count as free for
//! both checks.

use ghost_maze_core::{CellCoord, Direction, Grid, LevelConfig};
use thiserror::Error;

/// Closed interval of accepted free-space fractions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DensityBounds {
    min: f64,
    max: f64,
}

impl DensityBounds {
    /// Creates bounds from explicit lower and upper fractions.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Extracts the bounds from a level configuration.
    #[must_use]
    pub const fn from_config(config: &LevelConfig) -> Self {
        Self::new(config.min_density, config.max_density)
    }

    /// Lowest accepted fraction.
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Highest accepted fraction.
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }
}

/// Measurements gathered from an accepted level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelStats {
    /// Number of cells that are neither wall nor border.
    pub free_cells: usize,
    /// Number of cells in the level.
    pub total_cells: usize,
}

impl LevelStats {
    /// Fraction of the level that is free space.
    #[must_use]
    pub fn free_fraction(&self) -> f64 {
        if self.total_cells == 0 {
            return 0.0;
        }
        self.free_cells as f64 / self.total_cells as f64
    }
}

/// Reasons a candidate level is discarded.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum Rejection {
    /// Too little of the level is free space.
    #[error("free fraction {fraction:.3} is below the minimum {min}")]
    DensityTooLow {
        /// Measured free fraction.
        fraction: f64,
        /// Configured lower bound.
        min: f64,
    },
    /// Too much of the level is free space.
    #[error("free fraction {fraction:.3} is above the maximum {max}")]
    DensityTooHigh {
        /// Measured free fraction.
        fraction: f64,
        /// Configured upper bound.
        max: f64,
    },
    /// Some free cells cannot be reached from the others.
    #[error("only {reachable} of {free} free cells are connected")]
    Disconnected {
        /// Cells reached by the flood fill.
        reachable: usize,
        /// Free cells in the level.
        free: usize,
    },
}

/// Accepts the candidate or explains why it must be discarded.
pub fn validate(grid: &Grid, bounds: DensityBounds) -> Result<LevelStats, Rejection> {
    let mut start = None;
    let mut free_cells = 0;
    for (coord, cell) in grid.iter() {
        if cell.is_free() {
            free_cells += 1;
            start = Some(coord);
        }
    }

    let stats = LevelStats {
        free_cells,
        total_cells: grid.len(),
    };
    let fraction = stats.free_fraction();
    if fraction < bounds.min() {
        return Err(Rejection::DensityTooLow {
            fraction,
            min: bounds.min(),
        });
    }
    if fraction > bounds.max() {
        return Err(Rejection::DensityTooHigh {
            fraction,
            max: bounds.max(),
        });
    }

    let reachable = start.map_or(0, |start| reachable_from(grid, start));
    if reachable != free_cells {
        return Err(Rejection::Disconnected {
            reachable,
            free: free_cells,
        });
    }

    Ok(stats)
}

/// Counts the free cells connected to `start` through four-directional moves
/// over free cells. Returns zero when `start` is not itself free.
#[must_use]
pub fn reachable_from(grid: &Grid, start: CellCoord) -> usize {
    if !grid.cell(start).map_or(false, |cell| cell.is_free()) {
        return 0;
    }

    let width = grid.columns() as usize;
    let index = |cell: CellCoord| cell.row() as usize * width + cell.column() as usize;
    let mut visited = vec![false; grid.len()];
    let mut stack = vec![start];
    visited[index(start)] = true;
    let mut count = 0;

    while let Some(cell) = stack.pop() {
        count += 1;
        for direction in Direction::ALL {
            let Some(neighbor) = grid.neighbor(cell, direction) else {
                continue;
            };
            if visited[index(neighbor)] {
                continue;
            }
            if !grid.cell(neighbor).map_or(false, |cell| cell.is_free()) {
                continue;
            }
            visited[index(neighbor)] = true;
            stack.push(neighbor);
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghost_maze_core::Cell;

    fn grid_from_rows(rows: &[&str]) -> Grid {
        let columns = rows.first().map_or(0, |row| row.len()) as u32;
        let mut grid = Grid::empty(rows.len() as u32, columns);
        for (row, line) in rows.iter().enumerate() {
            for (column, glyph) in line.chars().enumerate() {
                let cell = Cell::from_glyph(glyph).expect("known glyph");
                grid.set(CellCoord::new(row as u32, column as u32), cell);
            }
        }
        grid
    }

    const LOOSE: DensityBounds = DensityBounds::new(0.0, 1.0);

    #[test]
    fn connected_level_is_accepted_with_stats() {
        let grid = grid_from_rows(&["BBBBB", "B...B", "B.W.B", "B.GDB", "BBBBB"]);

        let stats = validate(&grid, LOOSE).expect("level is connected");

        assert_eq!(stats.free_cells, 8);
        assert_eq!(stats.total_cells, 25);
        assert!((stats.free_fraction() - 0.32).abs() < 1e-9);
    }

    #[test]
    fn isolated_pocket_is_rejected() {
        let grid = grid_from_rows(&["BBBBB", "B.W.B", "B.W.B", "BBBBB"]);

        assert_eq!(
            validate(&grid, LOOSE),
            Err(Rejection::Disconnected {
                reachable: 2,
                free: 4,
            })
        );
    }

    #[test]
    fn ghost_compartment_must_be_reachable_too() {
        let sealed = grid_from_rows(&["BBBBB", "B..WB", "BWWGB", "BBBBB"]);
        assert!(matches!(
            validate(&sealed, LOOSE),
            Err(Rejection::Disconnected { .. })
        ));

        let open = grid_from_rows(&["BBBBB", "B..DB", "BWWGB", "BBBBB"]);
        assert!(validate(&open, LOOSE).is_ok());
    }

    #[test]
    fn density_bounds_are_inclusive() {
        let grid = grid_from_rows(&["BBBB", "B..B", "BBBB"]);
        let fraction = 2.0 / 12.0;

        assert!(validate(&grid, DensityBounds::new(fraction, fraction)).is_ok());
        assert!(matches!(
            validate(&grid, DensityBounds::new(0.2, 1.0)),
            Err(Rejection::DensityTooLow { .. })
        ));
        assert!(matches!(
            validate(&grid, DensityBounds::new(0.0, 0.1)),
            Err(Rejection::DensityTooHigh { .. })
        ));
    }

    #[test]
    fn density_is_checked_before_connectivity() {
        let grid = grid_from_rows(&["B.B.B"]);
        assert!(matches!(
            validate(&grid, DensityBounds::new(0.5, 1.0)),
            Err(Rejection::DensityTooLow { .. })
        ));
    }

    #[test]
    fn flood_fill_handles_large_open_levels() {
        let grid = Grid::empty(1_000, 1_000);
        assert_eq!(reachable_from(&grid, CellCoord::new(0, 0)), 1_000_000);
    }

    #[test]
    fn flood_fill_from_wall_reaches_nothing() {
        let grid = grid_from_rows(&["W.."]);
        assert_eq!(reachable_from(&grid, CellCoord::new(0, 0)), 0);
        assert_eq!(reachable_from(&grid, CellCoord::new(0, 1)), 2);
    }
}
