#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Assigns directional rendering variants to the structural tiles of a level.
//!
//! Walls, borders and compartment interior cells look at their four cardinal
//! neighbours and pick a variant from a fixed autotile table. The ghost
//! compartment frame is resolved from its geometry instead, and door cells
//! always render as [`TileVariant::Other`].

use ghost_maze_core::{Cell, CellCoord, Direction, GhostCompartment, Grid, TileVariant};

/// Occupancy of the four cardinal neighbours of a tile.
///
/// A neighbour is occupied when it is a wall, border or compartment cell, or
/// when it lies outside the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NeighborPattern {
    /// Neighbour toward row zero.
    pub up: bool,
    /// Neighbour toward the last column.
    pub right: bool,
    /// Neighbour toward the last row.
    pub down: bool,
    /// Neighbour toward column zero.
    pub left: bool,
}

impl NeighborPattern {
    /// Creates a pattern from explicit occupancy flags.
    #[must_use]
    pub const fn new(up: bool, right: bool, down: bool, left: bool) -> Self {
        Self {
            up,
            right,
            down,
            left,
        }
    }

    /// Samples the pattern around `cell`.
    #[must_use]
    pub fn of(grid: &Grid, cell: CellCoord) -> Self {
        let occupied = |direction| {
            grid.neighbor(cell, direction)
                .and_then(|neighbor| grid.cell(neighbor))
                .map_or(true, Cell::is_solid)
        };
        Self::new(
            occupied(Direction::North),
            occupied(Direction::East),
            occupied(Direction::South),
            occupied(Direction::West),
        )
    }

    /// Maps the pattern to its directional variant.
    ///
    /// Patterns outside the table (fewer than two occupied neighbours, or
    /// exactly two opposite ones) resolve to [`TileVariant::Other`].
    #[must_use]
    pub const fn variant(self) -> TileVariant {
        match (self.up, self.right, self.down, self.left) {
            (true, true, true, true) => TileVariant::Other,
            (false, true, true, true) => TileVariant::Top,
            (true, false, true, true) => TileVariant::Right,
            (true, true, false, true) => TileVariant::Bottom,
            (true, true, true, false) => TileVariant::Left,
            (false, true, true, false) => TileVariant::TopLeft,
            (false, false, true, true) => TileVariant::TopRight,
            (true, false, false, true) => TileVariant::BottomRight,
            (true, true, false, false) => TileVariant::BottomLeft,
            _ => TileVariant::Other,
        }
    }
}

/// Variant assigned to every structural tile of a grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileMap {
    rows: u32,
    columns: u32,
    variants: Vec<Option<TileVariant>>,
}

impl TileMap {
    /// Number of rows covered by the map.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns covered by the map.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Variant of the tile at `cell`. Free cells and coordinates outside the
    /// map have none.
    #[must_use]
    pub fn get(&self, cell: CellCoord) -> Option<TileVariant> {
        if cell.row() >= self.rows || cell.column() >= self.columns {
            return None;
        }
        let index = usize::try_from(cell.row()).ok()? * usize::try_from(self.columns).ok()?
            + usize::try_from(cell.column()).ok()?;
        self.variants.get(index).copied().flatten()
    }

    /// Variant of the tile at `(row, column)`.
    #[must_use]
    pub fn variant_at(&self, row: u32, column: u32) -> Option<TileVariant> {
        self.get(CellCoord::new(row, column))
    }

    /// Number of tiles holding each variant, indexed by [`TileVariant::index`].
    #[must_use]
    pub fn histogram(&self) -> [usize; 9] {
        let mut counts = [0; 9];
        for variant in self.variants.iter().flatten() {
            counts[variant.index()] += 1;
        }
        counts
    }
}

/// Classifies every structural tile of `grid`.
#[must_use]
pub fn classify(grid: &Grid, compartment: &GhostCompartment) -> TileMap {
    let variants = grid
        .iter()
        .map(|(coord, cell)| match cell {
            Cell::GhostDoor => Some(TileVariant::Other),
            Cell::GhostBox => Some(
                frame_variant(compartment, coord)
                    .unwrap_or_else(|| NeighborPattern::of(grid, coord).variant()),
            ),
            Cell::Wall | Cell::Border => Some(NeighborPattern::of(grid, coord).variant()),
            Cell::Empty | Cell::Corridor => None,
        })
        .collect();

    TileMap {
        rows: grid.rows(),
        columns: grid.columns(),
        variants,
    }
}

/// Fixed variant of a cell on the compartment's perimeter.
fn frame_variant(compartment: &GhostCompartment, cell: CellCoord) -> Option<TileVariant> {
    if !compartment.contains(cell) {
        return None;
    }

    let top = cell.row() == compartment.top();
    let bottom = cell.row() == compartment.bottom();
    let left = cell.column() == compartment.left();
    let right = cell.column() == compartment.right();

    match (top, right, bottom, left) {
        (true, _, _, true) => Some(TileVariant::TopLeft),
        (true, true, _, _) => Some(TileVariant::TopRight),
        (_, _, true, true) => Some(TileVariant::BottomLeft),
        (_, true, true, _) => Some(TileVariant::BottomRight),
        (true, _, _, _) => Some(TileVariant::Top),
        (_, _, true, _) => Some(TileVariant::Bottom),
        (_, _, _, true) => Some(TileVariant::Left),
        (_, true, _, _) => Some(TileVariant::Right),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(up: bool, right: bool, down: bool, left: bool) -> TileVariant {
        NeighborPattern::new(up, right, down, left).variant()
    }

    #[test]
    fn autotile_table_matches_literal_patterns() {
        assert_eq!(pattern(true, true, true, true), TileVariant::Other);
        assert_eq!(pattern(false, true, true, true), TileVariant::Top);
        assert_eq!(pattern(true, false, true, true), TileVariant::Right);
        assert_eq!(pattern(true, true, false, true), TileVariant::Bottom);
        assert_eq!(pattern(true, true, true, false), TileVariant::Left);
        assert_eq!(pattern(false, true, true, false), TileVariant::TopLeft);
        assert_eq!(pattern(false, false, true, true), TileVariant::TopRight);
        assert_eq!(pattern(true, false, false, true), TileVariant::BottomRight);
        assert_eq!(pattern(true, true, false, false), TileVariant::BottomLeft);
    }

    #[test]
    fn unmatched_patterns_fall_back_to_other() {
        assert_eq!(pattern(false, false, false, false), TileVariant::Other);
        assert_eq!(pattern(true, false, false, false), TileVariant::Other);
        assert_eq!(pattern(false, false, false, true), TileVariant::Other);
        assert_eq!(pattern(true, false, true, false), TileVariant::Other);
        assert_eq!(pattern(false, true, false, true), TileVariant::Other);
    }

    #[test]
    fn out_of_bounds_neighbours_count_as_occupied() {
        let grid = Grid::filled(1, 1, Cell::Border);
        assert_eq!(
            NeighborPattern::of(&grid, CellCoord::new(0, 0)),
            NeighborPattern::new(true, true, true, true)
        );
    }

    #[test]
    fn door_and_floor_neighbours_are_unoccupied() {
        let mut grid = Grid::filled(3, 3, Cell::Wall);
        grid.set(CellCoord::new(0, 1), Cell::Empty);
        grid.set(CellCoord::new(1, 2), Cell::GhostDoor);
        grid.set(CellCoord::new(2, 1), Cell::GhostBox);

        assert_eq!(
            NeighborPattern::of(&grid, CellCoord::new(1, 1)),
            NeighborPattern::new(false, false, true, true)
        );
    }

    #[test]
    fn outer_ring_of_a_bordered_room_gets_edges_and_corners() {
        let mut grid = Grid::filled(4, 4, Cell::Border);
        for coord in [(1, 1), (1, 2), (2, 1), (2, 2)] {
            grid.set(CellCoord::new(coord.0, coord.1), Cell::Empty);
        }
        let tiles = classify(&grid, &GhostCompartment::centered(4, 4, 0, 0));

        assert_eq!(tiles.variant_at(0, 0), Some(TileVariant::Other));
        assert_eq!(tiles.variant_at(0, 1), Some(TileVariant::Bottom));
        assert_eq!(tiles.variant_at(1, 0), Some(TileVariant::Right));
        assert_eq!(tiles.variant_at(1, 3), Some(TileVariant::Left));
        assert_eq!(tiles.variant_at(3, 2), Some(TileVariant::Top));
        assert_eq!(tiles.variant_at(1, 1), None);
        assert_eq!(tiles.variant_at(4, 0), None);
    }

    #[test]
    fn compartment_frame_uses_fixed_variants() {
        let compartment = GhostCompartment::centered(8, 8, 4, 4);
        let mut grid = Grid::filled(8, 8, Cell::Empty);
        for row in compartment.top()..=compartment.bottom() {
            for column in compartment.left()..=compartment.right() {
                grid.set(CellCoord::new(row, column), Cell::GhostBox);
            }
        }
        for column in compartment.door_columns() {
            grid.set(CellCoord::new(compartment.door_row(), column), Cell::GhostDoor);
        }

        let tiles = classify(&grid, &compartment);
        let (top, left) = (compartment.top(), compartment.left());

        assert_eq!(tiles.variant_at(top, left), Some(TileVariant::TopLeft));
        assert_eq!(tiles.variant_at(top, left + 1), Some(TileVariant::Other));
        assert_eq!(tiles.variant_at(top, left + 3), Some(TileVariant::TopRight));
        assert_eq!(tiles.variant_at(top + 1, left), Some(TileVariant::Left));
        assert_eq!(tiles.variant_at(top + 1, left + 3), Some(TileVariant::Right));
        assert_eq!(tiles.variant_at(top + 3, left), Some(TileVariant::BottomLeft));
        assert_eq!(tiles.variant_at(top + 3, left + 1), Some(TileVariant::Bottom));
        assert_eq!(
            tiles.variant_at(top + 3, left + 3),
            Some(TileVariant::BottomRight)
        );
        // Interior cells fall through to the neighbour table.
        assert_eq!(tiles.variant_at(top + 1, left + 1), Some(TileVariant::Top));
        assert_eq!(tiles.variant_at(top + 2, left + 2), Some(TileVariant::Other));
    }

    #[test]
    fn histogram_counts_structural_tiles_only() {
        let mut grid = Grid::filled(3, 3, Cell::Wall);
        grid.set(CellCoord::new(1, 1), Cell::Empty);
        let tiles = classify(&grid, &GhostCompartment::centered(3, 3, 0, 0));

        assert_eq!(tiles.histogram().iter().sum::<usize>(), 8);
    }
}
