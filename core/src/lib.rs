#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Ghost Maze level generator.
//!
//! This crate defines the vocabulary every other crate speaks: the closed set
//! of [`Cell`] codes, the row-major [`Grid`] buffer with bounds-checked
//! accessors, the [`GhostCompartment`] geometry that carving and
//! classification agree on, and the [`LevelConfig`] surface that drives a
//! generation request. Systems mutate grids through exclusive references and
//! never share state between generation attempts.

pub mod config;

use serde::{Deserialize, Serialize};

pub use config::{Axis, ConfigError, LevelConfig};

/// Lowest free-space fraction a level may have unless configured otherwise.
pub const MIN_DENSITY: f64 = 0.05;

/// Default upper bound on the free-space fraction of an accepted level.
pub const DEFAULT_MAX_DENSITY: f64 = 0.45;

/// Smallest half-grid extent accepted along either axis.
pub const MIN_HALF_EXTENT: u32 = 4;

/// Largest half-grid extent accepted along either axis.
pub const MAX_HALF_EXTENT: u32 = 1_024;

/// Closed set of codes a grid cell may hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Walkable floor.
    Empty,
    /// Interior obstacle stamped from a wall blueprint.
    Wall,
    /// Outer boundary of the level.
    Border,
    /// Interior of the reserved ghost compartment.
    GhostBox,
    /// Restricted-access door into the ghost compartment.
    GhostDoor,
    /// Transient "already dug" marker used while carving a half-grid.
    Corridor,
}

impl Cell {
    /// Every cell code in declaration order.
    pub const ALL: [Cell; 6] = [
        Cell::Empty,
        Cell::Wall,
        Cell::Border,
        Cell::GhostBox,
        Cell::GhostDoor,
        Cell::Corridor,
    ];

    /// Single-character representation used by the plain-text level format.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Wall => 'W',
            Self::Border => 'B',
            Self::GhostBox => 'G',
            Self::GhostDoor => 'D',
            Self::Corridor => 'C',
        }
    }

    /// Parses a glyph produced by [`Cell::glyph`].
    #[must_use]
    pub const fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '.' => Some(Self::Empty),
            'W' => Some(Self::Wall),
            'B' => Some(Self::Border),
            'G' => Some(Self::GhostBox),
            'D' => Some(Self::GhostDoor),
            'C' => Some(Self::Corridor),
            _ => None,
        }
    }

    /// Reports whether the cell counts as free space for density and
    /// connectivity checks. Only walls and borders are not free.
    #[must_use]
    pub const fn is_free(self) -> bool {
        !matches!(self, Self::Wall | Self::Border)
    }

    /// Reports whether the cell is a structural tile that receives a
    /// directional variant and occupies its neighbours' patterns.
    #[must_use]
    pub const fn is_solid(self) -> bool {
        matches!(self, Self::Wall | Self::Border | Self::GhostBox)
    }
}

/// Location of a single grid cell expressed as row and column indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    row: u32,
    column: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell. Row zero is the top of the level.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Coordinate reached by rotating this one 180° about the centre of a
    /// grid with the provided dimensions.
    #[must_use]
    pub const fn rotated_half_turn(&self, rows: u32, columns: u32) -> Self {
        Self {
            row: rows - 1 - self.row,
            column: columns - 1 - self.column,
        }
    }
}

/// Cardinal directions used for digging, flood fills and neighbour patterns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// All four directions in clockwise order starting at north.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Signed `(row, column)` offset of a single step in this direction.
    #[must_use]
    pub const fn offset(self) -> (i64, i64) {
        match self {
            Self::North => (-1, 0),
            Self::East => (0, 1),
            Self::South => (1, 0),
            Self::West => (0, -1),
        }
    }
}

/// Movement policy requested by a consumer of the finished grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorClass {
    /// Regular actor that may not pass the ghost door.
    Runner,
    /// Ghost-type actor that may pass the ghost door.
    Ghost,
}

/// Directional rendering variant assigned to a structural tile.
///
/// The declaration order matches the sprite-sheet layout consumers index
/// with [`TileVariant::index`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileVariant {
    /// Upper-left outer corner.
    TopLeft,
    /// Upper edge.
    Top,
    /// Upper-right outer corner.
    TopRight,
    /// Right edge.
    Right,
    /// Lower-right outer corner.
    BottomRight,
    /// Lower edge.
    Bottom,
    /// Lower-left outer corner.
    BottomLeft,
    /// Left edge.
    Left,
    /// Fully enclosed tile, door tiles and unmatched patterns.
    Other,
}

impl TileVariant {
    /// Every variant in sprite-sheet order.
    pub const ALL: [TileVariant; 9] = [
        TileVariant::TopLeft,
        TileVariant::Top,
        TileVariant::TopRight,
        TileVariant::Right,
        TileVariant::BottomRight,
        TileVariant::Bottom,
        TileVariant::BottomLeft,
        TileVariant::Left,
        TileVariant::Other,
    ];

    /// Zero-based sprite-sheet index of the variant.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Dense row-major buffer of cell codes with bounds-checked accessors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: u32,
    columns: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid of the provided dimensions with every cell set to `fill`.
    ///
    /// Dimensions whose cell count does not fit in `usize` produce a grid
    /// with no rows and no columns.
    #[must_use]
    pub fn filled(rows: u32, columns: u32, fill: Cell) -> Self {
        match usize::try_from(u64::from(rows) * u64::from(columns)) {
            Ok(capacity) => Self {
                rows,
                columns,
                cells: vec![fill; capacity],
            },
            Err(_) => Self {
                rows: 0,
                columns: 0,
                cells: Vec::new(),
            },
        }
    }

    /// Creates a grid of the provided dimensions with every cell empty.
    #[must_use]
    pub fn empty(rows: u32, columns: u32) -> Self {
        Self::filled(rows, columns, Cell::Empty)
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Provides the `(rows, columns)` dimensions of the grid.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.rows, self.columns)
    }

    /// Total number of cells stored in the grid.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the grid holds no cells at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Reports whether the coordinate lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.row() < self.rows && cell.column() < self.columns
    }

    /// Returns the code stored at the coordinate, if it lies inside the grid.
    #[must_use]
    pub fn cell(&self, cell: CellCoord) -> Option<Cell> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Returns the code stored at `(row, column)`, if it lies inside the grid.
    #[must_use]
    pub fn cell_at(&self, row: u32, column: u32) -> Option<Cell> {
        self.cell(CellCoord::new(row, column))
    }

    /// Overwrites the code stored at the coordinate. Coordinates outside the
    /// grid are ignored.
    pub fn set(&mut self, cell: CellCoord, value: Cell) {
        if let Some(index) = self.index(cell) {
            if let Some(slot) = self.cells.get_mut(index) {
                *slot = value;
            }
        }
    }

    /// Reports whether an actor of the provided class may stand on the cell.
    ///
    /// Walls, borders and the ghost compartment block every actor class; the
    /// ghost door only admits [`ActorClass::Ghost`]. Coordinates outside the
    /// grid are never walkable.
    #[must_use]
    pub fn is_walkable(&self, cell: CellCoord, actor: ActorClass) -> bool {
        match self.cell(cell) {
            Some(Cell::Empty | Cell::Corridor) => true,
            Some(Cell::GhostDoor) => actor == ActorClass::Ghost,
            _ => false,
        }
    }

    /// Coordinate one step away in the provided direction, if it lies inside
    /// the grid.
    #[must_use]
    pub fn neighbor(&self, cell: CellCoord, direction: Direction) -> Option<CellCoord> {
        let (row_offset, column_offset) = direction.offset();
        let row = i64::from(cell.row()) + row_offset;
        let column = i64::from(cell.column()) + column_offset;
        let candidate = CellCoord::new(u32::try_from(row).ok()?, u32::try_from(column).ok()?);
        self.contains(candidate).then_some(candidate)
    }

    /// Iterates every coordinate in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = CellCoord> {
        let columns = self.columns;
        (0..self.rows).flat_map(move |row| (0..columns).map(move |column| CellCoord::new(row, column)))
    }

    /// Iterates every coordinate together with its code in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, Cell)> + '_ {
        self.coords().zip(self.cells.iter().copied())
    }

    /// Returns the cells that make up a single row.
    #[must_use]
    pub fn row(&self, row: u32) -> Option<&[Cell]> {
        if row >= self.rows {
            return None;
        }
        let width = usize::try_from(self.columns).ok()?;
        let start = usize::try_from(row).ok()?.checked_mul(width)?;
        self.cells.get(start..start.checked_add(width)?)
    }

    /// Counts the cells satisfying the provided predicate.
    #[must_use]
    pub fn count(&self, mut predicate: impl FnMut(Cell) -> bool) -> usize {
        self.cells.iter().filter(|cell| predicate(**cell)).count()
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if self.contains(cell) {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

/// Geometry of the reserved ghost compartment centred in a full grid.
///
/// The interior spans `height × width` cells, always even because the box is
/// laid out symmetrically around the grid centre. A one-cell padding ring
/// surrounds it, and the two door cells sit on the interior's top row in the
/// columns either side of the vertical centre line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GhostCompartment {
    top: u32,
    left: u32,
    height: u32,
    width: u32,
    door_columns: [u32; 2],
}

impl GhostCompartment {
    /// Centres a compartment of the requested size in a grid of the provided
    /// dimensions. Odd requested extents are rounded down to the nearest even
    /// value.
    #[must_use]
    pub const fn centered(rows: u32, columns: u32, box_width: u32, box_height: u32) -> Self {
        let half_height = box_height / 2;
        let half_width = box_width / 2;
        let centre_column = columns / 2;
        Self {
            top: (rows / 2).saturating_sub(half_height),
            left: centre_column.saturating_sub(half_width),
            height: half_height * 2,
            width: half_width * 2,
            door_columns: [centre_column.saturating_sub(1), centre_column],
        }
    }

    /// First interior row.
    #[must_use]
    pub const fn top(&self) -> u32 {
        self.top
    }

    /// Last interior row.
    #[must_use]
    pub const fn bottom(&self) -> u32 {
        (self.top + self.height).saturating_sub(1)
    }

    /// First interior column.
    #[must_use]
    pub const fn left(&self) -> u32 {
        self.left
    }

    /// Last interior column.
    #[must_use]
    pub const fn right(&self) -> u32 {
        (self.left + self.width).saturating_sub(1)
    }

    /// Interior height in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Interior width in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Row holding the door segment.
    #[must_use]
    pub const fn door_row(&self) -> u32 {
        self.top
    }

    /// Columns holding the door segment.
    #[must_use]
    pub const fn door_columns(&self) -> [u32; 2] {
        self.door_columns
    }

    /// Reports whether the coordinate is one of the two door cells.
    #[must_use]
    pub const fn is_door(&self, cell: CellCoord) -> bool {
        cell.row() == self.door_row()
            && (cell.column() == self.door_columns[0] || cell.column() == self.door_columns[1])
    }

    /// Reports whether the coordinate lies inside the compartment interior.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        self.height > 0
            && self.width > 0
            && cell.row() >= self.top
            && cell.row() <= self.bottom()
            && cell.column() >= self.left
            && cell.column() <= self.right()
    }

    /// Reports whether the coordinate lies inside the interior or its
    /// padding ring.
    #[must_use]
    pub const fn padded_contains(&self, cell: CellCoord) -> bool {
        cell.row() + 1 >= self.top
            && cell.row() <= self.bottom() + 1
            && cell.column() + 1 >= self.left
            && cell.column() <= self.right() + 1
    }

    /// Number of cells covered by the interior and its padding ring.
    #[must_use]
    pub const fn padded_cell_count(&self) -> u64 {
        (self.height as u64 + 2) * (self.width as u64 + 2)
    }

    /// Iterates the padded region in row-major order.
    pub fn padded_coords(&self) -> impl Iterator<Item = CellCoord> {
        let first_column = self.left.saturating_sub(1);
        let last_column = self.right() + 1;
        (self.top.saturating_sub(1)..=self.bottom() + 1).flat_map(move |row| {
            (first_column..=last_column).map(move |column| CellCoord::new(row, column))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyphs_round_trip_for_every_cell() {
        for cell in Cell::ALL {
            assert_eq!(Cell::from_glyph(cell.glyph()), Some(cell));
        }
        assert_eq!(Cell::from_glyph('x'), None);
    }

    #[test]
    fn free_cells_exclude_walls_and_borders_only() {
        let free: Vec<Cell> = Cell::ALL.into_iter().filter(|cell| cell.is_free()).collect();
        assert_eq!(
            free,
            vec![Cell::Empty, Cell::GhostBox, Cell::GhostDoor, Cell::Corridor]
        );
    }

    #[test]
    fn grid_length_matches_dimensions() {
        for (rows, columns) in [(0, 0), (1, 7), (30, 28), (2_048, 2_048)] {
            let grid = Grid::filled(rows, columns, Cell::Wall);
            assert_eq!(grid.dimensions(), (rows, columns));
            assert_eq!(grid.len(), rows as usize * columns as usize);
            assert_eq!(grid.coords().count(), grid.len());
        }
    }

    #[test]
    fn grid_accessors_are_bounds_checked() {
        let mut grid = Grid::empty(3, 4);
        grid.set(CellCoord::new(2, 3), Cell::Wall);
        grid.set(CellCoord::new(3, 0), Cell::Wall);

        assert_eq!(grid.dimensions(), (3, 4));
        assert_eq!(grid.cell_at(2, 3), Some(Cell::Wall));
        assert_eq!(grid.cell_at(3, 0), None);
        assert_eq!(grid.cell_at(0, 4), None);
        assert_eq!(grid.count(|cell| cell == Cell::Wall), 1);
        assert_eq!(
            grid.row(2),
            Some(&[Cell::Empty, Cell::Empty, Cell::Empty, Cell::Wall][..])
        );
        assert_eq!(grid.row(3), None);
    }

    #[test]
    fn neighbor_stays_inside_grid() {
        let grid = Grid::empty(2, 2);
        let origin = CellCoord::new(0, 0);

        assert_eq!(grid.neighbor(origin, Direction::North), None);
        assert_eq!(grid.neighbor(origin, Direction::West), None);
        assert_eq!(
            grid.neighbor(origin, Direction::East),
            Some(CellCoord::new(0, 1))
        );
        assert_eq!(
            grid.neighbor(origin, Direction::South),
            Some(CellCoord::new(1, 0))
        );
        assert_eq!(grid.neighbor(CellCoord::new(1, 1), Direction::South), None);
    }

    #[test]
    fn walkability_distinguishes_actor_classes_at_the_door() {
        let mut grid = Grid::empty(1, 5);
        grid.set(CellCoord::new(0, 1), Cell::GhostDoor);
        grid.set(CellCoord::new(0, 2), Cell::GhostBox);
        grid.set(CellCoord::new(0, 3), Cell::Wall);
        grid.set(CellCoord::new(0, 4), Cell::Border);

        let door = CellCoord::new(0, 1);
        assert!(grid.is_walkable(CellCoord::new(0, 0), ActorClass::Runner));
        assert!(!grid.is_walkable(door, ActorClass::Runner));
        assert!(grid.is_walkable(door, ActorClass::Ghost));
        for column in 2..5 {
            let cell = CellCoord::new(0, column);
            assert!(!grid.is_walkable(cell, ActorClass::Runner));
            assert!(!grid.is_walkable(cell, ActorClass::Ghost));
        }
        assert!(!grid.is_walkable(CellCoord::new(0, 5), ActorClass::Ghost));
    }

    #[test]
    fn compartment_is_centred_with_door_on_top_row() {
        let compartment = GhostCompartment::centered(30, 28, 6, 4);

        assert_eq!(compartment.top(), 13);
        assert_eq!(compartment.bottom(), 16);
        assert_eq!(compartment.left(), 11);
        assert_eq!(compartment.right(), 16);
        assert_eq!(compartment.door_row(), 13);
        assert_eq!(compartment.door_columns(), [13, 14]);
        assert!(compartment.is_door(CellCoord::new(13, 14)));
        assert!(!compartment.is_door(CellCoord::new(16, 14)));
        assert_eq!(compartment.padded_cell_count(), 48);
        assert_eq!(compartment.padded_coords().count(), 48);
        assert!(compartment.padded_contains(CellCoord::new(12, 10)));
        assert!(!compartment.contains(CellCoord::new(12, 10)));
        assert!(!compartment.padded_contains(CellCoord::new(11, 10)));
    }

    #[test]
    fn odd_compartment_extents_round_down() {
        let compartment = GhostCompartment::centered(30, 28, 7, 5);
        assert_eq!(compartment.width(), 6);
        assert_eq!(compartment.height(), 4);
    }

    #[test]
    fn half_turn_rotation_maps_corners() {
        let corner = CellCoord::new(0, 0);
        assert_eq!(corner.rotated_half_turn(30, 28), CellCoord::new(29, 27));
    }

    #[test]
    fn tile_variant_indices_follow_declaration_order() {
        for (index, variant) in TileVariant::ALL.into_iter().enumerate() {
            assert_eq!(variant.index(), index);
        }
    }
}
