#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Randomised constructive carving of a single half-grid quadrant.
//!
//! The carver alternates between stamping a wall blueprint at the digger
//! position and digging a straight corridor away from it. Carving ends once
//! neither step can be placed in the same iteration. The half-grid's last row
//! and last column hold the border that becomes the level's outer boundary
//! after mirroring.

use ghost_maze_core::{Cell, CellCoord, Direction, Grid};
use log::debug;
use rand::{seq::SliceRandom, Rng};

/// Shortest corridor the digger may carve in one step.
pub const MIN_CORRIDOR_LENGTH: u32 = 3;

/// Longest corridor the digger may carve in one step.
pub const MAX_CORRIDOR_LENGTH: u32 = 10;

/// Immutable catalogue entry describing a placeable wall shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WallBlueprint {
    width: u32,
    height: u32,
    anchor_row: u32,
    anchor_column: u32,
}

impl WallBlueprint {
    /// Creates a blueprint whose footprint is offset so that the cell at
    /// `(anchor_row, anchor_column)` within it lands on the digger.
    #[must_use]
    pub const fn new(width: u32, height: u32, anchor_row: u32, anchor_column: u32) -> Self {
        Self {
            width,
            height,
            anchor_row,
            anchor_column,
        }
    }

    /// Footprint width in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Footprint height in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Offset of the digger from the footprint's top-left cell.
    #[must_use]
    pub const fn anchor(&self) -> (u32, u32) {
        (self.anchor_row, self.anchor_column)
    }
}

/// Every wall shape the carver may stamp.
pub const WALL_BLUEPRINTS: [WallBlueprint; 9] = [
    // Horizontal bars
    WallBlueprint::new(3, 2, 0, 1),
    WallBlueprint::new(5, 2, 0, 2),
    WallBlueprint::new(7, 2, 0, 3),
    // Vertical bars
    WallBlueprint::new(2, 3, 1, 0),
    WallBlueprint::new(2, 5, 2, 0),
    WallBlueprint::new(2, 7, 3, 0),
    // Rectangles
    WallBlueprint::new(3, 5, 2, 1),
    WallBlueprint::new(5, 3, 1, 2),
    WallBlueprint::new(5, 5, 2, 2),
];

/// Counters describing a finished carving pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CarveStats {
    /// Number of loop iterations executed, including the final failing one.
    pub iterations: u32,
    /// Number of wall blueprints stamped.
    pub walls_built: u32,
    /// Number of corridors dug.
    pub corridors_dug: u32,
}

/// Owns the half-grid and digger cursor for one generation attempt.
#[derive(Clone, Debug)]
pub struct MazeCarver {
    half: Grid,
    digger: CellCoord,
}

impl MazeCarver {
    /// Creates an empty half-grid with its outer border stamped and the digger
    /// parked at the corner that becomes the level centre.
    #[must_use]
    pub fn new(half_height: u32, half_width: u32) -> Self {
        let mut half = Grid::empty(half_height, half_width);
        if let (Some(last_row), Some(last_column)) =
            (half_height.checked_sub(1), half_width.checked_sub(1))
        {
            for column in 0..half_width {
                half.set(CellCoord::new(last_row, column), Cell::Border);
            }
            for row in 0..half_height {
                half.set(CellCoord::new(row, last_column), Cell::Border);
            }
        }

        Self {
            half,
            digger: CellCoord::new(0, 0),
        }
    }

    /// Resumes carving from an existing half-grid and digger position.
    #[must_use]
    pub fn from_parts(half: Grid, digger: CellCoord) -> Self {
        Self { half, digger }
    }

    /// Current digger position.
    #[must_use]
    pub const fn digger(&self) -> CellCoord {
        self.digger
    }

    /// Read-only access to the half-grid being carved.
    #[must_use]
    pub fn half_grid(&self) -> &Grid {
        &self.half
    }

    /// Consumes the carver, yielding the carved half-grid.
    #[must_use]
    pub fn into_half_grid(self) -> Grid {
        self.half
    }

    /// Alternates building and digging until neither succeeds in the same
    /// iteration.
    pub fn carve<R>(&mut self, rng: &mut R) -> CarveStats
    where
        R: Rng + ?Sized,
    {
        let mut stats = CarveStats::default();
        loop {
            stats.iterations += 1;
            let built = self.try_build(rng);
            let dug = self.try_dig(rng);
            if built {
                stats.walls_built += 1;
            }
            if dug {
                stats.corridors_dug += 1;
            }
            if !built && !dug {
                break;
            }
        }

        debug!(
            "carved {}x{} half-grid: {} walls, {} corridors in {} iterations",
            self.half.rows(),
            self.half.columns(),
            stats.walls_built,
            stats.corridors_dug,
            stats.iterations
        );
        stats
    }

    /// Stamps the first blueprint, in shuffled order, whose footprint fits at
    /// the digger position.
    pub fn try_build<R>(&mut self, rng: &mut R) -> bool
    where
        R: Rng + ?Sized,
    {
        let mut order: Vec<usize> = (0..WALL_BLUEPRINTS.len()).collect();
        order.shuffle(rng);

        for index in order {
            let blueprint = WALL_BLUEPRINTS[index];
            if self.can_build(&blueprint) {
                self.stamp(&blueprint);
                return true;
            }
        }

        false
    }

    /// Digs the first legal corridor, in shuffled direction and length order,
    /// and moves the digger to its end.
    pub fn try_dig<R>(&mut self, rng: &mut R) -> bool
    where
        R: Rng + ?Sized,
    {
        let mut directions = Direction::ALL;
        directions.shuffle(rng);
        let mut lengths: Vec<u32> = (MIN_CORRIDOR_LENGTH..=MAX_CORRIDOR_LENGTH).collect();
        lengths.shuffle(rng);

        for direction in directions {
            for &length in &lengths {
                if let Some(corridor) = self.plan_corridor(direction, length) {
                    self.dig(corridor);
                    return true;
                }
            }
        }

        false
    }

    fn footprint(&self, blueprint: &WallBlueprint) -> impl Iterator<Item = CellCoord> + '_ {
        let (anchor_row, anchor_column) = blueprint.anchor();
        let top = i64::from(self.digger.row()) - i64::from(anchor_row);
        let left = i64::from(self.digger.column()) - i64::from(anchor_column);
        let width = i64::from(blueprint.width());
        let rows = (top..top + i64::from(blueprint.height()))
            .filter_map(|row| u32::try_from(row).ok());

        // Cells that fall outside the half-grid are clipped, not rejected.
        rows.flat_map(move |row| {
            (left..left + width)
                .filter_map(|column| u32::try_from(column).ok())
                .map(move |column| CellCoord::new(row, column))
        })
        .filter(|cell| self.half.contains(*cell))
    }

    fn can_build(&self, blueprint: &WallBlueprint) -> bool {
        self.footprint(blueprint)
            .all(|cell| self.half.cell(cell).map_or(false, Cell::is_free))
    }

    fn stamp(&mut self, blueprint: &WallBlueprint) {
        let cells: Vec<CellCoord> = self.footprint(blueprint).collect();
        for cell in cells {
            self.half.set(cell, Cell::Wall);
        }
    }

    fn plan_corridor(&self, direction: Direction, length: u32) -> Option<Corridor> {
        let mut current = self.digger;
        let mut traversed = Vec::with_capacity(length as usize);

        for _ in 0..length {
            let next = self.half.neighbor(current, direction)?;
            let from = self.half.cell(current)?;
            let to = self.half.cell(next)?;

            if to == Cell::Border {
                return None;
            }
            if from != Cell::Wall && to == Cell::Wall {
                return None;
            }
            // Corridors never cross one another.
            if from != Cell::Corridor && to == Cell::Corridor {
                return None;
            }

            traversed.push(current);
            current = next;
        }

        (self.half.cell(current) == Some(Cell::Empty)).then_some(Corridor {
            traversed,
            end: current,
        })
    }

    fn dig(&mut self, corridor: Corridor) {
        for cell in corridor.traversed {
            if self.half.cell(cell) == Some(Cell::Empty) {
                self.half.set(cell, Cell::Corridor);
            }
        }
        self.digger = corridor.end;
    }
}

#[derive(Debug)]
struct Corridor {
    traversed: Vec<CellCoord>,
    end: CellCoord,
}
