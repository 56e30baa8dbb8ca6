#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative level generation for Ghost Maze.
//!
//! A [`Generator`] drives the bounded retry loop: every attempt carves a fresh
//! half-grid, mirrors it into a full level, carves the ghost compartment and
//! validates the result. Rejected candidates are dropped whole. The first
//! accepted candidate is classified and returned as a [`Level`].

use ghost_maze_core::{
    ActorClass, Cell, CellCoord, ConfigError, GhostCompartment, Grid, LevelConfig,
};
use ghost_maze_system_carving::MazeCarver;
use ghost_maze_system_classification::{classify, TileMap};
use ghost_maze_system_ghost_box::carve_ghost_box;
use ghost_maze_system_symmetry::mirror;
use ghost_maze_system_validation::{validate, DensityBounds, LevelStats, Rejection};
use log::{debug, info, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

pub use ghost_maze_system_carving::CarveStats;

/// Failures reported by a generation request.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum GenerationError {
    /// The configuration can never produce a level.
    #[error("invalid level configuration")]
    InvalidConfig(#[from] ConfigError),
    /// Every attempt in the budget was rejected.
    #[error("no candidate accepted after {attempts} attempts")]
    AttemptsExhausted {
        /// Number of candidates generated.
        attempts: u32,
        /// Reason the final candidate was rejected.
        #[source]
        last: Option<Rejection>,
    },
}

/// Progress of the generator through its current request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenerationState {
    /// No request has run yet.
    Idle,
    /// The retry loop is evaluating the numbered candidate.
    Generating {
        /// One-based attempt counter.
        attempt: u32,
    },
    /// The last request produced a level.
    Accepted {
        /// Candidates generated before acceptance, including the accepted one.
        attempts: u32,
    },
    /// The last request spent its whole attempt budget.
    Exhausted,
}

/// Accepted level together with its rendering variants.
#[derive(Clone, Debug)]
pub struct Level {
    grid: Grid,
    compartment: GhostCompartment,
    stats: LevelStats,
    carve_stats: CarveStats,
    tiles: TileMap,
    attempts: u32,
    seed: u64,
}

impl Level {
    /// Cell grid of the level.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Code stored at `(row, column)`, if it lies inside the level.
    #[must_use]
    pub fn cell_at(&self, row: u32, column: u32) -> Option<Cell> {
        self.grid.cell_at(row, column)
    }

    /// `(rows, columns)` dimensions of the level.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        self.grid.dimensions()
    }

    /// Reports whether an actor of the provided class may stand at
    /// `(row, column)`.
    #[must_use]
    pub fn is_walkable(&self, row: u32, column: u32, actor: ActorClass) -> bool {
        self.grid.is_walkable(CellCoord::new(row, column), actor)
    }

    /// Directional variants of the structural tiles.
    #[must_use]
    pub const fn tiles(&self) -> &TileMap {
        &self.tiles
    }

    /// Geometry of the ghost compartment.
    #[must_use]
    pub const fn compartment(&self) -> &GhostCompartment {
        &self.compartment
    }

    /// Density figures measured during validation.
    #[must_use]
    pub const fn stats(&self) -> LevelStats {
        self.stats
    }

    /// Counters from carving the accepted level's half-grid.
    #[must_use]
    pub const fn carve_stats(&self) -> CarveStats {
        self.carve_stats
    }

    /// Number of candidates generated for this level, including itself.
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Seed of the configuration that requested the level.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

/// Drives generation requests against a single random source.
#[derive(Debug)]
pub struct Generator<R = ChaCha8Rng> {
    config: LevelConfig,
    rng: R,
    state: GenerationState,
}

impl Generator<ChaCha8Rng> {
    /// Creates a generator seeded from the configuration.
    pub fn new(config: LevelConfig) -> Result<Self, GenerationError> {
        let rng = ChaCha8Rng::seed_from_u64(config.rng_seed);
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> Generator<R> {
    /// Creates a generator that draws from the provided random source.
    ///
    /// The configuration is validated here so that impossible requests fail
    /// before any carving.
    pub fn with_rng(config: LevelConfig, rng: R) -> Result<Self, GenerationError> {
        config.validate()?;
        Ok(Self {
            config,
            rng,
            state: GenerationState::Idle,
        })
    }

    /// Configuration driving the generator.
    #[must_use]
    pub const fn config(&self) -> &LevelConfig {
        &self.config
    }

    /// Progress through the most recent request.
    #[must_use]
    pub const fn state(&self) -> GenerationState {
        self.state
    }

    /// Runs the retry loop until a candidate is accepted or the attempt
    /// budget runs out.
    pub fn generate(&mut self) -> Result<Level, GenerationError> {
        let compartment = self.config.compartment();
        let mut last = None;

        for attempt in 1..=self.config.max_attempts {
            self.state = GenerationState::Generating { attempt };
            match self.attempt(&compartment) {
                Ok(Candidate {
                    grid,
                    stats,
                    carve_stats,
                }) => {
                    self.state = GenerationState::Accepted { attempts: attempt };
                    info!(
                        "accepted {}x{} level after {attempt} attempt(s), free fraction {:.3}",
                        grid.rows(),
                        grid.columns(),
                        stats.free_fraction()
                    );
                    let tiles = classify(&grid, &compartment);
                    return Ok(Level {
                        grid,
                        compartment,
                        stats,
                        carve_stats,
                        tiles,
                        attempts: attempt,
                        seed: self.config.rng_seed,
                    });
                }
                Err(rejection) => {
                    debug!("attempt {attempt} rejected: {rejection}");
                    last = Some(rejection);
                }
            }
        }

        self.state = GenerationState::Exhausted;
        warn!(
            "gave up after {} attempts; last rejection: {last:?}",
            self.config.max_attempts
        );
        Err(GenerationError::AttemptsExhausted {
            attempts: self.config.max_attempts,
            last,
        })
    }

    fn attempt(&mut self, compartment: &GhostCompartment) -> Result<Candidate, Rejection> {
        let mut carver = MazeCarver::new(self.config.half_height, self.config.half_width);
        let carve_stats = carver.carve(&mut self.rng);

        let mut grid = mirror(&carver.into_half_grid());
        carve_ghost_box(&mut grid, compartment);

        let stats = validate(&grid, DensityBounds::from_config(&self.config))?;
        Ok(Candidate {
            grid,
            stats,
            carve_stats,
        })
    }
}

struct Candidate {
    grid: Grid,
    stats: LevelStats,
    carve_stats: CarveStats,
}

/// Generates a single level from `config` using its seed.
pub fn generate(config: &LevelConfig) -> Result<Level, GenerationError> {
    Generator::new(config.clone())?.generate()
}
