//! Generation request parameters and their up-front validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    GhostCompartment, DEFAULT_MAX_DENSITY, MAX_HALF_EXTENT, MIN_DENSITY, MIN_HALF_EXTENT,
};

/// Seed used when a request does not provide one.
pub const DEFAULT_RNG_SEED: u64 = 0x6a09_e667_f3bc_c908;

/// Attempt budget applied when a request does not provide one.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1_000;

/// Smallest ghost compartment extent accepted along either axis.
pub const MIN_GHOST_BOX_EXTENT: u32 = 2;

/// Parameters describing a single level generation request.
///
/// Every field has a default, so partial TOML documents deserialize into a
/// complete configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LevelConfig {
    /// Rows in the carved half-grid; the full level has twice as many.
    pub half_height: u32,
    /// Columns in the carved half-grid; the full level has twice as many.
    pub half_width: u32,
    /// Requested interior width of the ghost compartment.
    pub ghost_box_width: u32,
    /// Requested interior height of the ghost compartment.
    pub ghost_box_height: u32,
    /// Lowest accepted free-space fraction.
    pub min_density: f64,
    /// Highest accepted free-space fraction.
    pub max_density: f64,
    /// Seed for the generator's pseudo-random source.
    pub rng_seed: u64,
    /// Number of candidates generated before the request fails.
    pub max_attempts: u32,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            half_height: 15,
            half_width: 14,
            ghost_box_width: 6,
            ghost_box_height: 4,
            min_density: MIN_DENSITY,
            max_density: DEFAULT_MAX_DENSITY,
            rng_seed: DEFAULT_RNG_SEED,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl LevelConfig {
    /// Number of rows in the full level.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.half_height.saturating_mul(2)
    }

    /// Number of columns in the full level.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.half_width.saturating_mul(2)
    }

    /// Geometry of the ghost compartment inside the full level.
    #[must_use]
    pub const fn compartment(&self) -> GhostCompartment {
        GhostCompartment::centered(
            self.rows(),
            self.columns(),
            self.ghost_box_width,
            self.ghost_box_height,
        )
    }

    /// Checks that the configuration can produce a level at all.
    ///
    /// Runs before any carving so that impossible requests fail immediately
    /// rather than after the attempt budget is spent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_half_extent(Axis::Height, self.half_height)?;
        check_half_extent(Axis::Width, self.half_width)?;
        check_ghost_box(Axis::Height, self.ghost_box_height, self.half_height)?;
        check_ghost_box(Axis::Width, self.ghost_box_width, self.half_width)?;

        for value in [self.min_density, self.max_density] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::DensityOutOfRange { value });
            }
        }
        if self.min_density > self.max_density {
            return Err(ConfigError::InvertedDensityBounds {
                min: self.min_density,
                max: self.max_density,
            });
        }

        let total = u64::from(self.rows()) * u64::from(self.columns());
        let fraction = self.compartment().padded_cell_count() as f64 / total as f64;
        if fraction > self.max_density {
            return Err(ConfigError::GhostBoxExceedsDensity {
                fraction,
                max: self.max_density,
            });
        }

        if self.max_attempts == 0 {
            return Err(ConfigError::NoAttempts);
        }

        Ok(())
    }
}

fn check_half_extent(axis: Axis, value: u32) -> Result<(), ConfigError> {
    if value < MIN_HALF_EXTENT {
        return Err(ConfigError::HalfExtentTooSmall {
            axis,
            value,
            minimum: MIN_HALF_EXTENT,
        });
    }
    if value > MAX_HALF_EXTENT {
        return Err(ConfigError::HalfExtentTooLarge {
            axis,
            value,
            maximum: MAX_HALF_EXTENT,
        });
    }
    Ok(())
}

fn check_ghost_box(axis: Axis, value: u32, half_extent: u32) -> Result<(), ConfigError> {
    if value < MIN_GHOST_BOX_EXTENT {
        return Err(ConfigError::GhostBoxTooSmall {
            axis,
            value,
            minimum: MIN_GHOST_BOX_EXTENT,
        });
    }

    // The padded box must stay clear of the outer border ring.
    if value / 2 + 2 > half_extent {
        return Err(ConfigError::GhostBoxTooLarge {
            axis,
            value,
            limit: half_extent.saturating_sub(2) * 2 + 1,
        });
    }
    Ok(())
}

/// Axis named by a configuration error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Vertical extent.
    Height,
    /// Horizontal extent.
    Width,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Height => write!(f, "height"),
            Self::Width => write!(f, "width"),
        }
    }
}

/// Reasons a configuration is rejected before generation starts.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// A half-grid extent is too small to carve.
    #[error("half-grid {axis} {value} is below the minimum of {minimum}")]
    HalfExtentTooSmall {
        /// Offending axis.
        axis: Axis,
        /// Requested extent.
        value: u32,
        /// Smallest accepted extent.
        minimum: u32,
    },
    /// A half-grid extent is too large to allocate.
    #[error("half-grid {axis} {value} is above the maximum of {maximum}")]
    HalfExtentTooLarge {
        /// Offending axis.
        axis: Axis,
        /// Requested extent.
        value: u32,
        /// Largest accepted extent.
        maximum: u32,
    },
    /// A ghost compartment extent is too small to hold the door.
    #[error("ghost box {axis} {value} is below the minimum of {minimum}")]
    GhostBoxTooSmall {
        /// Offending axis.
        axis: Axis,
        /// Requested extent.
        value: u32,
        /// Smallest accepted extent.
        minimum: u32,
    },
    /// The padded ghost compartment would reach the outer border.
    #[error("ghost box {axis} {value} does not fit the level; at most {limit} is allowed")]
    GhostBoxTooLarge {
        /// Offending axis.
        axis: Axis,
        /// Requested extent.
        value: u32,
        /// Largest accepted extent.
        limit: u32,
    },
    /// A density bound is not a finite fraction in `[0, 1]`.
    #[error("density bound {value} is not a fraction between 0 and 1")]
    DensityOutOfRange {
        /// Offending bound.
        value: f64,
    },
    /// The lower density bound exceeds the upper one.
    #[error("minimum density {min} exceeds maximum density {max}")]
    InvertedDensityBounds {
        /// Configured lower bound.
        min: f64,
        /// Configured upper bound.
        max: f64,
    },
    /// The padded ghost compartment alone is denser than the upper bound.
    #[error("ghost box covers {fraction:.3} of the level, above the maximum density {max}")]
    GhostBoxExceedsDensity {
        /// Free fraction contributed by the padded compartment.
        fraction: f64,
        /// Configured upper bound.
        max: f64,
    },
    /// The attempt budget is zero.
    #[error("at least one generation attempt is required")]
    NoAttempts,
}
