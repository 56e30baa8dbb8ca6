//! Level configuration assembled from an optional TOML file and flags.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Args;
use ghost_maze_core::LevelConfig;
use serde::Deserialize;

/// Layout of the optional settings file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Settings {
    /// Generation parameters.
    pub(crate) level: LevelConfig,
    /// Destination used by `generate` when `--output` is absent.
    pub(crate) output: Option<PathBuf>,
}

impl Settings {
    /// Reads the settings file, or returns defaults when none is given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file at {}", path.display()))?;
        parse(&contents)
            .with_context(|| format!("invalid settings file at {}", path.display()))
    }
}

fn parse(contents: &str) -> Result<Settings> {
    toml::from_str(contents).context("failed to parse settings toml contents")
}

/// Flags shared by every subcommand that needs level dimensions.
#[derive(Debug, Default, Args)]
pub(crate) struct LevelArgs {
    /// TOML settings file; flags override its values
    #[arg(long, value_name = "FILE")]
    pub(crate) config: Option<PathBuf>,

    /// Rows in the carved half-grid
    #[arg(long)]
    pub(crate) half_height: Option<u32>,

    /// Columns in the carved half-grid
    #[arg(long)]
    pub(crate) half_width: Option<u32>,

    /// Interior width of the ghost compartment
    #[arg(long)]
    pub(crate) ghost_box_width: Option<u32>,

    /// Interior height of the ghost compartment
    #[arg(long)]
    pub(crate) ghost_box_height: Option<u32>,

    /// Lowest accepted free-space fraction
    #[arg(long)]
    pub(crate) min_density: Option<f64>,

    /// Highest accepted free-space fraction
    #[arg(long)]
    pub(crate) max_density: Option<f64>,

    /// Candidates generated before giving up
    #[arg(long)]
    pub(crate) max_attempts: Option<u32>,
}

impl LevelArgs {
    /// Loads the settings file and applies the flag overrides on top.
    pub(crate) fn resolve(&self) -> Result<Settings> {
        let mut settings = Settings::load(self.config.as_deref())?;
        self.apply(&mut settings.level);
        Ok(settings)
    }

    fn apply(&self, level: &mut LevelConfig) {
        let overrides = [
            (self.half_height, &mut level.half_height),
            (self.half_width, &mut level.half_width),
            (self.ghost_box_width, &mut level.ghost_box_width),
            (self.ghost_box_height, &mut level.ghost_box_height),
            (self.max_attempts, &mut level.max_attempts),
        ];
        for (value, slot) in overrides {
            if let Some(value) = value {
                *slot = value;
            }
        }
        if let Some(value) = self.min_density {
            level.min_density = value;
        }
        if let Some(value) = self.max_density {
            level.max_density = value;
        }
    }
}
