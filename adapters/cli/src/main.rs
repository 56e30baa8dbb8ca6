#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that generates and inspects Ghost Maze levels.

mod preview;
mod settings;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use ghost_maze_core::Grid;
use ghost_maze_generator::Generator;
use ghost_maze_system_classification::classify;
use ghost_maze_system_validation::{validate, DensityBounds};
use ghost_maze_text_io::{export_path, export_to_string, import_path};
use log::info;

use settings::LevelArgs;

/// Symmetric maze level generator.
#[derive(Debug, Parser)]
#[command(name = "ghost-maze", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a level and print or save it
    Generate(GenerateArgs),
    /// Validate and preview a saved level
    Inspect(InspectArgs),
}

#[derive(Debug, Args)]
struct GenerateArgs {
    #[command(flatten)]
    level: LevelArgs,

    /// Seed for the random source
    #[arg(long, conflicts_with = "random_seed")]
    seed: Option<u64>,

    /// Draw a fresh seed from the operating system
    #[arg(long)]
    random_seed: bool,

    /// Write the level to this file instead of standard output
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print a box-drawing preview of the level
    #[arg(long)]
    preview: bool,
}

#[derive(Debug, Args)]
struct InspectArgs {
    /// Level file to read
    path: PathBuf,

    #[command(flatten)]
    level: LevelArgs,
}

/// Entry point for the Ghost Maze command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Command::Generate(args) => generate(args),
        Command::Inspect(args) => inspect(args),
    }
}

fn generate(args: GenerateArgs) -> Result<()> {
    let settings = args.level.resolve()?;
    let mut config = settings.level;
    if let Some(seed) = args.seed {
        config.rng_seed = seed;
    } else if args.random_seed {
        config.rng_seed = rand::random();
    }
    info!("generating level with seed {:#x}", config.rng_seed);

    let level = Generator::new(config)
        .and_then(|mut generator| generator.generate())
        .context("level generation failed")?;

    match args.output.or(settings.output) {
        Some(path) => {
            export_path(level.grid(), &path)?;
            info!("wrote level to {}", path.display());
        }
        None => print!("{}", export_to_string(level.grid())),
    }

    if args.preview {
        print!("{}", preview::render(level.grid(), level.tiles()));
    }
    Ok(())
}

fn inspect(args: InspectArgs) -> Result<()> {
    let config = args.level.resolve()?.level;
    config.validate().context("invalid level configuration")?;

    let mut grid = Grid::empty(config.rows(), config.columns());
    let report = import_path(&mut grid, &args.path)
        .with_context(|| format!("failed to import {}", args.path.display()))?;
    info!(
        "read {} row(s), {} cell(s) from {}",
        report.rows_read,
        report.cells_written,
        args.path.display()
    );

    let compartment = config.compartment();
    let tiles = classify(&grid, &compartment);
    print!("{}", preview::render(&grid, &tiles));

    match validate(&grid, DensityBounds::from_config(&config)) {
        Ok(stats) => {
            println!(
                "accepted: {} of {} cells free ({:.3})",
                stats.free_cells,
                stats.total_cells,
                stats.free_fraction()
            );
            Ok(())
        }
        Err(rejection) => bail!("level rejected: {rejection}"),
    }
}
