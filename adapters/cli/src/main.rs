#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots a Tank Attack game.

mod board;
mod config;
mod session;

use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tank_attack_system_turns::TurnController;
use tank_attack_world::World;
use tracing::Level;

use crate::config::{ConfigFile, Overrides};

/// Turn-based tank skirmish on a grid with obstacles.
#[derive(Debug, Parser)]
#[command(name = "tank-attack", version, long_about = None)]
struct Cli {
    /// TOML file holding the game configuration.
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Overrides the number of grid rows.
    #[arg(long, global = true)]
    rows: Option<u32>,

    /// Overrides the number of grid columns.
    #[arg(long, global = true)]
    columns: Option<u32>,

    /// Overrides the number of obstacle runs.
    #[arg(long, global = true)]
    obstacles: Option<u32>,

    /// Seed for every random draw made during the game.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Treat cells holding other tanks as impassable.
    #[arg(long, global = true)]
    occupancy_blocks_paths: bool,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Mode,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Read `<tank> <row> <column>` moves from stdin.
    Play,
    /// Let random tanks move toward random cells.
    Auto {
        /// Number of turns to simulate.
        #[arg(long, default_value_t = 20)]
        turns: u32,
    },
}

/// Entry point for the Tank Attack command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let file = match &cli.config {
        Some(path) => ConfigFile::load(path)?,
        None => ConfigFile::default(),
    };
    let overrides = Overrides {
        rows: cli.rows,
        columns: cli.columns,
        obstacles: cli.obstacles,
        seed: cli.seed,
        occupancy_blocks_paths: cli.occupancy_blocks_paths,
    };
    let (config, seed) = overrides.apply(file);
    let seed = seed.unwrap_or_else(rand::random);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "seed {seed}")?;

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut world = World::generate(&config, &mut rng).context("failed to create game")?;
    let controller = TurnController::from_config(&config);

    match cli.command {
        Mode::Play => {
            let stdin = io::stdin();
            session::play(&mut world, &controller, &mut rng, stdin.lock(), &mut out)
        }
        Mode::Auto { turns } => session::auto(&mut world, &controller, &mut rng, turns, &mut out),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(io::stderr)
        .init();
}
