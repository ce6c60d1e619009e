//! Headless combat simulation.
//!
//! Loads tuning and a roster, places everything on a one-dimensional arena
//! and runs the combat facade frame by frame. Run with:
//! `cargo run -p combat-sim -- --frames 600`
mod arena;
mod config;
mod regen;
mod script;
mod sim;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use combat_content::{ConfigLoader, ContentFactory, RosterLoader};
use tracing_subscriber::EnvFilter;

use config::SimConfig;
use sim::Simulation;

/// Run a headless combat encounter
#[derive(Parser)]
#[command(name = "combat-sim")]
#[command(about = "Headless combat simulation", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding combat.toml and roster.ron
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Combat tuning file (overrides <data-dir>/combat.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Roster file (overrides <data-dir>/roster.ron)
    #[arg(long)]
    roster: Option<PathBuf>,

    /// Maximum number of frames to simulate
    #[arg(long)]
    frames: Option<u32>,

    /// Seconds per frame
    #[arg(long)]
    dt: Option<f32>,

    /// Seed for critical-hit rolls
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    fn apply(&self, config: &mut SimConfig) {
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(frames) = self.frames {
            config.frames = frames.max(1);
        }
        if let Some(dt) = self.dt.filter(|dt| *dt > 0.0) {
            config.delta_time = dt;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
    }
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();

    let cli = Cli::parse();
    let mut config = SimConfig::from_env();
    cli.apply(&mut config);

    let factory = ContentFactory::new(&config.data_dir);
    let combat = match &cli.config {
        Some(path) => ConfigLoader::load(path),
        None => factory.load_config_or_default(),
    }
    .context("Failed to load combat config")?;
    let roster = match &cli.roster {
        Some(path) => RosterLoader::load(path),
        None => factory.load_roster(),
    }
    .context("Failed to load roster")?;

    tracing::info!(
        "Running up to {} frames at {:.3}s (data: {})",
        config.frames,
        config.delta_time,
        factory.data_dir().display()
    );

    let report = Simulation::new(combat, &roster, config.seed)?.run(config.frames, config.delta_time);
    report.print();

    Ok(())
}

/// Logs to stderr so the report on stdout stays clean.
fn setup_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
