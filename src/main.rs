//! Headless runner: evolves drivers on a track and prints one line per generation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use racer::simulation::evolution::EvolutionEngine;
use racer::simulation::params::Params;
use racer::simulation::track::Track;

/// Evolve neural drivers on a track without a window.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Track geometry file (JSON)
    #[arg(short, long)]
    track: PathBuf,

    /// Parameter file (JSON); missing fields use defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of generations to run
    #[arg(short, long, default_value_t = 20)]
    generations: u32,

    /// RNG seed; drawn from the OS when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Simulation time step in seconds
    #[arg(long, default_value_t = 0.01)]
    dt: f32,

    /// Retire a window once it has run this many simulated seconds
    #[arg(long)]
    max_window_seconds: Option<f32>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "racer=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    anyhow::ensure!(args.dt > 0.0, "--dt must be positive, got {}", args.dt);

    let mut params = match &args.config {
        Some(path) => Params::load(path)
            .with_context(|| format!("loading parameters from {}", path.display()))?,
        None => Params::default(),
    };
    if let Some(limit) = args.max_window_seconds {
        params.max_window_seconds = Some(limit);
    }
    params.validate().context("validating parameters")?;

    let track = Track::load(&args.track)
        .with_context(|| format!("loading track from {}", args.track.display()))?;

    let mut rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_os_rng(),
    };

    tracing::info!(
        population = params.population_size,
        window = params.active_window,
        checkpoints = track.checkpoint_count(),
        seed = ?args.seed,
        "starting evolution"
    );

    let mut engine = EvolutionEngine::new(track, params, &mut rng)?;
    for _ in 0..args.generations {
        let summary = engine.run_generation(args.dt, &mut rng)?;
        println!(
            "generation {:>4}  best {:>8.2}  mean {:>8.2}  worst {:>8.2}  completed {:>3}  {:>6.1}s",
            summary.generation,
            summary.best_fitness,
            summary.mean_fitness,
            summary.worst_fitness,
            summary.completed,
            summary.duration,
        );
    }

    Ok(())
}
