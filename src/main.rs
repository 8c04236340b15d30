use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use rusty_mind::error::MindError;
use rusty_mind::network::NetworkSampler;
use rusty_mind::simulator::config::SimulationConfig;
use rusty_mind::simulator::simulation::Simulation;

#[derive(Parser, Debug)]
#[command(name = "rusty-mind", version, long_about = None)]
struct Args {
    /// Path to a JSON configuration file, overridden by the flags below
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// The number of neurons
    #[arg(short = 'N', long)]
    neurons: Option<usize>,
    /// The seed used for network sampling
    #[arg(long)]
    seed: Option<u64>,
    /// The number of ticks to run (unbounded if absent)
    #[arg(long)]
    max_ticks: Option<u64>,
    /// The minimum time between two progress reports, in milliseconds
    #[arg(long)]
    report_interval_ms: Option<u64>,
    /// Enable verbose logging
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

impl Args {
    fn into_config(self) -> Result<SimulationConfig, MindError> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::load_from(path)?,
            None => SimulationConfig::default(),
        };
        if let Some(num_neurons) = self.neurons {
            config.num_neurons = num_neurons;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.max_ticks.is_some() {
            config.max_ticks = self.max_ticks;
        }
        if let Some(report_interval_ms) = self.report_interval_ms {
            config.report_interval_ms = report_interval_ms;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<(), MindError> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    let config = args.into_config()?;

    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let state = NetworkSampler::new(config.num_neurons)?.sample(&mut rng);
    let mut simulation = Simulation::new(state, &config)?;

    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        log::info!("Shutdown signal received...");
        r.store(false, Ordering::SeqCst);
    })
    .map_err(|e| MindError::IOError(e.to_string()))?;

    simulation.run(&running, config.max_ticks);
    Ok(())
}
