//! Simulation framework driving a network state tick after tick.
//!
//! This module provides three components:
//! - `config`: the parameters of a simulation run.
//! - `reporting`: the wall-clock pacing of progress reports.
//! - `simulation`: the loop owning the state, the step engine and the reporting state.
//!
//! # Example
//! ```rust
//! use std::sync::atomic::AtomicBool;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use rusty_mind::network::NetworkSampler;
//! use rusty_mind::simulator::config::SimulationConfig;
//! use rusty_mind::simulator::simulation::Simulation;
//!
//! let config = SimulationConfig { num_neurons: 10, max_ticks: Some(25), ..Default::default() };
//! let mut rng = StdRng::seed_from_u64(42);
//! let state = NetworkSampler::new(config.num_neurons).unwrap().sample(&mut rng);
//!
//! let mut simulation = Simulation::new(state, &config).unwrap();
//! let running = AtomicBool::new(true);
//! assert_eq!(simulation.run(&running, config.max_ticks), 25);
//! assert_eq!(simulation.state().tick(), 25);
//! ```

pub mod config;
pub mod reporting;
pub mod simulation;
