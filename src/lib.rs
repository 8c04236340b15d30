//! This crate provides tools for simulating networks of abstract spiking neurons in discrete time.
//!
//! Each neuron accumulates activity from its peers through weighted connections, fires when its
//! potential crosses its threshold, and then stays refractory for a few ticks before it can fire again.
//!
//! # Creating Networks
//!
//! ## From Scratch
//!
//! ```rust
//! use nalgebra::{DMatrix, DVector};
//! use rusty_mind::network::NetworkState;
//!
//! let state = NetworkState::build(
//!     DVector::from_vec(vec![0.5, 0.5]),
//!     DVector::from_vec(vec![1.0, 3.0]),
//!     DVector::from_vec(vec![0.9, 0.9]),
//!     DMatrix::from_row_slice(2, 2, &[0.0, 0.5, 0.5, 0.0]),
//!     DMatrix::from_row_slice(2, 2, &[0.0, 0.25, 0.25, 0.0]),
//! )
//! .unwrap();
//!
//! assert_eq!(state.num_neurons(), 2);
//! assert_eq!(state.tick(), 0);
//! ```
//!
//! ## At Random
//!
//! ```rust
//! use rusty_mind::network::NetworkSampler;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let state = NetworkSampler::new(100).unwrap().sample(&mut rng);
//!
//! assert_eq!(state.num_neurons(), 100);
//! assert_eq!(state.num_links(), 10_000);
//! ```
//!
//! # Simulating Networks
//!
//! ```rust
//! use rusty_mind::network::NetworkSampler;
//! use rusty_mind::step::StepEngine;
//! use rusty_mind::validate::validate;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut state = NetworkSampler::new(100).unwrap().sample(&mut rng);
//! state.neural_activity_mut()[0] = 0.75;
//!
//! // The state must be valid before the first step
//! validate(&state).unwrap();
//!
//! let mut engine = StepEngine::new(state.num_neurons());
//! for _ in 0..10 {
//!     engine.step(&mut state);
//! }
//! assert_eq!(state.tick(), 10);
//! ```

pub mod error;
pub mod network;
pub mod simulator;
pub mod step;
pub mod validate;

/// The default number of neurons in a network.
pub const NUM_NEURONS: usize = 100;
/// The (exclusive) upper bound of thresholds, signal map and connection weights.
pub const MAX_ACTIVATION: f64 = 1.0;
/// The (exclusive) upper bound of reactivation delays, in ticks.
pub const MAX_REACTIVATION_DELAY: f64 = 10.0;
/// Minimum number of neurons to run the per-neuron phases of a tick in parallel.
pub const MIN_PARALLEL_NEURONS: usize = 512;
