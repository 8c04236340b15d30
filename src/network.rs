//! Network state (neurons and connection matrices) and utilities to sample it.
pub mod sampler;
pub mod state;

pub use sampler::NetworkSampler;
pub use state::NetworkState;
