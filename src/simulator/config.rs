//! This module contains the configuration of a simulation run.
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::MindError;
use crate::NUM_NEURONS;

/// Default wall-clock interval between two progress reports.
pub const REPORT_INTERVAL_MS: u64 = 1000;

/// The parameters of a simulation run.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// The number of neurons in the sampled network.
    pub num_neurons: usize,
    /// The seed used for network sampling, drawn from entropy if absent.
    pub seed: Option<u64>,
    /// The number of ticks to run, unbounded if absent.
    pub max_ticks: Option<u64>,
    /// The minimum wall-clock time between two progress reports, in milliseconds.
    pub report_interval_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            num_neurons: NUM_NEURONS,
            seed: None,
            max_ticks: None,
            report_interval_ms: REPORT_INTERVAL_MS,
        }
    }
}

impl SimulationConfig {
    /// Load a configuration from a JSON file. Missing fields take their default value.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, MindError> {
        let file = File::open(path).map_err(|e| MindError::IOError(e.to_string()))?;
        let reader = BufReader::new(file);
        let config: SimulationConfig = serde_json::from_reader(reader)
            .map_err(|e| MindError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration.
    /// The function returns an error for empty networks.
    pub fn validate(&self) -> Result<(), MindError> {
        if self.num_neurons == 0 {
            return Err(MindError::InvalidConfig(
                "num_neurons must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
