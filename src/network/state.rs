//! This module provides the `NetworkState` structure, i.e., the per-neuron parameters,
//! the connection matrices and the evolving activity of a network.
use nalgebra::{DMatrix, DVector};

use crate::validate::{validate_shape, ValidationError};

/// The complete state of a network of `N` neurons.
///
/// Neuron `i` is identified by index `i` in every vector, and by row/column `i` in both
/// connection matrices. Entry `(i, j)` of a matrix is the contribution from neuron `j` to neuron `i`.
#[derive(Debug, PartialEq, Clone)]
pub struct NetworkState {
    /// Number of ticks elapsed since construction.
    pub(crate) tick: u64,
    /// Firing threshold of each neuron, in [0, 1).
    pub(crate) activation_thresholds: DVector<f64>,
    /// Refractory length (in ticks) of each neuron after firing, in [0, 10).
    pub(crate) reactivation_delays: DVector<f64>,
    /// Output scaling factor of each neuron, in [0, 1).
    pub(crate) signal_map: DVector<f64>,
    /// Weights along which fired signals propagate, in [0, 1) with a zero diagonal.
    pub(crate) outputs_weights: DMatrix<f64>,
    /// Weights along which ambient activity flows, in [0, 1) with a zero diagonal.
    pub(crate) input_weights: DMatrix<f64>,
    /// Remaining refractory ticks of each neuron; a neuron is eligible when non-positive.
    pub(crate) next_activations: DVector<f64>,
    /// Current activity level of each neuron.
    pub(crate) neural_activity: DVector<f64>,
}

impl NetworkState {
    /// Create a network state from its immutable parameters.
    /// The refractory countdowns and the activity levels start at zero, and so does the tick counter.
    /// The function returns an error if the parameters do not all describe the same number of neurons.
    /// Value ranges are not checked here, see [`crate::validate::validate`].
    pub fn build(
        activation_thresholds: DVector<f64>,
        reactivation_delays: DVector<f64>,
        signal_map: DVector<f64>,
        outputs_weights: DMatrix<f64>,
        input_weights: DMatrix<f64>,
    ) -> Result<Self, ValidationError> {
        let num_neurons = activation_thresholds.len();
        let state = NetworkState {
            tick: 0,
            activation_thresholds,
            reactivation_delays,
            signal_map,
            outputs_weights,
            input_weights,
            next_activations: DVector::zeros(num_neurons),
            neural_activity: DVector::zeros(num_neurons),
        };
        validate_shape(&state)?;
        Ok(state)
    }

    /// Returns the number of neurons in the network.
    pub fn num_neurons(&self) -> usize {
        self.activation_thresholds.len()
    }

    /// Returns the number of (possibly zero-weighted) links between neurons.
    pub fn num_links(&self) -> usize {
        self.outputs_weights.len()
    }

    /// Returns the number of ticks elapsed since construction.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn activation_thresholds(&self) -> &DVector<f64> {
        &self.activation_thresholds
    }

    pub fn reactivation_delays(&self) -> &DVector<f64> {
        &self.reactivation_delays
    }

    pub fn signal_map(&self) -> &DVector<f64> {
        &self.signal_map
    }

    pub fn outputs_weights(&self) -> &DMatrix<f64> {
        &self.outputs_weights
    }

    pub fn input_weights(&self) -> &DMatrix<f64> {
        &self.input_weights
    }

    pub fn next_activations(&self) -> &DVector<f64> {
        &self.next_activations
    }

    pub fn neural_activity(&self) -> &DVector<f64> {
        &self.neural_activity
    }

    /// Mutable access to the refractory countdowns.
    /// The state must be validated again before the next step.
    pub fn next_activations_mut(&mut self) -> &mut DVector<f64> {
        &mut self.next_activations
    }

    /// Mutable access to the activity levels.
    /// The state must be validated again before the next step.
    pub fn neural_activity_mut(&mut self) -> &mut DVector<f64> {
        &mut self.neural_activity
    }

    /// Returns the mean activity level over all neurons, or zero for an empty network.
    pub fn mean_activity(&self) -> f64 {
        match self.num_neurons() {
            0 => 0.0,
            n => self.neural_activity.sum() / n as f64,
        }
    }
}
