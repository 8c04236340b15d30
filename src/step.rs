//! One discrete tick of the network dynamics.
//!
//! A tick runs the following phases, in order:
//! 1. input aggregation: `aggregated = input_weights * neural_activity`,
//! 2. firing decision: an eligible neuron fires when its potential `neural_activity + aggregated`
//!    is positive and meets its threshold,
//! 3. output propagation: `propagated = outputs_weights * (signal_map restricted to fired neurons)`,
//! 4. activity update: `neural_activity = aggregated + propagated`, kept non-negative and finite,
//! 5. refractory update: fired neurons wait for their reactivation delay, the others count down,
//! 6. tick advance.
//!
//! Phases 1 to 3 only read the activity of the previous tick; the new activity is written to a
//! separate buffer which is swapped into the state at the end of the tick.
use itertools::izip;
use nalgebra::DVector;
use rayon::prelude::*;

use crate::network::NetworkState;
use crate::MIN_PARALLEL_NEURONS;

/// The observable phase of a neuron after a tick.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum NeuronPhase {
    /// Eligible to fire, but below threshold.
    Idle,
    /// Fired during the last tick.
    Firing,
    /// Not eligible to fire until its countdown reaches zero.
    Refractory,
}

/// Runs ticks on a network state, reusing its buffers from one tick to the next.
#[derive(Debug, Clone)]
pub struct StepEngine {
    aggregated: DVector<f64>,
    emitted: DVector<f64>,
    propagated: DVector<f64>,
    next_activity: DVector<f64>,
    fired: Vec<bool>,
    num_fired: usize,
}

impl StepEngine {
    /// Create an engine with buffers for the specified number of neurons.
    pub fn new(num_neurons: usize) -> Self {
        StepEngine {
            aggregated: DVector::zeros(num_neurons),
            emitted: DVector::zeros(num_neurons),
            propagated: DVector::zeros(num_neurons),
            next_activity: DVector::zeros(num_neurons),
            fired: vec![false; num_neurons],
            num_fired: 0,
        }
    }

    /// Returns the number of neurons which fired during the last tick.
    pub fn num_fired(&self) -> usize {
        self.num_fired
    }

    /// Returns, for each neuron, whether it fired during the last tick.
    pub fn fired(&self) -> &[bool] {
        &self.fired
    }

    /// Returns the phase of a neuron after the last tick.
    pub fn neuron_phase(&self, state: &NetworkState, neuron_id: usize) -> NeuronPhase {
        if self.fired.get(neuron_id).copied().unwrap_or(false) {
            NeuronPhase::Firing
        } else if state.next_activations[neuron_id] > 0.0 {
            NeuronPhase::Refractory
        } else {
            NeuronPhase::Idle
        }
    }

    /// Returns the number of neurons in the given phase after the last tick.
    pub fn count_phase(&self, state: &NetworkState, phase: NeuronPhase) -> usize {
        (0..state.num_neurons())
            .filter(|&neuron_id| self.neuron_phase(state, neuron_id) == phase)
            .count()
    }

    /// Advance the network by one tick.
    /// The state is assumed to be valid (see [`crate::validate::validate`]); otherwise, the resulting values are meaningless.
    pub fn step(&mut self, state: &mut NetworkState) {
        let n = state.num_neurons();
        if self.fired.len() != n {
            *self = StepEngine::new(n);
        }

        // 1. Input aggregation
        self.aggregated
            .gemv(1.0, &state.input_weights, &state.neural_activity, 0.0);

        // 2. Firing decision
        let activity = &state.neural_activity;
        let aggregated = &self.aggregated;
        let thresholds = &state.activation_thresholds;
        let next_activations = &state.next_activations;
        let fires = |i: usize| {
            let potential = activity[i] + aggregated[i];
            next_activations[i] <= 0.0 && potential > 0.0 && potential >= thresholds[i]
        };
        if n >= MIN_PARALLEL_NEURONS {
            self.fired
                .par_iter_mut()
                .enumerate()
                .for_each(|(i, fired)| *fired = fires(i));
        } else {
            self.fired
                .iter_mut()
                .enumerate()
                .for_each(|(i, fired)| *fired = fires(i));
        }
        self.num_fired = self.fired.iter().filter(|&&fired| fired).count();

        // 3. Output propagation
        for (emitted, &fired, &signal) in
            izip!(self.emitted.iter_mut(), &self.fired, state.signal_map.iter())
        {
            *emitted = if fired { signal } else { 0.0 };
        }
        self.propagated
            .gemv(1.0, &state.outputs_weights, &self.emitted, 0.0);

        // 4. Activity update
        if n >= MIN_PARALLEL_NEURONS {
            self.next_activity
                .as_mut_slice()
                .par_iter_mut()
                .zip(self.aggregated.as_slice().par_iter())
                .zip(self.propagated.as_slice().par_iter())
                .for_each(|((next, &aggregated), &propagated)| {
                    *next = clip_activity(aggregated + propagated)
                });
        } else {
            for (next, &aggregated, &propagated) in izip!(
                self.next_activity.iter_mut(),
                self.aggregated.iter(),
                self.propagated.iter()
            ) {
                *next = clip_activity(aggregated + propagated);
            }
        }
        std::mem::swap(&mut state.neural_activity, &mut self.next_activity);

        // 5. Refractory update
        for (next, &delay, &fired) in izip!(
            state.next_activations.iter_mut(),
            state.reactivation_delays.iter(),
            &self.fired
        ) {
            if fired {
                *next = delay;
            } else if *next > 0.0 {
                *next = (*next - 1.0).max(0.0);
            }
        }

        // 6. Tick advance
        state.tick = state.tick.saturating_add(1);

        log::trace!("Tick {}: {} neuron(s) fired", state.tick, self.num_fired);
    }
}

/// Advance the network by one tick, using a throwaway engine.
pub fn step(state: &mut NetworkState) {
    StepEngine::new(state.num_neurons()).step(state);
}

/// Keep an activity level non-negative and finite.
fn clip_activity(activity: f64) -> f64 {
    if activity.is_nan() {
        0.0
    } else {
        activity.clamp(0.0, f64::MAX)
    }
}
