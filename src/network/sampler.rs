//! Sampler module with utilities for generating random network states.

use nalgebra::{DMatrix, DVector};
use rand::Rng;
use rand_distr::{Distribution, Uniform};

use super::state::NetworkState;
use crate::error::MindError;
use crate::{MAX_ACTIVATION, MAX_REACTIVATION_DELAY};

#[derive(Debug, PartialEq)]
pub struct NetworkSampler {
    /// the number of neurons in the network
    num_neurons: usize,
}

impl NetworkSampler {
    /// Create a new NetworkSampler instance.
    /// The function returns an error for empty networks.
    ///
    /// # Examples
    ///
    /// ```
    /// use rusty_mind::network::NetworkSampler;
    /// let sampler = NetworkSampler::new(100).unwrap();
    /// assert_eq!(sampler.num_neurons(), 100);
    /// ```
    pub fn new(num_neurons: usize) -> Result<Self, MindError> {
        if num_neurons == 0 {
            return Err(MindError::InvalidParameters(
                "The network must contain at least one neuron.".into(),
            ));
        }

        Ok(NetworkSampler { num_neurons })
    }

    /// Returns the number of neurons of the sampled networks.
    pub fn num_neurons(&self) -> usize {
        self.num_neurons
    }

    /// Sample a network state from the distribution.
    /// Thresholds, signal map and weights are uniform in [0, 1), delays are uniform in [0, 10).
    /// Neurons never influence themselves, and all neurons start idle with zero activity.
    ///
    /// # Examples
    ///
    /// ```
    /// use rusty_mind::network::NetworkSampler;
    /// use rusty_mind::validate::validate;
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    ///
    /// let mut rng = StdRng::seed_from_u64(42);
    /// let sampler = NetworkSampler::new(10).unwrap();
    /// let state = sampler.sample(&mut rng);
    /// assert!(validate(&state).is_ok());
    /// ```
    pub fn sample<R: Rng>(&self, rng: &mut R) -> NetworkState {
        let n = self.num_neurons;
        let unit_dist = Uniform::new(0.0, MAX_ACTIVATION);
        let delay_dist = Uniform::new(0.0, MAX_REACTIVATION_DELAY);

        let activation_thresholds = DVector::from_fn(n, |_, _| unit_dist.sample(rng));
        let outputs_weights = self.sample_weights(&unit_dist, rng);
        let input_weights = self.sample_weights(&unit_dist, rng);
        let reactivation_delays = DVector::from_fn(n, |_, _| delay_dist.sample(rng));
        let signal_map = DVector::from_fn(n, |_, _| unit_dist.sample(rng));

        NetworkState {
            tick: 0,
            activation_thresholds,
            reactivation_delays,
            signal_map,
            outputs_weights,
            input_weights,
            next_activations: DVector::zeros(n),
            neural_activity: DVector::zeros(n),
        }
    }

    fn sample_weights<R: Rng>(&self, dist: &Uniform<f64>, rng: &mut R) -> DMatrix<f64> {
        let mut weights = DMatrix::from_fn(self.num_neurons, self.num_neurons, |_, _| {
            dist.sample(rng)
        });
        weights.fill_diagonal(0.0);
        weights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::validate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sampler_new() {
        assert_eq!(
            NetworkSampler::new(0),
            Err(MindError::InvalidParameters(
                "The network must contain at least one neuron.".into()
            ))
        );
        assert_eq!(NetworkSampler::new(3).unwrap().num_neurons(), 3);
    }

    #[test]
    fn test_sample() {
        let mut rng = StdRng::seed_from_u64(42);
        let state = NetworkSampler::new(20).unwrap().sample(&mut rng);

        assert_eq!(state.num_neurons(), 20);
        assert_eq!(state.num_links(), 400);
        assert_eq!(state.tick(), 0);
        assert!(state.neural_activity().iter().all(|&x| x == 0.0));
        assert!(state.next_activations().iter().all(|&x| x == 0.0));
        assert!(state.outputs_weights().diagonal().iter().all(|&w| w == 0.0));
        assert!(state.input_weights().diagonal().iter().all(|&w| w == 0.0));
        assert_eq!(validate(&state), Ok(()));
    }

    #[test]
    fn test_sample_is_reproducible() {
        let sampler = NetworkSampler::new(8).unwrap();
        let state_1 = sampler.sample(&mut StdRng::seed_from_u64(7));
        let state_2 = sampler.sample(&mut StdRng::seed_from_u64(7));
        let state_3 = sampler.sample(&mut StdRng::seed_from_u64(8));

        assert_eq!(state_1, state_2);
        assert_ne!(state_1, state_3);
    }

    #[test]
    fn test_sample_delays_span_their_domain() {
        let mut rng = StdRng::seed_from_u64(42);
        let state = NetworkSampler::new(1000).unwrap().sample(&mut rng);

        assert!(state.reactivation_delays().max() > MAX_ACTIVATION);
        assert!(state.reactivation_delays().max() < MAX_REACTIVATION_DELAY);
    }
}
