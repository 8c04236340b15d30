//! This module contains the simulation loop.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use super::config::SimulationConfig;
use super::reporting::ReportingState;
use crate::error::MindError;
use crate::network::NetworkState;
use crate::step::StepEngine;
use crate::validate::validate;

/// Summary of the network after a tick, safe to hand over to another thread.
#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct Snapshot {
    pub tick: u64,
    pub num_fired: usize,
    pub mean_activity: f64,
}

/// Owns a network state and advances it tick after tick.
#[derive(Debug)]
pub struct Simulation {
    state: NetworkState,
    engine: StepEngine,
    reporting: ReportingState,
    observers: Vec<Arc<RwLock<Snapshot>>>,
}

impl Simulation {
    /// Create a simulation from a network state.
    /// The function returns an error if the state is invalid.
    pub fn new(state: NetworkState, config: &SimulationConfig) -> Result<Self, MindError> {
        validate(&state)?;
        log::info!(
            "NEURONS: {}. LINKS: {}",
            state.num_neurons(),
            state.num_links()
        );

        Ok(Simulation {
            engine: StepEngine::new(state.num_neurons()),
            state,
            reporting: ReportingState::new(Duration::from_millis(config.report_interval_ms)),
            observers: vec![],
        })
    }

    /// Returns the network state.
    pub fn state(&self) -> &NetworkState {
        &self.state
    }

    /// Returns the step engine, e.g., to inspect which neurons fired during the last tick.
    pub fn engine(&self) -> &StepEngine {
        &self.engine
    }

    /// Returns the summary of the network at the current tick.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.state.tick(),
            num_fired: self.engine.num_fired(),
            mean_activity: self.state.mean_activity(),
        }
    }

    /// Subscribe to the snapshots published after every tick.
    /// The returned slot holds the current snapshot until the next tick.
    pub fn observe(&mut self) -> Arc<RwLock<Snapshot>> {
        let slot = Arc::new(RwLock::new(self.snapshot()));
        self.observers.push(Arc::clone(&slot));
        slot
    }

    /// Advance the network by one tick and publish the resulting snapshot.
    pub fn tick(&mut self) -> Snapshot {
        self.engine.step(&mut self.state);

        let snapshot = self.snapshot();
        for slot in self.observers.iter() {
            match slot.write() {
                Ok(mut guard) => *guard = snapshot,
                Err(poisoned) => *poisoned.into_inner() = snapshot,
            }
        }
        snapshot
    }

    /// Run the simulation until `running` is cleared or `max_ticks` ticks have been run.
    /// Progress is logged at the configured reporting interval.
    /// Returns the number of ticks run.
    pub fn run(&mut self, running: &AtomicBool, max_ticks: Option<u64>) -> u64 {
        log::info!("Starting simulation...");

        let mut num_ticks = 0;
        while running.load(Ordering::SeqCst) && max_ticks.map_or(true, |max| num_ticks < max) {
            let snapshot = self.tick();
            num_ticks += 1;

            if let Some(report) = self.reporting.poll(snapshot.tick, Instant::now()) {
                log::info!("TICK: {}, DELTA: {}", report.tick, report.delta);
                log::debug!(
                    "{} neuron(s) fired, mean activity: {:.6}",
                    snapshot.num_fired,
                    snapshot.mean_activity
                );
            }
        }

        log::info!("Simulation stopped after {} tick(s)", num_ticks);
        num_ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::NetworkSampler;
    use crate::validate::ValidationErrorKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::thread;

    fn sample_simulation(num_neurons: usize) -> Simulation {
        let mut rng = StdRng::seed_from_u64(42);
        let state = NetworkSampler::new(num_neurons).unwrap().sample(&mut rng);
        Simulation::new(state, &SimulationConfig::default()).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_state() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut state = NetworkSampler::new(4).unwrap().sample(&mut rng);
        state.neural_activity_mut()[0] = f64::NAN;

        match Simulation::new(state, &SimulationConfig::default()) {
            Err(MindError::Validation(err)) => {
                assert_eq!(err.kind(), ValidationErrorKind::OutOfRange)
            }
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_run_max_ticks() {
        let mut simulation = sample_simulation(10);
        let running = AtomicBool::new(true);

        assert_eq!(simulation.run(&running, Some(42)), 42);
        assert_eq!(simulation.state().tick(), 42);
        assert_eq!(simulation.run(&running, Some(8)), 8);
        assert_eq!(simulation.state().tick(), 50);
    }

    #[test]
    fn test_run_stopped() {
        let mut simulation = sample_simulation(10);
        let running = AtomicBool::new(false);

        assert_eq!(simulation.run(&running, None), 0);
        assert_eq!(simulation.state().tick(), 0);
    }

    #[test]
    fn test_run_cancelled_from_another_thread() {
        let mut simulation = sample_simulation(10);
        let running = Arc::new(AtomicBool::new(true));

        let handle = {
            let running = Arc::clone(&running);
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(20));
                running.store(false, Ordering::SeqCst);
            })
        };

        let num_ticks = simulation.run(&running, None);
        handle.join().unwrap();

        assert!(num_ticks > 0);
        assert_eq!(simulation.state().tick(), num_ticks);
    }

    #[test]
    fn test_observe() {
        let mut simulation = sample_simulation(10);
        let slot = simulation.observe();
        assert_eq!(*slot.read().unwrap(), Snapshot::default());

        let snapshot = simulation.tick();
        assert_eq!(snapshot.tick, 1);
        assert_eq!(*slot.read().unwrap(), snapshot);

        let reader = {
            let slot = Arc::clone(&slot);
            thread::spawn(move || slot.read().unwrap().tick)
        };
        assert_eq!(reader.join().unwrap(), 1);
    }
}
