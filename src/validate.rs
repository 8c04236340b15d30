//! Validation of a network state: shape consistency, value ranges and absence of self-influence.
//!
//! A state must pass [`validate`] once before the first step, and again after any external mutation.
//! The step itself never checks its input.
use std::fmt;

use itertools::iproduct;
use nalgebra::{DMatrix, DVector};
use thiserror::Error;

use crate::network::NetworkState;
use crate::{MAX_ACTIVATION, MAX_REACTIVATION_DELAY};

/// The fields of a network state.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Field {
    ActivationThresholds,
    ReactivationDelays,
    SignalMap,
    OutputsWeights,
    InputWeights,
    NextActivations,
    NeuralActivity,
}

impl Field {
    /// Returns the name of the field.
    pub fn name(self) -> &'static str {
        match self {
            Field::ActivationThresholds => "activation_thresholds",
            Field::ReactivationDelays => "reactivation_delays",
            Field::SignalMap => "signal_map",
            Field::OutputsWeights => "outputs_weights",
            Field::InputWeights => "input_weights",
            Field::NextActivations => "next_activations",
            Field::NeuralActivity => "neural_activity",
        }
    }

    /// Returns whether the value lies in the domain of the field.
    pub fn accepts(self, value: f64) -> bool {
        match self {
            Field::ActivationThresholds
            | Field::SignalMap
            | Field::OutputsWeights
            | Field::InputWeights => (0.0..MAX_ACTIVATION).contains(&value),
            Field::ReactivationDelays => (0.0..MAX_REACTIVATION_DELAY).contains(&value),
            Field::NextActivations | Field::NeuralActivity => value.is_finite(),
        }
    }

    /// Returns a human-readable description of the domain of the field.
    pub fn domain(self) -> String {
        match self {
            Field::ActivationThresholds
            | Field::SignalMap
            | Field::OutputsWeights
            | Field::InputWeights => format!("[0, {})", MAX_ACTIVATION),
            Field::ReactivationDelays => format!("[0, {})", MAX_REACTIVATION_DELAY),
            Field::NextActivations | Field::NeuralActivity => "the finite numbers".to_string(),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Position of an offending value: a neuron in a vector, or a link in a matrix.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Index {
    Neuron(usize),
    /// A (target, source) pair.
    Link(usize, usize),
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Index::Neuron(i) => write!(f, "[{}]", i),
            Index::Link(i, j) => write!(f, "[{}][{}]", i, j),
        }
    }
}

/// Coarse classification of validation errors.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ValidationErrorKind {
    ShapeMismatch,
    OutOfRange,
    NonZeroSelfWeight,
}

/// Error types for network state validation.
#[derive(Debug, PartialEq, Clone, Error)]
pub enum ValidationError {
    /// Error for vectors or matrices whose dimensions disagree with the number of neurons.
    #[error("{field} has shape {found:?}, expected {expected:?}")]
    ShapeMismatch {
        field: Field,
        expected: (usize, usize),
        found: (usize, usize),
    },
    /// Error for a value outside the domain of its field, including NaN and infinite values.
    #[error("{field}{index} = {value} lies outside {}", .field.domain())]
    OutOfRange {
        field: Field,
        index: Index,
        value: f64,
    },
    /// Error for a non-zero diagonal entry, i.e., a neuron influencing itself.
    #[error("{field}[{neuron}][{neuron}] = {value} must be zero")]
    NonZeroSelfWeight {
        field: Field,
        neuron: usize,
        value: f64,
    },
}

impl ValidationError {
    pub fn kind(&self) -> ValidationErrorKind {
        match self {
            ValidationError::ShapeMismatch { .. } => ValidationErrorKind::ShapeMismatch,
            ValidationError::OutOfRange { .. } => ValidationErrorKind::OutOfRange,
            ValidationError::NonZeroSelfWeight { .. } => ValidationErrorKind::NonZeroSelfWeight,
        }
    }

    /// Returns the description of the violation.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Returns the field holding the violation.
    pub fn field(&self) -> Field {
        match self {
            ValidationError::ShapeMismatch { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::NonZeroSelfWeight { field, .. } => *field,
        }
    }
}

/// Check that a network state satisfies all its invariants.
/// The checks are, in order: shape consistency, value ranges and zero diagonals.
/// The function returns the first violation encountered and never modifies the state.
pub fn validate(state: &NetworkState) -> Result<(), ValidationError> {
    validate_shape(state)
        .and_then(|_| validate_ranges(state))
        .and_then(|_| validate_diagonals(state))
        .inspect_err(|err| log::debug!("Network validation failed: {}", err))
}

/// Check that all vectors have length `N` and both matrices are `N x N`, with `N` the number of thresholds.
pub(crate) fn validate_shape(state: &NetworkState) -> Result<(), ValidationError> {
    let n = state.num_neurons();

    let vectors = [
        (Field::ReactivationDelays, &state.reactivation_delays),
        (Field::SignalMap, &state.signal_map),
        (Field::NextActivations, &state.next_activations),
        (Field::NeuralActivity, &state.neural_activity),
    ];
    for (field, vector) in vectors {
        if vector.shape() != (n, 1) {
            return Err(ValidationError::ShapeMismatch {
                field,
                expected: (n, 1),
                found: vector.shape(),
            });
        }
    }

    let matrices = [
        (Field::OutputsWeights, &state.outputs_weights),
        (Field::InputWeights, &state.input_weights),
    ];
    for (field, matrix) in matrices {
        if matrix.shape() != (n, n) {
            return Err(ValidationError::ShapeMismatch {
                field,
                expected: (n, n),
                found: matrix.shape(),
            });
        }
    }

    Ok(())
}

fn validate_ranges(state: &NetworkState) -> Result<(), ValidationError> {
    check_vector(Field::ActivationThresholds, &state.activation_thresholds)?;
    check_vector(Field::ReactivationDelays, &state.reactivation_delays)?;
    check_vector(Field::SignalMap, &state.signal_map)?;
    check_matrix(Field::OutputsWeights, &state.outputs_weights)?;
    check_matrix(Field::InputWeights, &state.input_weights)?;
    check_vector(Field::NextActivations, &state.next_activations)?;
    check_vector(Field::NeuralActivity, &state.neural_activity)
}

fn check_vector(field: Field, vector: &DVector<f64>) -> Result<(), ValidationError> {
    match vector.iter().position(|&value| !field.accepts(value)) {
        Some(i) => Err(ValidationError::OutOfRange {
            field,
            index: Index::Neuron(i),
            value: vector[i],
        }),
        None => Ok(()),
    }
}

// Scans row-major (nalgebra iterates column-major).
fn check_matrix(field: Field, matrix: &DMatrix<f64>) -> Result<(), ValidationError> {
    match iproduct!(0..matrix.nrows(), 0..matrix.ncols())
        .find(|&(i, j)| !field.accepts(matrix[(i, j)]))
    {
        Some((i, j)) => Err(ValidationError::OutOfRange {
            field,
            index: Index::Link(i, j),
            value: matrix[(i, j)],
        }),
        None => Ok(()),
    }
}

fn validate_diagonals(state: &NetworkState) -> Result<(), ValidationError> {
    let matrices = [
        (Field::OutputsWeights, &state.outputs_weights),
        (Field::InputWeights, &state.input_weights),
    ];
    for (field, matrix) in matrices {
        if let Some((neuron, &value)) = matrix
            .diagonal()
            .iter()
            .enumerate()
            .find(|&(_, &value)| value != 0.0)
        {
            return Err(ValidationError::NonZeroSelfWeight {
                field,
                neuron,
                value,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::NetworkSampler;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_state(num_neurons: usize) -> NetworkState {
        let mut rng = StdRng::seed_from_u64(42);
        NetworkSampler::new(num_neurons).unwrap().sample(&mut rng)
    }

    #[test]
    fn test_valid_state() {
        let state = sample_state(10);
        assert_eq!(validate(&state), Ok(()));
    }

    #[test]
    fn test_empty_state() {
        let state = NetworkState::build(
            DVector::zeros(0),
            DVector::zeros(0),
            DVector::zeros(0),
            DMatrix::zeros(0, 0),
            DMatrix::zeros(0, 0),
        )
        .unwrap();
        assert_eq!(validate(&state), Ok(()));
    }

    #[test]
    fn test_shape_mismatch_after_mutation() {
        let mut state = sample_state(5);
        *state.neural_activity_mut() = DVector::zeros(6);

        assert_eq!(
            validate(&state),
            Err(ValidationError::ShapeMismatch {
                field: Field::NeuralActivity,
                expected: (5, 1),
                found: (6, 1),
            })
        );
    }

    #[test]
    fn test_out_of_range_threshold() {
        let mut state = sample_state(5);
        state.activation_thresholds[3] = 1.0;

        assert_eq!(
            validate(&state),
            Err(ValidationError::OutOfRange {
                field: Field::ActivationThresholds,
                index: Index::Neuron(3),
                value: 1.0,
            })
        );
    }

    #[test]
    fn test_out_of_range_delay() {
        let mut state = sample_state(5);
        state.reactivation_delays[0] = 10.0;
        assert_eq!(
            validate(&state).unwrap_err().kind(),
            ValidationErrorKind::OutOfRange
        );

        state.reactivation_delays[0] = 9.5;
        assert_eq!(validate(&state), Ok(()));
    }

    #[test]
    fn test_out_of_range_reports_first_link_row_major() {
        let mut state = sample_state(4);
        state.input_weights[(2, 1)] = -0.5;
        state.input_weights[(1, 2)] = -0.25;

        assert_eq!(
            validate(&state),
            Err(ValidationError::OutOfRange {
                field: Field::InputWeights,
                index: Index::Link(1, 2),
                value: -0.25,
            })
        );
    }

    #[test]
    fn test_range_checked_before_diagonal() {
        let mut state = sample_state(4);
        state.outputs_weights[(2, 2)] = 1.0;

        let err = validate(&state).unwrap_err();
        assert_eq!(err.kind(), ValidationErrorKind::OutOfRange);
        assert_eq!(err.field(), Field::OutputsWeights);
    }

    #[test]
    fn test_non_finite_activity() {
        let mut state = sample_state(4);
        state.neural_activity_mut()[1] = f64::INFINITY;
        let err = validate(&state).unwrap_err();
        assert_eq!(err.kind(), ValidationErrorKind::OutOfRange);
        assert_eq!(err.field(), Field::NeuralActivity);

        let mut state = sample_state(4);
        state.next_activations_mut()[2] = f64::NAN;
        let err = validate(&state).unwrap_err();
        assert_eq!(err.kind(), ValidationErrorKind::OutOfRange);
        assert_eq!(err.field(), Field::NextActivations);
    }

    #[test]
    fn test_non_zero_self_weight() {
        let mut state = sample_state(4);
        state.input_weights[(3, 3)] = 0.5;

        assert_eq!(
            validate(&state),
            Err(ValidationError::NonZeroSelfWeight {
                field: Field::InputWeights,
                neuron: 3,
                value: 0.5,
            })
        );
    }

    #[test]
    fn test_error_message() {
        let err = ValidationError::OutOfRange {
            field: Field::OutputsWeights,
            index: Index::Link(1, 2),
            value: 1.5,
        };
        assert_eq!(err.message(), "outputs_weights[1][2] = 1.5 lies outside [0, 1)");

        let err = ValidationError::NonZeroSelfWeight {
            field: Field::InputWeights,
            neuron: 0,
            value: 0.25,
        };
        assert_eq!(err.message(), "input_weights[0][0] = 0.25 must be zero");

        let err = ValidationError::ShapeMismatch {
            field: Field::SignalMap,
            expected: (3, 1),
            found: (2, 1),
        };
        assert_eq!(err.message(), "signal_map has shape (2, 1), expected (3, 1)");
    }
}
