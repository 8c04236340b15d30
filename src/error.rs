//! Error module for the Rusty Mind library.
use thiserror::Error;

use crate::validate::ValidationError;

/// Error types for the library.
#[derive(Debug, PartialEq, Error)]
pub enum MindError {
    /// Error for invalid parameters, e.g., an empty network.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
    /// Error for a network state violating its shape, range or self-weight invariants.
    #[error("Invalid network state: {0}")]
    Validation(#[from] ValidationError),
    /// Error for invalid configuration, e.g., a malformed configuration file.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    /// Error for I/O operations.
    #[error("I/O error: {0}")]
    IOError(String),
}
