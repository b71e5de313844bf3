//! Error types for adaptive VQE runs.

use qadapt_chem::ChemError;
use qadapt_sim::SimError;
use thiserror::Error;

/// Errors raised by the selector, optimizer and driver.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VqeError {
    /// Selection threshold is not a positive finite number.
    #[error("gradient threshold must be positive and finite, got {0}")]
    InvalidThreshold(f64),

    /// Optimizer asked to run zero steps.
    #[error("step count must be at least 1, got {0}")]
    InvalidStepCount(usize),

    /// Optimizer step size is not a positive finite number.
    #[error("step size must be positive and finite, got {0}")]
    InvalidStepSize(f64),

    /// Parameter or gradient vector does not line up with its gates.
    #[error("expected {expected} values, got {got}")]
    ParameterMismatch {
        /// Number of gates.
        expected: usize,
        /// Number of values supplied.
        got: usize,
    },

    /// Matrix block too large for dense diagonalisation.
    #[error("exact diagonalisation is limited to dimension {max}, got {dim}")]
    TooLargeForExact {
        /// Dimension of the requested block.
        dim: usize,
        /// Largest supported dimension.
        max: usize,
    },

    /// Configuration file could not be read.
    #[error("failed to read config: {0}")]
    ConfigIo(String),

    /// Configuration file is not valid YAML for a run.
    #[error("failed to parse config: {0}")]
    ConfigParse(String),

    /// Error from the simulation layer.
    #[error(transparent)]
    Sim(#[from] SimError),

    /// Error from the chemistry layer.
    #[error(transparent)]
    Chem(#[from] ChemError),
}

/// Result type for VQE operations.
pub type VqeResult<T> = Result<T, VqeError>;
