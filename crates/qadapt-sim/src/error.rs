//! Error types for the sim crate.

use thiserror::Error;

/// Errors produced while building or evaluating ansatz circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// Hamiltonian contains no terms.
    #[error("Hamiltonian has no terms")]
    EmptyHamiltonian,

    /// A Pauli string or gate references a qubit index that is out of range.
    #[error("qubit {qubit} is out of range for a {n_qubits}-qubit register")]
    QubitOutOfRange {
        /// The offending qubit index.
        qubit: u32,
        /// Number of qubits in the register.
        n_qubits: u32,
    },

    /// An excitation acts on the same wire twice.
    #[error("excitation {wires:?} repeats a wire")]
    RepeatedWire {
        /// The wires of the offending excitation.
        wires: Vec<u32>,
    },

    /// An excitation descriptor has neither two nor four wires.
    #[error("excitation must list 2 or 4 wires, got {0}")]
    InvalidExcitation(usize),

    /// The number of parameters does not match the number of free gates.
    #[error("ansatz has {expected} free parameters, got {got}")]
    ParameterCountMismatch {
        /// Free parameters in the ansatz.
        expected: usize,
        /// Length of the supplied parameter vector.
        got: usize,
    },

    /// Reference occupation is not a list of 0/1 entries.
    #[error("reference occupation must contain only 0 or 1, found {0}")]
    InvalidOccupation(u8),

    /// Statevector and operator dimensions disagree.
    #[error("operator acts on {expected} qubits but the state has {got}")]
    DimensionMismatch {
        /// Qubits the operator acts on.
        expected: u32,
        /// Qubits in the state.
        got: u32,
    },

    /// Dense diagonalisation refused because the register is too wide.
    #[error("register of {n_qubits} qubits exceeds the simulator limit of {max} qubits")]
    TooManyQubits {
        /// Requested width.
        n_qubits: u32,
        /// Largest supported width.
        max: u32,
    },
}

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;
