//! Error types for the chem crate.

use qadapt_sim::SimError;
use thiserror::Error;

/// Errors produced while building a molecular Hamiltonian.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChemError {
    /// The molecule lists no atoms.
    #[error("molecule has no atoms")]
    EmptyMolecule,

    /// Geometry is not three coordinates per atom.
    #[error("geometry must hold {expected} coordinates (3 per atom), got {got}")]
    GeometryLength {
        /// `3 * n_atoms`.
        expected: usize,
        /// Coordinates supplied.
        got: usize,
    },

    /// Two nuclei sit on top of each other.
    #[error("atoms {first} and {second} coincide")]
    CoincidentAtoms {
        /// Index of the first atom.
        first: usize,
        /// Index of the second atom.
        second: usize,
    },

    /// A coordinate is NaN or infinite.
    #[error("geometry contains a non-finite coordinate at index {0}")]
    NonFiniteCoordinate(usize),

    /// Element symbol not supported by the integral code.
    #[error("unsupported element '{0}' (supported: H, He)")]
    UnsupportedElement(String),

    /// Basis set name not recognised.
    #[error("unsupported basis set '{0}' (supported: sto-3g, 6-31g)")]
    UnsupportedBasis(String),

    /// Charge leaves a negative or zero electron count.
    #[error("charge {charge} leaves {electrons} electrons")]
    InvalidCharge {
        /// Net molecular charge.
        charge: i32,
        /// Resulting electron count (may be negative).
        electrons: i64,
    },

    /// Only closed-shell singlets are handled by the RHF solver.
    #[error("RHF needs a closed shell: multiplicity {multiplicity}, {electrons} electrons")]
    OpenShell {
        /// Requested spin multiplicity.
        multiplicity: u32,
        /// Electron count.
        electrons: usize,
    },

    /// The overlap matrix is numerically singular.
    #[error("overlap matrix is singular (smallest eigenvalue {0:.3e}); atoms may coincide")]
    SingularOverlap(f64),

    /// The SCF loop hit its iteration cap.
    #[error("SCF did not converge in {iterations} iterations (last ΔE = {delta_e:.3e} Ha)")]
    ScfNotConverged {
        /// Iterations performed.
        iterations: usize,
        /// Last energy change.
        delta_e: f64,
    },

    /// Active space request is inconsistent with the molecule.
    #[error("invalid active space: {0}")]
    InvalidActiveSpace(String),

    /// Jordan-Wigner produced a term with a non-negligible imaginary part.
    #[error("qubit Hamiltonian term {pauli} has imaginary coefficient {imag:.3e}")]
    NonHermitian {
        /// The offending Pauli string.
        pauli: String,
        /// Imaginary part of its coefficient.
        imag: f64,
    },

    /// Reference state request cannot be satisfied.
    #[error("cannot place {electrons} electrons in {qubits} spin orbitals")]
    InvalidReference {
        /// Requested electrons.
        electrons: usize,
        /// Available spin orbitals.
        qubits: usize,
    },

    /// Spin projection change outside `-2..=2`.
    #[error("delta_sz must lie in -2..=2, got {0}")]
    InvalidDeltaSz(i32),

    /// Error from the simulation layer.
    #[error(transparent)]
    Sim(#[from] SimError),
}

/// Result type for chemistry operations.
pub type ChemResult<T> = Result<T, ChemError>;
