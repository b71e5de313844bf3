//! qadapt-sim - statevector simulation for adaptive excitation ansätze.
//!
//! Provides the qubit-level building blocks the adaptive VQE driver needs:
//!
//! - **Pauli-sum Hamiltonians** ([`Hamiltonian`]) and their **CSR sparse**
//!   counterpart ([`SparseHamiltonian`]), both usable as an [`Observable`]
//! - **Excitation gates** (`SingleExcitation`, `DoubleExcitation`) as Givens
//!   rotations on a [`Statevector`]
//! - **Ansatz descriptions** ([`Ansatz`]) built from a reference occupation,
//!   frozen context gates and trainable pool gates
//! - **Gradients** by adjoint differentiation or the four-term
//!   parameter-shift rule ([`GradientMethod`])
//!
//! # Quick start
//!
//! ```rust
//! use qadapt_sim::{Ansatz, Excitation, GradientMethod, Hamiltonian, HamiltonianTerm};
//! use qadapt_sim::{PauliOp, PauliString, gradient};
//!
//! // H = 0.25 · X0 X1 X2 X3
//! let h = Hamiltonian::from_terms(vec![HamiltonianTerm::new(
//!     0.25,
//!     PauliString::from_ops((0..4).map(|q| (q, PauliOp::X))),
//! )]);
//!
//! let gates = [Excitation::Double([0, 1, 2, 3])];
//! let ansatz = Ansatz::with_free_gates(&[1, 1, 0, 0], &gates).unwrap();
//! let grad = gradient::gradient(&ansatz, &h, &[0.0], GradientMethod::Adjoint).unwrap();
//! assert!((grad[0] + 0.25).abs() < 1e-12);
//! ```

pub mod ansatz;
pub mod error;
pub mod gradient;
pub mod hamiltonian;
pub mod observable;
pub mod sparse;
pub mod statevector;

pub use ansatz::{Ansatz, AnsatzOp, Excitation, GateContext, GateParam};
pub use error::{SimError, SimResult};
pub use gradient::GradientMethod;
pub use hamiltonian::{Hamiltonian, HamiltonianTerm, PauliMasks, PauliOp, PauliString};
pub use observable::Observable;
pub use sparse::{SparseHamiltonian, SparsityStats};
pub use statevector::{MAX_QUBITS, Statevector};
