//! Observables that can be measured on a [`Statevector`].
//!
//! Both the Pauli-sum [`Hamiltonian`] and the CSR [`SparseHamiltonian`]
//! implement [`Observable`]; estimators are generic over it so the same
//! ansatz can be evaluated against either representation.
//!
//! [`SparseHamiltonian`]: crate::sparse::SparseHamiltonian

use num_complex::Complex64;

use crate::error::{SimError, SimResult};
use crate::hamiltonian::Hamiltonian;
use crate::statevector::Statevector;

/// A Hermitian operator acting on a fixed register.
pub trait Observable {
    /// `O|ψ⟩` (not normalised).
    fn apply(&self, state: &Statevector) -> SimResult<Statevector>;

    /// `⟨ψ|O|ψ⟩`.
    fn expectation(&self, state: &Statevector) -> SimResult<f64>;
}

impl<O: Observable + ?Sized> Observable for &O {
    fn apply(&self, state: &Statevector) -> SimResult<Statevector> {
        (**self).apply(state)
    }

    fn expectation(&self, state: &Statevector) -> SimResult<f64> {
        (**self).expectation(state)
    }
}

impl Observable for Hamiltonian {
    fn apply(&self, state: &Statevector) -> SimResult<Statevector> {
        self.check_register(state)?;
        let psi = state.amplitudes();
        let mut out = vec![Complex64::new(0.0, 0.0); psi.len()];
        for term in self.terms() {
            let masks = term.pauli.masks();
            for (b, amp) in psi.iter().enumerate() {
                out[b ^ masks.flip_mask] += term.coeff * masks.phase(b) * amp;
            }
        }
        Statevector::from_amplitudes(state.num_qubits(), out)
    }

    fn expectation(&self, state: &Statevector) -> SimResult<f64> {
        self.check_register(state)?;
        let psi = state.amplitudes();
        let mut total = 0.0;
        for term in self.terms() {
            let masks = term.pauli.masks();
            let value: Complex64 = psi
                .iter()
                .enumerate()
                .map(|(b, amp)| psi[b ^ masks.flip_mask].conj() * masks.phase(b) * amp)
                .sum();
            total += term.coeff * value.re;
        }
        Ok(total)
    }
}

impl Hamiltonian {
    fn check_register(&self, state: &Statevector) -> SimResult<()> {
        if self.n_terms() == 0 {
            return Err(SimError::EmptyHamiltonian);
        }
        let needed = self.min_qubits();
        if needed > state.num_qubits() {
            return Err(SimError::QubitOutOfRange {
                qubit: needed - 1,
                n_qubits: state.num_qubits(),
            });
        }
        Ok(())
    }
}
