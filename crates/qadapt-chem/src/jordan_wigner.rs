//! Second-quantised electronic Hamiltonian and its Jordan-Wigner image.
//!
//! Spin orbitals interleave spin: `2p` is `p↑`, `2p + 1` is `p↓`.
//!
//! ```text
//! H = E_core + Σ_pq h_pq Σ_σ a†_pσ a_qσ
//!            + ½ Σ_pqrs (pq|rs) Σ_στ a†_pσ a†_rτ a_sτ a_qσ
//! ```
//!
//! Jordan-Wigner: `a†_j = ½(X_j - iY_j) Z_{j-1} ⋯ Z_0`.

use ndarray::{Array2, Array4};
use num_complex::Complex64;
use qadapt_sim::{Hamiltonian, HamiltonianTerm, PauliOp, PauliString};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::active_space::ActiveIntegrals;
use crate::error::{ChemError, ChemResult};

/// Pauli terms with `|c|` below this are dropped.
pub const TERM_CUTOFF: f64 = 1e-10;

/// Integrals below this contribute nothing to the expansion.
const INTEGRAL_CUTOFF: f64 = 1e-12;

/// Imaginary residue tolerated on a Pauli coefficient.
const IMAG_TOLERANCE: f64 = 1e-8;

/// A single fermionic ladder operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ladder {
    /// Creation `a†_j`.
    Create(u32),
    /// Annihilation `a_j`.
    Annihilate(u32),
}

/// A qubit operator with complex coefficients, used while expanding.
#[derive(Debug, Clone, Default)]
pub struct QubitOperator {
    terms: FxHashMap<PauliString, Complex64>,
}

impl QubitOperator {
    /// The Jordan-Wigner image of one ladder operator.
    pub fn ladder(op: Ladder) -> Self {
        let (j, y_coeff) = match op {
            Ladder::Create(j) => (j, Complex64::new(0.0, -0.5)),
            Ladder::Annihilate(j) => (j, Complex64::new(0.0, 0.5)),
        };
        let string = |last: PauliOp| {
            PauliString::from_ops((0..j).map(|q| (q, PauliOp::Z)).chain([(j, last)]))
        };
        let mut terms = FxHashMap::default();
        terms.insert(string(PauliOp::X), Complex64::new(0.5, 0.0));
        terms.insert(string(PauliOp::Y), y_coeff);
        Self { terms }
    }

    /// Product of ladder operators, leftmost first.
    pub fn product(ops: &[Ladder]) -> Self {
        let mut acc = Self::identity(Complex64::new(1.0, 0.0));
        for &op in ops {
            acc = acc.mul(&Self::ladder(op));
        }
        acc
    }

    /// `c · I`.
    pub fn identity(c: Complex64) -> Self {
        let mut terms = FxHashMap::default();
        terms.insert(PauliString::identity(), c);
        Self { terms }
    }

    /// `self · rhs`.
    pub fn mul(&self, rhs: &QubitOperator) -> Self {
        let mut terms: FxHashMap<PauliString, Complex64> = FxHashMap::default();
        for (pa, ca) in &self.terms {
            for (pb, cb) in &rhs.terms {
                let (phase, product) = pa.mul(pb);
                *terms.entry(product).or_default() += ca * cb * phase;
            }
        }
        Self { terms }
    }

    /// `self += scale · other`.
    pub fn add_scaled(&mut self, other: &QubitOperator, scale: f64) {
        for (p, c) in &other.terms {
            *self.terms.entry(p.clone()).or_default() += *c * scale;
        }
    }

    /// Number of stored strings, including numerically zero ones.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// True if no string is stored.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Real Hamiltonian, dropping `|c| < cutoff`.
    pub fn into_hamiltonian(self, cutoff: f64) -> ChemResult<Hamiltonian> {
        let mut terms = Vec::with_capacity(self.terms.len());
        for (pauli, c) in self.terms {
            if c.im.abs() > IMAG_TOLERANCE {
                return Err(ChemError::NonHermitian {
                    pauli: pauli.to_string(),
                    imag: c.im,
                });
            }
            if c.re.abs() >= cutoff {
                terms.push(HamiltonianTerm::new(c.re, pauli));
            }
        }
        terms.sort_by(|a, b| a.pauli.cmp(&b.pauli));
        Ok(Hamiltonian::from_terms(terms))
    }
}

/// Qubit Hamiltonian of an active space.
pub fn qubit_hamiltonian(ints: &ActiveIntegrals) -> ChemResult<Hamiltonian> {
    let n = ints.one_body.nrows();
    let mut op = QubitOperator::identity(Complex64::new(ints.core_energy, 0.0));
    add_one_body(&mut op, &ints.one_body);
    add_two_body(&mut op, &ints.two_body, n);
    let expanded = op.len();
    let h = op.into_hamiltonian(TERM_CUTOFF)?;
    debug!(
        n_qubits = 2 * n,
        expanded,
        n_terms = h.n_terms(),
        "Jordan-Wigner mapping"
    );
    Ok(h)
}

fn spin_orbital(p: usize, sigma: usize) -> u32 {
    (2 * p + sigma) as u32
}

fn add_one_body(op: &mut QubitOperator, h: &Array2<f64>) {
    let n = h.nrows();
    for p in 0..n {
        for q in 0..n {
            let c = h[[p, q]];
            if c.abs() < INTEGRAL_CUTOFF {
                continue;
            }
            for sigma in 0..2 {
                let term = QubitOperator::product(&[
                    Ladder::Create(spin_orbital(p, sigma)),
                    Ladder::Annihilate(spin_orbital(q, sigma)),
                ]);
                op.add_scaled(&term, c);
            }
        }
    }
}

fn add_two_body(op: &mut QubitOperator, eri: &Array4<f64>, n: usize) {
    for p in 0..n {
        for q in 0..n {
            for r in 0..n {
                for s in 0..n {
                    let c = 0.5 * eri[[p, q, r, s]];
                    if c.abs() < INTEGRAL_CUTOFF {
                        continue;
                    }
                    for sigma in 0..2 {
                        for tau in 0..2 {
                            let (ps, qs) = (spin_orbital(p, sigma), spin_orbital(q, sigma));
                            let (rt, st) = (spin_orbital(r, tau), spin_orbital(s, tau));
                            if ps == rt || qs == st {
                                continue;
                            }
                            let term = QubitOperator::product(&[
                                Ladder::Create(ps),
                                Ladder::Create(rt),
                                Ladder::Annihilate(st),
                                Ladder::Annihilate(qs),
                            ]);
                            op.add_scaled(&term, c);
                        }
                    }
                }
            }
        }
    }
}
