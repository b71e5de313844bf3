//! Hamiltonian data structures.
//!
//! A qubit Hamiltonian is a sum of weighted Pauli strings:
//!
//!   H = Σ_k  c_k · P_k
//!
//! where each P_k is a tensor product of single-qubit Pauli operators
//! (I, X, Y, Z) and c_k ∈ ℝ.
//!
//! # Example
//!
//! ```rust
//! use qadapt_sim::hamiltonian::{Hamiltonian, HamiltonianTerm, PauliOp, PauliString};
//!
//! // H = -1.0·Z₀Z₁  +  0.5·X₀
//! let h = Hamiltonian::from_terms(vec![
//!     HamiltonianTerm::new(-1.0, PauliString::from_ops(vec![(0, PauliOp::Z), (1, PauliOp::Z)])),
//!     HamiltonianTerm::new( 0.5, PauliString::from_ops(vec![(0, PauliOp::X)])),
//! ]);
//! assert_eq!(h.n_terms(), 2);
//! ```

use std::fmt;

use num_complex::Complex64;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PauliOp {
    /// Identity.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl PauliOp {
    /// Get the name of this Pauli operator.
    pub fn name(&self) -> &'static str {
        match self {
            PauliOp::I => "I",
            PauliOp::X => "X",
            PauliOp::Y => "Y",
            PauliOp::Z => "Z",
        }
    }

    /// Product of two single-qubit Paulis: `self · rhs = phase · op`.
    pub fn mul(self, rhs: PauliOp) -> (Complex64, PauliOp) {
        let i = Complex64::i();
        let one = Complex64::new(1.0, 0.0);
        match (self, rhs) {
            (PauliOp::I, p) | (p, PauliOp::I) => (one, p),
            (a, b) if a == b => (one, PauliOp::I),
            (PauliOp::X, PauliOp::Y) => (i, PauliOp::Z),
            (PauliOp::Y, PauliOp::X) => (-i, PauliOp::Z),
            (PauliOp::Y, PauliOp::Z) => (i, PauliOp::X),
            (PauliOp::Z, PauliOp::Y) => (-i, PauliOp::X),
            (PauliOp::Z, PauliOp::X) => (i, PauliOp::Y),
            (PauliOp::X, PauliOp::Z) => (-i, PauliOp::Y),
            _ => unreachable!("all Pauli pairs covered"),
        }
    }
}

impl fmt::Display for PauliOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A tensor product of Pauli operators on named qubits.
///
/// Stored as a sorted `Vec<(qubit_index, PauliOp)>` with Identity terms
/// omitted.  Qubits not listed are implicitly I.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PauliString {
    /// Non-identity terms, sorted by qubit index ascending.
    ops: Vec<(u32, PauliOp)>,
}

/// Bit masks describing how a Pauli string acts on computational basis states.
///
/// `P|b⟩ = i^n_y · (-1)^popcount(b & phase_mask) · |b ⊕ flip_mask⟩`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PauliMasks {
    /// Qubits carrying X or Y.
    pub flip_mask: usize,
    /// Qubits carrying Y or Z.
    pub phase_mask: usize,
    /// Number of Y operators.
    pub n_y: u32,
}

impl PauliMasks {
    /// Phase picked up by basis state `index`.
    #[inline]
    pub fn phase(&self, index: usize) -> Complex64 {
        let sign = if (index & self.phase_mask).count_ones() % 2 == 0 {
            1.0
        } else {
            -1.0
        };
        let base = match self.n_y % 4 {
            0 => Complex64::new(1.0, 0.0),
            1 => Complex64::new(0.0, 1.0),
            2 => Complex64::new(-1.0, 0.0),
            _ => Complex64::new(0.0, -1.0),
        };
        base * sign
    }
}

impl PauliString {
    /// Construct a PauliString from an iterator of (qubit, op) pairs.
    ///
    /// Identity operators are dropped; the remaining ops are sorted by qubit.
    /// Qubits are expected to be distinct: a repeated qubit keeps the op that
    /// came first. Build products with [`PauliString::mul`], which tracks the
    /// phase.
    pub fn from_ops(ops: impl IntoIterator<Item = (u32, PauliOp)>) -> Self {
        let mut v: Vec<(u32, PauliOp)> = ops
            .into_iter()
            .filter(|(_, op)| *op != PauliOp::I)
            .collect();
        v.sort_by_key(|(q, _)| *q);
        v.dedup_by_key(|(q, _)| *q);
        Self { ops: v }
    }

    /// The identity string.
    pub fn identity() -> Self {
        Self { ops: Vec::new() }
    }

    /// Construct a Z⊗Z⊗...⊗Z string spanning the given qubits.
    pub fn zz(qubits: impl IntoIterator<Item = u32>) -> Self {
        Self::from_ops(qubits.into_iter().map(|q| (q, PauliOp::Z)))
    }

    /// Return the non-identity (qubit, op) pairs, sorted by qubit index.
    pub fn ops(&self) -> &[(u32, PauliOp)] {
        &self.ops
    }

    /// True if there are no non-identity operators.
    pub fn is_identity(&self) -> bool {
        self.ops.is_empty()
    }

    /// The highest qubit index referenced, or `None` for an identity string.
    pub fn max_qubit(&self) -> Option<u32> {
        self.ops.last().map(|(q, _)| *q)
    }

    /// Multiply two strings: `self · rhs = phase · product`.
    pub fn mul(&self, rhs: &PauliString) -> (Complex64, PauliString) {
        let mut phase = Complex64::new(1.0, 0.0);
        let mut ops = Vec::with_capacity(self.ops.len() + rhs.ops.len());
        let (mut i, mut j) = (0, 0);

        while i < self.ops.len() && j < rhs.ops.len() {
            let (qa, a) = self.ops[i];
            let (qb, b) = rhs.ops[j];
            if qa < qb {
                ops.push((qa, a));
                i += 1;
            } else if qb < qa {
                ops.push((qb, b));
                j += 1;
            } else {
                let (p, op) = a.mul(b);
                phase *= p;
                if op != PauliOp::I {
                    ops.push((qa, op));
                }
                i += 1;
                j += 1;
            }
        }
        ops.extend_from_slice(&self.ops[i..]);
        ops.extend_from_slice(&rhs.ops[j..]);

        (phase, PauliString { ops })
    }

    /// Bit masks for applying this string to basis states.
    pub fn masks(&self) -> PauliMasks {
        let mut masks = PauliMasks {
            flip_mask: 0,
            phase_mask: 0,
            n_y: 0,
        };
        for &(q, op) in &self.ops {
            let bit = 1usize << q;
            match op {
                PauliOp::I => {}
                PauliOp::X => masks.flip_mask |= bit,
                PauliOp::Y => {
                    masks.flip_mask |= bit;
                    masks.phase_mask |= bit;
                    masks.n_y += 1;
                }
                PauliOp::Z => masks.phase_mask |= bit,
            }
        }
        masks
    }
}

impl fmt::Display for PauliString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ops.is_empty() {
            return write!(f, "I");
        }
        for (i, (qubit, op)) in self.ops.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{op}{qubit}")?;
        }
        Ok(())
    }
}

/// A single weighted Pauli term: `coeff · pauli`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HamiltonianTerm {
    /// Real coefficient.
    pub coeff: f64,
    /// The Pauli string.
    pub pauli: PauliString,
}

impl HamiltonianTerm {
    /// Create a new term.
    pub fn new(coeff: f64, pauli: PauliString) -> Self {
        Self { coeff, pauli }
    }

    /// Shorthand: identity (constant) term.
    pub fn identity(coeff: f64) -> Self {
        Self::new(coeff, PauliString::identity())
    }

    /// Shorthand: single-qubit Z term.
    pub fn z(qubit: u32, coeff: f64) -> Self {
        Self::new(coeff, PauliString::from_ops([(qubit, PauliOp::Z)]))
    }

    /// Shorthand: ZZ coupling term.
    pub fn zz(q0: u32, q1: u32, coeff: f64) -> Self {
        Self::new(
            coeff,
            PauliString::from_ops([(q0, PauliOp::Z), (q1, PauliOp::Z)]),
        )
    }

    /// Shorthand: single-qubit X term.
    pub fn x(qubit: u32, coeff: f64) -> Self {
        Self::new(coeff, PauliString::from_ops([(qubit, PauliOp::X)]))
    }
}

impl fmt::Display for HamiltonianTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+.8} {}", self.coeff, self.pauli)
    }
}

/// A sum-of-Pauli-strings Hamiltonian.
///
/// H = Σ_k  c_k · P_k
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hamiltonian {
    terms: Vec<HamiltonianTerm>,
}

impl Hamiltonian {
    /// Create from a list of terms.
    pub fn from_terms(terms: Vec<HamiltonianTerm>) -> Self {
        Self { terms }
    }

    /// All terms.
    pub fn terms(&self) -> &[HamiltonianTerm] {
        &self.terms
    }

    /// Number of terms.
    pub fn n_terms(&self) -> usize {
        self.terms.len()
    }

    /// Sum of the identity coefficients.
    pub fn identity_coefficient(&self) -> f64 {
        self.terms
            .iter()
            .filter(|t| t.pauli.is_identity())
            .map(|t| t.coeff)
            .sum()
    }

    /// Spectral norm upper bound: Σ |c_k|.
    pub fn lambda(&self) -> f64 {
        self.terms.iter().map(|t| t.coeff.abs()).sum()
    }

    /// The minimum number of qubits required to represent this Hamiltonian.
    ///
    /// Returns 0 if the Hamiltonian is empty or purely identity.
    pub fn min_qubits(&self) -> u32 {
        self.terms
            .iter()
            .filter_map(|t| t.pauli.max_qubit())
            .max()
            .map_or(0, |q| q + 1)
    }

    /// Merge repeated Pauli strings and drop terms with `|c| <= cutoff`.
    ///
    /// The surviving terms are sorted by Pauli string so that two equal
    /// operators built in different orders compare equal.
    #[must_use]
    pub fn simplify(&self, cutoff: f64) -> Self {
        let mut merged: FxHashMap<&PauliString, f64> = FxHashMap::default();
        for term in &self.terms {
            *merged.entry(&term.pauli).or_insert(0.0) += term.coeff;
        }
        let mut terms: Vec<HamiltonianTerm> = merged
            .into_iter()
            .filter(|(_, c)| c.abs() > cutoff)
            .map(|(p, c)| HamiltonianTerm::new(c, p.clone()))
            .collect();
        terms.sort_by(|a, b| a.pauli.cmp(&b.pauli));
        Self { terms }
    }
}

impl FromIterator<HamiltonianTerm> for Hamiltonian {
    fn from_iter<T: IntoIterator<Item = HamiltonianTerm>>(iter: T) -> Self {
        Self {
            terms: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Hamiltonian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Hamiltonian ({} terms, {} qubits):",
            self.n_terms(),
            self.min_qubits()
        )?;
        for term in &self.terms {
            writeln!(f, "  {term}")?;
        }
        Ok(())
    }
}
