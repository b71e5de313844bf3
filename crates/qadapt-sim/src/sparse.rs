//! Sparse matrix form of a qubit Hamiltonian.
//!
//! Molecular Hamiltonians conserve particle number and spin, so their
//! matrices over the 2^n computational basis states are mostly zero. The CSR
//! layout stores only the non-zero entries and turns `H|ψ⟩` into a single
//! pass over them, instead of one full sweep of the state per Pauli term.

use num_complex::Complex64;
use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::debug;

use crate::error::{SimError, SimResult};
use crate::hamiltonian::Hamiltonian;
use crate::observable::Observable;
use crate::statevector::{MAX_QUBITS, Statevector};

/// Entries with magnitude below this are treated as structural zeros.
pub const SPARSE_CUTOFF: f64 = 1e-12;

/// Compressed sparse row matrix over the computational basis.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseHamiltonian {
    n_qubits: u32,
    row_ptr: Vec<usize>,
    col_idx: Vec<usize>,
    values: Vec<Complex64>,
}

/// Summary of a sparse Hamiltonian, as printed by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SparsityStats {
    /// Matrix dimension (rows = columns = 2^n).
    pub dimension: usize,
    /// Stored non-zero entries.
    pub nnz: usize,
    /// nnz / dimension².
    pub density: f64,
}

impl SparseHamiltonian {
    /// Build the matrix of `hamiltonian` on an `n_qubits` register.
    ///
    /// Row `r` collects `⟨r|P|c⟩` from every term with `c = r ⊕ flip(P)`, so
    /// each term contributes exactly one entry per row.
    pub fn from_hamiltonian(hamiltonian: &Hamiltonian, n_qubits: u32) -> SimResult<Self> {
        if n_qubits > MAX_QUBITS {
            return Err(SimError::TooManyQubits {
                n_qubits,
                max: MAX_QUBITS,
            });
        }
        if hamiltonian.n_terms() == 0 {
            return Err(SimError::EmptyHamiltonian);
        }
        let needed = hamiltonian.min_qubits();
        if needed > n_qubits {
            return Err(SimError::QubitOutOfRange {
                qubit: needed - 1,
                n_qubits,
            });
        }

        let dim = 1usize << n_qubits;
        let masks: Vec<_> = hamiltonian
            .terms()
            .iter()
            .map(|t| (t.coeff, t.pauli.masks()))
            .collect();

        let mut row_ptr = Vec::with_capacity(dim + 1);
        let mut col_idx = Vec::new();
        let mut values = Vec::new();
        let mut row: FxHashMap<usize, Complex64> = FxHashMap::default();

        row_ptr.push(0);
        for r in 0..dim {
            row.clear();
            for (coeff, m) in &masks {
                let c = r ^ m.flip_mask;
                *row.entry(c).or_insert(Complex64::new(0.0, 0.0)) += *coeff * m.phase(c);
            }
            let mut entries: Vec<(usize, Complex64)> = row
                .iter()
                .filter(|(_, v)| v.norm() > SPARSE_CUTOFF)
                .map(|(&c, &v)| (c, v))
                .collect();
            entries.sort_unstable_by_key(|(c, _)| *c);
            for (c, v) in entries {
                col_idx.push(c);
                values.push(v);
            }
            row_ptr.push(col_idx.len());
        }

        debug!(
            n_qubits,
            n_terms = hamiltonian.n_terms(),
            nnz = values.len(),
            "built sparse Hamiltonian"
        );

        Ok(Self {
            n_qubits,
            row_ptr,
            col_idx,
            values,
        })
    }

    /// Register width.
    pub fn n_qubits(&self) -> u32 {
        self.n_qubits
    }

    /// Matrix dimension.
    pub fn dimension(&self) -> usize {
        1usize << self.n_qubits
    }

    /// Number of stored non-zero entries.
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Dimension, nnz and density in one struct.
    pub fn stats(&self) -> SparsityStats {
        let dim = self.dimension();
        SparsityStats {
            dimension: dim,
            nnz: self.nnz(),
            density: self.nnz() as f64 / (dim as f64 * dim as f64),
        }
    }

    /// Iterate over `(row, col, value)` of the stored entries.
    pub fn entries(&self) -> impl Iterator<Item = (usize, usize, Complex64)> + '_ {
        (0..self.dimension()).flat_map(move |r| {
            (self.row_ptr[r]..self.row_ptr[r + 1])
                .map(move |k| (r, self.col_idx[k], self.values[k]))
        })
    }

    /// Matrix element `⟨row|H|col⟩`.
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        if row >= self.dimension() {
            return Complex64::new(0.0, 0.0);
        }
        let span = self.row_ptr[row]..self.row_ptr[row + 1];
        match self.col_idx[span.clone()].binary_search(&col) {
            Ok(k) => self.values[span.start + k],
            Err(_) => Complex64::new(0.0, 0.0),
        }
    }

    fn check_register(&self, state: &Statevector) -> SimResult<()> {
        if state.num_qubits() != self.n_qubits {
            return Err(SimError::DimensionMismatch {
                expected: self.n_qubits,
                got: state.num_qubits(),
            });
        }
        Ok(())
    }
}

impl Observable for SparseHamiltonian {
    fn apply(&self, state: &Statevector) -> SimResult<Statevector> {
        self.check_register(state)?;
        let psi = state.amplitudes();
        let out: Vec<Complex64> = (0..self.dimension())
            .map(|r| {
                (self.row_ptr[r]..self.row_ptr[r + 1])
                    .map(|k| self.values[k] * psi[self.col_idx[k]])
                    .sum::<Complex64>()
            })
            .collect();
        Statevector::from_amplitudes(self.n_qubits, out)
    }

    fn expectation(&self, state: &Statevector) -> SimResult<f64> {
        self.check_register(state)?;
        let psi = state.amplitudes();
        let mut total = Complex64::new(0.0, 0.0);
        for (r, amp) in psi.iter().enumerate() {
            if amp.norm_sqr() == 0.0 {
                continue;
            }
            let row: Complex64 = (self.row_ptr[r]..self.row_ptr[r + 1])
                .map(|k| self.values[k] * psi[self.col_idx[k]])
                .sum();
            total += amp.conj() * row;
        }
        Ok(total.re)
    }
}
