//! Reference ground-state energies by dense diagonalisation.
//!
//! The Jordan-Wigner Hamiltonian acts on every particle number at once, so
//! the physically meaningful ground state is the lowest eigenvalue of the
//! block with the molecule's electron count.

use nalgebra::{Complex, DMatrix};
use qadapt_sim::SparseHamiltonian;
use tracing::debug;

use crate::error::{VqeError, VqeResult};

/// Largest block [`exact_ground_energy`] diagonalises.
pub const MAX_EXACT_DIM: usize = 2048;

/// Lowest eigenvalue of a Hermitian sparse Hamiltonian.
///
/// With `electrons = Some(n)` only basis states with `n` set bits are kept;
/// otherwise the whole matrix is used.
pub fn exact_ground_energy(
    hamiltonian: &SparseHamiltonian,
    electrons: Option<usize>,
) -> VqeResult<f64> {
    let basis: Vec<usize> = (0..hamiltonian.dimension())
        .filter(|b| electrons.is_none_or(|n| b.count_ones() as usize == n))
        .collect();
    let dim = basis.len();
    if dim > MAX_EXACT_DIM {
        return Err(VqeError::TooLargeForExact {
            dim,
            max: MAX_EXACT_DIM,
        });
    }

    let mut position = vec![None; hamiltonian.dimension()];
    for (i, &b) in basis.iter().enumerate() {
        position[b] = Some(i);
    }
    let mut m = DMatrix::<Complex<f64>>::zeros(dim, dim);
    for (row, col, v) in hamiltonian.entries() {
        if let (Some(r), Some(c)) = (position[row], position[col]) {
            m[(r, c)] = v;
        }
    }

    let ground = m
        .symmetric_eigenvalues()
        .iter()
        .copied()
        .fold(f64::INFINITY, f64::min);
    debug!(dim, ?electrons, ground, "exact diagonalisation");
    Ok(ground)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qadapt_sim::{Hamiltonian, HamiltonianTerm, PauliOp, PauliString};

    #[test]
    fn test_transverse_pair() {
        // Z0 Z1 + 0.5 (X0 + X1): ground energy -sqrt(2)
        let h = Hamiltonian::from_terms(vec![
            HamiltonianTerm::zz(0, 1, 1.0),
            HamiltonianTerm::x(0, 0.5),
            HamiltonianTerm::x(1, 0.5),
        ]);
        let sparse = SparseHamiltonian::from_hamiltonian(&h, 2).unwrap();
        let e = exact_ground_energy(&sparse, None).unwrap();
        assert!((e + 2f64.sqrt()).abs() < 1e-10);
    }

    #[test]
    fn test_complex_entries() {
        // Y0 has eigenvalues ±1
        let h = Hamiltonian::from_terms(vec![HamiltonianTerm::new(
            2.0,
            PauliString::from_ops([(0, PauliOp::Y)]),
        )]);
        let sparse = SparseHamiltonian::from_hamiltonian(&h, 1).unwrap();
        assert!((exact_ground_energy(&sparse, None).unwrap() + 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_particle_number_block() {
        // Z0 + Z1 + Z2: one set bit gives +1, the full space gives -3.
        let h = Hamiltonian::from_terms(vec![
            HamiltonianTerm::z(0, 1.0),
            HamiltonianTerm::z(1, 1.0),
            HamiltonianTerm::z(2, 1.0),
        ]);
        let sparse = SparseHamiltonian::from_hamiltonian(&h, 3).unwrap();
        assert!((exact_ground_energy(&sparse, None).unwrap() + 3.0).abs() < 1e-12);
        assert!((exact_ground_energy(&sparse, Some(1)).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_large_block() {
        let h = Hamiltonian::from_terms(vec![HamiltonianTerm::z(0, 1.0)]);
        let sparse = SparseHamiltonian::from_hamiltonian(&h, 12).unwrap();
        assert!(matches!(
            exact_ground_energy(&sparse, None),
            Err(VqeError::TooLargeForExact { dim: 4096, .. })
        ));
        let e = exact_ground_energy(&sparse, Some(1)).unwrap();
        // Z0 on one set bit: -1 if it is bit 0, +1 otherwise.
        assert!((e + 1.0).abs() < 1e-12);
    }
}
