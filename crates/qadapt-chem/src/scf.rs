//! Restricted closed-shell Hartree-Fock.
//!
//! Roothaan-Hall fixed point in a symmetrically orthogonalised basis,
//! starting from the core-Hamiltonian guess.

use nalgebra::{DMatrix, DVector, SymmetricEigen};
use tracing::{debug, info};

use crate::error::{ChemError, ChemResult};
use crate::integrals::AoIntegrals;

/// Converged RHF solution.
#[derive(Debug, Clone)]
pub struct ScfResult {
    /// Total energy including nuclear repulsion.
    pub energy: f64,
    /// Electronic energy only.
    pub electronic_energy: f64,
    /// MO coefficients, one column per orbital, ascending energy.
    pub coefficients: DMatrix<f64>,
    /// Orbital energies, ascending.
    pub orbital_energies: Vec<f64>,
    /// AO density matrix `P = 2 Σ_occ C Cᵀ`.
    pub density: DMatrix<f64>,
    /// Iterations until convergence.
    pub iterations: usize,
}

/// Fixed-point RHF solver.
#[derive(Debug, Clone)]
pub struct RhfSolver {
    max_iterations: usize,
    energy_tolerance: f64,
    density_tolerance: f64,
}

impl Default for RhfSolver {
    fn default() -> Self {
        Self {
            max_iterations: 128,
            energy_tolerance: 1e-10,
            density_tolerance: 1e-8,
        }
    }
}

impl RhfSolver {
    /// Solver with the default tolerances.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the iteration cap.
    #[must_use]
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Run RHF for `n_electrons` (even) electrons.
    pub fn solve(
        &self,
        ints: &AoIntegrals,
        n_electrons: usize,
        nuclear_repulsion: f64,
    ) -> ChemResult<ScfResult> {
        let n = ints.n_basis();
        let n_occ = n_electrons / 2;
        if n_electrons % 2 != 0 || n_occ > n {
            return Err(ChemError::OpenShell {
                multiplicity: 1,
                electrons: n_electrons,
            });
        }

        let x = orthogonalizer(&ints.overlap)?;
        let h = ints.core_hamiltonian();

        let (_, guess) = diagonalize(&h, &x);
        let mut p = density(&guess, n_occ);
        let mut last_energy = 0.0;
        let mut delta_e = f64::INFINITY;

        for iteration in 1..=self.max_iterations {
            let f = fock(&h, &p, ints);
            let electronic = 0.5 * p.component_mul(&(&h + &f)).sum();

            let (eps, c) = diagonalize(&f, &x);
            let p_new = density(&c, n_occ);
            let rms = ((&p_new - &p).norm_squared() / (n * n) as f64).sqrt();
            delta_e = electronic - last_energy;

            debug!(
                iteration,
                energy = electronic + nuclear_repulsion,
                delta_e,
                rms_density = rms,
                "SCF iteration"
            );

            p = p_new;
            last_energy = electronic;
            if delta_e.abs() < self.energy_tolerance && rms < self.density_tolerance {
                let energy = electronic + nuclear_repulsion;
                info!(iterations = iteration, energy, "RHF converged");
                return Ok(ScfResult {
                    energy,
                    electronic_energy: electronic,
                    coefficients: c,
                    orbital_energies: eps.iter().copied().collect(),
                    density: p,
                    iterations: iteration,
                });
            }
        }

        Err(ChemError::ScfNotConverged {
            iterations: self.max_iterations,
            delta_e,
        })
    }
}

/// Symmetric orthogonaliser `S^{-1/2}`.
fn orthogonalizer(s: &DMatrix<f64>) -> ChemResult<DMatrix<f64>> {
    let eig = SymmetricEigen::new(s.clone());
    let smallest = eig.eigenvalues.min();
    if smallest < 1e-10 {
        return Err(ChemError::SingularOverlap(smallest));
    }
    let inv_sqrt = DVector::from_iterator(
        eig.eigenvalues.len(),
        eig.eigenvalues.iter().map(|v| 1.0 / v.sqrt()),
    );
    Ok(&eig.eigenvectors * DMatrix::from_diagonal(&inv_sqrt) * eig.eigenvectors.transpose())
}

/// Solve `F C = S C ε` via `X`, sorted ascending with a fixed sign per column.
fn diagonalize(f: &DMatrix<f64>, x: &DMatrix<f64>) -> (DVector<f64>, DMatrix<f64>) {
    let f_prime = x.transpose() * f * x;
    let eig = SymmetricEigen::new(f_prime);

    let mut order: Vec<usize> = (0..eig.eigenvalues.len()).collect();
    order.sort_by(|&a, &b| eig.eigenvalues[a].total_cmp(&eig.eigenvalues[b]));
    let eps = DVector::from_fn(order.len(), |i, _| eig.eigenvalues[order[i]]);
    let mut c = x * eig.eigenvectors.select_columns(order.iter());

    for mut col in c.column_iter_mut() {
        let sum: f64 = col.iter().sum();
        let flip = if sum.abs() > 1e-8 {
            sum < 0.0
        } else {
            col.iter().find(|v| v.abs() > 1e-8).is_some_and(|v| *v < 0.0)
        };
        if flip {
            col *= -1.0;
        }
    }
    (eps, c)
}

fn density(c: &DMatrix<f64>, n_occ: usize) -> DMatrix<f64> {
    let occ = c.columns(0, n_occ);
    2.0 * &occ * occ.transpose()
}

/// `F_ij = H_ij + Σ_kl P_kl [(ij|kl) - ½(ik|lj)]`.
fn fock(h: &DMatrix<f64>, p: &DMatrix<f64>, ints: &AoIntegrals) -> DMatrix<f64> {
    let n = h.nrows();
    let eri = &ints.eri;
    DMatrix::from_fn(n, n, |i, j| {
        let mut g = 0.0;
        for k in 0..n {
            for l in 0..n {
                g += p[(k, l)] * (eri[[i, j, k, l]] - 0.5 * eri[[i, k, l, j]]);
            }
        }
        h[(i, j)] + g
    })
}
