//! Machine-readable summary of an adaptive run.

use qadapt_sim::{Excitation, SparsityStats};
use serde::Serialize;

use crate::config::SparsePool;
use crate::driver::TwoStageResult;
use crate::optimizer::OptimizationResult;

/// Molecule-level numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoleculeSummary {
    /// Qubits (active spin orbitals).
    pub n_qubits: u32,
    /// Active electrons.
    pub n_electrons: usize,
    /// Pauli terms in the qubit Hamiltonian.
    pub n_terms: usize,
    /// RHF energy.
    pub hf_energy: f64,
    /// Nuclear repulsion.
    pub nuclear_repulsion: f64,
    /// RHF orbital energies.
    pub orbital_energies: Vec<f64>,
    /// Size of the single-excitation pool.
    pub n_singles: usize,
    /// Size of the double-excitation pool.
    pub n_doubles: usize,
}

/// Wall-clock seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StageTimings {
    /// Both stages against the Pauli-sum Hamiltonian.
    pub dense_secs: f64,
    /// The sparse re-optimisation.
    pub sparse_secs: f64,
}

/// Result of [`run_adaptive`](crate::run_adaptive).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdaptiveReport {
    pub molecule: MoleculeSummary,
    pub sparsity: SparsityStats,
    pub two_stage: TwoStageResult,
    pub sparse_pool: SparsePool,
    pub sparse_gates: Vec<Excitation>,
    pub sparse_opt: OptimizationResult,
    /// Ground energy by diagonalisation, when requested and small enough.
    pub exact_energy: Option<f64>,
    pub timings: StageTimings,
}

impl AdaptiveReport {
    /// Energy of the two-stage run.
    pub fn final_energy(&self) -> f64 {
        self.two_stage.energy()
    }

    /// Energy of the sparse re-optimisation.
    pub fn sparse_energy(&self) -> f64 {
        self.sparse_opt.energy
    }

    /// `final_energy - exact_energy`, if the exact energy is known.
    pub fn error(&self) -> Option<f64> {
        self.exact_energy.map(|e| self.final_energy() - e)
    }

    /// Correlation energy recovered relative to HF, in percent.
    pub fn correlation_recovered(&self) -> Option<f64> {
        let exact = self.exact_energy?;
        let total = exact - self.molecule.hf_energy;
        if total.abs() < 1e-12 {
            return None;
        }
        Some(100.0 * (self.final_energy() - self.molecule.hf_energy) / total)
    }
}
