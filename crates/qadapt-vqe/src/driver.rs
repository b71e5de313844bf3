//! Two-stage adaptive driver and sparse re-optimisation.
//!
//! 1. select doubles on the bare reference
//! 2. optimise the selected doubles
//! 3. select singles with the optimised doubles frozen in front
//! 4. optimise doubles and singles together from zero
//!
//! [`run_adaptive`] chains molecule setup, both stages and the sparse
//! re-run into one [`AdaptiveReport`].

use std::time::Instant;

use qadapt_chem::{excitations, hf_state, molecular_hamiltonian};
use qadapt_sim::{Ansatz, Excitation, GateContext, SparseHamiltonian};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::{AdaptiveConfig, RunConfig, SparsePool};
use crate::error::{VqeError, VqeResult};
use crate::estimator::{Estimator, StatevectorEstimator};
use crate::exact::exact_ground_energy;
use crate::optimizer::{EnergyCost, GradientDescent, OptimizationResult, optimize};
use crate::report::{AdaptiveReport, MoleculeSummary, StageTimings};
use crate::selector::{Selection, select_gates};

/// Everything the two-stage procedure produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwoStageResult {
    /// Selection over the double excitations.
    pub doubles: Selection,
    /// Optimisation of the selected doubles alone.
    pub doubles_opt: OptimizationResult,
    /// Selection over the single excitations, doubles frozen.
    pub singles: Selection,
    /// Final gate list: selected doubles, then selected singles.
    pub gates: Vec<Excitation>,
    /// Optimisation of the final gate list.
    pub final_opt: OptimizationResult,
}

impl TwoStageResult {
    /// Energy reported by the last optimisation step.
    pub fn energy(&self) -> f64 {
        self.final_opt.energy
    }
}

/// Runs selection and optimisation stages from a fixed reference.
#[derive(Debug, Clone)]
pub struct AdaptiveDriver {
    reference: Vec<u8>,
    config: AdaptiveConfig,
    optimizer: GradientDescent,
}

impl AdaptiveDriver {
    /// Driver starting from `reference`; `config` is validated here.
    pub fn new(reference: Vec<u8>, config: AdaptiveConfig) -> VqeResult<Self> {
        config.validate()?;
        let optimizer = config.optimizer()?;
        Ok(Self {
            reference,
            config,
            optimizer,
        })
    }

    /// Steps 1 to 4.
    pub fn run_two_stage<E: Estimator + ?Sized>(
        &self,
        estimator: &E,
        singles: &[Excitation],
        doubles: &[Excitation],
    ) -> VqeResult<TwoStageResult> {
        let doubles_sel = select_gates(
            estimator,
            &self.reference,
            doubles,
            &GateContext::empty(),
            self.config.doubles_threshold,
        )?;
        info!(
            stage = "doubles",
            pool = doubles.len(),
            selected = doubles_sel.len(),
            "selected double excitations"
        );

        let doubles_opt =
            self.reoptimize(estimator, &doubles_sel.gates, self.config.doubles_steps)?;
        info!(stage = "doubles", energy = doubles_opt.energy, "optimised doubles");

        let context = GateContext::new(doubles_sel.gates.clone(), doubles_opt.params.clone())?;
        let singles_sel = select_gates(
            estimator,
            &self.reference,
            singles,
            &context,
            self.config.singles_threshold,
        )?;
        info!(
            stage = "singles",
            pool = singles.len(),
            selected = singles_sel.len(),
            "selected single excitations"
        );

        let gates: Vec<Excitation> = doubles_sel
            .gates
            .iter()
            .chain(&singles_sel.gates)
            .copied()
            .collect();
        let final_opt = self.reoptimize(estimator, &gates, self.config.final_steps)?;
        info!(
            stage = "final",
            gates = gates.len(),
            energy = final_opt.energy,
            "optimised selected gates"
        );

        Ok(TwoStageResult {
            doubles: doubles_sel,
            doubles_opt,
            singles: singles_sel,
            gates,
            final_opt,
        })
    }

    /// Optimise `gates` (all free, starting at zero) for `steps` steps.
    pub fn reoptimize<E: Estimator + ?Sized>(
        &self,
        estimator: &E,
        gates: &[Excitation],
        steps: usize,
    ) -> VqeResult<OptimizationResult> {
        let ansatz = Ansatz::with_free_gates(&self.reference, gates)?;
        let cost = EnergyCost::new(estimator, ansatz);
        optimize(&cost, &vec![0.0; gates.len()], steps, &self.optimizer)
    }
}

/// Build the molecule, run both stages, then the sparse re-optimisation.
pub fn run_adaptive(config: &RunConfig) -> VqeResult<AdaptiveReport> {
    config.validate()?;
    let adaptive = &config.adaptive;

    let mol = molecular_hamiltonian(&config.molecule)?;
    let n_qubits = mol.n_qubits as usize;
    let (singles, doubles) = excitations(mol.n_electrons, n_qubits, adaptive.delta_sz)?;
    let reference = hf_state(mol.n_electrons, n_qubits)?;
    info!(
        n_qubits,
        singles = singles.len(),
        doubles = doubles.len(),
        "enumerated excitations"
    );

    let driver = AdaptiveDriver::new(reference, adaptive.clone())?;
    let dense = StatevectorEstimator::new(&mol.hamiltonian).with_method(adaptive.gradient);
    let started = Instant::now();
    let two_stage = driver.run_two_stage(&dense, &singles, &doubles)?;
    let dense_secs = started.elapsed().as_secs_f64();

    let sparse_h = SparseHamiltonian::from_hamiltonian(&mol.hamiltonian, mol.n_qubits)?;
    let sparsity = sparse_h.stats();
    let sparse_gates = match adaptive.sparse_pool {
        SparsePool::Selected => two_stage.gates.clone(),
        SparsePool::Full => doubles.iter().chain(&singles).copied().collect(),
    };
    let sparse = StatevectorEstimator::new(&sparse_h).with_method(adaptive.sparse_gradient);
    let started = Instant::now();
    let sparse_opt = driver.reoptimize(&sparse, &sparse_gates, adaptive.sparse_steps)?;
    let sparse_secs = started.elapsed().as_secs_f64();
    info!(
        stage = "sparse",
        pool = %adaptive.sparse_pool,
        gates = sparse_gates.len(),
        energy = sparse_opt.energy,
        "sparse re-optimisation"
    );

    let exact_energy = if adaptive.exact {
        match exact_ground_energy(&sparse_h, Some(mol.n_electrons)) {
            Ok(e) => Some(e),
            Err(VqeError::TooLargeForExact { dim, max }) => {
                warn!(dim, max, "skipping exact diagonalisation");
                None
            }
            Err(e) => return Err(e),
        }
    } else {
        None
    };

    Ok(AdaptiveReport {
        molecule: MoleculeSummary {
            n_qubits: mol.n_qubits,
            n_electrons: mol.n_electrons,
            n_terms: mol.hamiltonian.n_terms(),
            hf_energy: mol.hf_energy,
            nuclear_repulsion: mol.nuclear_repulsion,
            orbital_energies: mol.orbital_energies,
            n_singles: singles.len(),
            n_doubles: doubles.len(),
        },
        sparsity,
        two_stage,
        sparse_pool: adaptive.sparse_pool,
        sparse_gates,
        sparse_opt,
        exact_energy,
        timings: StageTimings {
            dense_secs,
            sparse_secs,
        },
    })
}
