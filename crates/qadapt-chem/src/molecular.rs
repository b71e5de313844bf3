//! End-to-end construction of a molecular qubit Hamiltonian.

use std::str::FromStr;

use qadapt_sim::Hamiltonian;
use serde::Serialize;
use tracing::info;

use crate::active_space::{ActiveSpace, mo_integrals, reduce};
use crate::basis::{BasisSet, build_basis};
use crate::error::ChemResult;
use crate::integrals::AoIntegrals;
use crate::jordan_wigner::qubit_hamiltonian;
use crate::molecule::{MoleculeSpec, nuclear_repulsion};
use crate::scf::RhfSolver;

/// A qubit Hamiltonian together with the data needed to run VQE on it.
#[derive(Debug, Clone, Serialize)]
pub struct MolecularHamiltonian {
    /// Jordan-Wigner Hamiltonian of the active space.
    pub hamiltonian: Hamiltonian,
    /// Spin orbitals in the active space.
    pub n_qubits: u32,
    /// Active electrons.
    pub n_electrons: usize,
    /// RHF total energy.
    pub hf_energy: f64,
    /// Nuclear repulsion energy.
    pub nuclear_repulsion: f64,
    /// Nuclear repulsion plus frozen-core energy.
    pub core_energy: f64,
    /// RHF orbital energies of all spatial orbitals.
    pub orbital_energies: Vec<f64>,
    /// Iterations the RHF solver needed.
    pub scf_iterations: usize,
}

/// Build the qubit Hamiltonian of `spec`.
///
/// Runs integrals, RHF, active-space reduction and Jordan-Wigner in turn.
pub fn molecular_hamiltonian(spec: &MoleculeSpec) -> ChemResult<MolecularHamiltonian> {
    spec.validate()?;
    let atoms = spec.atoms()?;
    let basis_set = BasisSet::from_str(&spec.basis)?;
    let electrons = spec.n_electrons()?;
    let e_nuc = nuclear_repulsion(&atoms);

    let basis = build_basis(&atoms, basis_set);
    let ints = AoIntegrals::compute(&basis, &atoms);
    let scf = RhfSolver::new().solve(&ints, electrons, e_nuc)?;

    let space = ActiveSpace::select(
        electrons,
        basis.len(),
        spec.active_electrons,
        spec.active_orbitals,
    )?;
    let (one, two) = mo_integrals(&ints, &scf.coefficients);
    let active = reduce(&one, &two, e_nuc, &space);
    let hamiltonian = qubit_hamiltonian(&active)?;

    info!(
        atoms = atoms.len(),
        basis = %basis_set,
        hf_energy = scf.energy,
        n_qubits = space.n_qubits(),
        n_terms = hamiltonian.n_terms(),
        "built molecular Hamiltonian"
    );

    Ok(MolecularHamiltonian {
        hamiltonian,
        n_qubits: space.n_qubits() as u32,
        n_electrons: space.electrons,
        hf_energy: scf.energy,
        nuclear_repulsion: e_nuc,
        core_energy: active.core_energy,
        orbital_energies: scf.orbital_energies,
        scf_iterations: scf.iterations,
    })
}
