//! Hamiltonian command implementation.

use std::path::Path;

use anyhow::Result;
use console::style;
use qadapt_chem::{MolecularHamiltonian, molecular_hamiltonian};
use qadapt_sim::{HamiltonianTerm, SparseHamiltonian};

use super::common::{print_header, print_result, print_section, resolve_config};

/// Execute the hamiltonian command.
pub fn execute(
    config: Option<&Path>,
    molecule: Option<&str>,
    terms: usize,
    format: &str,
) -> Result<()> {
    let config = resolve_config(config, molecule)?;
    let mol = molecular_hamiltonian(&config.molecule)?;

    match format.to_lowercase().as_str() {
        "table" => print_table(&config.molecule.symbols.join(""), &mol, terms),
        "json" => {
            println!("{}", serde_json::to_string_pretty(&mol)?);
            Ok(())
        }
        other => anyhow::bail!("Unknown format: '{other}'. Available: table, json"),
    }
}

fn print_table(name: &str, mol: &MolecularHamiltonian, limit: usize) -> Result<()> {
    print_header(&format!("Qubit Hamiltonian: {name}"));

    print_section("Electronic structure");
    print_result("Qubits", mol.n_qubits);
    print_result("Electrons", mol.n_electrons);
    print_result("SCF iterations", mol.scf_iterations);
    print_result("HF energy", format!("{:.8} Ha", mol.hf_energy));
    print_result("Nuclear repulsion", format!("{:.8} Ha", mol.nuclear_repulsion));
    print_result("Core energy", format!("{:.8} Ha", mol.core_energy));
    let eps: Vec<String> = mol.orbital_energies.iter().map(|e| format!("{e:.6}")).collect();
    print_result("Orbital energies", eps.join(", "));

    let sorted = largest_terms(mol.hamiltonian.terms(), limit);
    print_section(&format!(
        "Terms ({} of {})",
        sorted.len(),
        mol.hamiltonian.n_terms()
    ));
    for term in sorted {
        println!("  {:>+14.8}  {}", term.coeff, term.pauli);
    }

    let sparse = SparseHamiltonian::from_hamiltonian(&mol.hamiltonian, mol.n_qubits)?;
    let stats = sparse.stats();
    print_section("Sparse matrix");
    print_result("Dimension", stats.dimension);
    print_result("Non-zeros", stats.nnz);
    print_result("Density", format!("{:.4}", stats.density));
    print_result("1-norm", format!("{:.6}", mol.hamiltonian.lambda()));
    println!();
    println!("{}", style("Terms ordered by |coefficient|").dim());
    Ok(())
}

/// The `limit` largest terms by magnitude; `0` keeps all.
fn largest_terms(terms: &[HamiltonianTerm], limit: usize) -> Vec<&HamiltonianTerm> {
    let mut sorted: Vec<&HamiltonianTerm> = terms.iter().collect();
    sorted.sort_by(|a, b| b.coeff.abs().total_cmp(&a.coeff.abs()));
    if limit > 0 {
        sorted.truncate(limit);
    }
    sorted
}
