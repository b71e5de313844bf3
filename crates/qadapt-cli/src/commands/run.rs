//! Run command implementation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use qadapt_sim::GradientMethod;
use qadapt_vqe::{
    AdaptiveReport, OptimizationResult, RunConfig, Selection, SparsePool, run_adaptive,
};
use serde::Serialize;
use tracing::info;

use super::common::{
    format_gates, load_config, molecule_preset, print_header, print_result, print_section,
    spinner,
};

/// Command-line settings applied on top of the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub molecule: Option<String>,
    pub threshold: Option<f64>,
    pub steps: Option<usize>,
    pub stepsize: Option<f64>,
    pub gradient: Option<GradientMethod>,
    pub sparse_pool: Option<SparsePool>,
    pub sparse_gradient: Option<GradientMethod>,
    pub no_exact: bool,
}

impl Overrides {
    /// Apply to `config` and re-validate.
    pub fn apply(&self, mut config: RunConfig) -> Result<RunConfig> {
        if let Some(name) = &self.molecule {
            config.molecule = molecule_preset(name)?;
        }
        let adaptive = config.adaptive;
        let mut adaptive = match self.threshold {
            Some(t) => adaptive.with_threshold(t),
            None => adaptive,
        };
        if let Some(steps) = self.steps {
            adaptive = adaptive.with_steps(steps);
        }
        if let Some(stepsize) = self.stepsize {
            adaptive.stepsize = stepsize;
        }
        if let Some(method) = self.gradient {
            adaptive.gradient = method;
        }
        if let Some(pool) = self.sparse_pool {
            adaptive.sparse_pool = pool;
        }
        if let Some(method) = self.sparse_gradient {
            adaptive.sparse_gradient = method;
        }
        if self.no_exact {
            adaptive.exact = false;
        }
        config.adaptive = adaptive;
        config.validate()?;
        Ok(config)
    }
}

#[derive(Serialize)]
struct ExportedRun<'a> {
    timestamp: String,
    version: &'static str,
    config: &'a RunConfig,
    report: &'a AdaptiveReport,
}

/// Execute the run command.
pub fn execute(config: Option<&Path>, overrides: &Overrides, export: Option<&Path>) -> Result<()> {
    let config = overrides.apply(load_config(config)?)?;
    info!(
        atoms = config.molecule.symbols.len(),
        basis = %config.molecule.basis,
        "starting adaptive run"
    );

    let pb = spinner("Selecting and optimising gates...")?;
    let report = run_adaptive(&config);
    pb.finish_and_clear();
    let report = report?;

    print_report(&config, &report);

    if let Some(path) = export {
        let exported = ExportedRun {
            timestamp: chrono::Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION"),
            config: &config,
            report: &report,
        };
        let json = serde_json::to_string_pretty(&exported)?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
        eprintln!(
            "{} Report written to {}",
            style("OK").green().bold(),
            path.display()
        );
    }

    Ok(())
}

fn print_report(config: &RunConfig, report: &AdaptiveReport) {
    let mol = &report.molecule;
    let adaptive = &config.adaptive;
    print_header(&format!(
        "Adaptive VQE: {} ({})",
        config.molecule.symbols.join(""),
        config.molecule.basis
    ));

    print_section("Molecule");
    print_result("Qubits", mol.n_qubits);
    print_result("Electrons", mol.n_electrons);
    print_result("Pauli terms", mol.n_terms);
    print_result("Nuclear repulsion", format!("{:.8} Ha", mol.nuclear_repulsion));
    print_result("HF energy", format!("{:.8} Ha", mol.hf_energy));
    print_result(
        "Excitation pool",
        format!("{} singles, {} doubles", mol.n_singles, mol.n_doubles),
    );

    let two = &report.two_stage;
    print_selection("Double excitations", &two.doubles);
    print_history("Optimise doubles", &two.doubles_opt);
    print_selection("Single excitations", &two.singles);
    print_history("Optimise selected gates", &two.final_opt);
    print_result("Circuit", format_gates(&two.gates));

    print_section("Sparse Hamiltonian");
    print_result("Dimension", report.sparsity.dimension);
    print_result("Non-zeros", report.sparsity.nnz);
    print_result("Density", format!("{:.4}", report.sparsity.density));
    print_result(
        "Pool",
        format!("{} ({})", report.sparse_pool, format_gates(&report.sparse_gates)),
    );
    print_result("Gradient", adaptive.sparse_gradient);
    print_history("Sparse re-optimisation", &report.sparse_opt);

    println!();
    println!("{}", style("Summary").bold().underlined());
    println!();
    print_result("Final energy", format!("{:.8} Ha", report.final_energy()));
    print_result("Sparse energy", format!("{:.8} Ha", report.sparse_energy()));
    match report.exact_energy {
        Some(exact) => {
            print_result("Exact energy", format!("{exact:.8} Ha"));
            if let Some(error) = report.error() {
                print_result("Error", format!("{error:.2e} Ha"));
            }
            if let Some(pct) = report.correlation_recovered() {
                print_result("Correlation recovered", format!("{pct:.2}%"));
            }
        }
        None => print_result("Exact energy", style("skipped").dim()),
    }
    print_result(
        "Time",
        format!(
            "{:.3}s dense, {:.3}s sparse",
            report.timings.dense_secs, report.timings.sparse_secs
        ),
    );
}

fn print_selection(title: &str, selection: &Selection) {
    print_section(title);
    for (gate, grad) in selection_rows(selection) {
        println!("  {gate:<18} {grad}");
    }
    print_result("Threshold", format!("{:.1e}", selection.threshold));
    print_result("Selected", format_gates(&selection.gates));
}

fn selection_rows(selection: &Selection) -> Vec<(String, String)> {
    selection
        .scored()
        .map(|(gate, grad)| {
            let mark = if grad.abs() > selection.threshold {
                style("✓").green().to_string()
            } else {
                style("·").dim().to_string()
            };
            (gate.to_string(), format!("{grad:>+12.6e} {mark}"))
        })
        .collect()
}

fn print_history(title: &str, result: &OptimizationResult) {
    print_section(title);
    for (n, energy) in result.history.iter().enumerate() {
        println!("  n = {n:>3}  E = {energy:.8} Ha");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply() {
        let overrides = Overrides {
            molecule: Some("h2".into()),
            threshold: Some(1e-5),
            steps: Some(3),
            sparse_pool: Some(SparsePool::Full),
            no_exact: true,
            ..Overrides::default()
        };
        let config = overrides.apply(RunConfig::default()).unwrap();
        assert_eq!(config.molecule.symbols.len(), 2);
        assert_eq!(config.adaptive.doubles_threshold, 1e-5);
        assert_eq!(config.adaptive.singles_threshold, 1e-5);
        assert_eq!(config.adaptive.final_steps, 3);
        assert_eq!(config.adaptive.sparse_pool, SparsePool::Full);
        assert!(!config.adaptive.exact);
    }

    #[test]
    fn test_overrides_validated() {
        let overrides = Overrides {
            stepsize: Some(-1.0),
            ..Overrides::default()
        };
        assert!(overrides.apply(RunConfig::default()).is_err());
    }
}
