//! Two-stage driver and sparse re-optimisation on real molecules.

use approx::assert_abs_diff_eq;
use qadapt_chem::{MoleculeSpec, excitations, hf_state, molecular_hamiltonian};
use qadapt_sim::{Excitation, GradientMethod, SparseHamiltonian};
use qadapt_vqe::{
    AdaptiveConfig, AdaptiveDriver, RunConfig, SparsePool, StatevectorEstimator,
    exact_ground_energy, run_adaptive,
};

fn h2_config() -> RunConfig {
    RunConfig {
        molecule: MoleculeSpec::h2(1.4),
        adaptive: AdaptiveConfig::default(),
    }
}

// ----------------------------------------------------------------------------
// H2 / STO-3G
// ----------------------------------------------------------------------------

#[test]
fn test_h2_two_stage() {
    let mol = molecular_hamiltonian(&MoleculeSpec::h2(1.4)).unwrap();
    let (singles, doubles) = excitations(2, 4, 0).unwrap();
    let driver = AdaptiveDriver::new(hf_state(2, 4).unwrap(), AdaptiveConfig::default()).unwrap();
    let est = StatevectorEstimator::new(&mol.hamiltonian);

    let result = driver.run_two_stage(&est, &singles, &doubles).unwrap();
    assert_eq!(result.doubles.gates, vec![Excitation::Double([0, 1, 2, 3])]);
    assert_abs_diff_eq!(result.doubles.gradients[0].abs(), 0.181258, epsilon = 1e-5);
    // Singles break the gerade/ungerade symmetry and have zero gradient.
    assert!(result.singles.is_empty());
    assert_eq!(result.gates, result.doubles.gates);

    assert_eq!(result.doubles_opt.params.len(), 1);
    assert_eq!(result.final_opt.params.len(), result.gates.len());
    assert_eq!(result.final_opt.history.len(), 10);
    assert_abs_diff_eq!(result.final_opt.history[0], mol.hf_energy, epsilon = 1e-8);
    assert_abs_diff_eq!(result.energy(), -1.137274, epsilon = 1e-5);
}

#[test]
fn test_h2_report() {
    let report = run_adaptive(&h2_config()).unwrap();
    assert_eq!(report.molecule.n_qubits, 4);
    assert_eq!((report.molecule.n_singles, report.molecule.n_doubles), (2, 1));
    assert_eq!(report.sparsity.dimension, 16);

    let exact = report.exact_energy.unwrap();
    assert_abs_diff_eq!(exact, -1.137276, epsilon = 1e-5);
    assert!(report.error().unwrap() > 0.0);
    assert!(report.error().unwrap() < 1e-5);
    assert!(report.correlation_recovered().unwrap() > 99.0);
}

#[test]
fn test_sparse_matches_dense() {
    let report = run_adaptive(&h2_config()).unwrap();
    assert_eq!(report.sparse_gates, report.two_stage.gates);
    assert_eq!(report.sparse_opt.history.len(), report.two_stage.final_opt.history.len());
    assert_abs_diff_eq!(report.sparse_energy(), report.final_energy(), epsilon = 1e-6);
    for (s, d) in report
        .sparse_opt
        .history
        .iter()
        .zip(&report.two_stage.final_opt.history)
    {
        assert_abs_diff_eq!(s, d, epsilon = 1e-6);
    }
}

#[test]
fn test_sparse_parameter_shift_matches_dense() {
    let mut config = h2_config();
    config.adaptive.sparse_gradient = GradientMethod::ParameterShift;
    let report = run_adaptive(&config).unwrap();
    assert_abs_diff_eq!(report.sparse_energy(), report.final_energy(), epsilon = 1e-6);
}

#[test]
fn test_report_serializes() {
    let report = run_adaptive(&h2_config()).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["molecule"]["n_qubits"], 4);
    assert_eq!(json["two_stage"]["gates"][0], serde_json::json!([0, 1, 2, 3]));
    assert_eq!(json["sparse_pool"], "selected");
}

// ----------------------------------------------------------------------------
// H3+ / STO-3G, two electrons in three orbitals
// ----------------------------------------------------------------------------

#[test]
fn test_h3_plus_walkthrough() {
    let report = run_adaptive(&RunConfig::default()).unwrap();
    let two_stage = &report.two_stage;

    assert_eq!(report.molecule.n_qubits, 6);
    assert_eq!((report.molecule.n_singles, report.molecule.n_doubles), (4, 4));
    assert_eq!(
        two_stage.doubles.gates,
        vec![Excitation::Double([0, 1, 2, 3]), Excitation::Double([0, 1, 4, 5])]
    );
    assert!(two_stage.singles.is_empty());
    assert!(two_stage.singles.gradients.iter().all(|g| g.abs() < 1e-4));

    let exact = report.exact_energy.unwrap();
    assert_abs_diff_eq!(exact, -1.274438, epsilon = 1e-5);
    assert_abs_diff_eq!(report.final_energy(), -1.274432, epsilon = 1e-5);
    assert_abs_diff_eq!(report.sparse_energy(), report.final_energy(), epsilon = 1e-6);
}

#[test]
fn test_h3_plus_full_sparse_pool() {
    let mut config = RunConfig::default();
    config.adaptive.sparse_pool = SparsePool::Full;
    config.adaptive.sparse_steps = 20;
    let report = run_adaptive(&config).unwrap();
    assert_eq!(report.sparse_gates.len(), 8);
    assert_eq!(report.sparse_opt.params.len(), 8);
    // Doubles first, then singles.
    assert!(report.sparse_gates[..4].iter().all(|g| !g.is_single()));
    assert!(report.sparse_gates[4..].iter().all(Excitation::is_single));
    assert_abs_diff_eq!(
        report.sparse_energy(),
        report.exact_energy.unwrap(),
        epsilon = 1e-5
    );
}

#[test]
fn test_exact_uses_electron_block() {
    let mol = molecular_hamiltonian(&MoleculeSpec::h3_plus()).unwrap();
    let sparse = SparseHamiltonian::from_hamiltonian(&mol.hamiltonian, mol.n_qubits).unwrap();
    let block = exact_ground_energy(&sparse, Some(2)).unwrap();
    let full = exact_ground_energy(&sparse, None).unwrap();
    // Bound virtual orbitals let a third electron lower the energy.
    assert!(full < block - 1e-3);
}

// ----------------------------------------------------------------------------
// Configuration errors
// ----------------------------------------------------------------------------

#[test]
fn test_invalid_config_fails_before_running() {
    let mut config = h2_config();
    config.adaptive.final_steps = 0;
    assert!(run_adaptive(&config).is_err());

    let mut config = h2_config();
    config.molecule.geometry.truncate(4);
    assert!(matches!(
        run_adaptive(&config),
        Err(qadapt_vqe::VqeError::Chem(_))
    ));
}
