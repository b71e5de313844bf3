//! Step-and-cost behaviour of the gradient-descent loop.

use approx::assert_abs_diff_eq;
use qadapt_sim::{Ansatz, Excitation, Hamiltonian, HamiltonianTerm, PauliOp, PauliString};
use qadapt_vqe::{
    CostFunction, EnergyCost, FnCost, GradientDescent, StatevectorEstimator, VqeError, optimize,
};

#[test]
fn test_quadratic_converges_to_minimum() {
    let cost = FnCost::new(1, |p: &[f64]| (p[0] - 3.0).powi(2));
    let gd = GradientDescent::new(0.1).unwrap();
    let result = optimize(&cost, &[0.0], 100, &gd).unwrap();
    assert_abs_diff_eq!(result.params[0], 3.0, epsilon = 1e-6);
    assert_eq!(result.history[0], 9.0);
    assert!(result.history.windows(2).all(|w| w[1] <= w[0]));
}

#[test]
fn test_energy_is_pre_update() {
    let cost = FnCost::new(1, |p: &[f64]| (p[0] - 3.0).powi(2));
    let gd = GradientDescent::new(0.1).unwrap();
    let result = optimize(&cost, &[0.0], 5, &gd).unwrap();
    // Reported energy belongs to the parameters before the last update.
    let final_cost = cost.cost(&result.params).unwrap();
    assert!(result.energy > final_cost);
    assert_eq!(result.energy, *result.history.last().unwrap());
}

#[test]
fn test_toy_ansatz_reaches_minus_g() {
    // E(θ) = -g sin θ has its minimum -g at θ = π/2.
    let h = Hamiltonian::from_terms(vec![HamiltonianTerm::new(
        1.0,
        PauliString::from_ops((0..4).map(|q| (q, PauliOp::X))),
    )]);
    let est = StatevectorEstimator::new(h);
    let ansatz =
        Ansatz::with_free_gates(&[1, 1, 0, 0], &[Excitation::Double([0, 1, 2, 3])]).unwrap();
    let cost = EnergyCost::new(&est, ansatz);
    let result = optimize(&cost, &[0.0], 40, &GradientDescent::default()).unwrap();
    assert_abs_diff_eq!(result.energy, -1.0, epsilon = 1e-8);
    assert_abs_diff_eq!(result.params[0], std::f64::consts::FRAC_PI_2, epsilon = 1e-6);
}

#[test]
fn test_parameters_align_with_gates() {
    let h = Hamiltonian::from_terms(vec![HamiltonianTerm::z(0, 1.0), HamiltonianTerm::z(2, 0.5)]);
    let est = StatevectorEstimator::new(h);
    for gates in [
        vec![],
        vec![Excitation::Single([0, 2])],
        vec![Excitation::Single([0, 2]), Excitation::Double([0, 1, 2, 3])],
    ] {
        let ansatz = Ansatz::with_free_gates(&[1, 1, 0, 0], &gates).unwrap();
        let cost = EnergyCost::new(&est, ansatz);
        let result =
            optimize(&cost, &vec![0.0; gates.len()], 3, &GradientDescent::default()).unwrap();
        assert_eq!(result.params.len(), gates.len());
    }
}

#[test]
fn test_misaligned_start_is_rejected() {
    let h = Hamiltonian::from_terms(vec![HamiltonianTerm::z(0, 1.0)]);
    let est = StatevectorEstimator::new(h);
    let ansatz = Ansatz::with_free_gates(&[1, 0], &[Excitation::Single([0, 1])]).unwrap();
    let cost = EnergyCost::new(&est, ansatz);
    assert!(matches!(
        optimize(&cost, &[0.0, 0.0], 3, &GradientDescent::default()),
        Err(VqeError::ParameterMismatch { expected: 1, got: 2 })
    ));
}
