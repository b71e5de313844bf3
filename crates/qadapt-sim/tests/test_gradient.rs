//! Gradient methods must agree with each other and with finite differences.

use approx::assert_relative_eq;
use qadapt_sim::gradient::{adjoint_gradient, energy, parameter_shift_gradient};
use qadapt_sim::{
    Ansatz, Excitation, GateContext, Hamiltonian, HamiltonianTerm, PauliOp, PauliString,
    SimError, SparseHamiltonian,
};

fn six_qubit_hamiltonian() -> Hamiltonian {
    use PauliOp::{X, Y, Z};
    Hamiltonian::from_terms(vec![
        HamiltonianTerm::identity(-1.1),
        HamiltonianTerm::z(0, 0.2),
        HamiltonianTerm::z(1, 0.2),
        HamiltonianTerm::z(4, -0.15),
        HamiltonianTerm::zz(0, 5, 0.11),
        HamiltonianTerm::zz(2, 3, 0.09),
        HamiltonianTerm::new(0.04, PauliString::from_ops([(0, X), (1, X), (2, Y), (3, Y)])),
        HamiltonianTerm::new(-0.04, PauliString::from_ops([(0, X), (1, Y), (2, Y), (3, X)])),
        HamiltonianTerm::new(0.06, PauliString::from_ops([(0, X), (1, Z), (2, Z), (3, Z), (4, X)])),
        HamiltonianTerm::new(0.06, PauliString::from_ops([(0, Y), (1, Z), (2, Z), (3, Z), (4, Y)])),
        HamiltonianTerm::new(0.05, PauliString::from_ops([(1, X), (2, Z), (3, X)])),
        HamiltonianTerm::new(0.05, PauliString::from_ops([(1, Y), (2, Z), (3, Y)])),
    ])
}

fn context_ansatz() -> Ansatz {
    let context = GateContext::new(
        vec![Excitation::Double([0, 1, 2, 3]), Excitation::Double([0, 1, 4, 5])],
        vec![0.12, -0.07],
    )
    .unwrap();
    let pool = [
        Excitation::Single([0, 2]),
        Excitation::Single([0, 4]),
        Excitation::Single([1, 3]),
        Excitation::Double([0, 1, 3, 4]),
    ];
    Ansatz::adaptive(&[1, 1, 0, 0, 0, 0], &context, &pool).unwrap()
}

fn finite_difference(ansatz: &Ansatz, h: &Hamiltonian, params: &[f64]) -> Vec<f64> {
    let eps = 1e-6;
    (0..params.len())
        .map(|i| {
            let mut plus = params.to_vec();
            let mut minus = params.to_vec();
            plus[i] += eps;
            minus[i] -= eps;
            (energy(ansatz, h, &plus).unwrap() - energy(ansatz, h, &minus).unwrap()) / (2.0 * eps)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Agreement
// ---------------------------------------------------------------------------

#[test]
fn adjoint_matches_finite_difference() {
    let h = six_qubit_hamiltonian();
    let ansatz = context_ansatz();
    let params = [0.3, -0.2, 0.45, 0.1];
    let adj = adjoint_gradient(&ansatz, &h, &params).unwrap();
    let fd = finite_difference(&ansatz, &h, &params);
    for (a, f) in adj.iter().zip(&fd) {
        assert_relative_eq!(*a, *f, epsilon = 1e-7);
    }
}

#[test]
fn parameter_shift_matches_adjoint() {
    let h = six_qubit_hamiltonian();
    let ansatz = context_ansatz();
    let params = [-0.6, 0.9, 0.05, 1.3];
    let adj = adjoint_gradient(&ansatz, &h, &params).unwrap();
    let ps = parameter_shift_gradient(&ansatz, &h, &params).unwrap();
    for (a, p) in adj.iter().zip(&ps) {
        assert_relative_eq!(*a, *p, epsilon = 1e-10);
    }
}

#[test]
fn sparse_and_dense_gradients_agree() {
    let h = six_qubit_hamiltonian();
    let sparse = SparseHamiltonian::from_hamiltonian(&h, 6).unwrap();
    let ansatz = context_ansatz();
    let params = [0.0; 4];
    let dense = adjoint_gradient(&ansatz, &h, &params).unwrap();
    let sparse = adjoint_gradient(&ansatz, &sparse, &params).unwrap();
    for (d, s) in dense.iter().zip(&sparse) {
        assert_relative_eq!(*d, *s, epsilon = 1e-12);
    }
}

#[test]
fn gradient_has_one_entry_per_free_gate() {
    let h = six_qubit_hamiltonian();
    let ansatz = context_ansatz();
    let grad = adjoint_gradient(&ansatz, &h, &[0.0; 4]).unwrap();
    assert_eq!(grad.len(), ansatz.n_free());
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn gradient_rejects_wrong_parameter_count() {
    let h = six_qubit_hamiltonian();
    let ansatz = context_ansatz();
    let err = adjoint_gradient(&ansatz, &h, &[0.0; 3]).unwrap_err();
    assert!(matches!(
        err,
        SimError::ParameterCountMismatch {
            expected: 4,
            got: 3
        }
    ));
}

#[test]
fn energy_rejects_narrow_register() {
    let h = six_qubit_hamiltonian();
    let ansatz = Ansatz::with_free_gates(&[1, 1, 0, 0], &[Excitation::Single([0, 2])]).unwrap();
    assert!(matches!(
        energy(&ansatz, &h, &[0.0]),
        Err(SimError::QubitOutOfRange { .. })
    ));
}
