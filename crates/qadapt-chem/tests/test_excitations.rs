//! Excitation pools for the molecules the driver runs on.

use qadapt_chem::{MoleculeSpec, excitations, hf_state, molecular_hamiltonian};
use qadapt_sim::Excitation;

#[test]
fn test_pool_sizes_grow_with_virtuals() {
    let sizes: Vec<(usize, usize)> = [4, 6, 8]
        .into_iter()
        .map(|q| {
            let (s, d) = excitations(2, q, 0).unwrap();
            (s.len(), d.len())
        })
        .collect();
    // Singles: n_occ_σ · n_virt_σ per spin. Doubles: the spin-conserving pairs.
    assert_eq!(sizes, vec![(2, 1), (4, 4), (6, 9)]);
}

#[test]
fn test_every_excitation_conserves_spin() {
    let (singles, doubles) = excitations(4, 8, 0).unwrap();
    for ex in singles.iter().chain(&doubles) {
        let w = ex.wires();
        let half = w.len() / 2;
        let up = |ws: &[u32]| ws.iter().filter(|&&q| q % 2 == 0).count();
        assert_eq!(up(&w[..half]), up(&w[half..]), "{ex:?}");
    }
}

#[test]
fn test_occupied_before_virtual() {
    let (singles, doubles) = excitations(2, 6, 0).unwrap();
    for ex in singles.iter().chain(&doubles) {
        let w = ex.wires();
        let half = w.len() / 2;
        assert!(w[..half].iter().all(|&q| q < 2));
        assert!(w[half..].iter().all(|&q| q >= 2));
    }
}

#[test]
fn test_h3_plus_pool() {
    let mol = molecular_hamiltonian(&MoleculeSpec::h3_plus()).unwrap();
    let (singles, doubles) = excitations(mol.n_electrons, mol.n_qubits as usize, 0).unwrap();
    assert_eq!(singles.len(), 4);
    assert_eq!(doubles[0], Excitation::Double([0, 1, 2, 3]));
    assert_eq!(hf_state(mol.n_electrons, mol.n_qubits as usize).unwrap(), vec![1, 1, 0, 0, 0, 0]);
}
