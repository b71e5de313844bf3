//! qadapt-chem - molecular qubit Hamiltonians for adaptive VQE.
//!
//! Turns a molecule description into the inputs of an adaptive ansatz run:
//!
//! - **Integrals** over contracted s-type Gaussians (STO-3G, 6-31G; H, He)
//! - **Restricted Hartree-Fock** with symmetric orthogonalisation
//! - **Active spaces** with frozen doubly occupied core orbitals
//! - **Jordan-Wigner** mapping of the second-quantised Hamiltonian
//! - **Excitation pools** and the **Hartree-Fock reference** occupation
//!
//! # Quick start
//!
//! ```rust
//! use qadapt_chem::{MoleculeSpec, excitations, hf_state, molecular_hamiltonian};
//!
//! let mol = molecular_hamiltonian(&MoleculeSpec::h2(1.4)).unwrap();
//! assert_eq!(mol.n_qubits, 4);
//! assert!((mol.hf_energy + 1.1167).abs() < 1e-4);
//!
//! let (singles, doubles) = excitations(mol.n_electrons, mol.n_qubits as usize, 0).unwrap();
//! assert_eq!((singles.len(), doubles.len()), (2, 1));
//! assert_eq!(hf_state(2, 4).unwrap(), vec![1, 1, 0, 0]);
//! ```

pub mod active_space;
pub mod basis;
pub mod error;
pub mod excitations;
pub mod integrals;
pub mod jordan_wigner;
pub mod molecular;
pub mod molecule;
pub mod scf;

pub use active_space::{ActiveIntegrals, ActiveSpace};
pub use basis::BasisSet;
pub use error::{ChemError, ChemResult};
pub use excitations::{excitations, hf_state};
pub use integrals::AoIntegrals;
pub use molecular::{MolecularHamiltonian, molecular_hamiltonian};
pub use molecule::{Atom, Element, MoleculeSpec, Units};
pub use scf::{RhfSolver, ScfResult};
