//! Excitation enumeration and the Hartree-Fock reference occupation.

use qadapt_sim::Excitation;

use crate::error::{ChemError, ChemResult};

/// Twice the spin projection of spin orbital `i` (even = ↑, odd = ↓).
fn two_sz(i: u32) -> i32 {
    if i % 2 == 0 { 1 } else { -1 }
}

/// Spin-filtered single and double excitations out of the HF determinant.
///
/// Occupied spin orbitals are `0..electrons`, virtual ones
/// `electrons..qubits`. Singles are `[r, p]` with `r` occupied and `p`
/// virtual; doubles are `[s, r, q, p]` with `s < r` occupied and `q < p`
/// virtual. Only excitations changing the total spin projection by
/// `delta_sz` are kept. Both lists come out in lexicographic order.
///
/// ```rust
/// use qadapt_chem::excitations;
/// use qadapt_sim::Excitation;
///
/// let (singles, doubles) = excitations(2, 4, 0).unwrap();
/// assert_eq!(singles, vec![Excitation::Single([0, 2]), Excitation::Single([1, 3])]);
/// assert_eq!(doubles, vec![Excitation::Double([0, 1, 2, 3])]);
/// ```
pub fn excitations(
    electrons: usize,
    qubits: usize,
    delta_sz: i32,
) -> ChemResult<(Vec<Excitation>, Vec<Excitation>)> {
    if electrons == 0 || electrons > qubits {
        return Err(ChemError::InvalidReference { electrons, qubits });
    }
    if !(-2..=2).contains(&delta_sz) {
        return Err(ChemError::InvalidDeltaSz(delta_sz));
    }
    let (n_occ, n_qubits) = (electrons as u32, qubits as u32);
    let target = 2 * delta_sz;

    let mut singles = Vec::new();
    for r in 0..n_occ {
        for p in n_occ..n_qubits {
            if two_sz(p) - two_sz(r) == target {
                singles.push(Excitation::Single([r, p]));
            }
        }
    }

    let mut doubles = Vec::new();
    for s in 0..n_occ {
        for r in s + 1..n_occ {
            for q in n_occ..n_qubits {
                for p in q + 1..n_qubits {
                    if two_sz(p) + two_sz(q) - two_sz(r) - two_sz(s) == target {
                        doubles.push(Excitation::Double([s, r, q, p]));
                    }
                }
            }
        }
    }

    Ok((singles, doubles))
}

/// Occupation list of the HF determinant: `electrons` ones, then zeros.
pub fn hf_state(electrons: usize, qubits: usize) -> ChemResult<Vec<u8>> {
    if electrons == 0 || electrons > qubits {
        return Err(ChemError::InvalidReference { electrons, qubits });
    }
    Ok((0..qubits).map(|i| u8::from(i < electrons)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_electrons_six_qubits() {
        let (singles, doubles) = excitations(2, 6, 0).unwrap();
        let singles: Vec<Vec<u32>> = singles.into_iter().map(Vec::from).collect();
        let doubles: Vec<Vec<u32>> = doubles.into_iter().map(Vec::from).collect();
        assert_eq!(singles, vec![vec![0, 2], vec![0, 4], vec![1, 3], vec![1, 5]]);
        assert_eq!(
            doubles,
            vec![
                vec![0, 1, 2, 3],
                vec![0, 1, 2, 5],
                vec![0, 1, 3, 4],
                vec![0, 1, 4, 5]
            ]
        );
    }

    #[test]
    fn test_spin_flip_singles() {
        let (singles, doubles) = excitations(2, 4, 1).unwrap();
        // ↓ → ↑ only: wire 1 (↓) to wire 2 (↑)
        assert_eq!(singles, vec![Excitation::Single([1, 2])]);
        assert!(doubles.is_empty());
    }

    #[test]
    fn test_no_virtuals() {
        let (singles, doubles) = excitations(4, 4, 0).unwrap();
        assert!(singles.is_empty());
        assert!(doubles.is_empty());
    }

    #[test]
    fn test_bad_arguments() {
        assert!(matches!(excitations(0, 4, 0), Err(ChemError::InvalidReference { .. })));
        assert!(matches!(excitations(5, 4, 0), Err(ChemError::InvalidReference { .. })));
        assert!(matches!(excitations(2, 4, 3), Err(ChemError::InvalidDeltaSz(3))));
    }

    #[test]
    fn test_hf_state() {
        assert_eq!(hf_state(2, 6).unwrap(), vec![1, 1, 0, 0, 0, 0]);
        assert_eq!(hf_state(3, 3).unwrap(), vec![1, 1, 1]);
        assert!(hf_state(7, 6).is_err());
    }
}
