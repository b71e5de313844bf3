//! Statevector simulation engine.
//!
//! Wire `w` is bit `w` of the basis-state index, so the occupation
//! `[1, 1, 0, 0]` is basis state `0b0011`.

use num_complex::Complex64;

use crate::ansatz::Excitation;
use crate::error::{SimError, SimResult};

/// Widest register the simulator accepts.
pub const MAX_QUBITS: u32 = 26;

/// A statevector representing a quantum state.
#[derive(Debug, Clone, PartialEq)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: u32,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: u32) -> SimResult<Self> {
        check_width(num_qubits)?;
        let size = 1usize << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Ok(Self {
            amplitudes,
            num_qubits,
        })
    }

    /// Prepare the computational basis state given by an occupation list.
    pub fn from_occupation(occupation: &[u8]) -> SimResult<Self> {
        let num_qubits = occupation.len() as u32;
        check_width(num_qubits)?;
        let mut index = 0usize;
        for (wire, &bit) in occupation.iter().enumerate() {
            match bit {
                0 => {}
                1 => index |= 1 << wire,
                other => return Err(SimError::InvalidOccupation(other)),
            }
        }
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); 1usize << num_qubits];
        amplitudes[index] = Complex64::new(1.0, 0.0);
        Ok(Self {
            amplitudes,
            num_qubits,
        })
    }

    /// Wrap raw amplitudes; the length must be `2^num_qubits`.
    pub fn from_amplitudes(num_qubits: u32, amplitudes: Vec<Complex64>) -> SimResult<Self> {
        check_width(num_qubits)?;
        let expected = 1usize << num_qubits;
        if amplitudes.len() != expected {
            return Err(SimError::DimensionMismatch {
                expected: num_qubits,
                got: amplitudes.len().trailing_zeros(),
            });
        }
        Ok(Self {
            amplitudes,
            num_qubits,
        })
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Hilbert-space dimension.
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// The amplitudes in basis-state order.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Squared norm ⟨ψ|ψ⟩.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    /// Inner product ⟨self|other⟩.
    pub fn inner(&self, other: &Statevector) -> SimResult<Complex64> {
        if self.num_qubits != other.num_qubits {
            return Err(SimError::DimensionMismatch {
                expected: self.num_qubits,
                got: other.num_qubits,
            });
        }
        Ok(self
            .amplitudes
            .iter()
            .zip(&other.amplitudes)
            .map(|(a, b)| a.conj() * b)
            .sum())
    }

    /// Apply a single or double excitation gate with angle `theta`.
    ///
    /// Rotates the pair (first half occupied, second half occupied):
    /// `ψ_hi ← cos(θ/2)·ψ_hi − sin(θ/2)·ψ_lo`,
    /// `ψ_lo ← sin(θ/2)·ψ_hi + cos(θ/2)·ψ_lo`.
    ///
    /// Fails if a wire lies outside the register or is repeated.
    pub fn apply_excitation(&mut self, excitation: &Excitation, theta: f64) -> SimResult<()> {
        excitation.validate(self.num_qubits)?;
        let (lo_mask, hi_mask) = excitation.masks();
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        for i in 0..self.amplitudes.len() {
            if i & lo_mask == lo_mask && i & hi_mask == 0 {
                let j = i ^ lo_mask ^ hi_mask;
                let lo = self.amplitudes[i];
                let hi = self.amplitudes[j];
                self.amplitudes[j] = c * hi - s * lo;
                self.amplitudes[i] = s * hi + c * lo;
            }
        }
        Ok(())
    }

    /// Replace the state by `∂U(θ)/∂θ · ψ` for an excitation gate `U`.
    ///
    /// Amplitudes outside the rotated subspace become zero.
    pub fn apply_excitation_derivative(
        &mut self,
        excitation: &Excitation,
        theta: f64,
    ) -> SimResult<()> {
        excitation.validate(self.num_qubits)?;
        let (lo_mask, hi_mask) = excitation.masks();
        let dc = -0.5 * (theta / 2.0).sin();
        let ds = 0.5 * (theta / 2.0).cos();
        let mut out = vec![Complex64::new(0.0, 0.0); self.amplitudes.len()];
        for i in 0..self.amplitudes.len() {
            if i & lo_mask == lo_mask && i & hi_mask == 0 {
                let j = i ^ lo_mask ^ hi_mask;
                let lo = self.amplitudes[i];
                let hi = self.amplitudes[j];
                out[j] = dc * hi - ds * lo;
                out[i] = ds * hi + dc * lo;
            }
        }
        self.amplitudes = out;
        Ok(())
    }

    /// Most probable basis state as an occupation list.
    pub fn dominant_occupation(&self) -> Vec<u8> {
        let best = self
            .amplitudes
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.norm_sqr().total_cmp(&b.norm_sqr()))
            .map_or(0, |(i, _)| i);
        (0..self.num_qubits)
            .map(|w| ((best >> w) & 1) as u8)
            .collect()
    }
}

fn check_width(num_qubits: u32) -> SimResult<()> {
    if num_qubits > MAX_QUBITS {
        return Err(SimError::TooManyQubits {
            n_qubits: num_qubits,
            max: MAX_QUBITS,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    #[test]
    fn test_initial_state() {
        let sv = Statevector::new(2).unwrap();
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(1.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[2], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[3], Complex64::new(0.0, 0.0)));
    }

    #[test]
    fn test_occupation_index() {
        let sv = Statevector::from_occupation(&[1, 1, 0, 0]).unwrap();
        assert!(approx_eq(sv.amplitudes[0b0011], Complex64::new(1.0, 0.0)));
        assert_eq!(sv.dominant_occupation(), vec![1, 1, 0, 0]);
    }

    #[test]
    fn test_single_excitation_rotation() {
        let mut sv = Statevector::from_occupation(&[1, 0]).unwrap();
        sv.apply_excitation(&Excitation::Single([0, 1]), PI).unwrap();
        // θ = π fully moves the electron: |lo⟩ → -|hi⟩
        assert!(approx_eq(sv.amplitudes[0b10], Complex64::new(-1.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[0b01], Complex64::new(0.0, 0.0)));
    }

    #[test]
    fn test_double_excitation_mixes_pair() {
        let mut sv = Statevector::from_occupation(&[1, 1, 0, 0]).unwrap();
        let theta = 0.3;
        sv.apply_excitation(&Excitation::Double([0, 1, 2, 3]), theta).unwrap();
        assert!(approx_eq(
            sv.amplitudes[0b0011],
            Complex64::new((theta / 2.0).cos(), 0.0)
        ));
        assert!(approx_eq(
            sv.amplitudes[0b1100],
            Complex64::new(-(theta / 2.0).sin(), 0.0)
        ));
        assert!((sv.norm_sqr() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_excitation_leaves_other_states() {
        // |0101⟩ is outside the {0011, 1100} subspace.
        let mut sv = Statevector::from_occupation(&[1, 0, 1, 0]).unwrap();
        sv.apply_excitation(&Excitation::Double([0, 1, 2, 3]), 1.1).unwrap();
        assert!(approx_eq(sv.amplitudes[0b0101], Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_inverse_rotation() {
        let exc = Excitation::Single([0, 2]);
        let mut sv = Statevector::from_occupation(&[1, 1, 0, 0]).unwrap();
        let original = sv.clone();
        sv.apply_excitation(&exc, 0.7).unwrap();
        sv.apply_excitation(&exc, -0.7).unwrap();
        for (a, b) in sv.amplitudes.iter().zip(original.amplitudes.iter()) {
            assert!(approx_eq(*a, *b));
        }
    }

    #[test]
    fn test_derivative_matches_finite_difference() {
        let exc = Excitation::Double([0, 1, 2, 3]);
        let theta = 0.4;
        let h = 1e-6;

        let mut base = Statevector::from_occupation(&[1, 1, 0, 0]).unwrap();
        base.apply_excitation(&Excitation::Single([0, 2]), 0.3).unwrap();

        let mut plus = base.clone();
        plus.apply_excitation(&exc, theta + h).unwrap();
        let mut minus = base.clone();
        minus.apply_excitation(&exc, theta - h).unwrap();
        let mut deriv = base.clone();
        deriv.apply_excitation_derivative(&exc, theta).unwrap();

        for i in 0..deriv.dim() {
            let fd = (plus.amplitudes[i] - minus.amplitudes[i]) / (2.0 * h);
            assert!((fd - deriv.amplitudes[i]).norm() < 1e-6);
        }
    }

    #[test]
    fn test_excitation_outside_register() {
        let mut sv = Statevector::from_occupation(&[1, 1, 0, 0]).unwrap();
        let before = sv.clone();
        assert!(matches!(
            sv.apply_excitation(&Excitation::Double([0, 1, 2, 70]), 0.5),
            Err(SimError::QubitOutOfRange { qubit: 70, n_qubits: 4 })
        ));
        assert!(matches!(
            sv.apply_excitation(&Excitation::Single([0, 5]), 0.5),
            Err(SimError::QubitOutOfRange { qubit: 5, n_qubits: 4 })
        ));
        assert!(matches!(
            sv.apply_excitation_derivative(&Excitation::Single([1, 64]), 0.5),
            Err(SimError::QubitOutOfRange { qubit: 64, n_qubits: 4 })
        ));
        assert!(matches!(
            sv.apply_excitation(&Excitation::Single([2, 2]), 0.5),
            Err(SimError::RepeatedWire { .. })
        ));
        assert_eq!(sv, before);
    }

    #[test]
    fn test_rejects_wide_register() {
        assert!(matches!(
            Statevector::new(MAX_QUBITS + 1),
            Err(SimError::TooManyQubits { .. })
        ));
    }
}
