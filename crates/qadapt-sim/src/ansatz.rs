//! Excitation gates and the adaptive ansatz description.
//!
//! An [`Ansatz`] is a pure data description of a state-preparation circuit:
//! a reference occupation followed by an ordered list of excitation gates.
//! Every gate is either frozen at a fixed angle or bound to a slot of the
//! parameter vector. The adaptive selector rebuilds it for every candidate
//! pool instead of mutating a shared circuit.
//!
//! ```rust
//! use qadapt_sim::{Ansatz, Excitation, GateContext};
//!
//! let doubles = [Excitation::Double([0, 1, 2, 3])];
//! let context = GateContext::new(doubles.to_vec(), vec![0.1]).unwrap();
//! let singles = [Excitation::Single([0, 2]), Excitation::Single([1, 3])];
//!
//! let ansatz = Ansatz::adaptive(&[1, 1, 0, 0], &context, &singles).unwrap();
//! assert_eq!(ansatz.ops().len(), 3);
//! assert_eq!(ansatz.n_free(), 2);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::statevector::Statevector;

/// An excitation descriptor: the spin-orbital wires a Givens rotation acts on.
///
/// `Single([r, p])` moves an electron from `r` to `p`; `Double([s, r, q, p])`
/// moves the pair `(s, r)` to `(q, p)`. Serialized as a plain index list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<u32>", try_from = "Vec<u32>")]
pub enum Excitation {
    /// Single excitation on two wires.
    Single([u32; 2]),
    /// Double excitation on four wires.
    Double([u32; 4]),
}

impl Excitation {
    /// The wires this excitation touches, in gate order.
    pub fn wires(&self) -> &[u32] {
        match self {
            Excitation::Single(w) => w,
            Excitation::Double(w) => w,
        }
    }

    /// True for a single excitation.
    pub fn is_single(&self) -> bool {
        matches!(self, Excitation::Single(_))
    }

    /// Masks of the first-half and second-half wires.
    ///
    /// The gate rotates between "first half occupied, second half empty" and
    /// the opposite configuration. Wires must already be validated against
    /// the register.
    pub(crate) fn masks(&self) -> (usize, usize) {
        let wires = self.wires();
        let half = wires.len() / 2;
        let lo = wires[..half].iter().fold(0usize, |m, &w| m | (1 << w));
        let hi = wires[half..].iter().fold(0usize, |m, &w| m | (1 << w));
        (lo, hi)
    }

    /// Check the wires fit in `n_qubits` and are pairwise distinct.
    pub fn validate(&self, n_qubits: u32) -> SimResult<()> {
        let wires = self.wires();
        if let Some(&qubit) = wires.iter().find(|&&w| w >= n_qubits) {
            return Err(SimError::QubitOutOfRange { qubit, n_qubits });
        }
        for (i, w) in wires.iter().enumerate() {
            if wires[i + 1..].contains(w) {
                return Err(SimError::RepeatedWire {
                    wires: wires.to_vec(),
                });
            }
        }
        Ok(())
    }
}

impl From<Excitation> for Vec<u32> {
    fn from(exc: Excitation) -> Self {
        exc.wires().to_vec()
    }
}

impl TryFrom<Vec<u32>> for Excitation {
    type Error = SimError;

    fn try_from(wires: Vec<u32>) -> SimResult<Self> {
        match wires.as_slice() {
            &[a, b] => Ok(Excitation::Single([a, b])),
            &[a, b, c, d] => Ok(Excitation::Double([a, b, c, d])),
            other => Err(SimError::InvalidExcitation(other.len())),
        }
    }
}

impl fmt::Display for Excitation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.wires())
    }
}

/// Where a gate takes its angle from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GateParam {
    /// Frozen angle from an earlier optimisation stage.
    Fixed(f64),
    /// Index into the parameter vector.
    Free(usize),
}

/// One gate of an ansatz.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnsatzOp {
    /// The excitation applied.
    pub excitation: Excitation,
    /// Angle source.
    pub param: GateParam,
}

/// Previously selected gates together with their frozen angles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GateContext {
    gates: Vec<Excitation>,
    params: Vec<f64>,
}

impl GateContext {
    /// Empty context: nothing applied beyond the reference state.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Pair gates with their fixed angles; lengths must agree.
    pub fn new(gates: Vec<Excitation>, params: Vec<f64>) -> SimResult<Self> {
        if gates.len() != params.len() {
            return Err(SimError::ParameterCountMismatch {
                expected: gates.len(),
                got: params.len(),
            });
        }
        Ok(Self { gates, params })
    }

    /// Frozen gates.
    pub fn gates(&self) -> &[Excitation] {
        &self.gates
    }

    /// Frozen angles, aligned with [`GateContext::gates`].
    pub fn params(&self) -> &[f64] {
        &self.params
    }

    /// True if no gate is frozen.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }
}

/// Executable description of a state-preparation circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ansatz {
    reference: Vec<u8>,
    ops: Vec<AnsatzOp>,
    n_free: usize,
}

impl Ansatz {
    /// Start from a reference occupation (one 0/1 entry per qubit).
    pub fn new(reference: &[u8]) -> SimResult<Self> {
        if let Some(&bad) = reference.iter().find(|&&b| b > 1) {
            return Err(SimError::InvalidOccupation(bad));
        }
        if reference.len() > crate::statevector::MAX_QUBITS as usize {
            return Err(SimError::TooManyQubits {
                n_qubits: reference.len() as u32,
                max: crate::statevector::MAX_QUBITS,
            });
        }
        Ok(Self {
            reference: reference.to_vec(),
            ops: Vec::new(),
            n_free: 0,
        })
    }

    /// Reference, then `context` at its fixed angles, then every `pool` gate
    /// with its own free parameter (indices follow pool order).
    pub fn adaptive(
        reference: &[u8],
        context: &GateContext,
        pool: &[Excitation],
    ) -> SimResult<Self> {
        let mut ansatz = Self::new(reference)?;
        for (exc, &theta) in context.gates().iter().zip(context.params()) {
            ansatz.push_fixed(*exc, theta)?;
        }
        for exc in pool {
            ansatz.push_free(*exc)?;
        }
        Ok(ansatz)
    }

    /// Reference followed by `gates`, all free.
    pub fn with_free_gates(reference: &[u8], gates: &[Excitation]) -> SimResult<Self> {
        Self::adaptive(reference, &GateContext::empty(), gates)
    }

    /// Append a gate frozen at `theta`.
    pub fn push_fixed(&mut self, excitation: Excitation, theta: f64) -> SimResult<()> {
        excitation.validate(self.n_qubits())?;
        self.ops.push(AnsatzOp {
            excitation,
            param: GateParam::Fixed(theta),
        });
        Ok(())
    }

    /// Append a trainable gate and return its parameter index.
    pub fn push_free(&mut self, excitation: Excitation) -> SimResult<usize> {
        excitation.validate(self.n_qubits())?;
        let index = self.n_free;
        self.ops.push(AnsatzOp {
            excitation,
            param: GateParam::Free(index),
        });
        self.n_free += 1;
        Ok(index)
    }

    /// Reference occupation.
    pub fn reference(&self) -> &[u8] {
        &self.reference
    }

    /// Gates in application order.
    pub fn ops(&self) -> &[AnsatzOp] {
        &self.ops
    }

    /// Register width.
    pub fn n_qubits(&self) -> u32 {
        self.reference.len() as u32
    }

    /// Number of trainable parameters.
    pub fn n_free(&self) -> usize {
        self.n_free
    }

    /// Trainable gates in parameter order.
    pub fn free_gates(&self) -> Vec<Excitation> {
        self.ops
            .iter()
            .filter(|op| matches!(op.param, GateParam::Free(_)))
            .map(|op| op.excitation)
            .collect()
    }

    /// Resolve every gate angle for a parameter vector.
    pub fn bind(&self, params: &[f64]) -> SimResult<Vec<f64>> {
        if params.len() != self.n_free {
            return Err(SimError::ParameterCountMismatch {
                expected: self.n_free,
                got: params.len(),
            });
        }
        Ok(self
            .ops
            .iter()
            .map(|op| match op.param {
                GateParam::Fixed(theta) => theta,
                GateParam::Free(i) => params[i],
            })
            .collect())
    }

    /// Simulate the circuit for a parameter vector.
    pub fn prepare(&self, params: &[f64]) -> SimResult<Statevector> {
        let angles = self.bind(params)?;
        self.prepare_bound(&angles)
    }

    /// Simulate with already-resolved angles (one per op).
    pub(crate) fn prepare_bound(&self, angles: &[f64]) -> SimResult<Statevector> {
        let mut state = Statevector::from_occupation(&self.reference)?;
        for (op, &theta) in self.ops.iter().zip(angles) {
            state.apply_excitation(&op.excitation, theta)?;
        }
        Ok(state)
    }
}
