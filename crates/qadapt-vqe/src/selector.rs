//! Gradient-threshold gate selection.
//!
//! Every candidate gate is appended to the (possibly dressed) reference with
//! its own parameter set to zero. The energy gradient at that point measures
//! each gate's first-order effect; gates whose gradient magnitude exceeds the
//! threshold are kept, in pool order.

use qadapt_sim::{Ansatz, Excitation, GateContext};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{VqeError, VqeResult};
use crate::estimator::Estimator;

/// Outcome of one selection pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    /// Candidate gates, in the order they were scored.
    pub pool: Vec<Excitation>,
    /// Retained gates, in pool order.
    pub gates: Vec<Excitation>,
    /// Gradient of every pool gate at zero, in pool order.
    pub gradients: Vec<f64>,
    /// Threshold the gradients were compared against.
    pub threshold: f64,
}

impl Selection {
    /// Number of retained gates.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// True if nothing passed the threshold.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// `(gate, gradient)` for every candidate.
    pub fn scored(&self) -> impl Iterator<Item = (Excitation, f64)> + '_ {
        self.pool.iter().copied().zip(self.gradients.iter().copied())
    }
}

/// Reject thresholds that are zero, negative, NaN or infinite.
pub fn validate_threshold(threshold: f64) -> VqeResult<()> {
    if threshold.is_finite() && threshold > 0.0 {
        Ok(())
    } else {
        Err(VqeError::InvalidThreshold(threshold))
    }
}

/// Keep `pool[i]` iff `|gradients[i]| > threshold`.
pub fn filter_by_gradient(
    pool: &[Excitation],
    gradients: &[f64],
    threshold: f64,
) -> VqeResult<Vec<Excitation>> {
    validate_threshold(threshold)?;
    if pool.len() != gradients.len() {
        return Err(VqeError::ParameterMismatch {
            expected: pool.len(),
            got: gradients.len(),
        });
    }
    Ok(pool
        .iter()
        .zip(gradients)
        .filter(|(_, g)| g.abs() > threshold)
        .map(|(exc, _)| *exc)
        .collect())
}

/// Select the pool gates with a significant gradient on top of `context`.
///
/// An empty pool returns an empty selection without touching the estimator.
pub fn select_gates<E: Estimator + ?Sized>(
    estimator: &E,
    reference: &[u8],
    pool: &[Excitation],
    context: &GateContext,
    threshold: f64,
) -> VqeResult<Selection> {
    validate_threshold(threshold)?;
    if pool.is_empty() {
        return Ok(Selection {
            pool: Vec::new(),
            gates: Vec::new(),
            gradients: Vec::new(),
            threshold,
        });
    }

    let ansatz = Ansatz::adaptive(reference, context, pool)?;
    let zeros = vec![0.0; pool.len()];
    let gradients = estimator.gradient(&ansatz, &zeros)?;
    let gates = filter_by_gradient(pool, &gradients, threshold)?;

    debug!(
        pool = pool.len(),
        context = context.gates().len(),
        selected = gates.len(),
        threshold,
        "gradient selection"
    );

    Ok(Selection {
        pool: pool.to_vec(),
        gates,
        gradients,
        threshold,
    })
}
