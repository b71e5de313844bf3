//! Fixed-step gradient descent.
//!
//! Each step reports the cost at the parameters it started from and moves
//! against the gradient. There is no convergence test: the number of steps
//! is chosen up front.

use qadapt_sim::Ansatz;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{VqeError, VqeResult};
use crate::estimator::Estimator;

/// Default central-difference step for [`FnCost`].
const FD_STEP: f64 = 1e-6;

/// Something the optimizer can minimise.
pub trait CostFunction {
    /// Length of the parameter vector.
    fn num_params(&self) -> usize;

    /// Cost at `params`.
    fn cost(&self, params: &[f64]) -> VqeResult<f64>;

    /// Gradient at `params`.
    fn gradient(&self, params: &[f64]) -> VqeResult<Vec<f64>>;
}

/// Energy of an ansatz under an estimator.
pub struct EnergyCost<'a, E: ?Sized> {
    estimator: &'a E,
    ansatz: Ansatz,
}

impl<'a, E: Estimator + ?Sized> EnergyCost<'a, E> {
    /// Bind an estimator to an ansatz.
    pub fn new(estimator: &'a E, ansatz: Ansatz) -> Self {
        Self { estimator, ansatz }
    }
}

impl<E: Estimator + ?Sized> CostFunction for EnergyCost<'_, E> {
    fn num_params(&self) -> usize {
        self.ansatz.n_free()
    }

    fn cost(&self, params: &[f64]) -> VqeResult<f64> {
        self.estimator.energy(&self.ansatz, params)
    }

    fn gradient(&self, params: &[f64]) -> VqeResult<Vec<f64>> {
        self.estimator.gradient(&self.ansatz, params)
    }
}

/// A plain closure, differentiated by central finite differences.
pub struct FnCost<F> {
    f: F,
    num_params: usize,
}

impl<F: Fn(&[f64]) -> f64> FnCost<F> {
    /// Wrap `f` taking `num_params` arguments.
    pub fn new(num_params: usize, f: F) -> Self {
        Self { f, num_params }
    }
}

impl<F: Fn(&[f64]) -> f64> CostFunction for FnCost<F> {
    fn num_params(&self) -> usize {
        self.num_params
    }

    fn cost(&self, params: &[f64]) -> VqeResult<f64> {
        Ok((self.f)(params))
    }

    fn gradient(&self, params: &[f64]) -> VqeResult<Vec<f64>> {
        let mut x = params.to_vec();
        let mut grad = Vec::with_capacity(x.len());
        for i in 0..x.len() {
            let x0 = x[i];
            x[i] = x0 + FD_STEP;
            let plus = (self.f)(&x);
            x[i] = x0 - FD_STEP;
            let minus = (self.f)(&x);
            x[i] = x0;
            grad.push((plus - minus) / (2.0 * FD_STEP));
        }
        Ok(grad)
    }
}

/// Vanilla gradient descent, `θ ← θ − η ∇C(θ)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientDescent {
    /// Step size `η`.
    pub stepsize: f64,
}

impl Default for GradientDescent {
    fn default() -> Self {
        Self { stepsize: 0.5 }
    }
}

impl GradientDescent {
    /// Optimizer with step size `stepsize` (must be positive and finite).
    pub fn new(stepsize: f64) -> VqeResult<Self> {
        if !(stepsize.is_finite() && stepsize > 0.0) {
            return Err(VqeError::InvalidStepSize(stepsize));
        }
        Ok(Self { stepsize })
    }

    /// One update. Returns the new parameters and the cost at the old ones.
    pub fn step_and_cost<C: CostFunction + ?Sized>(
        &self,
        cost: &C,
        params: &[f64],
    ) -> VqeResult<(Vec<f64>, f64)> {
        check_alignment(cost, params)?;
        let value = cost.cost(params)?;
        let grad = cost.gradient(params)?;
        if grad.len() != params.len() {
            return Err(VqeError::ParameterMismatch {
                expected: params.len(),
                got: grad.len(),
            });
        }
        let next = params
            .iter()
            .zip(&grad)
            .map(|(p, g)| p - self.stepsize * g)
            .collect();
        Ok((next, value))
    }
}

/// Result of [`optimize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// Parameters after the last update.
    pub params: Vec<f64>,
    /// Cost reported by the last step (evaluated before its update).
    pub energy: f64,
    /// Cost reported by every step, in order.
    pub history: Vec<f64>,
}

/// Run exactly `steps` descent steps from `initial`.
pub fn optimize<C: CostFunction + ?Sized>(
    cost: &C,
    initial: &[f64],
    steps: usize,
    optimizer: &GradientDescent,
) -> VqeResult<OptimizationResult> {
    if steps == 0 {
        return Err(VqeError::InvalidStepCount(steps));
    }
    check_alignment(cost, initial)?;

    let mut params = initial.to_vec();
    let mut history = Vec::with_capacity(steps);
    for step in 0..steps {
        let (next, energy) = optimizer.step_and_cost(cost, &params)?;
        debug!(step, energy, "optimizer step");
        history.push(energy);
        params = next;
    }

    let energy = history.last().copied().unwrap_or(f64::NAN);
    Ok(OptimizationResult {
        params,
        energy,
        history,
    })
}

fn check_alignment<C: CostFunction + ?Sized>(cost: &C, params: &[f64]) -> VqeResult<()> {
    if params.len() != cost.num_params() {
        return Err(VqeError::ParameterMismatch {
            expected: cost.num_params(),
            got: params.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_reports_pre_update_cost() {
        let cost = FnCost::new(1, |p: &[f64]| (p[0] - 3.0).powi(2));
        let gd = GradientDescent::new(0.25).unwrap();
        let (next, value) = gd.step_and_cost(&cost, &[1.0]).unwrap();
        assert_eq!(value, 4.0);
        // 1 - 0.25 * 2(1 - 3) = 2
        assert!((next[0] - 2.0).abs() < 1e-8);
    }

    #[test]
    fn test_history_length() {
        let cost = FnCost::new(2, |p: &[f64]| p[0] * p[0] + p[1] * p[1]);
        let result = optimize(&cost, &[1.0, -1.0], 7, &GradientDescent::default()).unwrap();
        assert_eq!(result.history.len(), 7);
        assert_eq!(result.energy, result.history[6]);
        assert_eq!(result.params.len(), 2);
    }

    #[test]
    fn test_rejects_bad_settings() {
        let cost = FnCost::new(1, |p: &[f64]| p[0]);
        assert!(matches!(
            optimize(&cost, &[0.0], 0, &GradientDescent::default()),
            Err(VqeError::InvalidStepCount(0))
        ));
        assert!(matches!(
            optimize(&cost, &[0.0, 1.0], 3, &GradientDescent::default()),
            Err(VqeError::ParameterMismatch { expected: 1, got: 2 })
        ));
        assert!(GradientDescent::new(0.0).is_err());
        assert!(GradientDescent::new(f64::NAN).is_err());
    }
}
