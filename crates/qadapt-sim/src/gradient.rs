//! Energy and gradient evaluation for excitation-gate ansätze.
//!
//! Two ways to differentiate `E(θ) = ⟨ψ(θ)|H|ψ(θ)⟩` with respect to the free
//! parameters of an [`Ansatz`]:
//!
//! - **Adjoint**: one forward simulation, then a single backward sweep that
//!   peels gates off both `|ψ⟩` and `H|ψ⟩`. Exact, cost independent of the
//!   number of parameters beyond one gate application each.
//! - **Parameter shift**: excitation generators have eigenvalues
//!   `{0, ±½}`, so `E` is a trigonometric polynomial with frequencies
//!   `½` and `1` in each angle. The four-term rule with shifts `±π/2` and
//!   `±3π/2` recovers the derivative exactly from four energy evaluations.

use std::f64::consts::{FRAC_PI_2, SQRT_2};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::ansatz::{Ansatz, GateParam};
use crate::error::SimResult;
use crate::observable::Observable;

/// Gradient evaluation strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GradientMethod {
    /// Reverse-mode sweep over the statevector.
    #[default]
    Adjoint,
    /// Four-term parameter-shift rule.
    ParameterShift,
}

impl GradientMethod {
    /// Name as used in config files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            GradientMethod::Adjoint => "adjoint",
            GradientMethod::ParameterShift => "parameter-shift",
        }
    }
}

impl fmt::Display for GradientMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GradientMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "adjoint" => Ok(GradientMethod::Adjoint),
            "parameter-shift" | "param-shift" | "ps" => Ok(GradientMethod::ParameterShift),
            other => Err(format!(
                "unknown gradient method '{other}' (expected 'adjoint' or 'parameter-shift')"
            )),
        }
    }
}

/// `⟨ψ(θ)|O|ψ(θ)⟩` for the ansatz at `params`.
pub fn energy<O: Observable + ?Sized>(
    ansatz: &Ansatz,
    observable: &O,
    params: &[f64],
) -> SimResult<f64> {
    let state = ansatz.prepare(params)?;
    observable.expectation(&state)
}

/// `∂E/∂θ_i` for every free parameter, in parameter order.
pub fn gradient<O: Observable + ?Sized>(
    ansatz: &Ansatz,
    observable: &O,
    params: &[f64],
    method: GradientMethod,
) -> SimResult<Vec<f64>> {
    match method {
        GradientMethod::Adjoint => adjoint_gradient(ansatz, observable, params),
        GradientMethod::ParameterShift => parameter_shift_gradient(ansatz, observable, params),
    }
}

/// Adjoint differentiation.
///
/// With `φ = |ψ⟩` and `λ = O|ψ⟩`, walking the gates from last to first:
/// undo `U_k` on `φ`, take `μ = ∂U_k φ`, accumulate `2·Re⟨λ|μ⟩`, then undo
/// `U_k` on `λ`.
pub fn adjoint_gradient<O: Observable + ?Sized>(
    ansatz: &Ansatz,
    observable: &O,
    params: &[f64],
) -> SimResult<Vec<f64>> {
    let angles = ansatz.bind(params)?;
    let mut phi = ansatz.prepare_bound(&angles)?;
    let mut lambda = observable.apply(&phi)?;
    let mut grad = vec![0.0; ansatz.n_free()];

    for (op, &theta) in ansatz.ops().iter().zip(&angles).rev() {
        phi.apply_excitation(&op.excitation, -theta)?;
        if let GateParam::Free(i) = op.param {
            let mut mu = phi.clone();
            mu.apply_excitation_derivative(&op.excitation, theta)?;
            grad[i] += 2.0 * lambda.inner(&mu)?.re;
        }
        lambda.apply_excitation(&op.excitation, -theta)?;
    }

    trace!(n_params = grad.len(), "adjoint gradient");
    Ok(grad)
}

/// Four-term parameter-shift rule.
pub fn parameter_shift_gradient<O: Observable + ?Sized>(
    ansatz: &Ansatz,
    observable: &O,
    params: &[f64],
) -> SimResult<Vec<f64>> {
    let angles = ansatz.bind(params)?;
    let near = FRAC_PI_2;
    let far = 3.0 * FRAC_PI_2;
    let c_near = (SQRT_2 + 1.0) / (4.0 * SQRT_2);
    let c_far = (SQRT_2 - 1.0) / (4.0 * SQRT_2);

    let mut grad = vec![0.0; ansatz.n_free()];
    let mut shifted = angles.clone();
    for (k, op) in ansatz.ops().iter().enumerate() {
        let GateParam::Free(i) = op.param else {
            continue;
        };
        let mut eval = |shift: f64| -> SimResult<f64> {
            shifted[k] = angles[k] + shift;
            let value = observable.expectation(&ansatz.prepare_bound(&shifted)?);
            shifted[k] = angles[k];
            value
        };
        let d_near = eval(near)? - eval(-near)?;
        let d_far = eval(far)? - eval(-far)?;
        grad[i] += c_near * d_near - c_far * d_far;
    }

    trace!(n_params = grad.len(), "parameter-shift gradient");
    Ok(grad)
}
