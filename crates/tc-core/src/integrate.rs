use ndarray::{Array1, Array2};

use crate::error::{EngineError, Result};
use crate::laguerre::laguerre_weights;
use crate::operator::DerivativeOperator;

/// Integrator states `t` and time-cell responses `T`, both `N × samples`.
/// Column 0 is the rest state and always zero.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectories {
    pub activation: Array2<f64>,
    pub response: Array2<f64>,
}

/// Forward-Euler integration of the leaky-integrator bank followed by the
/// scaled k-th derivative at every step:
///
/// ```text
/// t[:, τ] = t[:, τ-1] + step · (-s ⊙ t[:, τ-1] + input[τ])
/// T[:, τ] = ((-1)^k · s^(k+1) / k!) ⊙ (D^k · t[:, τ])
/// ```
///
/// `step` is not checked for stability; a state that overflows to a
/// non-finite value aborts with [`EngineError::NumericInstability`].
pub fn integrate(
    s: &Array1<f64>,
    operator: &DerivativeOperator,
    k: u32,
    input: &Array1<f64>,
    step: f64,
) -> Result<Trajectories> {
    let n = s.len();
    if operator.dim() != n {
        return Err(EngineError::InvalidConfiguration(format!(
            "operator dimension {} does not match {n} nodes",
            operator.dim()
        )));
    }
    let samples = input.len();

    let power = operator.power(k);
    let weights = laguerre_weights(s, k);
    let margin = step * s.iter().copied().fold(0.0, f64::max);

    let mut activation = Array2::<f64>::zeros((n, samples));
    let mut response = Array2::<f64>::zeros((n, samples));
    let mut state = Array1::<f64>::zeros(n);

    for tau in 1..samples {
        let drive = input[tau];
        state.zip_mut_with(s, |x, &rate| *x += (-rate * *x + drive) * step);
        let cell = &weights * &power.dot(&state);

        if state.iter().chain(cell.iter()).any(|x| !x.is_finite()) {
            return Err(EngineError::NumericInstability { step: tau, margin });
        }
        activation.column_mut(tau).assign(&state);
        response.column_mut(tau).assign(&cell);
    }

    Ok(Trajectories {
        activation,
        response,
    })
}
