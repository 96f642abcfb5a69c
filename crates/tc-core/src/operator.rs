use ndarray::{Array1, Array2};

use crate::error::{EngineError, Result};

/// Three-point finite-difference derivative with respect to `s` on a
/// non-uniform grid, stored as tridiagonal bands.
///
/// `lower[i]`, `diag[i]` and `upper[i]` are the coefficients of row `i` for
/// columns `i - 1`, `i` and `i + 1`. Rows `0` and `N - 1` are all zero: the
/// derivative is defined as zero at the grid boundary.
#[derive(Clone, Debug, PartialEq)]
pub struct DerivativeOperator {
    lower: Array1<f64>,
    diag: Array1<f64>,
    upper: Array1<f64>,
}

impl DerivativeOperator {
    /// Matrix dimension `N`.
    pub fn dim(&self) -> usize {
        self.diag.len()
    }

    pub fn lower(&self) -> &Array1<f64> {
        &self.lower
    }

    pub fn diag(&self) -> &Array1<f64> {
        &self.diag
    }

    pub fn upper(&self) -> &Array1<f64> {
        &self.upper
    }

    /// One sparse product `D · v`.
    ///
    /// # Panics
    /// Panics if `v.len() != self.dim()`.
    pub fn apply(&self, v: &Array1<f64>) -> Array1<f64> {
        let n = self.dim();
        assert_eq!(v.len(), n, "vector length must match operator dimension");
        let mut out = Array1::zeros(n);
        for i in 1..n.saturating_sub(1) {
            out[i] = self.lower[i] * v[i - 1] + self.diag[i] * v[i] + self.upper[i] * v[i + 1];
        }
        out
    }

    /// Dense `N × N` copy of the operator.
    pub fn to_dense(&self) -> Array2<f64> {
        let n = self.dim();
        let mut m = Array2::zeros((n, n));
        for i in 1..n.saturating_sub(1) {
            m[[i, i - 1]] = self.lower[i];
            m[[i, i]] = self.diag[i];
            m[[i, i + 1]] = self.upper[i];
        }
        m
    }

    /// Dense `D^k`, the operator composed with itself `k` times.
    /// `power(0)` is the identity.
    pub fn power(&self, k: u32) -> Array2<f64> {
        if k == 0 {
            return Array2::eye(self.dim());
        }
        let base = self.to_dense();
        let mut acc = base.clone();
        for _ in 1..k {
            acc = acc.dot(&base);
        }
        acc
    }
}

/// Build the derivative operator over the inverse scales `s`.
///
/// Fails with [`EngineError::ArithmeticDegeneracy`] when two adjacent nodes
/// coincide, instead of letting the division produce NaN or infinity.
pub fn build_derivative_operator(s: &Array1<f64>) -> Result<DerivativeOperator> {
    let n = s.len();
    let mut lower = Array1::zeros(n);
    let mut diag = Array1::zeros(n);
    let mut upper = Array1::zeros(n);

    for i in 1..n.saturating_sub(1) {
        let back = s[i] - s[i - 1];
        let ahead = s[i + 1] - s[i];
        let span = s[i + 1] - s[i - 1];
        if back == 0.0 || ahead == 0.0 || span == 0.0 {
            return Err(EngineError::ArithmeticDegeneracy { row: i });
        }

        let l = -ahead / (back * span);
        let d = (ahead / back - back / ahead) / span;
        let u = back / (ahead * span);
        if !(l.is_finite() && d.is_finite() && u.is_finite()) {
            return Err(EngineError::ArithmeticDegeneracy { row: i });
        }
        lower[i] = l;
        diag[i] = d;
        upper[i] = u;
    }

    Ok(DerivativeOperator { lower, diag, upper })
}
