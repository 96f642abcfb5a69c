//! Scale weighting of the Post inversion formula:
//! `T = (-1)^k · s^(k+1) / k! · d^k t / ds^k`.

use ndarray::Array1;

/// `k!` as an exact product of integers.
///
/// Every intermediate product is an integer below 2^53 up to `k = 18`, and
/// `k!` itself stays exactly representable through `k = 22`.
pub fn factorial(k: u32) -> f64 {
    (1..=k).map(f64::from).product()
}

/// Per-node weights `(-1)^k · s^(k+1) / k!`.
pub fn laguerre_weights(s: &Array1<f64>, k: u32) -> Array1<f64> {
    let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
    let norm = factorial(k);
    let exponent = k as i32 + 1;
    s.mapv(|x| sign * x.powi(exponent) / norm)
}
