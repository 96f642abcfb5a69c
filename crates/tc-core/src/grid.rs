use std::ops::Range;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::config::validate_scales;
use crate::error::Result;

/// Power-law spaced time scales and their inverse scales `s = k / tau_star`.
///
/// `tau_star` is strictly increasing, `s` strictly decreasing. The first and
/// last `k` nodes are padding that keeps the interior derivative stencils
/// clear of the zero boundary rows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeGrid {
    pub k: u32,
    pub node_count: usize,
    pub tau_star: Array1<f64>,
    pub s: Array1<f64>,
}

impl NodeGrid {
    /// Total node count `N`.
    pub fn len(&self) -> usize {
        self.tau_star.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tau_star.is_empty()
    }

    /// Fastest decay rate on the grid, `max(s) = s[0]`.
    pub fn max_rate(&self) -> f64 {
        self.s.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Rows between the padding, `k .. k + node_count`.
    pub fn interior_rows(&self) -> Range<usize> {
        let k = self.k as usize;
        k..k + self.node_count
    }

    pub fn is_interior(&self, row: usize) -> bool {
        self.interior_rows().contains(&row)
    }
}

/// Build `node_count + 2k` nodes with `tau_star[p] = tau_min * (1 + alpha)^p`
/// for `p` in `-k .. node_count + k`, where
/// `alpha = (tau_max / tau_min)^(1 / node_count) - 1`.
pub fn build_node_grid(k: u32, tau_min: f64, tau_max: f64, node_count: usize) -> Result<NodeGrid> {
    validate_scales(k, tau_min, tau_max, node_count)?;

    let alpha = (tau_max / tau_min).powf(1.0 / node_count as f64) - 1.0;
    let k_i = k as i32;
    let last = node_count as i32 + k_i;

    let tau_star: Array1<f64> = (-k_i..last)
        .map(|p| tau_min * (1.0 + alpha).powi(p))
        .collect();
    let k_f = k as f64;
    let s = tau_star.mapv(|tau| k_f / tau);

    Ok(NodeGrid {
        k,
        node_count,
        tau_star,
        s,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_reference_grid() {
        let g = build_node_grid(4, 1.0, 10.0, 5).unwrap();
        assert_eq!(g.len(), 13);
        // p = 0 is tau_min, p = node_count is tau_max
        assert_relative_eq!(g.tau_star[4], 1.0, epsilon = 1e-12);
        assert_relative_eq!(g.tau_star[9], 10.0, epsilon = 1e-12);
        assert_relative_eq!(g.tau_star[0], 10f64.powf(-0.8), epsilon = 1e-12);
        assert_relative_eq!(g.s[4], 4.0, epsilon = 1e-12);
        assert_eq!(g.interior_rows(), 4..9);
    }

    #[test]
    fn test_max_rate_is_first_node() {
        let g = build_node_grid(2, 0.5, 8.0, 6).unwrap();
        assert_eq!(g.max_rate(), g.s[0]);
    }

    #[test]
    fn test_is_interior() {
        let g = build_node_grid(1, 1.0, 2.0, 3).unwrap();
        assert!(!g.is_interior(0));
        assert!(g.is_interior(1));
        assert!(g.is_interior(3));
        assert!(!g.is_interior(4));
    }

    #[test]
    fn test_rejects_invalid_scales() {
        let cases = [
            (0, 1.0, 10.0, 5),
            (4, 1.0, 10.0, 0),
            (4, 10.0, 10.0, 5),
            (4, 10.0, 1.0, 5),
        ];
        for (k, lo, hi, n) in cases {
            assert!(matches!(
                build_node_grid(k, lo, hi, n),
                Err(EngineError::InvalidConfiguration(_))
            ));
        }
    }

    proptest! {
        #[test]
        fn prop_grid_monotone_and_reciprocal(
            k in 1u32..8,
            tau_min in 0.05f64..5.0,
            span in 1.5f64..50.0,
            node_count in 1usize..40,
        ) {
            let g = build_node_grid(k, tau_min, tau_min * span, node_count).unwrap();
            prop_assert_eq!(g.len(), node_count + 2 * k as usize);
            prop_assert_eq!(g.s.len(), g.len());
            for i in 1..g.len() {
                prop_assert!(g.tau_star[i] > g.tau_star[i - 1]);
                prop_assert!(g.s[i] < g.s[i - 1]);
            }
            for i in 0..g.len() {
                let product = g.tau_star[i] * g.s[i];
                prop_assert!((product - k as f64).abs() < 1e-9 * k as f64);
            }
        }
    }
}
