use std::ops::Range;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DURATION, EPSILON, K, MAX_MATRIX_CELLS, NODE_COUNT, STEP, TAU_MAX, TAU_MIN,
};
use crate::error::{EngineError, Result};

/// Scalar parameters of one engine run.
///
/// A run never mutates its configuration; changing any field means building
/// a new `Config` and calling [`crate::run`] again.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Derivative order; also the number of padding nodes on each side.
    pub k: u32,
    pub tau_min: f64,
    pub tau_max: f64,
    /// Number of interior nodes between `tau_min` and `tau_max`.
    pub node_count: usize,
    pub duration: f64,
    /// Forward-Euler step. Assumed small enough for stability.
    pub step: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            k: K,
            tau_min: TAU_MIN,
            tau_max: TAU_MAX,
            node_count: NODE_COUNT,
            duration: DURATION,
            step: STEP,
        }
    }
}

impl Config {
    /// Reject configurations the engine cannot run.
    pub fn validate(&self) -> Result<()> {
        validate_scales(self.k, self.tau_min, self.tau_max, self.node_count)?;
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(invalid(format!(
                "duration must be positive and finite, got {}",
                self.duration
            )));
        }
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(invalid(format!(
                "step must be positive and finite, got {}",
                self.step
            )));
        }
        if self.step >= self.duration {
            return Err(invalid(format!(
                "step ({}) must be smaller than duration ({})",
                self.step, self.duration
            )));
        }
        let ratio = self.duration / self.step;
        if !ratio.is_finite() || ratio > MAX_MATRIX_CELLS as f64 {
            return Err(invalid(format!(
                "duration / step = {ratio:e} samples exceeds the limit of {MAX_MATRIX_CELLS}"
            )));
        }
        let cells = self.node_total().checked_mul(self.sample_count());
        if cells.is_none_or(|c| c > MAX_MATRIX_CELLS) {
            return Err(invalid(format!(
                "{} nodes x {} samples exceeds the limit of {MAX_MATRIX_CELLS} matrix cells",
                self.node_total(),
                self.sample_count()
            )));
        }
        Ok(())
    }

    /// Total node count `N = node_count + 2k`.
    pub fn node_total(&self) -> usize {
        self.node_count + 2 * self.k as usize
    }

    /// Number of time samples `T = duration / step`.
    ///
    /// Truncates like an integer cast, except that ratios within a relative
    /// `EPSILON` of an integer snap to it (`10 / 0.001` gives 10000, not 9999).
    pub fn sample_count(&self) -> usize {
        let ratio = self.duration / self.step;
        let nearest = ratio.round();
        if (ratio - nearest).abs() <= EPSILON * nearest.max(1.0) {
            nearest as usize
        } else {
            ratio.floor() as usize
        }
    }

    /// Sample times `0, step, 2·step, …` of length `sample_count()`.
    pub fn time_axis(&self) -> Array1<f64> {
        let step = self.step;
        Array1::from_shape_fn(self.sample_count(), |j| j as f64 * step)
    }

    /// Rows whose response is unaffected by the zero boundary rows.
    pub fn interior_rows(&self) -> Range<usize> {
        let k = self.k as usize;
        k..k + self.node_count
    }
}

/// Checks shared by [`Config::validate`] and [`crate::build_node_grid`].
pub(crate) fn validate_scales(k: u32, tau_min: f64, tau_max: f64, node_count: usize) -> Result<()> {
    if k < 1 {
        return Err(invalid("k must be at least 1".to_string()));
    }
    if node_count < 1 {
        return Err(invalid("node_count must be at least 1".to_string()));
    }
    if !tau_min.is_finite() || tau_min <= 0.0 {
        return Err(invalid(format!(
            "tau_min must be positive and finite, got {tau_min}"
        )));
    }
    if !tau_max.is_finite() || tau_max <= tau_min {
        return Err(invalid(format!(
            "tau_max ({tau_max}) must be finite and greater than tau_min ({tau_min})"
        )));
    }
    Ok(())
}

fn invalid(msg: String) -> EngineError {
    EngineError::InvalidConfiguration(msg)
}
