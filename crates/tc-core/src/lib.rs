//! Scale-invariant temporal memory engine.
//!
//! A bank of leaky integrators, one per node on a power-law grid of time
//! scales, is driven by a scalar input signal. A finite-difference
//! approximation of the k-th derivative with respect to the inverse scale
//! `s` (the Laguerre / Post inversion) turns the integrator states into
//! "time cells": node `i` peaks roughly `tau_star[i]` after an input event.
//!
//! Zero I/O: pure math engine with no opinions about presentation.

pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod grid;
pub mod integrate;
pub mod laguerre;
pub mod operator;
pub mod preset;
pub mod series;
pub mod signal;

pub use config::Config;
pub use constants::{
    DURATION, EPSILON, K, MAX_MATRIX_CELLS, NODE_COUNT, STABILITY_LIMIT, STEP, TAU_MAX, TAU_MIN,
};
pub use engine::{EngineOutput, run, run_preset, stability_margin};
pub use error::{EngineError, Result};
pub use grid::{NodeGrid, build_node_grid};
pub use integrate::{Trajectories, integrate};
pub use laguerre::{factorial, laguerre_weights};
pub use operator::{DerivativeOperator, build_derivative_operator};
pub use preset::{Preset, find_preset, presets};
pub use series::{NodeSeries, Peak, RowSelection, RunReport, display_series, peak_in};
pub use signal::{Pulse, PulseTrain};
