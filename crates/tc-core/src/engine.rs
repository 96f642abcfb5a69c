use ndarray::{Array1, Array2};

use crate::config::Config;
use crate::constants::STABILITY_LIMIT;
use crate::error::Result;
use crate::grid::{NodeGrid, build_node_grid};
use crate::integrate::integrate;
use crate::operator::build_derivative_operator;
use crate::preset::Preset;
use crate::signal::check_signal;

/// Everything one engine run produces. Freshly allocated per run; a change
/// of `k` or `node_count` changes the row count of both matrices.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineOutput {
    pub config: Config,
    pub grid: NodeGrid,
    /// Sample times, one per matrix column.
    pub time: Array1<f64>,
    /// Leaky-integrator states `t[i, τ]`.
    pub activation: Array2<f64>,
    /// Time-cell responses `T[i, τ]`.
    pub response: Array2<f64>,
}

impl EngineOutput {
    /// `(N, samples)`, shared by both matrices.
    pub fn shape(&self) -> (usize, usize) {
        self.response.dim()
    }

    /// `step · max(s)` for this run.
    pub fn stability_margin(&self) -> f64 {
        stability_margin(&self.config, &self.grid)
    }

    pub fn is_euler_stable(&self) -> bool {
        self.stability_margin() < STABILITY_LIMIT
    }
}

/// `step · max(s)`; values below [`STABILITY_LIMIT`] guarantee every
/// integrator decays without oscillating.
pub fn stability_margin(config: &Config, grid: &NodeGrid) -> f64 {
    config.step * grid.max_rate()
}

/// Run the engine: node grid, derivative operator, then integration.
///
/// Pure function of its arguments. Configuration and signal are validated
/// before any matrix is built (samples must be finite and within `[0, 1]`),
/// and nothing is cached between calls.
pub fn run(config: &Config, input: &Array1<f64>) -> Result<EngineOutput> {
    config.validate()?;
    check_signal(input, config.sample_count())?;

    let grid = build_node_grid(config.k, config.tau_min, config.tau_max, config.node_count)?;
    let operator = build_derivative_operator(&grid.s)?;
    let traj = integrate(&grid.s, &operator, config.k, input, config.step)?;

    Ok(EngineOutput {
        config: *config,
        time: config.time_axis(),
        grid,
        activation: traj.activation,
        response: traj.response,
    })
}

/// Render the preset's pulse train and run it.
pub fn run_preset(preset: &Preset) -> Result<EngineOutput> {
    preset.config.validate()?;
    let input = preset.signal.render(preset.config.sample_count())?;
    run(&preset.config, &input)
}
