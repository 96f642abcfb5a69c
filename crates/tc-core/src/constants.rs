/// Reference derivative order (sharpness of the time cells).
pub const K: u32 = 4;

/// Reference smallest interior time scale.
pub const TAU_MIN: f64 = 1.0;

/// Reference largest interior time scale.
pub const TAU_MAX: f64 = 10.0;

/// Reference number of interior nodes.
pub const NODE_COUNT: usize = 5;

/// Reference simulated duration.
pub const DURATION: f64 = 10.0;

/// Reference Euler step.
pub const STEP: f64 = 0.001;

/// Sufficient bound on `step * max(s)` for a monotone (non-oscillating)
/// forward-Euler decay of every integrator.
pub const STABILITY_LIMIT: f64 = 1.0;

/// Upper bound on `N × samples` for each output matrix (512 MiB of f64).
pub const MAX_MATRIX_CELLS: usize = 1 << 26;

/// Relative tolerance used when snapping `duration / step` to an integer.
pub const EPSILON: f64 = 1e-9;
