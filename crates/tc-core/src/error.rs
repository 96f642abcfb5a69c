use thiserror::Error;

/// Failures of a single engine run. All of them are raised before any
/// output is handed back to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("invalid input signal: {0}")]
    InvalidSignal(String),

    /// Two adjacent nodes coincide, so the stencil at `row` divides by zero.
    #[error("arithmetic degeneracy: node gap vanishes around row {row}")]
    ArithmeticDegeneracy { row: usize },

    /// The Euler state became non-finite at time index `step`.
    #[error("numeric instability at step {step}: step * max(s) = {margin:.4}")]
    NumericInstability { step: usize, margin: f64 },
}

pub type Result<T> = std::result::Result<T, EngineError>;
