//! Per-node display series cut from an engine run.

use std::ops::Range;

use ndarray::ArrayView1;
use serde::Serialize;

use crate::config::Config;
use crate::engine::EngineOutput;
use crate::grid::NodeGrid;

/// Largest response value inside a sample window.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Peak {
    pub sample: usize,
    pub time: f64,
    pub value: f64,
}

/// Locate the maximum of `values` within `window` (clipped to the series).
/// Ties resolve to the earliest sample. `None` for an empty window.
pub fn peak_in(values: ArrayView1<'_, f64>, window: Range<usize>, step: f64) -> Option<Peak> {
    let end = window.end.min(values.len());
    let start = window.start.min(end);
    (start..end)
        .map(|j| (j, values[j]))
        .fold(None, |best: Option<(usize, f64)>, (j, v)| match best {
            Some((_, bv)) if bv >= v => best,
            _ => Some((j, v)),
        })
        .map(|(sample, value)| Peak {
            sample,
            time: sample as f64 * step,
            value,
        })
}

/// Which response rows to turn into series.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RowSelection {
    /// Rows `k .. k + node_count`, free of boundary artifacts.
    #[default]
    Interior,
    All,
}

impl RowSelection {
    pub fn rows(self, grid: &NodeGrid) -> Range<usize> {
        match self {
            RowSelection::Interior => grid.interior_rows(),
            RowSelection::All => 0..grid.len(),
        }
    }
}

/// One node's response over time.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NodeSeries {
    pub row: usize,
    pub tau_star: f64,
    pub s: f64,
    pub interior: bool,
    /// Peak over the full, undecimated row.
    pub peak: Option<Peak>,
    /// Every `stride`-th sample of the row.
    pub values: Vec<f64>,
}

/// Slice the response matrix into per-node series, keeping every
/// `stride`-th sample (a stride of 0 is treated as 1).
pub fn display_series(
    output: &EngineOutput,
    selection: RowSelection,
    stride: usize,
) -> Vec<NodeSeries> {
    let stride = stride.max(1);
    let samples = output.response.ncols();
    selection
        .rows(&output.grid)
        .map(|row| {
            let values = output.response.row(row);
            NodeSeries {
                row,
                tau_star: output.grid.tau_star[row],
                s: output.grid.s[row],
                interior: output.grid.is_interior(row),
                peak: peak_in(values, 0..samples, output.config.step),
                values: values.iter().step_by(stride).copied().collect(),
            }
        })
        .collect()
}

/// Serializable summary of one run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunReport {
    pub config: Config,
    pub node_total: usize,
    pub samples: usize,
    pub stability_margin: f64,
    pub time: Vec<f64>,
    pub nodes: Vec<NodeSeries>,
}

impl RunReport {
    pub fn new(output: &EngineOutput, selection: RowSelection, stride: usize) -> Self {
        let (node_total, samples) = output.shape();
        Self {
            config: output.config,
            node_total,
            samples,
            stability_margin: output.stability_margin(),
            time: output.time.iter().step_by(stride.max(1)).copied().collect(),
            nodes: display_series(output, selection, stride),
        }
    }
}
