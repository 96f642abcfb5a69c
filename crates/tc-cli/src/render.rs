//! Text, JSON and CSV views of an engine run.

use std::io::Write;

use anyhow::Result;
use tc_core::{EngineOutput, NodeGrid, RowSelection, RunReport, display_series};

pub fn grid_table(out: &mut impl Write, grid: &NodeGrid) -> Result<()> {
    writeln!(out, "{:>4}  {:>12}  {:>12}  interior", "row", "tau_star", "s")?;
    for row in 0..grid.len() {
        writeln!(
            out,
            "{:>4}  {:>12.6}  {:>12.6}  {}",
            row,
            grid.tau_star[row],
            grid.s[row],
            if grid.is_interior(row) { "yes" } else { "no" }
        )?;
    }
    Ok(())
}

pub fn run_table(
    out: &mut impl Write,
    output: &EngineOutput,
    selection: RowSelection,
) -> Result<()> {
    let (nodes, samples) = output.shape();
    writeln!(
        out,
        "k={} nodes={} samples={} step={} margin={:.4}",
        output.config.k,
        nodes,
        samples,
        output.config.step,
        output.stability_margin()
    )?;
    writeln!(
        out,
        "{:>4}  {:>10}  {:>10}  {:>12}  {:>8}",
        "row", "tau_star", "s", "peak", "t_peak"
    )?;
    for series in display_series(output, selection, 1) {
        let (value, time) = series
            .peak
            .map(|p| (p.value, p.time))
            .unwrap_or((0.0, 0.0));
        writeln!(
            out,
            "{:>4}  {:>10.4}  {:>10.4}  {:>12.6}  {:>8.3}",
            series.row, series.tau_star, series.s, value, time
        )?;
    }
    Ok(())
}

pub fn run_json(
    out: &mut impl Write,
    output: &EngineOutput,
    selection: RowSelection,
    stride: usize,
) -> Result<()> {
    let report = RunReport::new(output, selection, stride);
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

/// `time` column followed by one column per selected row.
pub fn run_csv(
    out: &mut impl Write,
    output: &EngineOutput,
    selection: RowSelection,
    stride: usize,
) -> Result<()> {
    let stride = stride.max(1);
    let rows = selection.rows(&output.grid);

    write!(out, "time")?;
    for row in rows.clone() {
        write!(out, ",row{row}")?;
    }
    writeln!(out)?;

    for j in (0..output.time.len()).step_by(stride) {
        write!(out, "{}", output.time[j])?;
        for row in rows.clone() {
            write!(out, ",{}", output.response[[row, j]])?;
        }
        writeln!(out)?;
    }
    Ok(())
}
