mod render;
mod settings;

use std::io::Write;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tc_core::{RowSelection, STABILITY_LIMIT, build_node_grid, presets, stability_margin};

use crate::settings::ParamArgs;

#[derive(Parser)]
#[command(name = "tc", about = "Scale-invariant temporal memory (time cell) simulator")]
struct Cli {
    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List built-in presets
    Presets,

    /// Print the node grid for a configuration
    Grid {
        #[command(flatten)]
        params: ParamArgs,
    },

    /// Run the engine and print time-cell responses
    Run {
        #[command(flatten)]
        params: ParamArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,

        /// Keep every Nth sample in json/csv output
        #[arg(long, default_value_t = 1)]
        stride: usize,

        /// Include padding rows next to the interior nodes
        #[arg(long)]
        all_rows: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Table,
    Json,
    Csv,
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Presets => cmd_presets(),
        Commands::Grid { params } => cmd_grid(params),
        Commands::Run {
            params,
            format,
            stride,
            all_rows,
        } => cmd_run(params, *format, *stride, *all_rows),
    }
}

fn cmd_presets() -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for preset in presets() {
        writeln!(out, "{:<10} {}", preset.name, preset.description)?;
    }
    Ok(())
}

fn cmd_grid(params: &ParamArgs) -> Result<()> {
    let resolved = settings::resolve(params)?;
    let cfg = resolved.config;
    let grid = build_node_grid(cfg.k, cfg.tau_min, cfg.tau_max, cfg.node_count)
        .context("failed to build node grid")?;
    render::grid_table(&mut std::io::stdout().lock(), &grid)
}

fn cmd_run(params: &ParamArgs, format: Format, stride: usize, all_rows: bool) -> Result<()> {
    let resolved = settings::resolve(params)?;
    let cfg = resolved.config;
    cfg.validate().context("refusing to run")?;

    let grid = build_node_grid(cfg.k, cfg.tau_min, cfg.tau_max, cfg.node_count)
        .context("failed to build node grid")?;
    let margin = stability_margin(&cfg, &grid);
    if margin >= STABILITY_LIMIT {
        tracing::warn!(
            "step * max(s) = {margin:.3} >= {STABILITY_LIMIT}; \
             Euler integration may oscillate or diverge"
        );
    }

    let input = resolved
        .signal
        .render(cfg.sample_count())
        .context("failed to render input signal")?;
    tracing::debug!(
        "running preset '{}': N={}, samples={}, pulses={}",
        resolved.preset,
        cfg.node_total(),
        cfg.sample_count(),
        resolved.signal.pulses.len()
    );

    let output = tc_core::run(&cfg, &input).context("engine run failed")?;
    tracing::info!("run complete: shape {:?}", output.shape());

    let selection = if all_rows {
        RowSelection::All
    } else {
        RowSelection::Interior
    };
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        Format::Table => render::run_table(&mut out, &output, selection),
        Format::Json => render::run_json(&mut out, &output, selection, stride),
        Format::Csv => render::run_csv(&mut out, &output, selection, stride),
    }
}
