//! Run configuration resolution: preset, then TOML run file, then flags.

use std::path::{Path, PathBuf};
use std::{env, fs};

use anyhow::{Context, Result, bail};
use clap::Args;
use serde::Deserialize;
use tc_core::{Config, Pulse, PulseTrain, find_preset, presets};

const DEFAULT_PRESET: &str = "reference";

/// Environment variable naming a run file when `--config` is absent.
pub const CONFIG_ENV: &str = "TC_CONFIG";

/// Parameters shared by every command that builds a configuration.
#[derive(Args, Debug, Default)]
pub struct ParamArgs {
    /// Base preset (see `tc presets`)
    #[arg(long)]
    pub preset: Option<String>,

    /// TOML run file; falls back to $TC_CONFIG
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Derivative order
    #[arg(long)]
    pub k: Option<u32>,

    /// Smallest interior time scale
    #[arg(long)]
    pub tau_min: Option<f64>,

    /// Largest interior time scale
    #[arg(long)]
    pub tau_max: Option<f64>,

    /// Number of interior nodes
    #[arg(long)]
    pub nodes: Option<usize>,

    /// Simulated duration
    #[arg(long)]
    pub duration: Option<f64>,

    /// Euler time step
    #[arg(long)]
    pub step: Option<f64>,
}

/// Any subset of `Config` fields.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigPatch {
    pub k: Option<u32>,
    pub tau_min: Option<f64>,
    pub tau_max: Option<f64>,
    pub node_count: Option<usize>,
    pub duration: Option<f64>,
    pub step: Option<f64>,
}

impl ConfigPatch {
    pub fn apply(&self, cfg: &mut Config) {
        if let Some(k) = self.k {
            cfg.k = k;
        }
        if let Some(v) = self.tau_min {
            cfg.tau_min = v;
        }
        if let Some(v) = self.tau_max {
            cfg.tau_max = v;
        }
        if let Some(n) = self.node_count {
            cfg.node_count = n;
        }
        if let Some(v) = self.duration {
            cfg.duration = v;
        }
        if let Some(v) = self.step {
            cfg.step = v;
        }
    }
}

impl From<&ParamArgs> for ConfigPatch {
    fn from(args: &ParamArgs) -> Self {
        Self {
            k: args.k,
            tau_min: args.tau_min,
            tau_max: args.tau_max,
            node_count: args.nodes,
            duration: args.duration,
            step: args.step,
        }
    }
}

/// On-disk run file.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RunFile {
    pub preset: Option<String>,
    /// Half-open sample ranges `[start, end)`.
    pub pulses: Option<Vec<[usize; 2]>>,
    pub amplitude: Option<f64>,
    #[serde(default)]
    pub config: ConfigPatch,
}

impl RunFile {
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("malformed run file")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }
}

/// A fully resolved run: configuration plus input waveform.
#[derive(Debug)]
pub struct Resolved {
    pub preset: String,
    pub config: Config,
    pub signal: PulseTrain,
}

fn run_file_path(args: &ParamArgs) -> Option<PathBuf> {
    args.config
        .clone()
        .or_else(|| env::var(CONFIG_ENV).ok().filter(|v| !v.is_empty()).map(PathBuf::from))
}

pub fn resolve(args: &ParamArgs) -> Result<Resolved> {
    let file = match run_file_path(args) {
        Some(path) => {
            tracing::debug!("loading run file {}", path.display());
            RunFile::load(&path)?
        }
        None => RunFile::default(),
    };
    resolve_with(args, file)
}

pub fn resolve_with(args: &ParamArgs, file: RunFile) -> Result<Resolved> {
    let name = args
        .preset
        .clone()
        .or(file.preset)
        .unwrap_or_else(|| DEFAULT_PRESET.to_string());
    let Some(preset) = find_preset(&name) else {
        let known: Vec<_> = presets().iter().map(|p| p.name).collect();
        bail!("unknown preset '{name}' (known: {})", known.join(", "));
    };

    let mut config = preset.config;
    file.config.apply(&mut config);
    ConfigPatch::from(args).apply(&mut config);

    let mut signal = preset.signal;
    if let Some(bounds) = file.pulses {
        signal.pulses = bounds
            .iter()
            .map(|&[start, end]| Pulse::from_bounds(start, end))
            .collect::<Result<Vec<_>, _>>()
            .context("invalid pulse in run file")?;
    }
    if let Some(amplitude) = file.amplitude {
        signal.amplitude = amplitude;
    }

    Ok(Resolved {
        preset: preset.name.to_string(),
        config,
        signal,
    })
}
