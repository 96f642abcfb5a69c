//! End-to-end properties of the engine: grid → operator → integration,
//! exercised through the public `run` entry points.

use ndarray::Array1;
use tc_core::{
    Config, EngineError, EngineOutput, Pulse, PulseTrain, build_node_grid, find_preset, peak_in,
    run, run_preset,
};

fn short(k: u32, node_count: usize) -> Config {
    Config {
        k,
        node_count,
        duration: 1.0,
        step: 0.001,
        ..Config::default()
    }
}

fn pulse_input(cfg: &Config) -> Array1<f64> {
    PulseTrain::new(vec![Pulse::new(100, 100)])
        .render(cfg.sample_count())
        .unwrap()
}

fn reference() -> EngineOutput {
    run_preset(&find_preset("reference").unwrap()).unwrap()
}

/// Zero input keeps every integrator and time cell at rest.
#[test]
fn zero_input_rest_state() {
    let cfg = short(4, 5);
    let out = run(&cfg, &Array1::zeros(cfg.sample_count())).unwrap();
    assert!(out.activation.iter().all(|&x| x == 0.0));
    assert!(out.response.iter().all(|&x| x == 0.0));
}

/// Output shape is (node_count + 2k, duration / step) and column 0 is zero.
#[test]
fn shape_and_initial_column() {
    for (k, n) in [(1, 1), (2, 7), (4, 5), (6, 12)] {
        let cfg = short(k, n);
        let out = run(&cfg, &pulse_input(&cfg)).unwrap();
        let expected = (n + 2 * k as usize, 1000);
        assert_eq!(out.activation.dim(), expected, "k={k} n={n}");
        assert_eq!(out.response.dim(), expected, "k={k} n={n}");
        assert!(out.activation.column(0).iter().all(|&x| x == 0.0));
        assert!(out.response.column(0).iter().all(|&x| x == 0.0));
    }
}

/// Identical inputs give exactly equal outputs.
#[test]
fn runs_are_deterministic() {
    let cfg = short(4, 5);
    let input = pulse_input(&cfg);
    let a = run(&cfg, &input).unwrap();
    let b = run(&cfg, &input).unwrap();
    assert_eq!(a, b);
}

/// Changing k or node_count changes the row count exactly as N predicts.
#[test]
fn parameter_change_reshapes_output() {
    let base = short(4, 5);
    let first = run(&base, &pulse_input(&base)).unwrap();
    assert_eq!(first.response.nrows(), 13);

    let more_k = Config { k: 2, ..base };
    let second = run(&more_k, &pulse_input(&more_k)).unwrap();
    assert_eq!(second.response.nrows(), 9);

    let more_nodes = Config { node_count: 20, ..base };
    let third = run(&more_nodes, &pulse_input(&more_nodes)).unwrap();
    assert_eq!(third.response.nrows(), 28);
    assert_eq!(third.grid.len(), 28);
}

/// Each invalid field fails fast with InvalidConfiguration.
#[test]
fn invalid_configurations_rejected() {
    let base = short(4, 5);
    let input = pulse_input(&base);
    let cases = [
        Config { tau_max: 1.0, ..base },
        Config { tau_max: 0.5, ..base },
        Config { node_count: 0, ..base },
        Config { k: 0, ..base },
        Config { step: 1.0, ..base },
        Config { step: 2.0, ..base },
        Config { step: 0.0, ..base },
    ];
    for cfg in cases {
        match run(&cfg, &input) {
            Err(EngineError::InvalidConfiguration(_)) => {}
            other => panic!("expected InvalidConfiguration for {cfg:?}, got {other:?}"),
        }
    }
}

/// Grid monotonicity across a sweep of valid configurations.
#[test]
fn grid_monotone_for_slider_ranges() {
    for k in 1..=10u32 {
        for tau_min in 1..=4 {
            for tau_max in 6..=15 {
                for node_count in [3usize, 10, 50, 100] {
                    let g = build_node_grid(k, tau_min as f64, tau_max as f64, node_count).unwrap();
                    assert!(g.tau_star.windows(2).into_iter().all(|w| w[1] > w[0]));
                    assert!(g.s.windows(2).into_iter().all(|w| w[1] < w[0]));
                }
            }
        }
    }
}

/// Reference scenario: each interior node rests until the first pulse, then
/// responds with a peak that is smaller and no earlier for slower nodes.
#[test]
fn reference_scenario_time_cells() {
    let out = reference();
    assert_eq!(out.shape(), (13, 10_000));
    let rows = out.grid.interior_rows();
    let step = out.config.step;

    // Window between the first and second pulse onsets.
    let window = 3850..7950;
    let mut peaks = Vec::new();
    for row in rows.clone() {
        let values = out.response.row(row);
        assert!(
            values.iter().take(3850).all(|&x| x == 0.0),
            "row {row} moved before the first pulse"
        );
        let peak = peak_in(values, window.clone(), step).unwrap();
        assert!(peak.value > 0.0, "row {row} never rose: {peak:?}");
        assert!(peak.sample > 3850, "row {row} peaked at onset");
        peaks.push(peak);
    }

    for pair in peaks.windows(2) {
        assert!(
            pair[1].value < pair[0].value,
            "slower node should peak lower: {pair:?}"
        );
        assert!(
            pair[1].sample >= pair[0].sample,
            "slower node should peak no earlier: {pair:?}"
        );
    }
    assert!(peaks.last().unwrap().sample > peaks[0].sample);

    // The fastest interior node has decayed well below its peak before the
    // second pulse arrives.
    let fastest = rows.start;
    let before_second = out.response[[fastest, 7949]];
    assert!(before_second < 0.75 * peaks[0].value);
}

/// Shifted preset: ten interior nodes, same ordering of peak sizes.
#[test]
fn shifted_scenario_time_cells() {
    let preset = find_preset("shifted").unwrap();
    let out = run_preset(&preset).unwrap();
    assert_eq!(out.shape(), (18, 10_000));

    let step = out.config.step;
    let peaks: Vec<_> = out
        .grid
        .interior_rows()
        .map(|row| peak_in(out.response.row(row), 2850..7450, step).unwrap())
        .collect();
    assert_eq!(peaks.len(), 10);
    for pair in peaks.windows(2) {
        assert!(pair[1].value < pair[0].value, "{pair:?}");
        assert!(pair[1].sample >= pair[0].sample, "{pair:?}");
    }
}

/// The integrator bank is linear in its input: halving the pulse height
/// halves every state.
#[test]
fn response_scales_with_amplitude() {
    let cfg = short(3, 4);
    let full = PulseTrain::new(vec![Pulse::new(50, 200)]);
    let half = PulseTrain {
        amplitude: 0.5,
        ..full.clone()
    };
    let a = run(&cfg, &full.render(1000).unwrap()).unwrap();
    let b = run(&cfg, &half.render(1000).unwrap()).unwrap();
    for (x, y) in a.activation.iter().zip(b.activation.iter()) {
        assert!((x * 0.5 - y).abs() <= 1e-12 * x.abs().max(1.0));
    }
}
