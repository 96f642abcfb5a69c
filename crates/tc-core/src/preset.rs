use serde::Serialize;

use crate::config::Config;
use crate::signal::{Pulse, PulseTrain};

/// A named configuration plus the input waveform it is meant to be run with.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Preset {
    pub name: &'static str,
    pub description: &'static str,
    pub config: Config,
    pub signal: PulseTrain,
}

/// Two 100-sample unit pulses over the reference configuration, in the two
/// placements used for the time-cell demonstrations.
pub fn presets() -> Vec<Preset> {
    vec![
        Preset {
            name: "reference",
            description: "k=4, 5 nodes over tau 1..10, pulses at samples 3850 and 7950",
            config: Config::default(),
            signal: PulseTrain::new(vec![Pulse::new(3850, 100), Pulse::new(7950, 100)]),
        },
        Preset {
            name: "shifted",
            description: "k=4, 10 nodes over tau 1..10, pulses at samples 2850 and 7450",
            config: Config {
                node_count: 10,
                ..Config::default()
            },
            signal: PulseTrain::new(vec![Pulse::new(2850, 100), Pulse::new(7450, 100)]),
        },
    ]
}

/// Look up a preset by name (case-insensitive).
pub fn find_preset(name: &str) -> Option<Preset> {
    presets()
        .into_iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
}
