use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// A rectangular pulse covering samples `start .. start + width`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pulse {
    pub start: usize,
    pub width: usize,
}

impl Pulse {
    pub fn new(start: usize, width: usize) -> Self {
        Self { start, width }
    }

    /// Pulse covering the half-open sample range `[start, end)`.
    pub fn from_bounds(start: usize, end: usize) -> Result<Self> {
        if end < start {
            return Err(EngineError::InvalidSignal(format!(
                "pulse end ({end}) precedes its start ({start})"
            )));
        }
        Ok(Self::new(start, end - start))
    }

    /// One past the last covered sample.
    pub fn end(&self) -> usize {
        self.start + self.width
    }
}

/// A train of equal-height rectangular pulses on a zero baseline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PulseTrain {
    pub amplitude: f64,
    pub pulses: Vec<Pulse>,
}

impl PulseTrain {
    /// Unit-height pulses.
    pub fn new(pulses: Vec<Pulse>) -> Self {
        Self {
            amplitude: 1.0,
            pulses,
        }
    }

    /// Render the waveform over `samples` time steps. Pulses running past
    /// the end are clipped.
    pub fn render(&self, samples: usize) -> Result<Array1<f64>> {
        if !self.amplitude.is_finite() || !(0.0..=1.0).contains(&self.amplitude) {
            return Err(EngineError::InvalidSignal(format!(
                "pulse amplitude must lie in [0, 1], got {}",
                self.amplitude
            )));
        }
        let mut signal = Array1::zeros(samples);
        for pulse in &self.pulses {
            let start = pulse.start.min(samples);
            let end = pulse.end().min(samples);
            signal
                .slice_mut(ndarray::s![start..end])
                .fill(self.amplitude);
        }
        Ok(signal)
    }
}

/// Check an input trace: expected sample count, finite, within `[0, 1]`.
pub(crate) fn check_signal(signal: &Array1<f64>, samples: usize) -> Result<()> {
    if signal.len() != samples {
        return Err(EngineError::InvalidSignal(format!(
            "expected {samples} samples, got {}",
            signal.len()
        )));
    }
    if let Some(idx) = signal.iter().position(|x| !x.is_finite()) {
        return Err(EngineError::InvalidSignal(format!(
            "sample {idx} is not finite"
        )));
    }
    if let Some(idx) = signal.iter().position(|x| !(0.0..=1.0).contains(x)) {
        return Err(EngineError::InvalidSignal(format!(
            "sample {idx} = {} lies outside [0, 1]",
            signal[idx]
        )));
    }
    Ok(())
}
