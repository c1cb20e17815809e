//! Per-channel Moment Computation

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

/// Number of descriptors per channel
pub const MOMENT_COUNT: usize = 6;

/// Root-power normalisation exponent applied to m0, m2 and m4
pub const MOMENT_EXPONENT: f64 = 0.1;

/// Descriptor slot in the flattened moment vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Moment {
    M0,
    M0MinusM2,
    M0MinusM4,
    Sparseness,
    IrregularityFactor,
    WaveformLengthRatio,
}

impl Moment {
    /// All descriptors in output order
    pub const ALL: [Moment; MOMENT_COUNT] = [
        Moment::M0,
        Moment::M0MinusM2,
        Moment::M0MinusM4,
        Moment::Sparseness,
        Moment::IrregularityFactor,
        Moment::WaveformLengthRatio,
    ];

    /// Short label
    pub fn as_str(&self) -> &'static str {
        match self {
            Moment::M0 => "m0",
            Moment::M0MinusM2 => "m0_m2",
            Moment::M0MinusM4 => "m0_m4",
            Moment::Sparseness => "sparseness",
            Moment::IrregularityFactor => "irf",
            Moment::WaveformLengthRatio => "wlr",
        }
    }
}

/// Spectral moments of one channel, before the log transform
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelMoments {
    /// Root squared zero order moment, normalised
    pub m0: f64,
    /// Root squared 2nd order moment, normalised
    pub m2: f64,
    /// Root squared 4th order moment, normalised
    pub m4: f64,
    pub sparseness: f64,
    pub irregularity_factor: f64,
    pub waveform_length_ratio: f64,
}

impl ChannelMoments {
    /// Compute moments for one channel. Caller guarantees at least 3 samples.
    pub(crate) fn compute(channel: ArrayView1<'_, f64>) -> Self {
        let samples: Vec<f64> = channel.to_vec();
        let n = samples.len() as f64;

        let d1 = padded_diff(&samples);
        let d2 = padded_diff(&d1);

        let m0 = root_power(samples.iter().map(|v| v * v).sum::<f64>().sqrt());
        let m2 = root_power((d1.iter().map(|v| v * v).sum::<f64>() / (n - 1.0)).sqrt());
        let m4 = root_power((d2.iter().map(|v| v * v).sum::<f64>() / (n - 1.0)).sqrt());

        // Zero-energy or flat windows leave these as inf/NaN
        let sparseness = m0 / ((m0 - m2) * (m0 - m4)).abs().sqrt();
        let irregularity_factor = m2 / (m0 * m4).sqrt();
        let waveform_length_ratio =
            d1.iter().map(|v| v.abs()).sum::<f64>() / d2.iter().map(|v| v.abs()).sum::<f64>();

        Self {
            m0,
            m2,
            m4,
            sparseness,
            irregularity_factor,
            waveform_length_ratio,
        }
    }

    /// Descriptors in `Moment::ALL` order
    pub fn descriptors(&self) -> [f64; MOMENT_COUNT] {
        [
            self.m0,
            self.m0 - self.m2,
            self.m0 - self.m4,
            self.sparseness,
            self.irregularity_factor,
            self.waveform_length_ratio,
        ]
    }

    /// `ln|x|` of each descriptor
    pub fn log_descriptors(&self) -> [f64; MOMENT_COUNT] {
        self.descriptors().map(|v| v.abs().ln())
    }

    /// Single descriptor by slot
    pub fn get(&self, moment: Moment) -> f64 {
        self.descriptors()[moment as usize]
    }
}

fn root_power(value: f64) -> f64 {
    value.powf(MOMENT_EXPONENT) / MOMENT_EXPONENT
}

/// First difference, zero-padded at the front, differenced again.
/// Output has one element fewer than the input.
fn padded_diff(values: &[f64]) -> Vec<f64> {
    let mut prev = 0.0;
    values
        .windows(2)
        .map(|w| {
            let step = w[1] - w[0];
            let d = step - prev;
            prev = step;
            d
        })
        .collect()
}
