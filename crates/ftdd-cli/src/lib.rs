//! Fused TDD Demo
//!
//! Synthesises a multichannel signal in memory, extracts fused time-domain
//! descriptors and reports them as JSON.

use anyhow::Context;
use feature_fusion::{feature_names, FusedFeatureExtractor, FusionRule, SignalMatrix, WindowParams};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Synthetic signal description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyntheticSignal {
    /// Number of samples per channel
    pub samples: usize,
    /// Sample rate (Hz)
    pub sample_rate_hz: f64,
    /// Carrier frequency per channel (Hz)
    pub frequencies_hz: Vec<f64>,
    /// Amplitude modulation rate (Hz), 0 disables it
    pub modulation_hz: f64,
}

impl Default for SyntheticSignal {
    fn default() -> Self {
        Self {
            samples: 2000,
            sample_rate_hz: 1000.0,
            frequencies_hz: vec![35.0, 80.0, 120.0],
            modulation_hz: 1.5,
        }
    }
}

impl SyntheticSignal {
    /// Render as a `(samples, channels)` matrix
    pub fn render(&self) -> SignalMatrix {
        let data = Array2::from_shape_fn((self.samples, self.frequencies_hz.len()), |(i, c)| {
            let t = i as f64 / self.sample_rate_hz;
            let envelope = 1.0 + 0.5 * (2.0 * PI * self.modulation_hz * t).sin();
            envelope * (2.0 * PI * self.frequencies_hz[c] * t).sin()
        });
        SignalMatrix::new(data)
    }
}

/// Demo configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    pub window: WindowParams,
    pub fusion_rule: FusionRule,
    pub signal: SyntheticSignal,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Emit JSON log lines
    pub json_logs: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            window: WindowParams::default(),
            fusion_rule: FusionRule::default(),
            signal: SyntheticSignal::default(),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl DemoConfig {
    /// Defaults overridden by `FTDD_*` environment variables,
    /// e.g. `FTDD_WINDOW__STEPS=5` or `FTDD_SIGNAL__FREQUENCIES_HZ=40,90`
    pub fn load() -> anyhow::Result<Self> {
        Self::from_source(
            config::Environment::with_prefix("FTDD")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("signal.frequencies_hz"),
        )
    }

    fn from_source<S>(source: S) -> anyhow::Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?)
            .add_source(source)
            .build()
            .context("Failed to build demo configuration")?;

        settings
            .try_deserialize()
            .context("Invalid demo configuration")
    }
}

/// Extraction output
#[derive(Debug, Clone, Serialize)]
pub struct FeatureReport {
    pub params: WindowParams,
    pub rule: FusionRule,
    pub rows: usize,
    pub columns: usize,
    pub feature_names: Vec<String>,
    /// Row-major features; non-finite values serialise as null
    pub features: Vec<Vec<f64>>,
}

/// Initialize logging
pub fn init_logging(level: &str, json: bool) -> anyhow::Result<()> {
    let level: Level = level
        .parse()
        .with_context(|| format!("Unknown log level {:?}", level))?;
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

/// Render the signal and extract features
pub fn run(config: &DemoConfig) -> anyhow::Result<FeatureReport> {
    let signal = config.signal.render();
    info!(
        "Synthesised {} samples x {} channels at {} Hz",
        signal.datasize(),
        signal.n_signals(),
        config.signal.sample_rate_hz
    );

    let feat = FusedFeatureExtractor::new(config.window)
        .with_rule(config.fusion_rule)
        .extract(&signal)
        .context("Feature extraction failed")?;

    info!("Extracted {}x{} feature matrix", feat.nrows(), feat.ncols());

    Ok(FeatureReport {
        params: config.window,
        rule: config.fusion_rule,
        rows: feat.nrows(),
        columns: feat.ncols(),
        feature_names: feature_names(signal.n_signals()),
        features: feat.rows().into_iter().map(|row| row.to_vec()).collect(),
    })
}
