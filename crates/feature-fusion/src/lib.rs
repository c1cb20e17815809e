//! Fused Time-Domain Descriptors
//!
//! Slides a window over a multichannel signal and fuses the spectral moments
//! of each window with those of the window `steps` strides earlier.

mod extractor;
mod fusion;

pub use extractor::{feature_names, FusedFeatureExtractor};
pub use fusion::{log_power, CorrelationTerms, FusionRule};
pub use signal_window::{SignalMatrix, WindowError, WindowParams};
pub use spectral_moments::{MomentError, MOMENT_COUNT};

use ndarray::{Array2, ArrayView1, ArrayView2, Axis};
use thiserror::Error;

/// Errors during fused feature extraction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FusionError {
    #[error(transparent)]
    Window(#[from] WindowError),
    #[error(transparent)]
    Moment(#[from] MomentError),
}

/// Fused features of `x` (rows = samples, columns = channels).
///
/// Output shape is `(numwin - steps, channels * 6)` with
/// `numwin = (datasize - winsize) / wininc + 1`.
pub fn extract_fused_features(
    x: ArrayView2<'_, f64>,
    steps: usize,
    winsize: usize,
    wininc: usize,
) -> Result<Array2<f64>, FusionError> {
    FusedFeatureExtractor::new(WindowParams::new(steps, winsize, wininc)).extract_view(x)
}

/// Single-channel variant of [`extract_fused_features`]
pub fn extract_fused_features_1d(
    x: ArrayView1<'_, f64>,
    steps: usize,
    winsize: usize,
    wininc: usize,
) -> Result<Array2<f64>, FusionError> {
    extract_fused_features(x.insert_axis(Axis(1)), steps, winsize, wininc)
}
