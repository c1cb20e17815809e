//! Window-level Moment Extraction

use crate::moments::{ChannelMoments, MOMENT_COUNT};
use crate::MomentError;
use ndarray::{Array1, ArrayView2, Axis};
use tracing::debug;

const MIN_SAMPLES: usize = 3;

/// Per-channel moments of a `(samples, channels)` block.
///
/// A block with more columns than rows is taken to be transposed and is
/// flipped before extraction.
pub fn channel_moments(block: ArrayView2<'_, f64>) -> Result<Vec<ChannelMoments>, MomentError> {
    let block = if block.ncols() > block.nrows() {
        debug!(
            "Transposing {}x{} block to samples-by-channels",
            block.nrows(),
            block.ncols()
        );
        block.reversed_axes()
    } else {
        block
    };
    oriented_moments(block)
}

/// Log-scaled moment vector, `6 * channels` long, moment-major.
///
/// Applies the same transpose guard as [`channel_moments`].
pub fn extract(block: ArrayView2<'_, f64>) -> Result<Array1<f64>, MomentError> {
    Ok(flatten(&channel_moments(block)?))
}

/// Like [`extract`] but trusts the block orientation.
///
/// Used where windows are known to be `(samples, channels)`, so that
/// signals with more channels than window samples are not flipped.
pub fn extract_oriented(block: ArrayView2<'_, f64>) -> Result<Array1<f64>, MomentError> {
    Ok(flatten(&oriented_moments(block)?))
}

fn oriented_moments(block: ArrayView2<'_, f64>) -> Result<Vec<ChannelMoments>, MomentError> {
    let samples = block.nrows();
    if samples < MIN_SAMPLES {
        return Err(MomentError::DegenerateWindow {
            samples,
            min: MIN_SAMPLES,
        });
    }

    Ok(block
        .axis_iter(Axis(1))
        .map(ChannelMoments::compute)
        .collect())
}

fn flatten(channels: &[ChannelMoments]) -> Array1<f64> {
    let logs: Vec<[f64; MOMENT_COUNT]> = channels.iter().map(|m| m.log_descriptors()).collect();

    let mut flat = Vec::with_capacity(MOMENT_COUNT * channels.len());
    for k in 0..MOMENT_COUNT {
        flat.extend(logs.iter().map(|l| l[k]));
    }
    Array1::from_vec(flat)
}
