//! Spectral Moment Extraction
//!
//! Derives power spectral moments directly from time-domain samples,
//! six log-scaled descriptors per channel.

mod extractor;
mod moments;

pub use extractor::{channel_moments, extract, extract_oriented};
pub use moments::{ChannelMoments, Moment, MOMENT_COUNT, MOMENT_EXPONENT};

use thiserror::Error;

/// Errors during moment extraction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MomentError {
    #[error("Window of {samples} samples is degenerate (need at least {min})")]
    DegenerateWindow { samples: usize, min: usize },
}
