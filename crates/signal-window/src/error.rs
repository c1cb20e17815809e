//! Windowing Error Types

use thiserror::Error;

/// Errors raised while validating window parameters or signal shape
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowError {
    /// Parameter that must be at least 1 was zero
    #[error("Invalid parameter {name}: {value} (must be at least 1)")]
    InvalidParameter { name: &'static str, value: usize },

    /// Window too short for second-order differencing
    #[error("Window of {winsize} samples is degenerate (need at least {min})")]
    DegenerateWindow { winsize: usize, min: usize },

    /// Signal and window dimensions are incompatible
    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),

    /// Channels supplied with differing sample counts
    #[error("Channel {channel} has {actual} samples, expected {expected}")]
    RaggedChannels {
        channel: usize,
        expected: usize,
        actual: usize,
    },
}
