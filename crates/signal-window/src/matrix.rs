//! Multichannel Signal Matrix

use crate::WindowError;
use ndarray::{s, Array1, Array2, ArrayView2, Axis};

/// Immutable signal matrix (rows = samples, columns = channels)
#[derive(Debug, Clone, PartialEq)]
pub struct SignalMatrix {
    data: Array2<f64>,
}

impl SignalMatrix {
    /// Wrap a `(samples, channels)` array
    pub fn new(data: Array2<f64>) -> Self {
        Self { data }
    }

    /// Treat a 1D signal as a single channel
    pub fn from_single_channel(samples: Array1<f64>) -> Self {
        Self {
            data: samples.insert_axis(Axis(1)),
        }
    }

    /// Build from per-channel sample vectors of equal length
    pub fn from_channels(channels: &[Vec<f64>]) -> Result<Self, WindowError> {
        let expected = channels.first().map(Vec::len).unwrap_or(0);
        if let Some((channel, ch)) = channels
            .iter()
            .enumerate()
            .find(|(_, ch)| ch.len() != expected)
        {
            return Err(WindowError::RaggedChannels {
                channel,
                expected,
                actual: ch.len(),
            });
        }

        let data = Array2::from_shape_fn((expected, channels.len()), |(i, c)| channels[c][i]);
        Ok(Self { data })
    }

    /// Number of samples (rows)
    pub fn datasize(&self) -> usize {
        self.data.nrows()
    }

    /// Number of channels (columns)
    pub fn n_signals(&self) -> usize {
        self.data.ncols()
    }

    /// Borrow the whole matrix
    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    /// Borrow `len` rows starting at `start`, or `None` if out of bounds
    pub fn rows(&self, start: usize, len: usize) -> Option<ArrayView2<'_, f64>> {
        let end = start.checked_add(len)?;
        if end > self.datasize() {
            return None;
        }
        Some(self.data.slice(s![start..end, ..]))
    }

    /// Consume into the underlying array
    pub fn into_inner(self) -> Array2<f64> {
        self.data
    }
}

impl From<Array2<f64>> for SignalMatrix {
    fn from(data: Array2<f64>) -> Self {
        Self::new(data)
    }
}

impl From<Array1<f64>> for SignalMatrix {
    fn from(samples: Array1<f64>) -> Self {
        Self::from_single_channel(samples)
    }
}
