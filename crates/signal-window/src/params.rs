//! Window Parameters and Validation

use crate::WindowError;
use serde::{Deserialize, Serialize};

/// Minimum window length (second-difference needs two interior points)
pub const MIN_WINDOW_SAMPLES: usize = 3;

/// Sliding window configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowParams {
    /// Number of strides between the lagged and the current window
    pub steps: usize,
    /// Window length (samples)
    pub winsize: usize,
    /// Stride between consecutive windows (samples)
    pub wininc: usize,
}

impl Default for WindowParams {
    fn default() -> Self {
        Self {
            steps: 3,
            winsize: 150,
            wininc: 50,
        }
    }
}

impl WindowParams {
    /// Create window parameters
    pub fn new(steps: usize, winsize: usize, wininc: usize) -> Self {
        Self {
            steps,
            winsize,
            wininc,
        }
    }

    /// Samples between the lagged and the current window
    pub fn lag_offset(&self) -> usize {
        self.steps * self.wininc
    }

    /// Number of window positions that fit in `datasize` samples
    pub fn num_windows(&self, datasize: usize) -> usize {
        if self.wininc == 0 || self.winsize > datasize {
            return 0;
        }
        (datasize - self.winsize) / self.wininc + 1
    }

    /// Number of windows that have a valid lagged partner
    pub fn output_rows(&self, datasize: usize) -> usize {
        self.num_windows(datasize).saturating_sub(self.steps)
    }

    /// Validate against a signal shape, returning the window count
    pub fn validate(&self, datasize: usize, n_signals: usize) -> Result<usize, WindowError> {
        if self.steps == 0 {
            return Err(WindowError::InvalidParameter {
                name: "steps",
                value: self.steps,
            });
        }
        if self.wininc == 0 {
            return Err(WindowError::InvalidParameter {
                name: "wininc",
                value: self.wininc,
            });
        }
        if self.winsize < MIN_WINDOW_SAMPLES {
            return Err(WindowError::DegenerateWindow {
                winsize: self.winsize,
                min: MIN_WINDOW_SAMPLES,
            });
        }
        if n_signals == 0 {
            return Err(WindowError::InvalidDimension(
                "signal has no channels".to_string(),
            ));
        }
        if self.winsize > datasize {
            return Err(WindowError::InvalidDimension(format!(
                "winsize {} exceeds datasize {}",
                self.winsize, datasize
            )));
        }

        let numwin = self.num_windows(datasize);
        if self.steps >= numwin {
            return Err(WindowError::InvalidDimension(format!(
                "steps {} leaves no output rows for {} windows",
                self.steps, numwin
            )));
        }
        Ok(numwin)
    }
}
