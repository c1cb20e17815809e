//! Current / Lagged Window Pairing

use crate::{WindowError, WindowParams};
use ndarray::{s, ArrayView2};
use tracing::trace;

/// Current window together with the window `steps` strides behind it
#[derive(Debug, Clone)]
pub struct WindowPair<'a> {
    /// Output row index (0-based)
    pub index: usize,
    /// First sample of the current window
    pub start: usize,
    /// Current window
    pub current: ArrayView2<'a, f64>,
    /// Lagged window
    pub lagged: ArrayView2<'a, f64>,
}

/// Lazy iterator over window pairs of a validated signal
#[derive(Debug, Clone)]
pub struct WindowPairs<'a> {
    signal: ArrayView2<'a, f64>,
    winsize: usize,
    wininc: usize,
    lag: usize,
    next: usize,
    count: usize,
}

impl<'a> WindowPairs<'a> {
    /// Validate `params` against `signal` and prepare the pairing
    pub fn new(signal: ArrayView2<'a, f64>, params: &WindowParams) -> Result<Self, WindowError> {
        let numwin = params.validate(signal.nrows(), signal.ncols())?;
        Ok(Self {
            signal,
            winsize: params.winsize,
            wininc: params.wininc,
            lag: params.lag_offset(),
            next: 0,
            count: numwin - params.steps,
        })
    }
}

impl<'a> Iterator for WindowPairs<'a> {
    type Item = WindowPair<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.count {
            return None;
        }

        let index = self.next;
        let st = self.lag + index * self.wininc;
        let en = st + self.winsize;
        trace!(index, st, en, "window pair");

        self.next += 1;
        Some(WindowPair {
            index,
            start: st,
            current: self.signal.slice_move(s![st..en, ..]),
            lagged: self.signal.slice_move(s![st - self.lag..en - self.lag, ..]),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for WindowPairs<'_> {}
