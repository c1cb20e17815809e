//! Signal Windowing
//!
//! Provides the multichannel signal matrix, window parameters with validation,
//! and lazy pairing of current and lagged windows.

mod error;
mod matrix;
mod pairs;
mod params;

pub use error::WindowError;
pub use matrix::SignalMatrix;
pub use pairs::{WindowPair, WindowPairs};
pub use params::{WindowParams, MIN_WINDOW_SAMPLES};
