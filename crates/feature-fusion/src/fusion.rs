//! Correlation Terms and Fusion Rules

use ndarray::{Array1, Array2, ArrayView2};
use serde::{Deserialize, Serialize};
use spectral_moments::MomentError;

/// How lagged and current correlation terms are combined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FusionRule {
    /// `(num - den) * (num2 - den2)` on log-domain moments
    #[default]
    Difference,
    /// `(num / den) * (num2 / den2)`, the earlier published form
    Ratio,
}

impl FusionRule {
    /// Combine terms of the lagged and the current window
    pub fn fuse(&self, lagged: &CorrelationTerms, current: &CorrelationTerms) -> Array1<f64> {
        match self {
            FusionRule::Difference => {
                (&lagged.num - &lagged.den) * (&current.num - &current.den)
            }
            FusionRule::Ratio => (&lagged.num / &lagged.den) * (&current.num / &current.den),
        }
    }
}

/// `num = -2 * ebp * efp` and `den = efp^2 + ebp^2` for one window
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationTerms {
    pub num: Array1<f64>,
    pub den: Array1<f64>,
}

impl CorrelationTerms {
    /// Build from raw-signal (`ebp`) and log-power (`efp`) moment vectors
    pub fn from_moments(ebp: &Array1<f64>, efp: &Array1<f64>) -> Self {
        Self {
            num: (ebp * efp) * -2.0,
            den: efp * efp + ebp * ebp,
        }
    }

    /// Extract both moment vectors from a `(samples, channels)` window
    pub fn compute(window: ArrayView2<'_, f64>) -> Result<Self, MomentError> {
        let ebp = spectral_moments::extract_oriented(window)?;
        let efp = spectral_moments::extract_oriented(log_power(window).view())?;
        Ok(Self::from_moments(&ebp, &efp))
    }
}

/// `ln(x^2 + eps)^2` elementwise, with `eps` the spacing of 1.0
pub fn log_power(window: ArrayView2<'_, f64>) -> Array2<f64> {
    window.mapv(|v| (v * v + f64::EPSILON).ln().powi(2))
}
