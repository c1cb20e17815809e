//! Sliding-window Feature Assembly

use crate::fusion::{CorrelationTerms, FusionRule};
use crate::FusionError;
use metrics::counter;
use ndarray::{Array2, ArrayView2};
use signal_window::{SignalMatrix, WindowPairs, WindowParams};
use spectral_moments::{Moment, MOMENT_COUNT};
use tracing::{debug, trace, warn};

/// Column labels of the feature matrix, moment-major
pub fn feature_names(n_signals: usize) -> Vec<String> {
    Moment::ALL
        .iter()
        .flat_map(|moment| (0..n_signals).map(move |c| format!("{}_ch{}", moment.as_str(), c)))
        .collect()
}

/// Fused time-domain descriptor extractor
#[derive(Debug, Clone)]
pub struct FusedFeatureExtractor {
    /// Window geometry
    params: WindowParams,
    /// Lagged/current combination
    rule: FusionRule,
}

impl FusedFeatureExtractor {
    /// Create an extractor using the difference rule
    pub fn new(params: WindowParams) -> Self {
        Self {
            params,
            rule: FusionRule::default(),
        }
    }

    /// Select the fusion rule
    pub fn with_rule(mut self, rule: FusionRule) -> Self {
        self.rule = rule;
        self
    }

    pub fn params(&self) -> &WindowParams {
        &self.params
    }

    pub fn rule(&self) -> FusionRule {
        self.rule
    }

    /// Extract features from a signal matrix
    pub fn extract(&self, signal: &SignalMatrix) -> Result<Array2<f64>, FusionError> {
        self.extract_view(signal.view())
    }

    /// Extract features from a `(samples, channels)` view
    pub fn extract_view(&self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>, FusionError> {
        let pairs = WindowPairs::new(x, &self.params)?;
        let rows = pairs.len();
        let cols = x.ncols() * MOMENT_COUNT;

        debug!(
            "Extracting fused features: datasize={}, channels={}, windows={}, rule={:?}",
            x.nrows(),
            x.ncols(),
            rows,
            self.rule
        );

        let mut feat = Array2::zeros((rows, cols));
        for pair in pairs {
            trace!(index = pair.index, start = pair.start, "fusing window");

            let lagged = CorrelationTerms::compute(pair.lagged)?;
            let current = CorrelationTerms::compute(pair.current)?;
            feat.row_mut(pair.index)
                .assign(&self.rule.fuse(&lagged, &current));
        }

        counter!("ftdd_windows_processed_total").increment(rows as u64);

        let non_finite = feat.iter().filter(|v| !v.is_finite()).count();
        if non_finite > 0 {
            warn!("{} of {} fused features are not finite", non_finite, feat.len());
            counter!("ftdd_non_finite_features_total").increment(non_finite as u64);
        }

        Ok(feat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{extract_fused_features, extract_fused_features_1d, WindowError};
    use ndarray::{s, Array1};
    use proptest::prelude::*;
    use std::f64::consts::PI;

    fn two_tone(samples: usize) -> Array2<f64> {
        Array2::from_shape_fn((samples, 2), |(i, c)| {
            let freq = if c == 0 { 0.05 } else { 0.17 };
            (2.0 * PI * freq * i as f64).sin() * (1.0 + 0.3 * c as f64)
        })
    }

    #[test]
    fn test_two_channel_scenario() {
        let x = two_tone(20);
        let feat = extract_fused_features(x.view(), 2, 10, 2).unwrap();

        assert_eq!(feat.dim(), (4, 12));
        assert!(feat.iter().all(|v| v.is_finite()));
        // m0 slots are the first n_signals columns
        assert!(feat.slice(s![.., 0..2]).iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_rows_match_direct_computation() {
        let x = two_tone(20);
        let feat = extract_fused_features(x.view(), 2, 10, 2).unwrap();

        for i in 0..4 {
            let st = (i + 2) * 2;
            let lagged = CorrelationTerms::compute(x.slice(s![st - 4..st + 6, ..])).unwrap();
            let current = CorrelationTerms::compute(x.slice(s![st..st + 10, ..])).unwrap();
            let expected = FusionRule::Difference.fuse(&lagged, &current);
            assert_eq!(feat.row(i), expected);
        }
    }

    #[test]
    fn test_difference_vs_ratio_rule() {
        let x = two_tone(60);
        let params = WindowParams::new(3, 12, 4);
        let diff = FusedFeatureExtractor::new(params).extract_view(x.view()).unwrap();
        let ratio = FusedFeatureExtractor::new(params)
            .with_rule(FusionRule::Ratio)
            .extract_view(x.view())
            .unwrap();

        assert_eq!(diff.dim(), ratio.dim());
        // (num - den) = -(ebp + efp)^2, so the product is never negative
        assert!(diff.iter().all(|v| *v >= 0.0));
        assert!(ratio.iter().all(|v| v.abs() <= 1.0 + 1e-12));
        // The two rules are distinct features, not a rescaling of each other
        assert!(diff.iter().zip(ratio.iter()).any(|(d, r)| (d - r).abs() > 1e-6));
    }

    #[test]
    fn test_deterministic() {
        let x = two_tone(40);
        let a = extract_fused_features(x.view(), 2, 8, 3).unwrap();
        let b = extract_fused_features(x.view(), 2, 8, 3).unwrap();
        assert!(a.iter().zip(b.iter()).all(|(p, q)| p.to_bits() == q.to_bits()));
    }

    #[test]
    fn test_single_channel_input() {
        let x: Array1<f64> = (0..30).map(|i| (i as f64 * 0.4).sin()).collect();
        let feat = extract_fused_features_1d(x.view(), 1, 10, 5).unwrap();
        assert_eq!(feat.dim(), (4, 6));

        let signal = SignalMatrix::from_single_channel(x);
        let via_matrix = FusedFeatureExtractor::new(WindowParams::new(1, 10, 5))
            .extract(&signal)
            .unwrap();
        assert_eq!(feat, via_matrix);
    }

    #[test]
    fn test_more_channels_than_window_samples() {
        let x = Array2::from_shape_fn((40, 8), |(i, c)| ((i * (c + 1)) as f64 * 0.3).sin());
        let feat = extract_fused_features(x.view(), 1, 4, 4).unwrap();
        assert_eq!(feat.dim(), (9, 48));
    }

    #[test]
    fn test_constant_channel_propagates_nan() {
        let mut x = two_tone(20);
        x.column_mut(1).fill(0.75);
        let feat = extract_fused_features(x.view(), 2, 10, 2).unwrap();
        // irf slot of channel 1 is 0/0
        let irf_col = Moment::IrregularityFactor as usize * 2 + 1;
        assert!(feat.column(irf_col).iter().all(|v| v.is_nan()));
        assert!(feat.column(0).iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_invalid_parameters() {
        let x = two_tone(20);
        assert!(matches!(
            extract_fused_features(x.view(), 6, 10, 2),
            Err(FusionError::Window(WindowError::InvalidDimension(_)))
        ));
        assert!(matches!(
            extract_fused_features(x.view(), 1, 25, 2),
            Err(FusionError::Window(WindowError::InvalidDimension(_)))
        ));
        assert!(matches!(
            extract_fused_features(x.view(), 1, 2, 1),
            Err(FusionError::Window(WindowError::DegenerateWindow { .. }))
        ));
        assert!(matches!(
            extract_fused_features(x.view(), 1, 10, 0),
            Err(FusionError::Window(WindowError::InvalidParameter { .. }))
        ));
    }

    #[test]
    fn test_feature_names() {
        let names = feature_names(2);
        assert_eq!(names.len(), 12);
        assert_eq!(names[0], "m0_ch0");
        assert_eq!(names[1], "m0_ch1");
        assert_eq!(names[2], "m0_m2_ch0");
        assert_eq!(names[11], "wlr_ch1");
    }

    proptest! {
        #[test]
        fn prop_output_shape(
            datasize in 12usize..120,
            n_signals in 1usize..4,
            winsize in 3usize..12,
            wininc in 1usize..5,
            steps in 1usize..4,
        ) {
            let numwin = (datasize - winsize) / wininc + 1;
            prop_assume!(numwin > steps);

            let x = Array2::from_shape_fn((datasize, n_signals), |(i, c)| {
                (i as f64 * 0.37 + c as f64).sin()
            });
            let feat = extract_fused_features(x.view(), steps, winsize, wininc).unwrap();
            prop_assert_eq!(feat.dim(), (numwin - steps, n_signals * MOMENT_COUNT));
        }
    }
}
