//! Correlation of each feature with the survival outcome

use super::encoder::FeatureEncoder;
use super::importance::{rank_descending, FeatureScore};
use super::records::{EngineeredRecord, Feature, CORRELATION_FEATURES};

/// Absolute correlations with the outcome, highest first
pub type CorrelationResult = Vec<FeatureScore>;

/// Rank every column in [`CORRELATION_FEATURES`] by absolute Pearson correlation
/// with survival. The outcome column itself is never part of the result.
pub fn survival_correlations(
    records: &[EngineeredRecord],
    encoder: &FeatureEncoder,
) -> CorrelationResult {
    correlations_for(records, encoder, &CORRELATION_FEATURES)
}

/// Same as [`survival_correlations`] over an explicit column list.
pub fn correlations_for(
    records: &[EngineeredRecord],
    encoder: &FeatureEncoder,
    features: &[Feature],
) -> CorrelationResult {
    let outcome: Vec<f64> = records.iter().map(EngineeredRecord::outcome).collect();

    let scores = features
        .iter()
        .map(|&feature| {
            let column = encoder.encode_column(records, feature);
            let r = pearson_correlation(&column, &outcome).unwrap_or(0.0);
            FeatureScore::new(feature.name(), r.abs().clamp(0.0, 1.0))
        })
        .collect();

    rank_descending(scores)
}

/// Pearson correlation using Welford's single-pass algorithm.
///
/// Returns `None` for empty or mismatched inputs, or when either side has zero
/// variance.
pub fn pearson_correlation(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len();
    if n == 0 || n != ys.len() {
        return None;
    }

    let mut count = 0.0;
    let mut mean_x = 0.0;
    let mut mean_y = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    let mut cov_xy = 0.0;

    for (&x, &y) in xs.iter().zip(ys) {
        count += 1.0;
        let dx = x - mean_x;
        let dy = y - mean_y;
        mean_x += dx / count;
        mean_y += dy / count;
        var_x += dx * (x - mean_x);
        var_y += dy * (y - mean_y);
        cov_xy += dx * (y - mean_y);
    }

    if var_x <= 0.0 || var_y <= 0.0 {
        return None;
    }

    let r = cov_xy / (var_x.sqrt() * var_y.sqrt());
    if r.is_nan() {
        None
    } else {
        Some(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_positive_and_negative() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let up = [2.0, 4.0, 6.0, 8.0, 10.0];
        let down = [5.0, 4.0, 3.0, 2.0, 1.0];
        assert!((pearson_correlation(&x, &up).unwrap() - 1.0).abs() < 1e-12);
        assert!((pearson_correlation(&x, &down).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_column_has_no_correlation() {
        assert_eq!(pearson_correlation(&[3.0, 3.0, 3.0], &[0.0, 1.0, 0.0]), None);
    }

    #[test]
    fn test_mismatched_lengths() {
        assert_eq!(pearson_correlation(&[1.0, 2.0], &[1.0]), None);
        assert_eq!(pearson_correlation(&[], &[]), None);
    }
}
