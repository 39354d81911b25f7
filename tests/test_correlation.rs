//! Tests for outcome correlation ranking

use survival_factors::pipeline::{
    correlations_for, pearson_correlation, prepare_records, survival_correlations, Feature,
    FeatureEncoder, PassengerRecord, CORRELATION_FEATURES,
};

#[path = "common/mod.rs"]
mod common;

use common::*;

#[test]
fn test_correlations_bounded_and_exclude_outcome() {
    let prepared = prepare_records(&synthetic_passengers(300, 9)).unwrap();
    let encoder = FeatureEncoder::fit(&prepared.records);

    let correlations = survival_correlations(&prepared.records, &encoder);

    assert_eq!(correlations.len(), CORRELATION_FEATURES.len());
    assert!(correlations.iter().all(|s| (0.0..=1.0).contains(&s.score)));
    assert!(correlations.iter().all(|s| s.feature != "Survived"));
    assert!(correlations.windows(2).all(|w| w[0].score >= w[1].score));
}

#[test]
fn test_sex_fully_determines_outcome() {
    let records: Vec<PassengerRecord> = (1..=12)
        .map(|i| {
            let female = i % 3 == 0;
            passenger(i, if female { "female" } else { "male" }, female)
        })
        .collect();
    let prepared = prepare_records(&records).unwrap();
    let encoder = FeatureEncoder::fit(&prepared.records);

    let correlations = correlations_for(&prepared.records, &encoder, &[Feature::Sex, Feature::Age]);

    assert_eq!(correlations[0].feature, "Sex");
    assert!((correlations[0].score - 1.0).abs() < 1e-9);
    // Every age is 30, so Age has no variance
    assert_eq!(correlations[1].feature, "Age");
    assert_eq!(correlations[1].score, 0.0);
}

#[test]
fn test_pearson_known_values() {
    let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
    let up = [2.0, 4.0, 6.0, 8.0, 10.0];
    let down = [10.0, 8.0, 6.0, 4.0, 2.0];

    assert!((pearson_correlation(&xs, &up).unwrap() - 1.0).abs() < 1e-12);
    assert!((pearson_correlation(&xs, &down).unwrap() + 1.0).abs() < 1e-12);
    assert_eq!(pearson_correlation(&xs, &[3.0; 5]), None);
    assert_eq!(pearson_correlation(&[], &[]), None);
}
