//! Tests for missing value filling and feature engineering

use survival_factors::pipeline::{
    prepare_records, title_from_name, AgeBucket, AnalysisError, FareBucket, PassengerRecord,
};

#[path = "common/mod.rs"]
mod common;

use common::*;

#[test]
fn test_title_scenarios() {
    assert_eq!(title_from_name("Braund, Mr. Owen Harris"), "Mr");
    assert_eq!(title_from_name("Cumings, Mrs. John Bradley (Florence Briggs Thayer)"), "Mrs");
    assert_eq!(title_from_name("Heikkinen, Miss. Laina"), "Miss");
    assert_eq!(title_from_name("Aubart, Mlle. Leontine Pauline"), "Miss");
    assert_eq!(title_from_name("Futrelle, Mrs. Jacques Heath (Lily May Peel)"), "Mrs");
    assert_eq!(title_from_name("Graham, Miss. Margaret Edith"), "Miss");
    assert_eq!(title_from_name("Impens, Mlle. Stephanie"), "Miss");
    assert_eq!(title_from_name("Uruchurtu, Don. Manuel E"), "Rare");
    assert_eq!(title_from_name("Nameless"), "Unknown");
}

#[test]
fn test_fills_use_median_and_mode() {
    let records = vec![
        PassengerRecord {
            age: Some(20.0),
            fare: Some(7.25),
            embarked: Some("S".to_string()),
            ..passenger(1, "male", false)
        },
        PassengerRecord {
            age: None,
            fare: None,
            embarked: None,
            ..passenger(2, "female", true)
        },
        PassengerRecord {
            age: Some(40.0),
            fare: Some(71.28),
            embarked: Some("C".to_string()),
            ..passenger(3, "female", true)
        },
        PassengerRecord {
            age: Some(30.0),
            fare: Some(8.05),
            embarked: Some("C".to_string()),
            ..passenger(4, "male", false)
        },
    ];

    let prepared = prepare_records(&records).unwrap();
    let imputation = &prepared.imputation;

    assert_eq!(imputation.median_age, 30.0);
    assert_eq!(imputation.median_fare, 8.05);
    assert_eq!(imputation.mode_embarked, "C");
    assert_eq!(
        (imputation.filled_age, imputation.filled_fare, imputation.filled_embarked),
        (1, 1, 1)
    );

    let filled = &prepared.records[1];
    assert_eq!(filled.age, 30.0);
    assert_eq!(filled.fare, 8.05);
    assert_eq!(filled.embarked, "C");
    // Present values are untouched
    assert_eq!(prepared.records[0].age, 20.0);
    assert_eq!(prepared.records[0].embarked, "S");
}

#[test]
fn test_family_features() {
    let records = vec![
        passenger(1, "male", false),
        PassengerRecord {
            sibsp: 1,
            parch: 2,
            ..passenger(2, "female", true)
        },
    ];

    let prepared = prepare_records(&records).unwrap();
    assert_eq!(prepared.records[0].family_size, 1);
    assert!(prepared.records[0].is_alone);
    assert_eq!(prepared.records[1].family_size, 4);
    assert!(!prepared.records[1].is_alone);
}

#[test]
fn test_age_buckets_cover_every_record() {
    let records = synthetic_passengers(300, 7);
    let prepared = prepare_records(&records).unwrap();

    let total: usize = AgeBucket::ALL
        .iter()
        .map(|bucket| {
            prepared
                .records
                .iter()
                .filter(|r| r.age_bucket == *bucket)
                .count()
        })
        .sum();
    assert_eq!(total, prepared.records.len());

    for record in &prepared.records {
        assert_eq!(record.age_bucket, AgeBucket::from_age(record.age));
    }
}

#[test]
fn test_fare_buckets_balanced_for_distinct_fares() {
    let records: Vec<PassengerRecord> = (1..=8)
        .map(|i| PassengerRecord {
            fare: Some(i as f64),
            ..passenger(i, "male", i % 2 == 0)
        })
        .collect();

    let prepared = prepare_records(&records).unwrap();
    for bucket in FareBucket::ALL {
        let size = prepared
            .records
            .iter()
            .filter(|r| r.fare_bucket == bucket)
            .count();
        assert_eq!(size, 2, "bucket {:?} should hold two fares", bucket);
    }
}

#[test]
fn test_fare_buckets_cover_every_record_with_ties() {
    let records = synthetic_passengers(200, 11);
    let prepared = prepare_records(&records).unwrap();

    let total: usize = FareBucket::ALL
        .iter()
        .map(|b| prepared.records.iter().filter(|r| r.fare_bucket == *b).count())
        .sum();
    assert_eq!(total, records.len());
}

#[test]
fn test_empty_input_rejected() {
    assert!(matches!(
        prepare_records(&[]),
        Err(AnalysisError::EmptyDataset(_))
    ));
}

#[test]
fn test_all_ages_missing_rejected() {
    let records = vec![
        PassengerRecord {
            age: None,
            ..passenger(1, "male", false)
        },
        PassengerRecord {
            age: None,
            ..passenger(2, "female", true)
        },
    ];
    assert!(matches!(
        prepare_records(&records),
        Err(AnalysisError::EmptyDataset(_))
    ));
}
