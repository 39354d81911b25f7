//! Tests for per-group survival rates

use survival_factors::pipeline::{
    group_rates, prepare_records, standard_group_rates, GroupKey, PassengerRecord,
    MAX_REPORTED_FAMILY_SIZE,
};

#[path = "common/mod.rs"]
mod common;

use common::*;

#[test]
fn test_sex_scenario() {
    let records = vec![
        passenger(1, "female", true),
        passenger(2, "female", true),
        passenger(3, "male", false),
        passenger(4, "male", false),
    ];
    let prepared = prepare_records(&records).unwrap();

    let table = group_rates(&prepared.records, GroupKey::Sex);

    assert_eq!(table.name, "Gender");
    assert_eq!(table.labels(), vec!["female", "male"]);
    assert_eq!(table.rate("female"), Some(1.0));
    assert_eq!(table.rate("male"), Some(0.0));
}

#[test]
fn test_large_families_left_out() {
    let records = vec![
        passenger(1, "male", false),
        PassengerRecord {
            sibsp: 4,
            parch: 3,
            ..passenger(2, "female", true)
        },
        PassengerRecord {
            sibsp: 3,
            parch: 2,
            ..passenger(3, "female", false)
        },
    ];
    let prepared = prepare_records(&records).unwrap();

    let table = group_rates(&prepared.records, GroupKey::FamilySize);
    assert_eq!(table.labels(), vec!["Size 1", "Size 6"]);

    // The size-8 passenger still counts in the other tables
    let alone = group_rates(&prepared.records, GroupKey::IsAlone);
    let with_family = alone.rates.iter().find(|r| r.label == "With Family").unwrap();
    assert_eq!(with_family.count, 2);
}

#[test]
fn test_rates_bounded_and_keys_observed() {
    let prepared = prepare_records(&synthetic_passengers(300, 13)).unwrap();

    let tables = standard_group_rates(&prepared.records);
    assert_eq!(tables.len(), GroupKey::STANDARD.len());

    for table in &tables {
        assert!(!table.is_empty(), "{} should have categories", table.name);
        for rate in &table.rates {
            assert!((0.0..=1.0).contains(&rate.rate));
            assert!(rate.survivors <= rate.count);
        }
    }

    let class = group_rates(&prepared.records, GroupKey::Class);
    assert_eq!(class.labels(), vec!["Class 1", "Class 2", "Class 3"]);

    let family = group_rates(&prepared.records, GroupKey::FamilySize);
    let expected: usize = prepared
        .records
        .iter()
        .filter(|r| r.family_size <= MAX_REPORTED_FAMILY_SIZE)
        .count();
    assert_eq!(family.rates.iter().map(|r| r.count).sum::<usize>(), expected);
}

#[test]
fn test_port_labels() {
    let records = vec![
        PassengerRecord {
            embarked: Some("C".to_string()),
            ..passenger(1, "female", true)
        },
        passenger(2, "male", false),
    ];
    let prepared = prepare_records(&records).unwrap();

    let table = group_rates(&prepared.records, GroupKey::Embarked);
    assert_eq!(table.labels(), vec!["Cherbourg (C)", "Southampton (S)"]);
}
