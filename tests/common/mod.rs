//! Shared test utilities and fixture generators

#![allow(dead_code)]

use polars::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use survival_factors::pipeline::PassengerRecord;
use tempfile::TempDir;

const SURNAMES: [&str; 8] = [
    "Braund", "Cumings", "Heikkinen", "Futrelle", "Allen", "Moran", "McCarthy", "Palsson",
];
const PORTS: [&str; 3] = ["S", "C", "Q"];

/// A passenger with sensible defaults; override fields with struct update syntax
pub fn passenger(id: i64, sex: &str, survived: bool) -> PassengerRecord {
    let title = if sex == "female" { "Mrs" } else { "Mr" };
    PassengerRecord {
        passenger_id: id,
        survived,
        pclass: 3,
        sex: sex.to_string(),
        age: Some(30.0),
        sibsp: 0,
        parch: 0,
        fare: Some(10.0),
        embarked: Some("S".to_string()),
        name: format!("Doe, {}. Sam", title),
    }
}

/// Synthetic passenger list where sex and class drive survival.
///
/// About 10% of ages, 2% of fares and 1% of ports are missing.
pub fn synthetic_passengers(n: usize, seed: u64) -> Vec<PassengerRecord> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    (0..n)
        .map(|i| {
            let female = rng.gen_bool(0.35);
            let pclass: u8 = match rng.gen_range(0..10) {
                0..=2 => 1,
                3..=4 => 2,
                _ => 3,
            };
            let survival_p = match (female, pclass) {
                (true, 1 | 2) => 0.92,
                (true, _) => 0.5,
                (false, 1) => 0.37,
                (false, _) => 0.12,
            };
            let age: f64 = rng.gen_range(1.0..75.0);
            let title = match (female, age < 15.0) {
                (true, true) => "Miss",
                (true, false) => {
                    if rng.gen_bool(0.6) {
                        "Mrs"
                    } else {
                        "Miss"
                    }
                }
                (false, true) => "Master",
                (false, false) => "Mr",
            };
            let base_fare = match pclass {
                1 => 80.0,
                2 => 20.0,
                _ => 8.0,
            };

            PassengerRecord {
                passenger_id: i as i64 + 1,
                survived: rng.gen_bool(survival_p),
                pclass,
                sex: if female { "female" } else { "male" }.to_string(),
                age: (!rng.gen_bool(0.1)).then_some((age * 2.0).round() / 2.0),
                sibsp: rng.gen_range(0..3),
                parch: if rng.gen_bool(0.8) { 0 } else { rng.gen_range(1..4) },
                fare: (!rng.gen_bool(0.02)).then_some(base_fare * rng.gen_range(0.5..2.5)),
                embarked: (!rng.gen_bool(0.01))
                    .then(|| PORTS[rng.gen_range(0..PORTS.len())].to_string()),
                name: format!(
                    "{}, {}. Passenger {}",
                    SURNAMES[rng.gen_range(0..SURNAMES.len())],
                    title,
                    i
                ),
            }
        })
        .collect()
}

/// Passenger records laid out as a DataFrame with the file's column names
pub fn passenger_frame(records: &[PassengerRecord]) -> DataFrame {
    df! {
        "PassengerId" => records.iter().map(|r| r.passenger_id).collect::<Vec<_>>(),
        "Survived" => records.iter().map(|r| i64::from(r.survived)).collect::<Vec<_>>(),
        "Pclass" => records.iter().map(|r| i64::from(r.pclass)).collect::<Vec<_>>(),
        "Name" => records.iter().map(|r| r.name.clone()).collect::<Vec<_>>(),
        "Sex" => records.iter().map(|r| r.sex.clone()).collect::<Vec<_>>(),
        "Age" => records.iter().map(|r| r.age).collect::<Vec<_>>(),
        "SibSp" => records.iter().map(|r| i64::from(r.sibsp)).collect::<Vec<_>>(),
        "Parch" => records.iter().map(|r| i64::from(r.parch)).collect::<Vec<_>>(),
        "Fare" => records.iter().map(|r| r.fare).collect::<Vec<_>>(),
        "Embarked" => records.iter().map(|r| r.embarked.clone()).collect::<Vec<_>>(),
    }
    .unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("train.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("train.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Synthetic passengers written to a temporary CSV
pub fn synthetic_csv(n: usize, seed: u64) -> (TempDir, PathBuf) {
    let mut df = passenger_frame(&synthetic_passengers(n, seed));
    create_temp_csv(&mut df)
}
