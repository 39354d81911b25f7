//! Dataset loader for CSV and Parquet passenger files

use std::path::Path;

use polars::prelude::*;

use super::error::{AnalysisError, Result};
use super::records::PassengerRecord;
use crate::utils::{create_spinner, finish_with_success};

/// Columns every passenger file must provide.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "PassengerId",
    "Survived",
    "Pclass",
    "Name",
    "Sex",
    "Age",
    "SibSp",
    "Parch",
    "Fare",
    "Embarked",
];

/// Load a dataset from a file (CSV or Parquet based on extension)
///
/// `infer_schema_length` of 0 scans the whole CSV for schema inference.
pub fn load_dataset(path: &Path, infer_schema_length: usize) -> Result<LazyFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let lf = match extension.as_str() {
        "csv" => {
            let schema_length = if infer_schema_length == 0 {
                None
            } else {
                Some(infer_schema_length)
            };
            LazyCsvReader::new(path)
                .with_has_header(true)
                .with_infer_schema_length(schema_length)
                .finish()?
        }
        "parquet" => LazyFrame::scan_parquet(path, Default::default())?,
        _ => {
            return Err(AnalysisError::DataFormat(format!(
                "unsupported file format '{}' ({}). Supported formats: csv, parquet",
                extension,
                path.display()
            )))
        }
    };

    Ok(lf)
}

/// Load and collect a dataset under a spinner.
///
/// Returns the frame with its row count, column count and estimated size in MB.
pub fn load_dataset_with_progress(
    path: &Path,
    infer_schema_length: usize,
) -> Result<(DataFrame, usize, usize, f64)> {
    let spinner = create_spinner(&format!("Reading {}...", path.display()));
    let df = load_dataset(path, infer_schema_length)?.collect()?;
    let (rows, cols) = df.shape();
    let memory_mb = df.estimated_size() as f64 / (1024.0 * 1024.0);
    finish_with_success(&spinner, &format!("Read {} rows", rows));
    Ok((df, rows, cols, memory_mb))
}

/// Convert a loaded frame into passenger records.
///
/// Fails with `DataFormat` when required columns are absent, when a required value is
/// null or not numeric, or when `Survived`/`Pclass` hold out-of-range values.
pub fn records_from_frame(df: &DataFrame) -> Result<Vec<PassengerRecord>> {
    let present: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !present.iter().any(|p| p == col))
        .collect();
    if !missing.is_empty() {
        return Err(AnalysisError::missing_columns(&missing));
    }

    let ids = int_column(df, "PassengerId")?;
    let survived = int_column(df, "Survived")?;
    let pclass = int_column(df, "Pclass")?;
    let sibsp = int_column(df, "SibSp")?;
    let parch = int_column(df, "Parch")?;
    let ages = float_column(df, "Age")?;
    let fares = float_column(df, "Fare")?;
    let names = string_column(df, "Name")?;
    let sexes = string_column(df, "Sex")?;
    let ports = string_column(df, "Embarked")?;

    let mut records = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let survived = match required(&survived, "Survived", row)? {
            0 => false,
            1 => true,
            other => {
                return Err(AnalysisError::DataFormat(format!(
                    "column 'Survived' must be 0 or 1, found {} at row {}",
                    other, row
                )))
            }
        };
        let pclass = match required(&pclass, "Pclass", row)? {
            c @ 1..=3 => c as u8,
            other => {
                return Err(AnalysisError::DataFormat(format!(
                    "column 'Pclass' must be 1, 2 or 3, found {} at row {}",
                    other, row
                )))
            }
        };
        let sex = sexes[row].clone().ok_or_else(|| null_value("Sex", row))?;

        records.push(PassengerRecord {
            passenger_id: required(&ids, "PassengerId", row)?,
            survived,
            pclass,
            sex,
            age: ages[row],
            sibsp: count(required(&sibsp, "SibSp", row)?, "SibSp", row)?,
            parch: count(required(&parch, "Parch", row)?, "Parch", row)?,
            fare: fares[row],
            embarked: ports[row].clone().filter(|p| !p.trim().is_empty()),
            name: names[row].clone().unwrap_or_default(),
        });
    }

    Ok(records)
}

/// Load a passenger file straight into records.
pub fn load_passengers(path: &Path, infer_schema_length: usize) -> Result<Vec<PassengerRecord>> {
    let df = load_dataset(path, infer_schema_length)?.collect()?;
    records_from_frame(&df)
}

// Column helpers

fn int_column(df: &DataFrame, name: &str) -> Result<Vec<Option<i64>>> {
    let cast = numeric_column(df, name, &DataType::Int64)?;
    Ok(cast.i64()?.into_iter().collect())
}

fn float_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let cast = numeric_column(df, name, &DataType::Float64)?;
    Ok(cast.f64()?.into_iter().collect())
}

/// Cast a column, rejecting values the cast turned into nulls
fn numeric_column(df: &DataFrame, name: &str, dtype: &DataType) -> Result<Series> {
    let original = df.column(name)?.as_materialized_series();
    let cast = original
        .cast(dtype)
        .map_err(|_| AnalysisError::DataFormat(format!("column '{}' must be numeric", name)))?;
    if cast.null_count() > original.null_count() {
        let was_null = original.is_null();
        let now_null = cast.is_null();
        let lost = was_null
            .into_iter()
            .zip(now_null.into_iter())
            .position(|(before, after)| before == Some(false) && after == Some(true));
        if let Some(row) = lost {
            return Err(AnalysisError::DataFormat(format!(
                "column '{}' has a non-numeric value {} at row {}",
                name,
                original.get(row)?,
                row
            )));
        }
    }
    Ok(cast)
}

fn string_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let cast = df.column(name)?.cast(&DataType::String)?;
    Ok(cast
        .str()?
        .into_iter()
        .map(|v| v.map(|s| s.to_string()))
        .collect())
}

fn required(values: &[Option<i64>], column: &str, row: usize) -> Result<i64> {
    values[row].ok_or_else(|| null_value(column, row))
}

fn count(value: i64, column: &str, row: usize) -> Result<u32> {
    u32::try_from(value).map_err(|_| {
        AnalysisError::DataFormat(format!(
            "column '{}' must be a non-negative count, found {} at row {}",
            column, value, row
        ))
    })
}

fn null_value(column: &str, row: usize) -> AnalysisError {
    AnalysisError::DataFormat(format!(
        "column '{}' has a null or non-numeric value at row {}",
        column, row
    ))
}
