//! Missing value filling and feature engineering

use std::collections::BTreeMap;

use serde::Serialize;

use super::error::{AnalysisError, Result};
use super::records::{AgeBucket, EngineeredRecord, FareBucket, PassengerRecord};

/// Titles collapsed into "Rare"
const RARE_TITLES: [&str; 11] = [
    "Lady", "Countess", "Capt", "Col", "Don", "Dr", "Major", "Rev", "Sir", "Jonkheer", "Dona",
];

/// Title used when a name carries no recognizable salutation
pub const UNKNOWN_TITLE: &str = "Unknown";

/// Values used to fill gaps, and how many gaps each one filled
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Imputation {
    pub median_age: f64,
    pub median_fare: f64,
    pub mode_embarked: String,
    pub filled_age: usize,
    pub filled_fare: usize,
    pub filled_embarked: usize,
}

/// Quartile edges (q1, q2, q3) of the fare distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FareQuartiles {
    pub q1: f64,
    pub q2: f64,
    pub q3: f64,
}

impl FareQuartiles {
    /// Compute quartiles by linear interpolation over the given fares.
    pub fn from_fares(fares: &[f64]) -> Option<Self> {
        let mut sorted = fares.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        Some(Self {
            q1: quantile_sorted(&sorted, 0.25)?,
            q2: quantile_sorted(&sorted, 0.5)?,
            q3: quantile_sorted(&sorted, 0.75)?,
        })
    }

    /// Right-closed quartile intervals; the lowest interval includes the minimum.
    pub fn bucket(&self, fare: f64) -> FareBucket {
        if fare <= self.q1 {
            FareBucket::Low
        } else if fare <= self.q2 {
            FareBucket::Medium
        } else if fare <= self.q3 {
            FareBucket::High
        } else {
            FareBucket::VeryHigh
        }
    }
}

/// Prepared records plus the statistics used to build them
#[derive(Debug, Clone)]
pub struct PreparedData {
    pub records: Vec<EngineeredRecord>,
    pub imputation: Imputation,
    pub fare_quartiles: FareQuartiles,
}

/// Fill missing values and derive engineered features.
///
/// Medians and the embarkation mode are computed over the whole record set
/// before any row is filled.
pub fn prepare_records(records: &[PassengerRecord]) -> Result<PreparedData> {
    if records.is_empty() {
        return Err(AnalysisError::EmptyDataset(
            "no passenger records to prepare".to_string(),
        ));
    }

    let ages: Vec<f64> = records.iter().filter_map(|r| r.age).collect();
    let median_age = median(&ages).ok_or_else(|| {
        AnalysisError::EmptyDataset("every age is missing, median undefined".to_string())
    })?;

    let fares: Vec<f64> = records.iter().filter_map(|r| r.fare).collect();
    let median_fare = median(&fares).ok_or_else(|| {
        AnalysisError::EmptyDataset("every fare is missing, median undefined".to_string())
    })?;

    let ports: Vec<&str> = records
        .iter()
        .filter_map(|r| r.embarked.as_deref())
        .collect();
    let mode_embarked = mode(&ports).ok_or_else(|| {
        AnalysisError::EmptyDataset("every embarkation port is missing, mode undefined".to_string())
    })?;

    let imputation = Imputation {
        median_age,
        median_fare,
        filled_age: records.len() - ages.len(),
        filled_fare: records.len() - fares.len(),
        filled_embarked: records.len() - ports.len(),
        mode_embarked,
    };

    let filled_fares: Vec<f64> = records
        .iter()
        .map(|r| r.fare.unwrap_or(median_fare))
        .collect();
    // Non-empty by the check above
    let fare_quartiles = FareQuartiles::from_fares(&filled_fares).ok_or_else(|| {
        AnalysisError::EmptyDataset("no fares to compute quartiles from".to_string())
    })?;

    let engineered = records
        .iter()
        .zip(filled_fares)
        .map(|(r, fare)| {
            let age = r.age.unwrap_or(median_age);
            let family_size = r.sibsp + r.parch + 1;
            EngineeredRecord {
                passenger_id: r.passenger_id,
                survived: r.survived,
                pclass: r.pclass,
                sex: r.sex.clone(),
                age,
                sibsp: r.sibsp,
                parch: r.parch,
                fare,
                embarked: r
                    .embarked
                    .clone()
                    .unwrap_or_else(|| imputation.mode_embarked.clone()),
                name: r.name.clone(),
                family_size,
                is_alone: family_size == 1,
                age_bucket: AgeBucket::from_age(age),
                fare_bucket: fare_quartiles.bucket(fare),
                title: title_from_name(&r.name),
            }
        })
        .collect();

    Ok(PreparedData {
        records: engineered,
        imputation,
        fare_quartiles,
    })
}

/// Extract the salutation from a name: the first run of ASCII letters that follows
/// a space and is immediately followed by a period.
pub fn extract_title(name: &str) -> Option<&str> {
    let bytes = name.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b' ' {
            let start = i + 1;
            let mut end = start;
            while end < bytes.len() && bytes[end].is_ascii_alphabetic() {
                end += 1;
            }
            if end > start && end < bytes.len() && bytes[end] == b'.' {
                return Some(&name[start..end]);
            }
        }
        i += 1;
    }
    None
}

/// Collapse rare titles and merge spelling variants.
pub fn normalize_title(title: &str) -> String {
    if RARE_TITLES.contains(&title) {
        return "Rare".to_string();
    }
    match title {
        "Mlle" | "Ms" => "Miss".to_string(),
        "Mme" => "Mrs".to_string(),
        other => other.to_string(),
    }
}

/// Extracted and normalized title, `Unknown` when the name has none.
pub fn title_from_name(name: &str) -> String {
    extract_title(name)
        .map(normalize_title)
        .unwrap_or_else(|| UNKNOWN_TITLE.to_string())
}

/// Median of the values; the mean of the two middle values for even counts.
pub fn median(values: &[f64]) -> Option<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    quantile_sorted(&sorted, 0.5)
}

/// Most frequent value; ties go to the lexicographically smallest.
pub fn mode(values: &[&str]) -> Option<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for &v in values {
        *counts.entry(v).or_insert(0) += 1;
    }
    // BTreeMap iterates in key order, so keep the first maximum seen
    let mut best: Option<(&str, usize)> = None;
    for (value, n) in counts {
        if best.map_or(true, |(_, b)| n > b) {
            best = Some((value, n));
        }
    }
    best.map(|(v, _)| v.to_string())
}

/// Linear-interpolated quantile of an ascending slice.
fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}
