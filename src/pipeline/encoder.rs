//! Categorical feature encoding
//!
//! Encoders are fitted once from the engineered records and then shared by the
//! importance and correlation stages, so both see identical codes.

use std::collections::{BTreeSet, HashMap};

use super::records::{EngineeredRecord, Feature};

/// Maps the distinct values of one categorical column to integer codes.
///
/// Codes are the position of the value in the sorted set of values seen at fit
/// time.
#[derive(Debug, Clone, Default)]
pub struct LabelEncoder {
    classes: Vec<String>,
    codes: HashMap<String, usize>,
}

impl LabelEncoder {
    /// Fit an encoder on the given values.
    pub fn fit<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let distinct: BTreeSet<&str> = values.into_iter().collect();
        let classes: Vec<String> = distinct.into_iter().map(|s| s.to_string()).collect();
        let codes = classes
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();
        Self { classes, codes }
    }

    /// Code for a value, `None` if it was not seen when fitting.
    pub fn encode(&self, value: &str) -> Option<usize> {
        self.codes.get(value).copied()
    }

    /// Known values in code order
    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}

/// One fitted [`LabelEncoder`] per categorical feature.
#[derive(Debug, Clone, Default)]
pub struct FeatureEncoder {
    encoders: HashMap<Feature, LabelEncoder>,
}

impl FeatureEncoder {
    /// Fit encoders for every categorical feature over the records.
    pub fn fit(records: &[EngineeredRecord]) -> Self {
        let encoders = super::records::FEATURES
            .iter()
            .copied()
            .filter(|f| f.is_categorical())
            .map(|feature| {
                let encoder =
                    LabelEncoder::fit(records.iter().filter_map(|r| feature.category_value(r)));
                (feature, encoder)
            })
            .collect();
        Self { encoders }
    }

    /// Numeric value of a feature for one record.
    ///
    /// Numeric features pass through; categorical ones become their code. A value
    /// unseen at fit time encodes to `-1`.
    pub fn value(&self, feature: Feature, record: &EngineeredRecord) -> f64 {
        if let Some(v) = feature.numeric_value(record) {
            return v;
        }
        feature
            .category_value(record)
            .and_then(|value| self.encoders.get(&feature)?.encode(value))
            .map(|code| code as f64)
            .unwrap_or(-1.0)
    }

    /// Row-major feature matrix for the given column order.
    pub fn encode_matrix(
        &self,
        records: &[EngineeredRecord],
        features: &[Feature],
    ) -> Vec<Vec<f64>> {
        records
            .iter()
            .map(|r| features.iter().map(|&f| self.value(f, r)).collect())
            .collect()
    }

    /// One encoded column.
    pub fn encode_column(&self, records: &[EngineeredRecord], feature: Feature) -> Vec<f64> {
        records.iter().map(|r| self.value(feature, r)).collect()
    }
}
