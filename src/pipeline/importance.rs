//! Model-based feature importance ranking

use serde::{Deserialize, Serialize};

use super::encoder::FeatureEncoder;
use super::error::{AnalysisError, Result};
use super::forest::{ForestConfig, RandomForest};
use super::records::{EngineeredRecord, Feature, FEATURES};

/// Fewer labeled records than this make the forest fit degenerate
pub const MIN_LABELED_RECORDS: usize = 10;

/// A feature with its score (importance or absolute correlation)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureScore {
    pub feature: String,
    pub score: f64,
}

impl FeatureScore {
    pub fn new(feature: impl Into<String>, score: f64) -> Self {
        Self {
            feature: feature.into(),
            score,
        }
    }
}

/// Importance ranking, highest first
pub type ImportanceResult = Vec<FeatureScore>;

/// Sort scores descending. The sort is stable, so ties keep their input order.
pub fn rank_descending(mut scores: Vec<FeatureScore>) -> Vec<FeatureScore> {
    scores.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    scores
}

/// Fit a random forest on the engineered records and rank its importances.
///
/// Uses the full [`FEATURES`] list, encoded through the shared `encoder`.
pub fn estimate_importance(
    records: &[EngineeredRecord],
    encoder: &FeatureEncoder,
    config: &ForestConfig,
) -> Result<ImportanceResult> {
    let (ranking, _) = fit_importance_model(records, encoder, config, &FEATURES)?;
    Ok(ranking)
}

/// Like [`estimate_importance`] but over an explicit feature list, also returning
/// the fitted forest.
pub fn fit_importance_model(
    records: &[EngineeredRecord],
    encoder: &FeatureEncoder,
    config: &ForestConfig,
    features: &[Feature],
) -> Result<(ImportanceResult, RandomForest)> {
    if records.len() < MIN_LABELED_RECORDS {
        return Err(AnalysisError::InsufficientData(format!(
            "{} labeled record(s) available, at least {} required",
            records.len(),
            MIN_LABELED_RECORDS
        )));
    }
    let survivors = records.iter().filter(|r| r.survived).count();
    if survivors == 0 || survivors == records.len() {
        return Err(AnalysisError::InsufficientData(
            "every record has the same outcome, no split can be learned".to_string(),
        ));
    }

    let matrix = encoder.encode_matrix(records, features);
    let labels: Vec<bool> = records.iter().map(|r| r.survived).collect();
    let forest = RandomForest::fit(config.clone(), &matrix, &labels)?;
    if forest.feature_importances().iter().sum::<f64>() <= 0.0 {
        return Err(AnalysisError::InsufficientData(
            "no split reduced impurity".to_string(),
        ));
    }

    let scores = features
        .iter()
        .zip(forest.feature_importances())
        .map(|(f, &imp)| FeatureScore::new(f.name(), imp))
        .collect();

    Ok((rank_descending(scores), forest))
}
