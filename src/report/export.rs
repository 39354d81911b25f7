//! JSON export of an analysis run

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{
    display_name, AnalysisConfig, AnalysisReport, DatasetOverview, FareQuartiles, FeatureScore,
    GroupRateTable, Imputation,
};

/// Metadata about the analysis run
#[derive(Serialize)]
pub struct ExportMetadata {
    /// Timestamp of the analysis (RFC 3339)
    pub timestamp: String,
    pub tool_version: String,
    pub input_file: String,
    pub n_trees: usize,
    pub max_depth: usize,
    pub seed: u64,
    pub top_k: usize,
}

/// One ranked feature with its display name
#[derive(Serialize)]
pub struct RankedFeature {
    pub rank: usize,
    pub feature: String,
    pub display_name: String,
    pub score: f64,
}

/// Complete export document
#[derive(Serialize)]
pub struct AnalysisExport<'a> {
    pub metadata: ExportMetadata,
    pub overview: &'a DatasetOverview,
    pub imputation: &'a Imputation,
    pub fare_quartiles: &'a FareQuartiles,
    pub importance: Vec<RankedFeature>,
    pub correlations: Vec<RankedFeature>,
    pub group_rates: &'a [GroupRateTable],
}

fn ranked(scores: &[FeatureScore]) -> Vec<RankedFeature> {
    scores
        .iter()
        .enumerate()
        .map(|(i, s)| RankedFeature {
            rank: i + 1,
            feature: s.feature.clone(),
            display_name: display_name(&s.feature).to_string(),
            score: s.score,
        })
        .collect()
}

impl<'a> AnalysisExport<'a> {
    pub fn new(report: &'a AnalysisReport, config: &AnalysisConfig, input_file: &str) -> Self {
        Self {
            metadata: ExportMetadata {
                timestamp: Utc::now().to_rfc3339(),
                tool_version: env!("CARGO_PKG_VERSION").to_string(),
                input_file: input_file.to_string(),
                n_trees: config.forest.n_trees,
                max_depth: config.forest.max_depth,
                seed: config.forest.seed,
                top_k: config.top_k,
            },
            overview: &report.overview,
            imputation: &report.imputation,
            fare_quartiles: &report.fare_quartiles,
            importance: ranked(&report.importance),
            correlations: ranked(&report.correlations),
            group_rates: &report.group_rates,
        }
    }
}

/// Write the report as pretty-printed JSON to `output_path`
pub fn export_analysis(
    report: &AnalysisReport,
    config: &AnalysisConfig,
    input_file: &str,
    output_path: &Path,
) -> Result<()> {
    let export = AnalysisExport::new(report, config, input_file);

    let json = serde_json::to_string_pretty(&export)
        .context("Failed to serialize analysis to JSON")?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write analysis to {}", output_path.display()))?;

    Ok(())
}
