//! End-to-end analysis over loaded passenger records

use serde::{Deserialize, Serialize};

use super::correlation::{survival_correlations, CorrelationResult};
use super::encoder::FeatureEncoder;
use super::error::Result;
use super::forest::ForestConfig;
use super::importance::{estimate_importance, ImportanceResult};
use super::prepare::{prepare_records, FareQuartiles, Imputation, PreparedData};
use super::rates::{standard_group_rates, GroupRateTable};
use super::records::{EngineeredRecord, PassengerRecord};

/// Number of bars on the importance chart unless configured otherwise
pub const DEFAULT_TOP_K: usize = 8;

/// Settings carried through one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub forest: ForestConfig,
    /// Bars shown on the importance chart
    pub top_k: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            forest: ForestConfig::default(),
            top_k: DEFAULT_TOP_K,
        }
    }
}

/// Headline counts of the dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetOverview {
    pub total_passengers: usize,
    pub survivors: usize,
    pub survival_rate: f64,
}

impl DatasetOverview {
    pub fn from_records(records: &[EngineeredRecord]) -> Self {
        let survivors = records.iter().filter(|r| r.survived).count();
        let survival_rate = if records.is_empty() {
            0.0
        } else {
            survivors as f64 / records.len() as f64
        };
        Self {
            total_passengers: records.len(),
            survivors,
            survival_rate,
        }
    }
}

/// Everything one run produces before rendering
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub overview: DatasetOverview,
    pub imputation: Imputation,
    pub fare_quartiles: FareQuartiles,
    pub importance: ImportanceResult,
    pub correlations: CorrelationResult,
    pub group_rates: Vec<GroupRateTable>,
}

impl AnalysisReport {
    /// Assemble a report from the outputs of each stage
    pub fn from_stages(
        prepared: PreparedData,
        importance: ImportanceResult,
        correlations: CorrelationResult,
        group_rates: Vec<GroupRateTable>,
    ) -> Self {
        Self {
            overview: DatasetOverview::from_records(&prepared.records),
            imputation: prepared.imputation,
            fare_quartiles: prepared.fare_quartiles,
            importance,
            correlations,
            group_rates,
        }
    }

    /// Table by group name, e.g. "Gender"
    pub fn group(&self, name: &str) -> Option<&GroupRateTable> {
        self.group_rates.iter().find(|t| t.name == name)
    }
}

/// Stages of one analysis run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisStage {
    Prepare,
    Importance,
    Correlations,
}

impl AnalysisStage {
    pub fn title(self) -> &'static str {
        match self {
            AnalysisStage::Prepare => "Preparing Features",
            AnalysisStage::Importance => "Random Forest Importance",
            AnalysisStage::Correlations => "Correlations & Survival Rates",
        }
    }
}

/// Progress reported by [`run_analysis_with`]
#[derive(Debug, Clone, Copy)]
pub enum StageEvent<'a> {
    Started(AnalysisStage),
    /// Fills and engineered features are ready
    Prepared(&'a PreparedData),
    Scored { features: usize, groups: usize },
    Finished(AnalysisStage),
    Failed(AnalysisStage),
}

/// Prepare the records, fit the shared encoder, and run every estimator in order.
pub fn run_analysis(
    records: &[PassengerRecord],
    config: &AnalysisConfig,
) -> Result<AnalysisReport> {
    run_analysis_with(records, config, |_| {})
}

/// [`run_analysis`] with a callback invoked as each stage starts and ends.
pub fn run_analysis_with<F>(
    records: &[PassengerRecord],
    config: &AnalysisConfig,
    mut on_event: F,
) -> Result<AnalysisReport>
where
    F: FnMut(StageEvent<'_>),
{
    on_event(StageEvent::Started(AnalysisStage::Prepare));
    let prepared = checked(AnalysisStage::Prepare, prepare_records(records), &mut on_event)?;
    let encoder = FeatureEncoder::fit(&prepared.records);
    on_event(StageEvent::Prepared(&prepared));
    on_event(StageEvent::Finished(AnalysisStage::Prepare));

    on_event(StageEvent::Started(AnalysisStage::Importance));
    let importance = checked(
        AnalysisStage::Importance,
        estimate_importance(&prepared.records, &encoder, &config.forest),
        &mut on_event,
    )?;
    on_event(StageEvent::Finished(AnalysisStage::Importance));

    on_event(StageEvent::Started(AnalysisStage::Correlations));
    let correlations = survival_correlations(&prepared.records, &encoder);
    let group_rates = standard_group_rates(&prepared.records);
    on_event(StageEvent::Scored {
        features: correlations.len(),
        groups: group_rates.len(),
    });
    on_event(StageEvent::Finished(AnalysisStage::Correlations));

    Ok(AnalysisReport::from_stages(
        prepared,
        importance,
        correlations,
        group_rates,
    ))
}

fn checked<T, F>(stage: AnalysisStage, result: Result<T>, on_event: &mut F) -> Result<T>
where
    F: FnMut(StageEvent<'_>),
{
    if result.is_err() {
        on_event(StageEvent::Failed(stage));
    }
    result
}
