//! Error types for the survival analysis pipeline.
//!
//! Every stage returns [`AnalysisError`]. None of them are recoverable within a run:
//! the binary reports the error and exits without writing any output.

use thiserror::Error;

/// Errors raised while loading, preparing, estimating or rendering.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Required columns are absent or hold values of the wrong shape.
    #[error("data format error: {0}")]
    DataFormat(String),

    /// No records to compute statistics from (median/mode undefined).
    #[error("dataset is empty: {0}")]
    EmptyDataset(String),

    /// Too few labeled records (or a single outcome class) for a stable model fit.
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    /// Attempted to render an empty ranking.
    #[error("cannot render an empty result")]
    EmptyResult,

    #[error(transparent)]
    Polars(#[from] polars::prelude::PolarsError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AnalysisError {
    /// Build a `DataFormat` error listing the missing columns.
    pub fn missing_columns(columns: &[&str]) -> Self {
        Self::DataFormat(format!(
            "missing required column(s): {}",
            columns.join(", ")
        ))
    }
}

/// Result alias used throughout the pipeline.
pub type Result<T> = std::result::Result<T, AnalysisError>;
