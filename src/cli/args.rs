//! Command-line argument definitions using clap

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::pipeline::{AnalysisConfig, ForestConfig};

/// File name of the importance chart when no output path is given
pub const DEFAULT_CHART_NAME: &str = "survival-factors-importance.svg";

/// Survival factors - rank what predicted survival in a Titanic passenger list
#[derive(Parser, Debug)]
#[command(name = "survival-factors")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input passenger file (CSV or Parquet)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output SVG path for the importance chart.
    /// Defaults to 'survival-factors-importance.svg' in the input directory.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of factors shown on the importance chart
    #[arg(long, default_value = "8", value_parser = validate_positive)]
    pub top_k: usize,

    /// Number of trees in the random forest
    #[arg(long, default_value = "100", value_parser = validate_positive)]
    pub trees: usize,

    /// Maximum depth of each tree
    #[arg(long, default_value = "10", value_parser = validate_positive)]
    pub max_depth: usize,

    /// Random seed for bootstrap sampling and feature selection
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Also write the full analysis as JSON to this path
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Directory for per-factor survival rate charts (created if missing)
    #[arg(long)]
    pub rate_charts: Option<PathBuf>,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for a full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Overwrite existing output files without asking
    #[arg(long, default_value = "false")]
    pub no_confirm: bool,
}

impl Cli {
    /// Chart path, derived from the input directory if not given
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            let parent = self.input.parent().unwrap_or_else(|| Path::new("."));
            parent.join(DEFAULT_CHART_NAME)
        })
    }

    pub fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig {
            forest: ForestConfig {
                n_trees: self.trees,
                max_depth: self.max_depth,
                seed: self.seed,
                ..ForestConfig::default()
            },
            top_k: self.top_k,
        }
    }
}

/// Validator for counts that must be at least 1
fn validate_positive(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid count", s))?;

    if value == 0 {
        Err("value must be at least 1".to_string())
    } else {
        Ok(value)
    }
}
