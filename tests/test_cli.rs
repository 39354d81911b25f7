//! Tests for CLI argument parsing

use clap::Parser;
use std::path::PathBuf;
use survival_factors::cli::{Cli, DEFAULT_CHART_NAME};

#[test]
fn test_cli_default_values() {
    let cli = Cli::parse_from(["survival-factors", "-i", "data/train.csv"]);

    assert_eq!(cli.top_k, 8, "Default top-k should be 8");
    assert_eq!(cli.trees, 100, "Default tree count should be 100");
    assert_eq!(cli.max_depth, 10, "Default max depth should be 10");
    assert_eq!(cli.seed, 42, "Default seed should be 42");
    assert_eq!(cli.infer_schema_length, 10000);
    assert!(cli.json.is_none());
    assert!(cli.rate_charts.is_none());
    assert!(!cli.no_confirm, "Default no_confirm should be false");
    assert_eq!(
        cli.output_path(),
        PathBuf::from("data").join(DEFAULT_CHART_NAME)
    );
}

#[test]
fn test_cli_custom_values() {
    let cli = Cli::parse_from([
        "survival-factors",
        "-i",
        "train.parquet",
        "-o",
        "out/chart.svg",
        "--top-k",
        "5",
        "--trees",
        "20",
        "--max-depth",
        "4",
        "--seed",
        "7",
        "--json",
        "out/analysis.json",
        "--rate-charts",
        "out/rates",
        "--no-confirm",
    ]);

    assert_eq!(cli.output_path(), PathBuf::from("out/chart.svg"));
    assert_eq!(cli.json, Some(PathBuf::from("out/analysis.json")));
    assert_eq!(cli.rate_charts, Some(PathBuf::from("out/rates")));
    assert!(cli.no_confirm);

    let config = cli.analysis_config();
    assert_eq!(config.top_k, 5);
    assert_eq!(config.forest.n_trees, 20);
    assert_eq!(config.forest.max_depth, 4);
    assert_eq!(config.forest.seed, 7);
    assert!(config.forest.bootstrap);
}

#[test]
fn test_cli_rejects_zero_top_k() {
    let result = Cli::try_parse_from(["survival-factors", "-i", "train.csv", "--top-k", "0"]);
    assert!(result.is_err());
}

#[test]
fn test_cli_rejects_zero_trees() {
    let result = Cli::try_parse_from(["survival-factors", "-i", "train.csv", "--trees", "0"]);
    assert!(result.is_err());
}

#[test]
fn test_cli_requires_input() {
    let result = Cli::try_parse_from(["survival-factors"]);
    assert!(result.is_err());
}
