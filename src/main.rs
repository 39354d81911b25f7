//! Survival factors CLI
//!
//! Ranks the passenger attributes that predicted Titanic survival and renders
//! the ranking as an SVG chart.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::ProgressBar;

use survival_factors::cli::{confirm_overwrite, Cli};
use survival_factors::pipeline::{
    load_dataset_with_progress, records_from_frame, run_analysis_with, AnalysisStage,
    GroupRateTable, StageEvent,
};
use survival_factors::report::{
    export_analysis, print_report, render_importance_chart, render_rate_chart, ChartDocument,
};
use survival_factors::utils::{
    create_spinner, finish_with_error, finish_with_success, print_banner, print_completion,
    print_config, print_info, print_step_header, print_step_time, print_success,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output_path = cli.output_path();
    let config = cli.analysis_config();

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(&cli.input, &output_path, &config);

    // Step 1: load
    print_step_header(1, "Loading Dataset");
    let step_start = Instant::now();
    let (df, rows, cols, memory_mb) =
        load_dataset_with_progress(&cli.input, cli.infer_schema_length)
            .with_context(|| format!("Failed to load {}", cli.input.display()))?;
    let passengers = records_from_frame(&df)?;
    drop(df);
    print_info(&format!("{} rows x {} columns ({:.1} MB)", rows, cols, memory_mb));
    print_step_time(step_start.elapsed());

    // Steps 2-4: prepare, forest importance, correlations and group rates
    let mut step_start = Instant::now();
    let mut spinner: Option<ProgressBar> = None;
    let report = run_analysis_with(&passengers, &config, |event| match event {
        StageEvent::Started(stage) => {
            print_step_header(step_number(stage), stage.title());
            step_start = Instant::now();
            if stage == AnalysisStage::Importance {
                let message = format!("Fitting {} trees...", config.forest.n_trees);
                spinner = Some(create_spinner(&message));
            }
        }
        StageEvent::Prepared(prepared) => {
            let imputation = &prepared.imputation;
            print_info(&format!(
                "Filled {} ages with median {:.1}, {} fares with median {:.2}, {} ports with '{}'",
                imputation.filled_age,
                imputation.median_age,
                imputation.filled_fare,
                imputation.median_fare,
                imputation.filled_embarked,
                imputation.mode_embarked
            ));
            print_success(&format!("Prepared {} passengers", prepared.records.len()));
        }
        StageEvent::Scored { features, groups } => {
            print_success(&format!("Scored {} features, {} grouping factors", features, groups));
        }
        StageEvent::Finished(_) => {
            if let Some(spinner) = spinner.take() {
                finish_with_success(&spinner, "Forest fitted");
            }
            print_step_time(step_start.elapsed());
        }
        StageEvent::Failed(_) => {
            if let Some(spinner) = spinner.take() {
                finish_with_error(&spinner, "Forest fitting failed");
            }
        }
    })?;
    print_report(&report);

    // Step 5: render and write outputs
    print_step_header(5, "Writing Outputs");
    let step_start = Instant::now();
    let chart = render_importance_chart(&report.importance, config.top_k)?;
    let rate_charts = match &cli.rate_charts {
        Some(dir) => render_rate_charts(&report.group_rates, dir)?,
        None => Vec::new(),
    };

    if write_chart(&chart, &output_path, cli.no_confirm)? {
        print_success(&format!("Chart saved to {}", output_path.display()));
    } else {
        print_info(&format!("Kept existing {}", output_path.display()));
    }

    if let Some(dir) = &cli.rate_charts {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        let mut written = 0;
        for (path, rate_chart) in &rate_charts {
            if write_chart(rate_chart, path, cli.no_confirm)? {
                written += 1;
            }
        }
        print_success(&format!("{} rate charts saved to {}", written, dir.display()));
    }

    if let Some(json_path) = &cli.json {
        if cli.no_confirm || confirm_overwrite(json_path)? {
            export_analysis(
                &report,
                &config,
                &cli.input.display().to_string(),
                json_path,
            )?;
            print_success(&format!("Analysis exported to {}", json_path.display()));
        }
    }
    print_step_time(step_start.elapsed());

    print_completion(&output_path);
    Ok(())
}

/// Analysis stages run as steps 2 to 4, after loading
fn step_number(stage: AnalysisStage) -> u8 {
    match stage {
        AnalysisStage::Prepare => 2,
        AnalysisStage::Importance => 3,
        AnalysisStage::Correlations => 4,
    }
}

/// Write a chart unless the user declines to replace an existing file.
/// Returns whether the file was written.
fn write_chart(chart: &ChartDocument, path: &Path, no_confirm: bool) -> Result<bool> {
    if !no_confirm && !confirm_overwrite(path)? {
        return Ok(false);
    }
    chart
        .write_to(path)
        .with_context(|| format!("Failed to write chart to {}", path.display()))?;
    Ok(true)
}

/// Render every non-empty rate table, paired with its target path in `dir`
fn render_rate_charts(
    tables: &[GroupRateTable],
    dir: &Path,
) -> Result<Vec<(PathBuf, ChartDocument)>> {
    tables
        .iter()
        .filter(|t| !t.is_empty())
        .map(|table| Ok((rate_chart_path(dir, &table.name), render_rate_chart(table)?)))
        .collect()
}

/// "Port of Embarkation" -> DIR/survival-rate-port-of-embarkation.svg
fn rate_chart_path(dir: &Path, group_name: &str) -> PathBuf {
    let slug = group_name
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");
    dir.join(format!("survival-rate-{}.svg", slug))
}
