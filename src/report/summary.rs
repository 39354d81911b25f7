//! Console summary of an analysis run

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::{display_name, AnalysisReport, DatasetOverview, FeatureScore, GroupRateTable};

/// Entries shown in the importance and correlation tables
pub const SUMMARY_TOP_N: usize = 5;

/// Survival rates of the two sexes, present when the top factor is `Sex`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenderGap {
    pub female_rate: f64,
    pub male_rate: f64,
}

impl GenderGap {
    pub fn gap(&self) -> f64 {
        self.female_rate - self.male_rate
    }
}

/// Headline results: the three strongest factors and, when sex leads, the gap
#[derive(Debug, Clone, PartialEq)]
pub struct KeyFindings {
    pub top_factors: Vec<FeatureScore>,
    pub gender_gap: Option<GenderGap>,
}

impl KeyFindings {
    pub fn from_report(report: &AnalysisReport) -> Self {
        let top_factors: Vec<FeatureScore> = report.importance.iter().take(3).cloned().collect();

        let gender_gap = match top_factors.first() {
            Some(top) if top.feature == "Sex" => report.group("Gender").and_then(|table| {
                Some(GenderGap {
                    female_rate: table.rate("female")?,
                    male_rate: table.rate("male")?,
                })
            }),
            _ => None,
        };

        Self {
            top_factors,
            gender_gap,
        }
    }
}

fn section_header(icon: &str, title: &str) {
    println!();
    println!("    {} {}", style(icon).cyan(), style(title).white().bold());
    println!("    {}", style("─".repeat(50)).dim());
    println!();
}

fn print_indented(table: &Table) {
    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}

fn rate_color(rate: f64) -> Color {
    if rate >= 0.5 {
        Color::Green
    } else if rate >= 0.3 {
        Color::Yellow
    } else {
        Color::Red
    }
}

pub fn print_overview(overview: &DatasetOverview) {
    section_header("📋", "DATASET OVERVIEW");

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Metric").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("👥 Total passengers"),
        Cell::new(overview.total_passengers),
    ]);
    table.add_row(vec![
        Cell::new("🛟 Survivors"),
        Cell::new(overview.survivors).fg(Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("📈 Survival rate"),
        Cell::new(format!("{:.1}%", overview.survival_rate * 100.0))
            .fg(rate_color(overview.survival_rate))
            .add_attribute(Attribute::Bold),
    ]);

    print_indented(&table);
}

/// Ranked scores, at most [`SUMMARY_TOP_N`] rows
pub fn print_ranking(title: &str, score_header: &str, ranking: &[FeatureScore]) {
    section_header("📊", title);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Feature").add_attribute(Attribute::Bold),
        Cell::new(score_header).add_attribute(Attribute::Bold),
    ]);

    for (i, entry) in ranking.iter().take(SUMMARY_TOP_N).enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(display_name(&entry.feature)),
            Cell::new(format!("{:.4}", entry.score)).fg(Color::Cyan),
        ]);
    }

    print_indented(&table);
}

pub fn print_group_rates(tables: &[GroupRateTable]) {
    section_header("🧮", "SURVIVAL RATES BY KEY FACTORS");

    for group in tables {
        println!("      {}", style(&group.name).yellow());

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Category").add_attribute(Attribute::Bold),
            Cell::new("Passengers").add_attribute(Attribute::Bold),
            Cell::new("Survived").add_attribute(Attribute::Bold),
            Cell::new("Rate").add_attribute(Attribute::Bold),
        ]);
        for rate in &group.rates {
            table.add_row(vec![
                Cell::new(&rate.label),
                Cell::new(rate.count),
                Cell::new(rate.survivors),
                Cell::new(format!("{:.1}%", rate.rate * 100.0)).fg(rate_color(rate.rate)),
            ]);
        }
        print_indented(&table);
        println!();
    }
}

pub fn print_key_findings(findings: &KeyFindings) {
    section_header("🎯", "KEY FINDINGS");

    let medals = [
        ("🥇", "MOST IMPORTANT FACTOR"),
        ("🥈", "SECOND MOST IMPORTANT"),
        ("🥉", "THIRD MOST IMPORTANT"),
    ];

    for (i, (factor, (medal, heading))) in findings.top_factors.iter().zip(medals).enumerate() {
        if i > 0 {
            println!();
        }
        println!(
            "    {} {}: {}",
            medal,
            style(heading).white().bold(),
            style(display_name(&factor.feature)).cyan().bold()
        );
        println!("       Importance score: {:.3}", factor.score);

        if i == 0 {
            if let Some(gap) = &findings.gender_gap {
                println!("       Female survival: {:.1}%", gap.female_rate * 100.0);
                println!("       Male survival:   {:.1}%", gap.male_rate * 100.0);
                println!(
                    "       Gender gap:      {}",
                    style(format!("{:.1}%", gap.gap() * 100.0)).yellow().bold()
                );
            }
        }
    }
}

/// Print every console section of a finished report
pub fn print_report(report: &AnalysisReport) {
    print_overview(&report.overview);
    print_ranking("FEATURE IMPORTANCE", "Importance", &report.importance);
    print_ranking("CORRELATION WITH SURVIVAL", "|r|", &report.correlations);
    print_group_rates(&report.group_rates);
    print_key_findings(&KeyFindings::from_report(report));
}
