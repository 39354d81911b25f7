//! SVG charts for the importance ranking and the group survival rates
//!
//! Geometry is computed first ([`layout_bars`], [`layout_rate_bars`]) and then
//! turned into an [`SvgNode`] tree, so layout can be checked without parsing text.

use serde::Serialize;

use super::svg::{fmt_num, ChartDocument, SvgNode};
use crate::pipeline::{display_name, AnalysisError, FeatureScore, GroupRateTable, Result};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Margins around the plotting area
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Canvas size and margins of a chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
}

impl ChartLayout {
    /// 700x500 canvas of the importance chart
    pub const IMPORTANCE: ChartLayout = ChartLayout {
        width: 700.0,
        height: 500.0,
        margin: Margin {
            top: 60.0,
            right: 40.0,
            bottom: 80.0,
            left: 120.0,
        },
    };

    /// 600x400 canvas of the survival rate charts
    pub const RATES: ChartLayout = ChartLayout {
        width: 600.0,
        height: 400.0,
        margin: Margin {
            top: 50.0,
            right: 30.0,
            bottom: 60.0,
            left: 60.0,
        },
    };

    pub fn chart_width(&self) -> f64 {
        self.width - self.margin.left - self.margin.right
    }

    pub fn chart_height(&self) -> f64 {
        self.height - self.margin.top - self.margin.bottom
    }
}

/// Horizontal room kept right of the longest bar for its value label
const VALUE_LABEL_ROOM: f64 = 100.0;
/// Vertical padding split above and below the bar stack
const BAR_STACK_PADDING: f64 = 20.0;
/// Gap between consecutive bars
const BAR_GAP: f64 = 5.0;

/// Gradient fills, cycled by bar index
const GRADIENTS: [(&str, &str); 3] = [
    ("#e74c3c", "#c0392b"),
    ("#3498db", "#2980b9"),
    ("#2ecc71", "#27ae60"),
];

/// Solid fills of the rate charts, cycled by bar index
const RATE_COLORS: [&str; 6] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b",
];

const IMPORTANCE_STYLE: &str = "
.chart-title { font-family: Arial, sans-serif; font-size: 20px; font-weight: bold; text-anchor: middle; fill: #2c3e50; }
.axis-label { font-family: Arial, sans-serif; font-size: 14px; text-anchor: middle; fill: #34495e; }
.bar-label { font-family: Arial, sans-serif; font-size: 11px; text-anchor: end; fill: #2c3e50; }
.importance-label { font-family: Arial, sans-serif; font-size: 10px; text-anchor: start; font-weight: bold; }
";

const RATE_STYLE: &str = "
.title { font-family: Arial, sans-serif; font-size: 18px; font-weight: bold; text-anchor: middle; }
.axis-label { font-family: Arial, sans-serif; font-size: 14px; text-anchor: middle; }
.bar-label { font-family: Arial, sans-serif; font-size: 12px; font-weight: bold; text-anchor: middle; }
.tick-label { font-family: Arial, sans-serif; font-size: 11px; text-anchor: middle; }
.y-tick-label { font-family: Arial, sans-serif; font-size: 11px; text-anchor: end; }
";

/// Position and labels of one importance bar, relative to the plotting area
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarGeometry {
    pub feature: String,
    pub display_name: String,
    pub score: f64,
    /// Score as a percentage of the largest displayed score
    pub percent_of_max: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Baseline of the name and value labels
    pub label_y: f64,
    /// Gradient number, 1 to 3
    pub fill: usize,
}

/// Lay out the first `top_k` entries of a ranking as horizontal bars.
///
/// The available height is split evenly between the displayed bars and the top
/// bar spans the whole available width.
pub fn layout_bars(ranking: &[FeatureScore], top_k: usize) -> Result<Vec<BarGeometry>> {
    let shown = &ranking[..ranking.len().min(top_k)];
    if shown.is_empty() {
        return Err(AnalysisError::EmptyResult);
    }

    let layout = ChartLayout::IMPORTANCE;
    let available_width = layout.chart_width() - VALUE_LABEL_ROOM;
    let slot = (layout.chart_height() - BAR_STACK_PADDING) / shown.len() as f64;
    let max_score = shown.iter().map(|s| s.score).fold(0.0, f64::max);

    Ok(shown
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let ratio = if max_score > 0.0 {
                entry.score / max_score
            } else {
                0.0
            };
            let y = i as f64 * slot + BAR_STACK_PADDING / 2.0;
            BarGeometry {
                feature: entry.feature.clone(),
                display_name: display_name(&entry.feature).to_string(),
                score: entry.score,
                percent_of_max: ratio * 100.0,
                x: 0.0,
                y,
                width: ratio * available_width,
                height: slot - BAR_GAP,
                label_y: y + slot / 2.0 + 3.0,
                fill: i % GRADIENTS.len() + 1,
            }
        })
        .collect())
}

/// Render the top `top_k` factors of an importance ranking.
///
/// Output depends only on the ranking and `top_k`.
pub fn render_importance_chart(ranking: &[FeatureScore], top_k: usize) -> Result<ChartDocument> {
    let bars = layout_bars(ranking, top_k)?;
    let layout = ChartLayout::IMPORTANCE;
    let chart_width = layout.chart_width();
    let chart_height = layout.chart_height();

    let gradients = GRADIENTS.iter().enumerate().map(|(i, (from, to))| {
        SvgNode::new("linearGradient")
            .attr("id", format!("barGradient{}", i + 1))
            .attr("x1", "0%")
            .attr("y1", "0%")
            .attr("x2", "100%")
            .attr("y2", "0%")
            .child(
                SvgNode::new("stop")
                    .attr("offset", "0%")
                    .attr("style", format!("stop-color:{};stop-opacity:0.8", from)),
            )
            .child(
                SvgNode::new("stop")
                    .attr("offset", "100%")
                    .attr("style", format!("stop-color:{};stop-opacity:1", to)),
            )
    });
    let defs = SvgNode::new("defs")
        .child(SvgNode::new("style").text(IMPORTANCE_STYLE.trim()))
        .children(gradients);

    let bar_nodes = bars.iter().map(|bar| {
        SvgNode::new("g")
            .attr("class", "bar")
            .child(
                SvgNode::new("rect")
                    .num("x", bar.x)
                    .num("y", bar.y)
                    .num("width", bar.width)
                    .num("height", bar.height)
                    .attr("fill", format!("url(#barGradient{})", bar.fill))
                    .attr("stroke", "#2c3e50")
                    .attr("stroke-width", "0.5")
                    .attr("rx", "2"),
            )
            .child(
                SvgNode::new("text")
                    .attr("x", "-5")
                    .num("y", bar.label_y)
                    .attr("class", "bar-label")
                    .text(bar.display_name.clone()),
            )
            .child(
                SvgNode::new("text")
                    .num("x", bar.width + 5.0)
                    .num("y", bar.label_y)
                    .attr("class", "importance-label")
                    .attr("fill", "#2c3e50")
                    .text(format!("{:.3} ({:.1}%)", bar.score, bar.percent_of_max)),
            )
    });

    let plot = SvgNode::new("g")
        .attr(
            "transform",
            format!(
                "translate({},{})",
                fmt_num(layout.margin.left),
                fmt_num(layout.margin.top)
            ),
        )
        .child(
            SvgNode::new("text")
                .num("x", chart_width / 2.0)
                .attr("y", "-20")
                .attr("class", "chart-title")
                .text("Most Important Factors Affecting Titanic Survival"),
        )
        .children(bar_nodes)
        .child(axis_line(-2.0, 0.0, -2.0, chart_height, "#bdc3c7", "1"))
        .child(axis_line(0.0, chart_height, chart_width, chart_height, "#bdc3c7", "1"))
        .child(
            SvgNode::new("text")
                .num("x", chart_width / 2.0)
                .num("y", chart_height + 35.0)
                .attr("class", "axis-label")
                .text("Feature Importance Score"),
        )
        .child(
            SvgNode::new("text")
                .num("x", chart_width / 2.0)
                .attr("y", "-2")
                .attr("class", "axis-label")
                .attr("font-size", "12px")
                .attr("fill", "#7f8c8d")
                .text("Based on Random Forest Machine Learning Analysis"),
        );

    Ok(ChartDocument::from_root(&svg_root(&layout).child(defs).child(plot)))
}

/// Position of one vertical survival-rate bar, relative to the plotting area
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateBarGeometry {
    pub label: String,
    pub rate: f64,
    pub count: usize,
    pub survivors: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Horizontal center of the bar's slot
    pub center_x: f64,
    pub color: &'static str,
}

/// Lay out a rate table as vertical bars; a rate of 1 fills the full height.
pub fn layout_rate_bars(table: &GroupRateTable) -> Result<Vec<RateBarGeometry>> {
    if table.is_empty() {
        return Err(AnalysisError::EmptyResult);
    }

    let layout = ChartLayout::RATES;
    let chart_width = layout.chart_width();
    let chart_height = layout.chart_height();
    let slot = chart_width / table.rates.len() as f64;
    let padding = slot * 0.15;

    Ok(table
        .rates
        .iter()
        .enumerate()
        .map(|(i, rate)| {
            let height = rate.rate.clamp(0.0, 1.0) * chart_height;
            RateBarGeometry {
                label: rate.label.clone(),
                rate: rate.rate,
                count: rate.count,
                survivors: rate.survivors,
                x: i as f64 * slot + padding,
                y: chart_height - height,
                width: slot - 2.0 * padding,
                height,
                center_x: i as f64 * slot + slot / 2.0,
                color: RATE_COLORS[i % RATE_COLORS.len()],
            }
        })
        .collect())
}

/// Render a survival rate table as a vertical bar chart.
pub fn render_rate_chart(table: &GroupRateTable) -> Result<ChartDocument> {
    let bars = layout_rate_bars(table)?;
    let layout = ChartLayout::RATES;
    let chart_width = layout.chart_width();
    let chart_height = layout.chart_height();

    let bar_nodes = bars.iter().map(|bar| {
        SvgNode::new("g")
            .attr("class", "bar")
            .child(
                SvgNode::new("rect")
                    .num("x", bar.x)
                    .num("y", bar.y)
                    .num("width", bar.width)
                    .num("height", bar.height)
                    .attr("fill", bar.color)
                    .attr("stroke", "#333")
                    .attr("stroke-width", "1"),
            )
            .child(
                SvgNode::new("text")
                    .num("x", bar.center_x)
                    .num("y", bar.y - 5.0)
                    .attr("class", "bar-label")
                    .text(format!("{:.1}%", bar.rate * 100.0)),
            )
            .child(
                SvgNode::new("text")
                    .num("x", bar.center_x)
                    .num("y", chart_height + 25.0)
                    .attr("class", "tick-label")
                    .text(bar.label.clone()),
            )
            .child(
                SvgNode::new("text")
                    .num("x", bar.center_x)
                    .num("y", chart_height + 40.0)
                    .attr("class", "tick-label")
                    .attr("font-size", "10px")
                    .text(format!("{}/{} survived", bar.survivors, bar.count)),
            )
    });

    let ticks = (0..=5).map(|step| {
        let percent = f64::from(step * 20);
        let y = chart_height - percent / 100.0 * chart_height;
        SvgNode::new("g")
            .attr("class", "tick")
            .child(axis_line(-5.0, y, 0.0, y, "#333", "1"))
            .child(
                SvgNode::new("text")
                    .attr("x", "-10")
                    .num("y", y + 4.0)
                    .attr("class", "y-tick-label")
                    .text(format!("{}%", percent)),
            )
    });

    let plot = SvgNode::new("g")
        .attr(
            "transform",
            format!(
                "translate({},{})",
                fmt_num(layout.margin.left),
                fmt_num(layout.margin.top)
            ),
        )
        .child(
            SvgNode::new("text")
                .num("x", chart_width / 2.0)
                .attr("y", "-20")
                .attr("class", "title")
                .text(format!("Survival Rate by {}", table.name)),
        )
        .children(bar_nodes)
        .child(axis_line(0.0, 0.0, 0.0, chart_height, "#333", "2"))
        .child(axis_line(0.0, chart_height, chart_width, chart_height, "#333", "2"))
        .children(ticks)
        .child(
            SvgNode::new("text")
                .attr("transform", "rotate(-90)")
                .num("x", -chart_height / 2.0)
                .attr("y", "-35")
                .attr("class", "axis-label")
                .text("Survival Rate"),
        )
        .child(
            SvgNode::new("text")
                .num("x", chart_width / 2.0)
                .num("y", chart_height + 55.0)
                .attr("class", "axis-label")
                .text(table.name.clone()),
        );

    let defs = SvgNode::new("defs").child(SvgNode::new("style").text(RATE_STYLE.trim()));
    Ok(ChartDocument::from_root(&svg_root(&layout).child(defs).child(plot)))
}

fn svg_root(layout: &ChartLayout) -> SvgNode {
    SvgNode::new("svg")
        .num("width", layout.width)
        .num("height", layout.height)
        .attr("xmlns", SVG_NS)
        .attr(
            "viewBox",
            format!("0 0 {} {}", fmt_num(layout.width), fmt_num(layout.height)),
        )
}

fn axis_line(x1: f64, y1: f64, x2: f64, y2: f64, stroke: &str, width: &str) -> SvgNode {
    SvgNode::new("line")
        .num("x1", x1)
        .num("y1", y1)
        .num("x2", x2)
        .num("y2", y2)
        .attr("stroke", stroke)
        .attr("stroke-width", width)
}
