//! Terminal rendering of the trend chart and the capacity funnel

use crate::output::{format_percentage, OutputFormatter};
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table};
use fleet_core::{FunnelStage, TrendChart, TrendMetric};

/// Unicode block characters for sparklines, lowest first
const SPARK_CHARS: &[char] = &[
    '\u{2581}', '\u{2582}', '\u{2583}', '\u{2584}', '\u{2585}', '\u{2586}', '\u{2587}', '\u{2588}',
];

/// Width of the funnel bar at 100%
const FUNNEL_WIDTH: usize = 30;

/// Render `values` as a sparkline on the fixed `[y_min, y_max]` axis
///
/// Values outside the axis are clamped to the first or last block.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn sparkline(values: &[f64], y_min: f64, y_max: f64) -> String {
    let span = y_max - y_min;
    if span <= 0.0 {
        return String::new();
    }

    let top = (SPARK_CHARS.len() - 1) as f64;
    values
        .iter()
        .map(|&v| {
            let normalized = ((v - y_min) / span).clamp(0.0, 1.0);
            SPARK_CHARS[(normalized * top).round() as usize]
        })
        .collect()
}

/// Horizontal bar proportional to `value / max`
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn bar(value: u64, max: u64, width: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let ratio = (value as f64 / max as f64).min(1.0);
    "█".repeat((ratio * width as f64).round() as usize)
}

fn series_color(metric: TrendMetric) -> Color {
    match metric {
        TrendMetric::Activation => Color::DarkYellow,
        TrendMetric::Availability => Color::Green,
        TrendMetric::Scheduling => Color::Blue,
        TrendMetric::Utilization => Color::Magenta,
    }
}

fn optional_percentage(value: Option<f64>) -> String {
    value.map(format_percentage).unwrap_or_else(|| "-".to_string())
}

/// Table with one sparkline row per series
pub fn trend_table(formatter: &OutputFormatter, chart: &TrendChart) -> Table {
    let mut table = formatter.new_table();

    let range = match (chart.labels.first(), chart.labels.last()) {
        (Some(first), Some(last)) => format!("{} → {}", first, last),
        _ => "Trend".to_string(),
    };
    table.set_header(
        ["Series", range.as_str(), "Min", "Max", "Latest"]
            .iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold).fg(Color::Cyan)),
    );

    for series in &chart.series {
        let color = series_color(series.metric);
        table.add_row(vec![
            Cell::new(series.name).fg(color),
            Cell::new(sparkline(&series.values, chart.y_min, chart.y_max)).fg(color),
            Cell::new(optional_percentage(series.min())).set_alignment(CellAlignment::Right),
            Cell::new(optional_percentage(series.max())).set_alignment(CellAlignment::Right),
            Cell::new(optional_percentage(series.latest()))
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Bold),
        ]);
    }
    table
}

/// Text listing of the trend chart, one line per series
pub fn trend_lines(chart: &TrendChart) -> Vec<String> {
    chart
        .series
        .iter()
        .map(|series| {
            let values: Vec<String> = series.values.iter().map(|v| format!("{}", v)).collect();
            format!(
                "{}: {} [{}]",
                series.name,
                sparkline(&series.values, chart.y_min, chart.y_max),
                values.join(", ")
            )
        })
        .collect()
}

/// Table of funnel stages with bars relative to the first stage
pub fn funnel_table(formatter: &OutputFormatter, stages: &[FunnelStage]) -> Table {
    let mut table = formatter.new_table();
    table.set_header(
        ["Stage", "Value", "", "Share"]
            .iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold).fg(Color::Cyan)),
    );

    let top = stages.first().map(|s| s.value).unwrap_or(0);
    for stage in stages {
        table.add_row(vec![
            Cell::new(&stage.name),
            Cell::new(stage.value).set_alignment(CellAlignment::Right),
            Cell::new(bar(stage.value, top, FUNNEL_WIDTH)).fg(Color::Blue),
            Cell::new(share(stage.value, top)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

#[allow(clippy::cast_precision_loss)]
fn share(value: u64, top: u64) -> String {
    if top == 0 {
        return "-".to_string();
    }
    format!("{:.0}%", value as f64 / top as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;

    #[test]
    fn test_sparkline_scales_to_axis() {
        let spark = sparkline(&[60.0, 80.0, 100.0], 60.0, 100.0);
        let chars: Vec<char> = spark.chars().collect();
        assert_eq!(chars.len(), 3);
        assert_eq!(chars[0], '\u{2581}');
        assert_eq!(chars[2], '\u{2588}');
        assert!(chars[1] > chars[0] && chars[1] < chars[2]);
    }

    #[test]
    fn test_sparkline_clamps() {
        let spark = sparkline(&[10.0, 140.0], 60.0, 100.0);
        assert_eq!(spark, "\u{2581}\u{2588}");
    }

    #[test]
    fn test_sparkline_degenerate_axis() {
        assert!(sparkline(&[70.0], 100.0, 100.0).is_empty());
        assert!(sparkline(&[], 60.0, 100.0).is_empty());
    }

    #[test]
    fn test_bar() {
        assert_eq!(bar(100, 100, 10).chars().count(), 10);
        assert_eq!(bar(40, 100, 10).chars().count(), 4);
        assert_eq!(bar(0, 100, 10), "");
        assert_eq!(bar(5, 0, 10), "");
    }

    #[test]
    fn test_share() {
        assert_eq!(share(40, 100), "40%");
        assert_eq!(share(1, 0), "-");
    }

    #[test]
    fn test_trend_table_header_shows_range() {
        let chart = TrendChart {
            labels: vec!["Mon".to_string(), "Sun".to_string()],
            series: Vec::new(),
            y_min: 60.0,
            y_max: 100.0,
        };
        let formatter = OutputFormatter::new(OutputFormat::Table, false);
        let rendered = trend_table(&formatter, &chart).to_string();
        assert!(rendered.contains("Mon → Sun"));
    }

    #[test]
    fn test_trend_lines() {
        let points = vec![fleet_core::TrendPoint {
            label: "Mon".to_string(),
            activation: 90.0,
            availability: 98.0,
            scheduling: 88.0,
            utilization: 78.0,
        }];
        let chart = TrendChart::derive(&points, 60.0, 100.0);
        let lines = trend_lines(&chart);
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Activation rate: "));
        assert!(lines[0].ends_with("[90]"));
    }
}
