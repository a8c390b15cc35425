//! Fleet-wide reliability trends

use crate::chart::{trend_lines, trend_table};
use crate::output::{OutputFormat, OutputFormatter};
use anyhow::Result;
use colored::*;
use fleet_core::{Config, DataSource, TrendChart};

pub fn render(formatter: &OutputFormatter, chart: &TrendChart) -> Result<()> {
    formatter.print_heading("Fleet-wide reliability trends");

    if chart.is_empty() {
        println!("{}", "No trend data".dimmed());
        return Ok(());
    }

    match formatter.format() {
        OutputFormat::Table => {
            println!("{}", trend_table(formatter, chart));
            println!(
                "{}",
                format!("y-axis {}-{}%", chart.y_min, chart.y_max).dimmed()
            );
        }
        _ => {
            println!("Days: {}", chart.labels.join(", "));
            for line in trend_lines(chart) {
                println!("{}", line);
            }
        }
    }
    Ok(())
}

/// Show the weekly trend chart
pub fn show_trends(source: &dyn DataSource, config: &Config, formatter: &OutputFormatter) -> Result<()> {
    let pass = super::load(source, config, formatter)?;
    if formatter.print_structured(&pass.dashboard.trends)? {
        return Ok(());
    }
    render(formatter, &pass.dashboard.trends)
}
