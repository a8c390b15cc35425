//! Disruption insights and reliability recommendations

use crate::output::{tone_marker, tone_text, OutputFormatter};
use anyhow::Result;
use colored::*;
use fleet_core::{Config, DataSource, DisruptionInsight, Recommendation};
use serde::Serialize;

pub fn render_disruptions(formatter: &OutputFormatter, insights: &[DisruptionInsight]) {
    formatter.print_heading("Disruption insights");
    if insights.is_empty() {
        println!("{}", "No disruption data".dimmed());
        return;
    }

    for insight in insights {
        println!(
            "  {:<24} {:>6}  {}",
            insight.title,
            insight.value.bold(),
            tone_text(&format!("{} {}", tone_marker(insight.tone), insight.note), insight.tone)
        );
    }
}

pub fn render_recommendations(formatter: &OutputFormatter, recommendations: &[Recommendation]) {
    formatter.print_heading("Reliability insights & recommendations");
    if recommendations.is_empty() {
        println!("{}", "No recommendations".dimmed());
        return;
    }

    for rec in recommendations {
        println!(
            "{} {}",
            tone_text(tone_marker(rec.tone), rec.tone),
            tone_text(&rec.title, rec.tone).bold()
        );
        println!("  {}", rec.message);
        println!("  {} {}", rec.action.bold(), "›".dimmed());
    }
}

#[derive(Serialize)]
struct InsightView<'a> {
    disruptions: &'a [DisruptionInsight],
    recommendations: &'a [Recommendation],
}

/// Show disruption tiles and recommendation callouts
pub fn show_insights(
    source: &dyn DataSource,
    config: &Config,
    formatter: &OutputFormatter,
) -> Result<()> {
    let pass = super::load(source, config, formatter)?;
    let dashboard = &pass.dashboard;

    let view = InsightView {
        disruptions: &dashboard.disruptions,
        recommendations: &dashboard.recommendations,
    };
    if formatter.print_structured(&view)? {
        return Ok(());
    }

    render_disruptions(formatter, &dashboard.disruptions);
    render_recommendations(formatter, &dashboard.recommendations);
    Ok(())
}
