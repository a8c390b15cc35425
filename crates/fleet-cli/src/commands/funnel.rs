//! Capacity funnel

use crate::chart::funnel_table;
use crate::output::{OutputFormat, OutputFormatter};
use anyhow::Result;
use colored::*;
use fleet_core::{Config, DataSource, FunnelStage};

pub fn render(formatter: &OutputFormatter, stages: &[FunnelStage]) -> Result<()> {
    formatter.print_heading("Capacity funnel");

    if stages.is_empty() {
        println!("{}", "No funnel data".dimmed());
        return Ok(());
    }

    match formatter.format() {
        OutputFormat::Table => println!("{}", funnel_table(formatter, stages)),
        _ => {
            for stage in stages {
                println!("{}: {}", stage.name, stage.value);
            }
        }
    }
    Ok(())
}

/// Show committed → utilized capacity
pub fn show_funnel(source: &dyn DataSource, config: &Config, formatter: &OutputFormatter) -> Result<()> {
    let pass = super::load(source, config, formatter)?;
    if formatter.print_structured(&pass.dashboard.funnel)? {
        return Ok(());
    }
    render(formatter, &pass.dashboard.funnel)
}
