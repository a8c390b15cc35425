//! Command implementations for the fleet CLI

pub mod config;
pub mod dashboard;
pub mod domains;
pub mod events;
pub mod funnel;
pub mod insights;
pub mod kpis;
pub mod trends;
pub mod validate;

use crate::output::OutputFormatter;
use anyhow::Result;
use fleet_core::{render_pass, Config, DataSource, RenderPass};

/// Load, validate and derive one render pass, surfacing non-fatal issues
pub fn load(
    source: &dyn DataSource,
    config: &Config,
    formatter: &OutputFormatter,
) -> Result<RenderPass> {
    formatter.print_progress("Loading fleet snapshot");
    let pass = render_pass(source, config);
    formatter.clear_progress();

    let pass = pass?;
    for issue in &pass.issues {
        formatter.print_warning(&issue.to_string());
    }
    Ok(pass)
}
