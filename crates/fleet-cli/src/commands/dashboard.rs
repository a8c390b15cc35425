//! Full fleet reliability dashboard

use super::{domains, events, funnel, insights, kpis, trends};
use crate::output::{OutputFormat, OutputFormatter};
use anyhow::Result;
use colored::*;
use fleet_core::{Config, DataSource, Dashboard};
use std::future::Future;
use std::time::Duration;
use tracing::info;

fn breadcrumb(dashboard: &Dashboard) -> String {
    let scope = if dashboard.scope.is_empty() {
        "fleet"
    } else {
        dashboard.scope.as_str()
    };
    format!("{} › Monitor and optimize › Fleet reliability", scope)
}

/// Render every dashboard section for interactive formats
pub fn render(formatter: &OutputFormatter, dashboard: &Dashboard) -> Result<()> {
    match formatter.format() {
        OutputFormat::Table => {
            println!("{}", breadcrumb(dashboard).dimmed());
            println!("{}", "Fleet reliability".bold());
        }
        _ => println!("{}", breadcrumb(dashboard)),
    }
    if let Some(captured_at) = dashboard.captured_at {
        println!("As of {}", captured_at.format("%Y-%m-%d %H:%M UTC"));
    }

    kpis::render(formatter, &dashboard.chip_health, &dashboard.capacity)?;
    insights::render_disruptions(formatter, &dashboard.disruptions);
    domains::render(formatter, &dashboard.domains)?;
    events::render(formatter, &dashboard.events)?;
    trends::render(formatter, &dashboard.trends)?;
    funnel::render(formatter, &dashboard.funnel)?;
    insights::render_recommendations(formatter, &dashboard.recommendations);
    Ok(())
}

/// Show the dashboard, optionally redrawing every `refresh` seconds until ctrl-c
pub async fn show_dashboard(
    source: &dyn DataSource,
    config: &Config,
    formatter: &OutputFormatter,
    refresh: Option<u64>,
) -> Result<()> {
    run_until(source, config, formatter, refresh, tokio::signal::ctrl_c()).await
}

/// Refresh loop that stops once `shutdown` completes
///
/// The shutdown future lives across passes, so a signal delivered while a
/// pass is rendering is still observed at the next wait.
async fn run_until<F>(
    source: &dyn DataSource,
    config: &Config,
    formatter: &OutputFormatter,
    refresh: Option<u64>,
    shutdown: F,
) -> Result<()>
where
    F: Future,
{
    tokio::pin!(shutdown);

    loop {
        let pass = super::load(source, config, formatter)?;
        if !formatter.print_structured(&pass.dashboard)? {
            render(formatter, &pass.dashboard)?;
        }

        let Some(interval) = refresh else {
            break;
        };

        tokio::select! {
            _ = tokio::time::sleep(Duration::from_secs(interval.max(1))) => {}
            _ = &mut shutdown => {
                info!("Interrupted, stopping refresh");
                break;
            }
        }

        // Clear screen for continuous monitoring (only for table/text formats)
        if formatter.format().is_interactive() {
            print!("\x1B[2J\x1B[1;1H");
        }
    }

    Ok(())
}
