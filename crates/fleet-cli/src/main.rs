//! fleet - command-line fleet reliability dashboard

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fleet_core::{source_from_config, Config};
use std::path::PathBuf;
use tracing::{debug, error};

mod chart;
mod commands;
mod output;

use output::{OutputFormat, OutputFormatter};

/// Fleet reliability dashboard for GPU/TPU fleets
#[derive(Debug, Parser)]
#[command(name = "fleet")]
#[command(about = "Fleet reliability dashboard for GPU/TPU fleets")]
#[command(version)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Snapshot file to render instead of the configured source
    #[arg(short, long, value_name = "FILE")]
    fixture: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    output: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Enable JSON output (overrides --output)
    #[arg(long)]
    json: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the full fleet reliability dashboard
    #[command(name = "dashboard")]
    Dashboard {
        /// Refresh interval in seconds (for continuous monitoring)
        #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
        refresh: Option<u64>,
    },

    /// Show chip health and capacity KPIs
    #[command(name = "kpis")]
    Kpis,

    /// Show domain monitoring with SLO status
    #[command(name = "domains")]
    Domains,

    /// Show bad node events
    #[command(name = "events")]
    Events,

    /// Show the weekly reliability trends
    #[command(name = "trends")]
    Trends,

    /// Show the capacity funnel
    #[command(name = "funnel")]
    Funnel,

    /// Show disruption insights and recommendations
    #[command(name = "insights")]
    Insights,

    /// Validate the snapshot without rendering it
    #[command(name = "validate")]
    Validate,

    /// Configuration management
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// List the configuration files consulted by default
    Paths,
}

fn init_tracing(config: &Config, verbose: bool) {
    let level = if verbose {
        "debug".to_string()
    } else {
        config.observability.log_level.to_lowercase()
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("fleet_cli={},fleet_core={}", level, level).into());

    // Logs go to stderr so structured stdout stays parseable
    if config.observability.is_json() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Category of the library error behind a command failure, if any
fn error_category(err: &anyhow::Error) -> Option<&'static str> {
    err.downcast_ref::<fleet_core::Error>()
        .map(fleet_core::Error::category)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            init_tracing(&Config::default(), cli.verbose);
            error!(error.category = err.category(), "Failed to load configuration: {}", err);
            return Err(anyhow::Error::new(err).context("Failed to load configuration"));
        }
    };
    if let Some(fixture) = &cli.fixture {
        config.data.fixture = Some(fixture.clone());
    }

    init_tracing(&config, cli.verbose);
    match &cli.config {
        Some(path) => debug!("Loaded configuration from {}", path.display()),
        None => debug!("Loaded configuration from default locations"),
    }
    debug!("Starting fleet CLI with config: {:?}", config);

    let result = run(cli, &config).await;
    if let Err(err) = &result {
        if let Some(category) = error_category(err) {
            error!(error.category = category, "Command failed: {:#}", err);
        }
    }
    result
}

async fn run(cli: Cli, config: &Config) -> Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    let output_format = if cli.json {
        OutputFormat::Json
    } else {
        cli.output
    };
    let formatter = OutputFormatter::new(output_format, !cli.no_color);

    let source = source_from_config(&config.data).context("Failed to open data source")?;
    let source = source.as_ref();

    match cli.command {
        Commands::Dashboard { refresh } => {
            commands::dashboard::show_dashboard(source, config, &formatter, refresh).await?;
        }

        Commands::Kpis => commands::kpis::show_kpis(source, config, &formatter)?,

        Commands::Domains => commands::domains::show_domains(source, config, &formatter)?,

        Commands::Events => commands::events::show_events(source, config, &formatter)?,

        Commands::Trends => commands::trends::show_trends(source, config, &formatter)?,

        Commands::Funnel => commands::funnel::show_funnel(source, config, &formatter)?,

        Commands::Insights => commands::insights::show_insights(source, config, &formatter)?,

        Commands::Validate => commands::validate::validate_source(source, &formatter)?,

        Commands::Config { action } => {
            commands::config::handle_config_command(config, action, &formatter)?;
        }
    }

    Ok(())
}
