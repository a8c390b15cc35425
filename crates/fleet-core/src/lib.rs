//! # fleet-core
//!
//! Data model, data sources and derivation rules for the fleetscope
//! fleet-reliability dashboard.
//!
//! Records flow one way: a [`DataSource`] produces a [`Snapshot`], the
//! snapshot is validated, and [`Dashboard::derive`] turns it into
//! display-ready rows for a renderer.

pub mod config;
pub mod derive;
pub mod error;
pub mod source;
pub mod types;
pub mod validate;

pub use crate::config::Config;
pub use derive::{
    severity_badge, slo_status, slo_status_with, trend_sign, Badge, Dashboard, DeriveOptions,
    DomainRow, EventRow, KpiCard, SloStatus, TrendChart, TrendMetric, TrendSeries, TrendSign,
};
pub use error::{Error, ErrorContext, Result};
pub use source::{source_from_config, DataSource, FileSource, FixtureSource};
pub use types::{
    Accent, BadNodeEvent, DisruptionInsight, DomainStatus, FunnelStage, Kpi, KpiGroup, NodeId,
    Recommendation, Severity, Snapshot, Tone, TrendPoint,
};
pub use validate::{IssueLevel, ValidationError, ValidationIssue};

use tracing::debug;

/// Result of one load-validate-derive pass
#[derive(Debug, Clone)]
pub struct RenderPass {
    pub dashboard: Dashboard,
    /// Issues that did not block rendering
    pub issues: Vec<ValidationIssue>,
}

/// Pull a snapshot from `source`, validate it and derive the dashboard
pub fn render_pass(source: &dyn DataSource, config: &Config) -> Result<RenderPass> {
    let snapshot = source.snapshot()?;
    let issues = validate::validate_snapshot(&snapshot, config.data.strict)?;
    let dashboard = Dashboard::derive(&snapshot, &DeriveOptions::from(config));

    debug!(
        "Derived dashboard from {}: {} domains, {} events, {} issues",
        source.describe(),
        dashboard.domains.len(),
        dashboard.events.len(),
        issues.len()
    );

    Ok(RenderPass { dashboard, issues })
}
