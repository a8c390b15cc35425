//! Derivation of display-ready rows from raw snapshot records
//!
//! [`slo_status`] is the only business rule here. The badge and trend-sign
//! functions are static lookups kept next to it so that every renderer maps
//! records the same way.

use crate::config::Config;
use crate::types::{
    Accent, BadNodeEvent, DisruptionInsight, DomainStatus, FunnelStage, Kpi, KpiGroup, NodeId,
    Recommendation, Severity, Snapshot, TrendPoint,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Domains with an SLO need at least this many GPUs to be in SLO
pub const DEFAULT_SLO_MIN_GPUS: u32 = 16;

/// SLO compliance of a domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SloStatus {
    NoSlo,
    OutOfSlo,
    InSlo,
}

impl SloStatus {
    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            SloStatus::NoSlo => "No SLO",
            SloStatus::OutOfSlo => "Out of SLO",
            SloStatus::InSlo => "In SLO",
        }
    }

    pub fn badge(&self) -> Badge {
        match self {
            SloStatus::NoSlo => Badge::Muted,
            SloStatus::OutOfSlo => Badge::Red,
            SloStatus::InSlo => Badge::Emerald,
        }
    }
}

impl fmt::Display for SloStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Compute SLO status with the default GPU threshold
pub fn slo_status(domain: &DomainStatus) -> SloStatus {
    slo_status_with(domain, DEFAULT_SLO_MIN_GPUS)
}

/// Compute SLO status against `min_gpus`; only a strictly smaller count is out of SLO
pub fn slo_status_with(domain: &DomainStatus, min_gpus: u32) -> SloStatus {
    if !domain.has_slo {
        SloStatus::NoSlo
    } else if domain.gpus < min_gpus {
        SloStatus::OutOfSlo
    } else {
        SloStatus::InSlo
    }
}

/// Badge color used to emphasize a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    Red,
    Orange,
    Blue,
    Emerald,
    Muted,
}

/// High is red, Medium is orange, everything else falls back to blue
pub fn severity_badge(severity: &Severity) -> Badge {
    match severity {
        Severity::High => Badge::Red,
        Severity::Medium => Badge::Orange,
        Severity::Low | Severity::Unknown(_) => Badge::Blue,
    }
}

/// Whether a KPI trend label reads as good news
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendSign {
    Positive,
    Negative,
}

pub fn trend_sign(trend: &str) -> TrendSign {
    if trend.starts_with('+') || trend.contains("Healthy") || trend.contains("Within") {
        TrendSign::Positive
    } else {
        TrendSign::Negative
    }
}

/// Parameters of a derivation pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeriveOptions {
    pub slo_min_gpus: u32,
    pub y_min: f64,
    pub y_max: f64,
}

impl Default for DeriveOptions {
    fn default() -> Self {
        Self {
            slo_min_gpus: DEFAULT_SLO_MIN_GPUS,
            y_min: 60.0,
            y_max: 100.0,
        }
    }
}

impl From<&Config> for DeriveOptions {
    fn from(config: &Config) -> Self {
        Self {
            slo_min_gpus: config.slo.min_gpus,
            y_min: config.chart.y_min,
            y_max: config.chart.y_max,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainRow {
    pub name: String,
    pub gpus: u32,
    pub status: SloStatus,
}

impl DomainRow {
    pub fn derive(domain: &DomainStatus, min_gpus: u32) -> Self {
        Self {
            name: domain.name.clone(),
            gpus: domain.gpus,
            status: slo_status_with(domain, min_gpus),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRow {
    pub node_id: NodeId,
    pub event: String,
    pub severity: Severity,
    pub badge: Badge,
    pub recovery: String,
    pub action: String,
}

impl From<&BadNodeEvent> for EventRow {
    fn from(event: &BadNodeEvent) -> Self {
        Self {
            node_id: event.node_id.clone(),
            event: event.event.clone(),
            severity: event.severity.clone(),
            badge: severity_badge(&event.severity),
            recovery: event.recovery.clone(),
            action: event.action.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiCard {
    pub title: String,
    pub value: String,
    pub trend: String,
    pub qualifier: String,
    pub sign: TrendSign,
    pub accent: Option<Accent>,
    pub info: bool,
}

impl From<&Kpi> for KpiCard {
    fn from(kpi: &Kpi) -> Self {
        Self {
            title: kpi.title.clone(),
            value: kpi.value.clone(),
            trend: kpi.trend.clone(),
            qualifier: kpi.qualifier.clone(),
            sign: trend_sign(&kpi.trend),
            accent: kpi.accent,
            info: kpi.info,
        }
    }
}

/// Metric plotted in the reliability trend chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendMetric {
    Activation,
    Availability,
    Scheduling,
    Utilization,
}

impl TrendMetric {
    pub const ALL: [TrendMetric; 4] = [
        TrendMetric::Activation,
        TrendMetric::Availability,
        TrendMetric::Scheduling,
        TrendMetric::Utilization,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TrendMetric::Activation => "Activation rate",
            TrendMetric::Availability => "Availability rate",
            TrendMetric::Scheduling => "Scheduling rate",
            TrendMetric::Utilization => "Utilization rate",
        }
    }

    /// Series color token
    pub fn color(&self) -> &'static str {
        match self {
            TrendMetric::Activation => "amber",
            TrendMetric::Availability => "emerald",
            TrendMetric::Scheduling => "blue",
            TrendMetric::Utilization => "pink",
        }
    }

    pub fn value(&self, point: &TrendPoint) -> f64 {
        match self {
            TrendMetric::Activation => point.activation,
            TrendMetric::Availability => point.availability,
            TrendMetric::Scheduling => point.scheduling,
            TrendMetric::Utilization => point.utilization,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSeries {
    pub metric: TrendMetric,
    pub name: &'static str,
    pub color: &'static str,
    pub values: Vec<f64>,
}

impl TrendSeries {
    pub fn latest(&self) -> Option<f64> {
        self.values.last().copied()
    }

    pub fn min(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::min)
    }

    pub fn max(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::max)
    }
}

/// Multi-series line chart over the weekly trend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendChart {
    pub labels: Vec<String>,
    pub series: Vec<TrendSeries>,
    pub y_min: f64,
    pub y_max: f64,
}

impl TrendChart {
    pub fn derive(points: &[TrendPoint], y_min: f64, y_max: f64) -> Self {
        let series = TrendMetric::ALL
            .iter()
            .map(|metric| TrendSeries {
                metric: *metric,
                name: metric.name(),
                color: metric.color(),
                values: points.iter().map(|p| metric.value(p)).collect(),
            })
            .collect();

        Self {
            labels: points.iter().map(|p| p.label.clone()).collect(),
            series,
            y_min,
            y_max,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Display-ready view of a snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub scope: String,
    pub captured_at: Option<DateTime<Utc>>,
    pub chip_health: Vec<KpiCard>,
    pub capacity: Vec<KpiCard>,
    pub disruptions: Vec<DisruptionInsight>,
    pub domains: Vec<DomainRow>,
    pub events: Vec<EventRow>,
    pub trends: TrendChart,
    pub funnel: Vec<FunnelStage>,
    pub recommendations: Vec<Recommendation>,
}

impl Dashboard {
    pub fn derive(snapshot: &Snapshot, options: &DeriveOptions) -> Self {
        let (chip_health, capacity): (Vec<&Kpi>, Vec<&Kpi>) = snapshot
            .kpis
            .iter()
            .partition(|kpi| kpi.group == KpiGroup::ChipHealth);

        Self {
            scope: snapshot.scope.clone(),
            captured_at: snapshot.captured_at,
            chip_health: chip_health.into_iter().map(KpiCard::from).collect(),
            capacity: capacity.into_iter().map(KpiCard::from).collect(),
            disruptions: snapshot.disruptions.clone(),
            domains: snapshot
                .domains
                .iter()
                .map(|d| DomainRow::derive(d, options.slo_min_gpus))
                .collect(),
            events: snapshot.bad_node_events.iter().map(EventRow::from).collect(),
            trends: TrendChart::derive(&snapshot.trends, options.y_min, options.y_max),
            funnel: snapshot.funnel.clone(),
            recommendations: snapshot.recommendations.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_slo_status_examples() {
        assert_eq!(
            slo_status(&DomainStatus::new("domain-gamma", 18, false)),
            SloStatus::NoSlo
        );
        assert_eq!(
            slo_status(&DomainStatus::new("domain-beta", 15, true)),
            SloStatus::OutOfSlo
        );
        assert_eq!(
            slo_status(&DomainStatus::new("domain-alpha", 18, true)),
            SloStatus::InSlo
        );
    }

    #[test]
    fn test_slo_boundary_is_strict() {
        assert_eq!(slo_status(&DomainStatus::new("d", 16, true)), SloStatus::InSlo);
        assert_eq!(slo_status(&DomainStatus::new("d", 15, true)), SloStatus::OutOfSlo);
        assert_eq!(slo_status(&DomainStatus::new("d", 0, true)), SloStatus::OutOfSlo);
    }

    #[test]
    fn test_slo_custom_threshold() {
        let domain = DomainStatus::new("domain-delta", 17, true);
        assert_eq!(slo_status_with(&domain, 18), SloStatus::OutOfSlo);
        assert_eq!(slo_status_with(&domain, 17), SloStatus::InSlo);
    }

    #[test]
    fn test_slo_labels() {
        assert_eq!(SloStatus::NoSlo.to_string(), "No SLO");
        assert_eq!(SloStatus::OutOfSlo.label(), "Out of SLO");
        assert_eq!(SloStatus::InSlo.badge(), Badge::Emerald);
    }

    #[test]
    fn test_severity_badges() {
        assert_eq!(severity_badge(&Severity::High), Badge::Red);
        assert_eq!(severity_badge(&Severity::Medium), Badge::Orange);
        assert_eq!(severity_badge(&Severity::Low), Badge::Blue);
        assert_eq!(severity_badge(&Severity::from("Critical")), Badge::Blue);
        assert_eq!(severity_badge(&Severity::from("")), Badge::Blue);
    }

    #[test]
    fn test_trend_sign() {
        assert_eq!(trend_sign("+1.2%"), TrendSign::Positive);
        assert_eq!(trend_sign("0.5%"), TrendSign::Negative);
        assert_eq!(trend_sign("Healthy"), TrendSign::Positive);
        assert_eq!(trend_sign("Within budget"), TrendSign::Positive);
        assert_eq!(trend_sign("-0.5%"), TrendSign::Negative);
        assert_eq!(trend_sign("Chips"), TrendSign::Negative);
        assert_eq!(trend_sign(""), TrendSign::Negative);
    }

    #[test]
    fn test_trend_chart_series() {
        let points = vec![
            TrendPoint {
                label: "Mon".to_string(),
                activation: 90.0,
                availability: 98.0,
                scheduling: 88.0,
                utilization: 78.0,
            },
            TrendPoint {
                label: "Tue".to_string(),
                activation: 88.0,
                availability: 98.0,
                scheduling: 85.0,
                utilization: 80.0,
            },
        ];

        let chart = TrendChart::derive(&points, 60.0, 100.0);
        assert_eq!(chart.labels, vec!["Mon", "Tue"]);
        assert_eq!(chart.series.len(), 4);

        let activation = &chart.series[0];
        assert_eq!(activation.name, "Activation rate");
        assert_eq!(activation.values, vec![90.0, 88.0]);
        assert_eq!(activation.latest(), Some(88.0));
        assert_eq!(activation.min(), Some(88.0));
        assert_eq!(activation.max(), Some(90.0));

        let empty = TrendChart::derive(&[], 60.0, 100.0);
        assert!(empty.is_empty());
        assert_eq!(empty.series[3].latest(), None);
    }

    #[test]
    fn test_dashboard_splits_kpi_rows() {
        let snapshot = Snapshot {
            kpis: vec![
                Kpi {
                    title: "Healthy chips".to_string(),
                    value: "4,850".to_string(),
                    trend: "97%".to_string(),
                    qualifier: "vs last 24h".to_string(),
                    group: KpiGroup::ChipHealth,
                    accent: Some(Accent::Green),
                    info: false,
                },
                Kpi {
                    title: "Fleet utilization".to_string(),
                    value: "63%".to_string(),
                    trend: "+1.2%".to_string(),
                    qualifier: "vs last 24h".to_string(),
                    group: KpiGroup::Capacity,
                    accent: None,
                    info: true,
                },
            ],
            domains: vec![
                DomainStatus::new("domain-alpha", 18, true),
                DomainStatus::new("domain-beta", 15, true),
            ],
            ..Default::default()
        };

        let dashboard = Dashboard::derive(&snapshot, &DeriveOptions::default());
        assert_eq!(dashboard.chip_health.len(), 1);
        assert_eq!(dashboard.chip_health[0].sign, TrendSign::Negative);
        assert_eq!(dashboard.capacity.len(), 1);
        assert_eq!(dashboard.capacity[0].sign, TrendSign::Positive);
        assert_eq!(dashboard.domains[0].status, SloStatus::InSlo);
        assert_eq!(dashboard.domains[1].status, SloStatus::OutOfSlo);
    }

    #[test]
    fn test_dashboard_uses_configured_threshold() {
        let snapshot = Snapshot {
            domains: vec![DomainStatus::new("domain-alpha", 18, true)],
            ..Default::default()
        };
        let options = DeriveOptions {
            slo_min_gpus: 20,
            ..Default::default()
        };

        let dashboard = Dashboard::derive(&snapshot, &options);
        assert_eq!(dashboard.domains[0].status, SloStatus::OutOfSlo);
    }

    proptest! {
        #[test]
        fn prop_no_slo_ignores_gpu_count(gpus in any::<u32>()) {
            let domain = DomainStatus::new("d", gpus, false);
            prop_assert_eq!(slo_status(&domain), SloStatus::NoSlo);
        }

        #[test]
        fn prop_below_threshold_is_out_of_slo(gpus in 0u32..16) {
            let domain = DomainStatus::new("d", gpus, true);
            prop_assert_eq!(slo_status(&domain), SloStatus::OutOfSlo);
        }

        #[test]
        fn prop_at_or_above_threshold_is_in_slo(gpus in 16u32..) {
            let domain = DomainStatus::new("d", gpus, true);
            prop_assert_eq!(slo_status(&domain), SloStatus::InSlo);
        }

        #[test]
        fn prop_severity_badge_is_total(raw in ".*") {
            let badge = severity_badge(&Severity::from(raw.as_str()));
            prop_assert!(matches!(badge, Badge::Red | Badge::Orange | Badge::Blue));
        }
    }
}
