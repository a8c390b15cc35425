//! Record types supplied by a data source
//!
//! Every collection in a [`Snapshot`] is an immutable, already-collected
//! view of the fleet for a single render pass.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a node in the fleet
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a new NodeId from a string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the string representation of the NodeId
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// One day of the weekly reliability trend. Rates are percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Day label, e.g. "Mon"
    #[serde(alias = "name")]
    pub label: String,
    pub activation: f64,
    pub availability: f64,
    pub scheduling: f64,
    pub utilization: f64,
}

/// Stage of the capacity funnel (Committed, Available, Allocated, Utilized)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelStage {
    pub name: String,
    pub value: u64,
    /// Display color token
    #[serde(default, alias = "fill")]
    pub color: String,
}

/// Severity of a bad node event
///
/// Unrecognized values are preserved instead of failing the parse, so a
/// snapshot can still be rendered (or rejected by validation) as the caller
/// chooses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Severity {
    High,
    Medium,
    Low,
    Unknown(String),
}

impl Severity {
    /// Whether this is one of the recognized severities
    pub fn is_known(&self) -> bool {
        !matches!(self, Severity::Unknown(_))
    }
}

impl From<String> for Severity {
    fn from(s: String) -> Self {
        match s.trim().to_lowercase().as_str() {
            "high" => Severity::High,
            "medium" => Severity::Medium,
            "low" => Severity::Low,
            _ => Severity::Unknown(s),
        }
    }
}

impl From<&str> for Severity {
    fn from(s: &str) -> Self {
        Severity::from(s.to_string())
    }
}

impl From<Severity> for String {
    fn from(severity: Severity) -> Self {
        severity.to_string()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::High => write!(f, "High"),
            Severity::Medium => write!(f, "Medium"),
            Severity::Low => write!(f, "Low"),
            Severity::Unknown(raw) => write!(f, "{}", raw),
        }
    }
}

/// A node that recently misbehaved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadNodeEvent {
    #[serde(alias = "id")]
    pub node_id: NodeId,
    pub event: String,
    pub severity: Severity,
    /// Free-form recovery duration, e.g. "2.5h"
    pub recovery: String,
    /// Recommended action label
    pub action: String,
}

/// Monitoring entry for one scheduling domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainStatus {
    pub name: String,
    pub gpus: u32,
    #[serde(alias = "hasSlo")]
    pub has_slo: bool,
}

impl DomainStatus {
    pub fn new(name: impl Into<String>, gpus: u32, has_slo: bool) -> Self {
        Self {
            name: name.into(),
            gpus,
            has_slo,
        }
    }
}

/// Row of the KPI grid a card belongs to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KpiGroup {
    /// Healthy / degraded / unhealthy chip counts
    ChipHealth,
    /// Utilization, capacity and cost
    #[default]
    Capacity,
}

/// Accent stripe shown on a KPI card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    Green,
    Orange,
    Red,
}

/// Summary KPI scalar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpi {
    pub title: String,
    pub value: String,
    /// Trend label, e.g. "+1.2%" or "Within budget"
    pub trend: String,
    /// Qualifier shown next to the trend, e.g. "vs last 24h"
    #[serde(default)]
    pub qualifier: String,
    #[serde(default)]
    pub group: KpiGroup,
    #[serde(default)]
    pub accent: Option<Accent>,
    /// Card carries an info marker
    #[serde(default)]
    pub info: bool,
}

/// Tone of an insight or recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Warning,
    Critical,
}

/// Disruption summary tile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisruptionInsight {
    pub title: String,
    pub value: String,
    pub note: String,
    pub tone: Tone,
}

/// Reliability recommendation callout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub message: String,
    pub action: String,
    pub tone: Tone,
}

/// Everything a data source supplies for one render pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Project or fleet the snapshot describes
    #[serde(default)]
    pub scope: String,

    #[serde(default)]
    pub captured_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub trends: Vec<TrendPoint>,

    #[serde(default)]
    pub funnel: Vec<FunnelStage>,

    #[serde(default, alias = "events")]
    pub bad_node_events: Vec<BadNodeEvent>,

    #[serde(default)]
    pub domains: Vec<DomainStatus>,

    #[serde(default)]
    pub kpis: Vec<Kpi>,

    #[serde(default)]
    pub disruptions: Vec<DisruptionInsight>,

    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}
