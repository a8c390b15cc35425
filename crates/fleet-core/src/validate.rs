//! Snapshot validation
//!
//! Checks records supplied by a data source before they reach the
//! derivation layer. Error-level issues reject the snapshot in strict mode;
//! warnings are only logged.

use crate::types::Snapshot;
use crate::Result;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use tracing::warn;

/// Canonical funnel stage order
pub const FUNNEL_ORDER: [&str; 4] = ["Committed", "Available", "Allocated", "Utilized"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueLevel {
    Error,
    Warning,
}

/// A single problem found in a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub level: IssueLevel,
    /// Location of the offending field, e.g. `domains[2].name`
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(level: IssueLevel, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            path: path.into(),
            message: message.into(),
        }
    }

    fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(IssueLevel::Error, path, message)
    }

    fn warning(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(IssueLevel::Warning, path, message)
    }

    pub fn is_error(&self) -> bool {
        self.level == IssueLevel::Error
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Snapshot rejected because of error-level issues
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} validation error(s), first: {}", .issues.len(), first_issue(.issues))]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

fn first_issue(issues: &[ValidationIssue]) -> String {
    issues
        .first()
        .map(|issue| issue.to_string())
        .unwrap_or_else(|| "none".to_string())
}

impl ValidationError {
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        Self { issues }
    }
}

/// Collect every issue in `snapshot`
pub fn validate(snapshot: &Snapshot) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    check_domains(snapshot, &mut issues);
    check_events(snapshot, &mut issues);
    check_trends(snapshot, &mut issues);
    check_funnel(snapshot, &mut issues);
    check_kpis(snapshot, &mut issues);
    issues
}

/// Validate and apply the strictness policy
///
/// Returns all issues when the snapshot is accepted. In strict mode any
/// error-level issue turns into [`crate::Error::Validation`].
pub fn validate_snapshot(snapshot: &Snapshot, strict: bool) -> Result<Vec<ValidationIssue>> {
    let issues = validate(snapshot);

    if strict && issues.iter().any(ValidationIssue::is_error) {
        let errors = issues.into_iter().filter(ValidationIssue::is_error).collect();
        return Err(ValidationError::new(errors).into());
    }

    for issue in &issues {
        warn!(path = %issue.path, level = ?issue.level, "{}", issue.message);
    }

    Ok(issues)
}

fn check_domains(snapshot: &Snapshot, issues: &mut Vec<ValidationIssue>) {
    let mut seen = HashSet::new();
    for (i, domain) in snapshot.domains.iter().enumerate() {
        let path = format!("domains[{}].name", i);
        if domain.name.trim().is_empty() {
            issues.push(ValidationIssue::error(path, "domain name is empty"));
        } else if !seen.insert(domain.name.as_str()) {
            issues.push(ValidationIssue::error(
                path,
                format!("duplicate domain name '{}'", domain.name),
            ));
        }
    }
}

fn check_events(snapshot: &Snapshot, issues: &mut Vec<ValidationIssue>) {
    let mut seen = HashSet::new();
    for (i, event) in snapshot.bad_node_events.iter().enumerate() {
        let id = event.node_id.as_str();
        if id.trim().is_empty() {
            issues.push(ValidationIssue::error(
                format!("bad_node_events[{}].node_id", i),
                "node id is empty",
            ));
        } else if !seen.insert(id) {
            issues.push(ValidationIssue::error(
                format!("bad_node_events[{}].node_id", i),
                format!("duplicate node id '{}'", id),
            ));
        }

        if !event.severity.is_known() {
            issues.push(ValidationIssue::error(
                format!("bad_node_events[{}].severity", i),
                format!(
                    "unknown severity '{}', expected High, Medium or Low",
                    event.severity
                ),
            ));
        }
    }
}

fn check_trends(snapshot: &Snapshot, issues: &mut Vec<ValidationIssue>) {
    if snapshot.trends.is_empty() {
        issues.push(ValidationIssue::warning("trends", "trend series is empty"));
        return;
    }

    for (i, point) in snapshot.trends.iter().enumerate() {
        let rates = [
            ("activation", point.activation),
            ("availability", point.availability),
            ("scheduling", point.scheduling),
            ("utilization", point.utilization),
        ];
        for (field, value) in rates {
            if !(0.0..=100.0).contains(&value) {
                issues.push(ValidationIssue::error(
                    format!("trends[{}].{}", i, field),
                    format!("rate {} is outside 0-100", value),
                ));
            }
        }
    }
}

fn check_funnel(snapshot: &Snapshot, issues: &mut Vec<ValidationIssue>) {
    let names: Vec<&str> = snapshot.funnel.iter().map(|s| s.name.as_str()).collect();
    if !names.is_empty() && names != FUNNEL_ORDER {
        issues.push(ValidationIssue::warning(
            "funnel",
            format!(
                "stages {:?} differ from expected order {:?}",
                names, FUNNEL_ORDER
            ),
        ));
    }

    for (i, pair) in snapshot.funnel.windows(2).enumerate() {
        if pair[1].value > pair[0].value {
            issues.push(ValidationIssue::warning(
                format!("funnel[{}].value", i + 1),
                format!(
                    "{} ({}) exceeds {} ({})",
                    pair[1].name, pair[1].value, pair[0].name, pair[0].value
                ),
            ));
        }
    }
}

fn check_kpis(snapshot: &Snapshot, issues: &mut Vec<ValidationIssue>) {
    for (i, kpi) in snapshot.kpis.iter().enumerate() {
        if kpi.title.trim().is_empty() {
            issues.push(ValidationIssue::error(
                format!("kpis[{}].title", i),
                "KPI title is empty",
            ));
        }
    }
}
