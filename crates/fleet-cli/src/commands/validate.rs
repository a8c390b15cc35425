//! Snapshot validation command

use crate::output::{Formattable, OutputFormatter};
use anyhow::{bail, Result};
use comfy_table::{Attribute, Cell, Color};
use fleet_core::validate::validate;
use fleet_core::{DataSource, IssueLevel, ValidationIssue};
use tracing::info;

impl Formattable for ValidationIssue {
    fn table_headers() -> Vec<String> {
        vec!["Level".to_string(), "Path".to_string(), "Message".to_string()]
    }

    fn table_row(&self) -> Vec<String> {
        vec![level_label(self.level).to_string(), self.path.clone(), self.message.clone()]
    }

    fn table_cells(&self) -> Vec<Cell> {
        let color = match self.level {
            IssueLevel::Error => Color::Red,
            IssueLevel::Warning => Color::DarkYellow,
        };
        vec![
            Cell::new(level_label(self.level)).fg(color).add_attribute(Attribute::Bold),
            Cell::new(&self.path),
            Cell::new(&self.message),
        ]
    }

    fn key_value_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("Level".to_string(), level_label(self.level).to_string()),
            ("Path".to_string(), self.path.clone()),
            ("Message".to_string(), self.message.clone()),
        ]
    }
}

fn level_label(level: IssueLevel) -> &'static str {
    match level {
        IssueLevel::Error => "error",
        IssueLevel::Warning => "warning",
    }
}

/// Validate the configured snapshot, failing when it has errors
pub fn validate_source(source: &dyn DataSource, formatter: &OutputFormatter) -> Result<()> {
    formatter.print_progress("Validating fleet snapshot");
    let snapshot = source.snapshot();
    formatter.clear_progress();

    let issues = validate(&snapshot?);
    let errors = issues.iter().filter(|i| i.is_error()).count();
    info!(
        "Validated {}: {} errors, {} warnings",
        source.describe(),
        errors,
        issues.len() - errors
    );

    if issues.is_empty() {
        formatter.print_success(&format!("{} is valid", source.describe()))?;
        return Ok(());
    }

    formatter.print_list(&issues)?;
    if errors > 0 {
        bail!("{} validation error(s) in {}", errors, source.describe());
    }
    Ok(())
}
