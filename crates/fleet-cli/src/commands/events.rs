//! Bad node events table

use crate::output::{badge_cell, Formattable, OutputFormatter};
use anyhow::Result;
use comfy_table::{Attribute, Cell, Color};
use fleet_core::{Config, DataSource, EventRow};

impl Formattable for EventRow {
    fn table_headers() -> Vec<String> {
        vec![
            "Node ID".to_string(),
            "Event".to_string(),
            "Severity".to_string(),
            "Recovery Time".to_string(),
            "Actions".to_string(),
        ]
    }

    fn table_row(&self) -> Vec<String> {
        vec![
            self.node_id.to_string(),
            self.event.clone(),
            self.severity.to_string(),
            self.recovery.clone(),
            self.action.clone(),
        ]
    }

    fn table_cells(&self) -> Vec<Cell> {
        vec![
            Cell::new(&self.node_id).fg(Color::Blue),
            Cell::new(&self.event),
            badge_cell(self.severity.to_string().to_uppercase(), self.badge),
            Cell::new(&self.recovery).fg(Color::DarkGrey),
            Cell::new(&self.action)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
        ]
    }

    fn key_value_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("Node ID".to_string(), self.node_id.to_string()),
            ("Event".to_string(), self.event.clone()),
            ("Severity".to_string(), self.severity.to_string()),
            ("Recovery Time".to_string(), self.recovery.clone()),
            ("Action".to_string(), self.action.clone()),
        ]
    }
}

pub fn render(formatter: &OutputFormatter, events: &[EventRow]) -> Result<()> {
    formatter.print_heading("Bad node events");
    formatter.print_list(events)
}

/// List bad node events with severity badges
pub fn show_events(
    source: &dyn DataSource,
    config: &Config,
    formatter: &OutputFormatter,
) -> Result<()> {
    let pass = super::load(source, config, formatter)?;
    render(formatter, &pass.dashboard.events)
}
