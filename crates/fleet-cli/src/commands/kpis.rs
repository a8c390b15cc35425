//! KPI cards

use crate::output::{accent_color, trend_color, Formattable, OutputFormatter};
use anyhow::Result;
use comfy_table::{Attribute, Cell, Color};
use fleet_core::{Config, DataSource, KpiCard, TrendSign};
use serde::Serialize;

impl Formattable for KpiCard {
    fn table_headers() -> Vec<String> {
        vec![
            "KPI".to_string(),
            "Value".to_string(),
            "Trend".to_string(),
            "".to_string(),
        ]
    }

    fn table_row(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.value.clone(),
            self.trend.clone(),
            self.qualifier.clone(),
        ]
    }

    fn table_cells(&self) -> Vec<Cell> {
        let title = match (self.accent, self.info) {
            (Some(accent), _) => Cell::new(format!("▌ {}", self.title)).fg(accent_color(accent)),
            (None, true) => Cell::new(format!("{} ⓘ", self.title)),
            (None, false) => Cell::new(&self.title),
        };

        vec![
            title,
            Cell::new(&self.value).add_attribute(Attribute::Bold),
            Cell::new(&self.trend)
                .fg(trend_color(self.sign))
                .add_attribute(Attribute::Bold),
            Cell::new(&self.qualifier).fg(Color::DarkGrey),
        ]
    }

    fn key_value_pairs(&self) -> Vec<(String, String)> {
        let sign = match self.sign {
            TrendSign::Positive => "positive",
            TrendSign::Negative => "negative",
        };
        vec![
            ("KPI".to_string(), self.title.clone()),
            ("Value".to_string(), self.value.clone()),
            ("Trend".to_string(), format!("{} {} ({})", self.trend, self.qualifier, sign)),
        ]
    }
}

#[derive(Serialize)]
struct KpiView<'a> {
    chip_health: &'a [KpiCard],
    capacity: &'a [KpiCard],
}

pub fn render(formatter: &OutputFormatter, chip_health: &[KpiCard], capacity: &[KpiCard]) -> Result<()> {
    formatter.print_heading("Chip health");
    formatter.print_list(chip_health)?;
    formatter.print_heading("Capacity and cost");
    formatter.print_list(capacity)
}

/// Show the KPI grid
pub fn show_kpis(source: &dyn DataSource, config: &Config, formatter: &OutputFormatter) -> Result<()> {
    let pass = super::load(source, config, formatter)?;
    let dashboard = &pass.dashboard;

    let view = KpiView {
        chip_health: &dashboard.chip_health,
        capacity: &dashboard.capacity,
    };
    if formatter.print_structured(&view)? {
        return Ok(());
    }
    render(formatter, &dashboard.chip_health, &dashboard.capacity)
}
