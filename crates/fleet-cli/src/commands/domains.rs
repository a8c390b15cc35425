//! Domain monitoring table

use crate::output::{slo_cell, Formattable, OutputFormatter};
use anyhow::Result;
use comfy_table::{Attribute, Cell, CellAlignment};
use fleet_core::{Config, DataSource, DomainRow};

impl Formattable for DomainRow {
    fn table_headers() -> Vec<String> {
        vec![
            "Domain".to_string(),
            "GPUs".to_string(),
            "SLO Status".to_string(),
        ]
    }

    fn table_row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.gpus.to_string(),
            self.status.label().to_string(),
        ]
    }

    fn table_cells(&self) -> Vec<Cell> {
        vec![
            Cell::new(&self.name).add_attribute(Attribute::Bold),
            Cell::new(self.gpus).set_alignment(CellAlignment::Center),
            slo_cell(self.status).set_alignment(CellAlignment::Right),
        ]
    }

    fn key_value_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("Domain".to_string(), self.name.clone()),
            ("GPUs".to_string(), self.gpus.to_string()),
            ("SLO Status".to_string(), self.status.label().to_string()),
        ]
    }
}

pub fn render(formatter: &OutputFormatter, domains: &[DomainRow]) -> Result<()> {
    formatter.print_heading("Domain monitoring");
    formatter.print_list(domains)
}

/// List domains with their SLO status
pub fn show_domains(
    source: &dyn DataSource,
    config: &Config,
    formatter: &OutputFormatter,
) -> Result<()> {
    let pass = super::load(source, config, formatter)?;
    render(formatter, &pass.dashboard.domains)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleet_core::{DomainStatus, SloStatus};

    #[test]
    fn test_domain_row_formatting() {
        let row = DomainRow::derive(&DomainStatus::new("domain-beta", 15, true), 16);
        assert_eq!(row.status, SloStatus::OutOfSlo);
        assert_eq!(row.table_row(), vec!["domain-beta", "15", "Out of SLO"]);
        assert_eq!(row.table_cells().len(), DomainRow::table_headers().len());
        assert_eq!(row.key_value_pairs()[2].1, "Out of SLO");
    }
}
