//! Output formatting for the fleet CLI

use anyhow::Result;
use clap::ValueEnum;
use colored::*;
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use fleet_core::{Accent, Badge, SloStatus, Tone, TrendSign};
use serde::Serialize;

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
    /// Compact text format
    Text,
}

impl OutputFormat {
    /// Whether the format is meant for humans rather than tools
    pub fn is_interactive(&self) -> bool {
        matches!(self, OutputFormat::Table | OutputFormat::Text)
    }
}

/// Trait for rows that can be rendered as tables or key-value listings
pub trait Formattable {
    fn table_headers() -> Vec<String>;
    fn table_row(&self) -> Vec<String>;

    /// Styled cells for table output; plain cells by default
    fn table_cells(&self) -> Vec<Cell> {
        self.table_row().into_iter().map(Cell::new).collect()
    }

    /// Format as key-value pairs for text output
    fn key_value_pairs(&self) -> Vec<(String, String)>;
}

/// Output formatter
pub struct OutputFormatter {
    format: OutputFormat,
    color: bool,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat, color: bool) -> Self {
        Self { format, color }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Print any serializable value in a structured format
    ///
    /// Only meaningful for JSON and YAML; returns `false` for interactive
    /// formats so the caller can render its own view.
    pub fn print_structured<T: Serialize + ?Sized>(&self, value: &T) -> Result<bool> {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(value)?);
                Ok(true)
            }
            OutputFormat::Yaml => {
                print!("{}", serde_yaml::to_string(value)?);
                Ok(true)
            }
            OutputFormat::Table | OutputFormat::Text => Ok(false),
        }
    }

    /// Format and print a list of items
    pub fn print_list<T>(&self, items: &[T]) -> Result<()>
    where
        T: Serialize + Formattable,
    {
        if self.print_structured(items)? {
            return Ok(());
        }

        if items.is_empty() {
            println!("{}", "No items found".dimmed());
            return Ok(());
        }

        match self.format {
            OutputFormat::Table => println!("{}", self.build_table(items)),
            _ => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        println!();
                    }
                    for (key, value) in item.key_value_pairs() {
                        println!("{}: {}", key, value);
                    }
                }
            }
        }
        Ok(())
    }

    /// Build a table for a list of items
    pub fn build_table<T: Formattable>(&self, items: &[T]) -> Table {
        let mut table = self.new_table();

        let header_cells: Vec<Cell> = T::table_headers()
            .iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold).fg(Color::Cyan))
            .collect();
        table.set_header(header_cells);

        for item in items {
            table.add_row(item.table_cells());
        }
        table
    }

    /// Empty table with the shared preset
    pub fn new_table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        if !self.color {
            table.force_no_tty();
        }
        table
    }

    /// Print a section heading (interactive formats only)
    pub fn print_heading(&self, title: &str) {
        match self.format {
            OutputFormat::Table => println!("\n{}", title.to_uppercase().bold()),
            OutputFormat::Text => println!("\n== {} ==", title),
            _ => {}
        }
    }

    /// Print a success message
    pub fn print_success(&self, message: &str) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                let result = serde_json::json!({
                    "status": "success",
                    "message": message
                });
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
            OutputFormat::Yaml => {
                println!("status: success");
                println!("message: {}", message);
            }
            OutputFormat::Table | OutputFormat::Text => {
                println!("{} {}", "✓".green().bold(), message.green());
            }
        }
        Ok(())
    }

    /// Print a warning message
    pub fn print_warning(&self, message: &str) {
        if self.format.is_interactive() {
            eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
        }
    }

    /// Print a progress message (only for interactive formats)
    pub fn print_progress(&self, message: &str) {
        if self.format.is_interactive() {
            eprint!("{} {}...\r", "⏳".yellow(), message);
        }
    }

    /// Clear progress message (only for interactive formats)
    pub fn clear_progress(&self) {
        if self.format.is_interactive() {
            eprint!("\r{}\r", " ".repeat(80));
        }
    }
}

/// Table color for a badge
pub fn badge_color(badge: Badge) -> Color {
    match badge {
        Badge::Red => Color::Red,
        Badge::Orange => Color::DarkYellow,
        Badge::Blue => Color::Blue,
        Badge::Emerald => Color::Green,
        Badge::Muted => Color::DarkGrey,
    }
}

/// Bold badge cell
pub fn badge_cell(text: impl ToString, badge: Badge) -> Cell {
    let cell = Cell::new(text.to_string()).fg(badge_color(badge));
    match badge {
        Badge::Muted => cell.add_attribute(Attribute::Italic),
        _ => cell.add_attribute(Attribute::Bold),
    }
}

pub fn slo_cell(status: SloStatus) -> Cell {
    let label = match status {
        SloStatus::NoSlo => status.label().to_string(),
        _ => status.label().to_uppercase(),
    };
    badge_cell(label, status.badge())
}

pub fn trend_color(sign: TrendSign) -> Color {
    match sign {
        TrendSign::Positive => Color::Green,
        TrendSign::Negative => Color::Red,
    }
}

pub fn accent_color(accent: Accent) -> Color {
    match accent {
        Accent::Green => Color::Green,
        Accent::Orange => Color::DarkYellow,
        Accent::Red => Color::Red,
    }
}

/// Colorize text for a tone (used outside tables)
pub fn tone_text(text: &str, tone: Tone) -> ColoredString {
    match tone {
        Tone::Positive => text.green(),
        Tone::Warning => text.yellow(),
        Tone::Critical => text.red(),
    }
}

pub fn tone_marker(tone: Tone) -> &'static str {
    match tone {
        Tone::Positive => "●",
        Tone::Warning => "▲",
        Tone::Critical => "✖",
    }
}

/// Helper function to format a percentage value already in 0-100
pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct TestItem {
        name: String,
        gpus: u32,
    }

    impl Formattable for TestItem {
        fn table_headers() -> Vec<String> {
            vec!["Name".to_string(), "GPUs".to_string()]
        }

        fn table_row(&self) -> Vec<String> {
            vec![self.name.clone(), self.gpus.to_string()]
        }

        fn key_value_pairs(&self) -> Vec<(String, String)> {
            vec![
                ("Name".to_string(), self.name.clone()),
                ("GPUs".to_string(), self.gpus.to_string()),
            ]
        }
    }

    #[test]
    fn test_output_format_enum() {
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
        assert!(OutputFormat::Text.is_interactive());
        assert!(!OutputFormat::Json.is_interactive());
    }

    #[test]
    fn test_structured_only_for_machine_formats() {
        let formatter = OutputFormatter::new(OutputFormat::Table, false);
        assert!(!formatter.print_structured(&vec![1, 2]).unwrap());

        let formatter = OutputFormatter::new(OutputFormat::Json, false);
        assert!(formatter.print_structured(&vec![1, 2]).unwrap());
    }

    #[test]
    fn test_build_table_rows() {
        let formatter = OutputFormatter::new(OutputFormat::Table, false);
        let items = vec![
            TestItem {
                name: "domain-alpha".to_string(),
                gpus: 18,
            },
            TestItem {
                name: "domain-beta".to_string(),
                gpus: 15,
            },
        ];

        let rendered = formatter.build_table(&items).to_string();
        assert!(rendered.contains("domain-alpha"));
        assert!(rendered.contains("15"));
        assert!(rendered.contains("GPUs"));
    }

    #[test]
    fn test_badge_colors() {
        assert_eq!(badge_color(Badge::Red), Color::Red);
        assert_eq!(badge_color(Badge::Blue), Color::Blue);
        assert_eq!(trend_color(TrendSign::Positive), Color::Green);
        assert_eq!(accent_color(Accent::Orange), Color::DarkYellow);
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.0), "0.0%");
        assert_eq!(format_percentage(63.0), "63.0%");
        assert_eq!(format_percentage(97.26), "97.3%");
    }

    #[test]
    fn test_tone_marker() {
        assert_eq!(tone_marker(Tone::Positive), "●");
        assert_eq!(tone_marker(Tone::Critical), "✖");
    }
}
