//! Configuration commands

use crate::output::OutputFormatter;
use crate::ConfigCommands;
use anyhow::Result;
use fleet_core::Config;

/// Handle config commands
pub fn handle_config_command(
    config: &Config,
    action: ConfigCommands,
    formatter: &OutputFormatter,
) -> Result<()> {
    match action {
        ConfigCommands::Show => {
            if !formatter.print_structured(config)? {
                print!("{}", serde_yaml::to_string(config)?);
            }
        }
        ConfigCommands::Paths => {
            let locations = Config::default_locations();
            if !formatter.print_structured(&locations)? {
                for path in locations {
                    let marker = if path.exists() { "found" } else { "missing" };
                    println!("{} ({})", path.display(), marker);
                }
            }
        }
    }
    Ok(())
}
