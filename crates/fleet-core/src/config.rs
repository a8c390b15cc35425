//! Configuration management for fleetscope
//!
//! Layers, lowest precedence first: built-in defaults, a configuration file,
//! then `FLEETSCOPE_`-prefixed environment variables
//! (`FLEETSCOPE_SLO__MIN_GPUS=20`).

use crate::derive::DEFAULT_SLO_MIN_GPUS;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit configuration file
pub const CONFIG_ENV_VAR: &str = "FLEETSCOPE_CONFIG";

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "FLEETSCOPE";

/// Accepted values of `observability.log_level`
pub const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Where snapshots come from
    pub data: DataConfig,

    /// SLO derivation settings
    pub slo: SloConfig,

    /// Trend chart settings
    pub chart: ChartConfig,

    /// Logging configuration
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load configuration from the standard locations:
    /// 1. Environment variables (highest)
    /// 2. `path`, or `$FLEETSCOPE_CONFIG`, or `./fleetscope.yaml` and the user config dir
    /// 3. Defaults (lowest)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, Self::environment())
    }

    /// Load with an explicit environment source
    pub fn load_with_env(path: Option<&Path>, env: config::Environment) -> Result<Self> {
        let mut builder = config::Config::builder();

        builder = builder.add_source(config::Config::try_from(&Self::default())?);

        match path {
            Some(path) => {
                builder = builder.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                if let Ok(config_path) = std::env::var(CONFIG_ENV_VAR) {
                    builder = builder.add_source(config::File::with_name(&config_path));
                } else {
                    for candidate in Self::default_locations() {
                        builder = builder.add_source(
                            config::File::from(candidate).required(false),
                        );
                    }
                }
            }
        }

        builder = builder.add_source(env);

        let config = builder.build()?;
        let parsed: Self = config.try_deserialize()?;

        parsed.validate()?;

        Ok(parsed)
    }

    /// Environment source with the `FLEETSCOPE_` prefix
    pub fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    /// Configuration files consulted when no explicit path is given
    pub fn default_locations() -> Vec<PathBuf> {
        let mut locations = vec![PathBuf::from("fleetscope.yaml")];
        if let Some(dir) = dirs::config_dir() {
            locations.push(dir.join("fleetscope").join("config.yaml"));
        }
        locations
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.chart.validate()?;
        self.observability.validate()?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            slo: SloConfig::default(),
            chart: ChartConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Data source configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Snapshot file (YAML or JSON); the built-in demo fixture when unset
    pub fixture: Option<PathBuf>,

    /// Reject snapshots with validation errors instead of rendering them
    pub strict: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            fixture: None,
            strict: true,
        }
    }
}

/// SLO derivation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SloConfig {
    /// Domains with an SLO and fewer GPUs than this are out of SLO
    pub min_gpus: u32,
}

impl Default for SloConfig {
    fn default() -> Self {
        Self {
            min_gpus: DEFAULT_SLO_MIN_GPUS,
        }
    }
}

/// Trend chart configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Lower bound of the y-axis (percent)
    pub y_min: f64,

    /// Upper bound of the y-axis (percent)
    pub y_max: f64,
}

impl ChartConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.y_min < self.y_max) {
            return Err(crate::Error::config(format!(
                "chart.y_min ({}) must be below chart.y_max ({})",
                self.y_min, self.y_max
            )));
        }
        Ok(())
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            y_min: 60.0,
            y_max: 100.0,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    pub log_level: String,

    /// Log format (json or text)
    pub log_format: String,
}

impl ObservabilityConfig {
    pub fn validate(&self) -> Result<()> {
        let level = self.log_level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(crate::Error::config(format!(
                "Unknown log level '{}', expected one of {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            )));
        }

        match self.log_format.as_str() {
            "text" | "json" => Ok(()),
            other => Err(crate::Error::config(format!(
                "Unknown log format '{}', expected 'text' or 'json'",
                other
            ))),
        }
    }

    pub fn is_json(&self) -> bool {
        self.log_format == "json"
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            log_format: "text".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::environment().source(Some(map))
    }

    fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("fleetscope.yaml");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.slo.min_gpus, 16);
        assert_eq!(config.chart.y_min, 60.0);
        assert_eq!(config.chart.y_max, 100.0);
        assert!(config.data.fixture.is_none());
        assert!(config.data.strict);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "slo:\n  min_gpus: 20\ndata:\n  strict: false\n");

        let config = Config::load_with_env(Some(path.as_path()), env(&[])).unwrap();
        assert_eq!(config.slo.min_gpus, 20);
        assert!(!config.data.strict);
        assert_eq!(config.chart, ChartConfig::default());
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "slo:\n  min_gpus: 20\n");

        let config =
            Config::load_with_env(Some(path.as_path()), env(&[("FLEETSCOPE_SLO__MIN_GPUS", "8")])).unwrap();
        assert_eq!(config.slo.min_gpus, 8);
    }

    #[test]
    fn test_invalid_chart_bounds_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "chart:\n  y_min: 90\n  y_max: 80\n");

        let err = Config::load_with_env(Some(path.as_path()), env(&[])).unwrap_err();
        assert!(matches!(err, crate::Error::InvalidConfiguration(_)));
    }

    #[test]
    fn test_unknown_log_format_rejected() {
        let mut config = Config::default();
        config.observability.log_format = "xml".to_string();
        assert!(config.validate().is_err());

        config.observability.log_format = "json".to_string();
        assert!(config.validate().is_ok());
        assert!(config.observability.is_json());
    }

    #[test]
    fn test_log_level_must_be_known() {
        let mut config = Config::default();
        config.observability.log_level = "verbose".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("verbose"));

        config.observability.log_level = "DEBUG".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_log_level_is_validated() {
        let err = Config::load_with_env(
            None,
            env(&[("FLEETSCOPE_OBSERVABILITY__LOG_LEVEL", "loud")]),
        );
        assert!(matches!(err, Err(crate::Error::InvalidConfiguration(_))));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.yaml");
        assert!(Config::load_with_env(Some(missing.as_path()), env(&[])).is_err());
    }
}
