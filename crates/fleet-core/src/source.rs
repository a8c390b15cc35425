//! Data sources supplying fleet snapshots
//!
//! The dashboard never reads records from anywhere but a [`DataSource`], so
//! fixtures and real telemetry backends are interchangeable.

use crate::config::DataConfig;
use crate::types::Snapshot;
use crate::{Error, ErrorContext, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Demo snapshot shipped with the crate
const DEMO_FIXTURE: &str = include_str!("../fixtures/demo.yaml");

/// Supplier of snapshot records
pub trait DataSource: Send + Sync {
    /// Short description used in logs
    fn describe(&self) -> String;

    /// Produce the records for one render pass
    fn snapshot(&self) -> Result<Snapshot>;
}

/// In-memory snapshot
#[derive(Debug, Clone)]
pub struct FixtureSource {
    name: String,
    snapshot: Snapshot,
}

impl FixtureSource {
    pub fn new(name: impl Into<String>, snapshot: Snapshot) -> Self {
        Self {
            name: name.into(),
            snapshot,
        }
    }

    /// The bundled demo fleet
    pub fn demo() -> Result<Self> {
        let snapshot = parse_snapshot(DEMO_FIXTURE, SnapshotFormat::Yaml)
            .with_context("failed to parse built-in demo fixture")?;
        Ok(Self::new("demo", snapshot))
    }
}

impl DataSource for FixtureSource {
    fn describe(&self) -> String {
        format!("fixture:{}", self.name)
    }

    fn snapshot(&self) -> Result<Snapshot> {
        Ok(self.snapshot.clone())
    }
}

/// Snapshot read from a YAML or JSON file on every pass
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DataSource for FileSource {
    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }

    fn snapshot(&self) -> Result<Snapshot> {
        if !self.path.exists() {
            return Err(Error::not_found(format!(
                "snapshot file {}",
                self.path.display()
            )));
        }

        let content = std::fs::read_to_string(&self.path)?;
        let snapshot = parse_snapshot(&content, SnapshotFormat::from_path(&self.path))
            .with_context_fn(|| format!("failed to parse {}", self.path.display()))?;

        debug!(
            "Read snapshot from {}: {} domains, {} events, {} trend points",
            self.path.display(),
            snapshot.domains.len(),
            snapshot.bad_node_events.len(),
            snapshot.trends.len()
        );
        Ok(snapshot)
    }
}

/// Encoding of a snapshot document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Yaml,
}

impl SnapshotFormat {
    /// `.json` files are JSON, everything else is read as YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => SnapshotFormat::Json,
            _ => SnapshotFormat::Yaml,
        }
    }
}

pub fn parse_snapshot(content: &str, format: SnapshotFormat) -> Result<Snapshot> {
    let snapshot = match format {
        SnapshotFormat::Json => serde_json::from_str(content)?,
        SnapshotFormat::Yaml => serde_yaml::from_str(content)?,
    };
    Ok(snapshot)
}

/// Build the source named by the data configuration
pub fn source_from_config(config: &DataConfig) -> Result<Box<dyn DataSource>> {
    let source: Box<dyn DataSource> = match &config.fixture {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(FixtureSource::demo()?),
    };
    info!("Using data source {}", source.describe());
    Ok(source)
}
