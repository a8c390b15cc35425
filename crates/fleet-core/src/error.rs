//! Error handling for fleetscope
//!
//! Provides a unified error type and result type for the dashboard library.

use crate::validate::ValidationError;

/// Result type alias for fleetscope operations
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for fleetscope
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    InvalidConfiguration(String),

    /// Fixture or file not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Snapshot failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Configuration parsing errors
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    /// Failure annotated with what was being attempted
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Error::InvalidConfiguration(_) => "configuration",
            Error::NotFound(_) => "not_found",
            Error::Validation(_) => "validation",
            Error::Io(_) => "io",
            Error::Json(_) => "json",
            Error::Yaml(_) => "yaml",
            Error::Config(_) => "config",
            Error::Context { source, .. } => source.category(),
        }
    }

    fn wrap(self, context: String) -> Self {
        Error::Context {
            context,
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results
pub trait ErrorContext<T> {
    /// Add context to an error
    fn with_context(self, context: impl Into<String>) -> Result<T>;

    /// Add context to an error using a closure
    fn with_context_fn<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn with_context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().wrap(context.into()))
    }

    fn with_context_fn<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.into().wrap(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::{IssueLevel, ValidationIssue};

    #[test]
    fn test_error_creation() {
        let err = Error::config("slo.min_gpus must be set");
        assert!(matches!(err, Error::InvalidConfiguration(_)));
        assert_eq!(err.to_string(), "Configuration error: slo.min_gpus must be set");
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(Error::config("test").category(), "configuration");
        assert_eq!(Error::not_found("test").category(), "not_found");
        assert_eq!(Error::from(std::io::Error::new(std::io::ErrorKind::Other, "disk")).category(), "io");
    }

    #[test]
    fn test_validation_error_category() {
        let err: Error = ValidationError::new(vec![ValidationIssue::new(
            IssueLevel::Error,
            "domains[0].name",
            "domain name is empty",
        )])
        .into();

        assert_eq!(err.category(), "validation");
        assert!(err.to_string().contains("domains[0].name"));
    }

    #[test]
    fn test_error_context() {
        let result: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"));

        let err = result.with_context("failed to read fixture").unwrap_err();

        assert!(matches!(err, Error::Context { .. }));
        assert_eq!(err.category(), "io");
        assert!(err.to_string().contains("failed to read fixture"));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_error_context_fn() {
        let result: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "original error"));

        let err = result
            .with_context_fn(|| format!("loading {}", "fleet.yaml"))
            .unwrap_err();

        assert!(err.to_string().contains("loading fleet.yaml"));
        assert!(err.to_string().contains("original error"));
    }

    #[test]
    fn test_context_keeps_parse_category() {
        let result: std::result::Result<serde_json::Value, serde_json::Error> =
            serde_json::from_str("{ not json");

        let err = result
            .with_context("failed to parse fleet.json")
            .with_context("render pass")
            .unwrap_err();

        assert_eq!(err.category(), "json");
        assert!(err.to_string().starts_with("render pass: failed to parse fleet.json: "));
    }
}
