//! Error types for scenario loading and result export.
//!
//! The dispatch engine itself never fails; these cover the I/O and
//! configuration layers around it.

use std::fmt;

use thiserror::Error;

/// A single configuration problem, tied to a dotted field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"battery.min_soc_pct"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Crate error.
#[derive(Debug, Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid configuration: {}", join(.0))]
    Invalid(Vec<ConfigError>),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn join(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<Vec<ConfigError>> for Error {
    fn from(errors: Vec<ConfigError>) -> Self {
        Error::Invalid(errors)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_lists_every_field() {
        let err = Error::Invalid(vec![
            ConfigError::new("battery.capacity_mwh", "must be > 0"),
            ConfigError::new("solar.sunrise_hour", "must be < solar.sunset_hour"),
        ]);
        let text = err.to_string();
        assert!(text.contains("battery.capacity_mwh: must be > 0"));
        assert!(text.contains("solar.sunrise_hour"));
    }

    #[test]
    fn config_error_converts() {
        let err: Error = ConfigError::new("preset", "unknown").into();
        assert!(matches!(err, Error::Config(_)));
    }
}
