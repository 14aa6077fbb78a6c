//! Configuration system for equigroup.
//!
//! Load grouping configuration from TOML or YAML to control the solve time
//! budget, the solver backend preference and the objective weights without
//! code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use equigroup_config::GroupingConfig;
//! use equigroup_core::SolverBackend;
//! use std::time::Duration;
//!
//! let config = GroupingConfig::from_toml_str(r#"
//!     [solver]
//!     time_limit_seconds = 30
//!     backends = ["microlp"]
//!
//!     [weights]
//!     categorical_penalty = 5000.0
//!
//!     [weights.numerical]
//!     Age = 2.0
//! "#).unwrap();
//!
//! assert_eq!(config.time_limit(), Duration::from_secs(30));
//! assert_eq!(config.solver.backends, vec![SolverBackend::Microlp]);
//! assert_eq!(config.weights.numerical_weight("Age"), 2.0);
//! assert_eq!(config.weights.numerical_weight("Height"), 1.0);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use equigroup_config::GroupingConfig;
//!
//! let config = GroupingConfig::load("equigroup.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;
use std::time::Duration;

use equigroup_core::{EquigroupError, SolverBackend};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default wall-clock budget handed to the solver.
pub const DEFAULT_TIME_LIMIT_SECONDS: f64 = 10.0;

pub use equigroup_model::{ObjectiveWeights, DEFAULT_CATEGORICAL_PENALTY};

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigError> for EquigroupError {
    fn from(err: ConfigError) -> Self {
        EquigroupError::Config(err.to_string())
    }
}

/// Main grouping configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct GroupingConfig {
    /// Solver configuration.
    #[serde(default)]
    pub solver: SolverConfig,

    /// Objective weights, handed to the models as they are.
    #[serde(default)]
    pub weights: ObjectiveWeights,
}

impl GroupingConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML, or
    /// fails validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the solve time limit.
    pub fn with_time_limit_seconds(mut self, seconds: f64) -> Self {
        self.solver.time_limit_seconds = seconds;
        self
    }

    /// Sets the backend preference order.
    pub fn with_backends(mut self, backends: impl IntoIterator<Item = SolverBackend>) -> Self {
        self.solver.backends = backends.into_iter().collect();
        self
    }

    /// Sets the categorical violation penalty.
    pub fn with_categorical_penalty(mut self, penalty: f64) -> Self {
        self.weights.categorical_penalty = penalty;
        self
    }

    /// Sets the objective multiplier of one numerical variable.
    pub fn with_numerical_weight(mut self, variable: impl Into<String>, weight: f64) -> Self {
        self.weights.numerical.insert(variable.into(), weight);
        self
    }

    /// Returns the solve time limit.
    ///
    /// Convenience method that delegates to `solver.time_limit()`.
    pub fn time_limit(&self) -> Duration {
        self.solver.time_limit()
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.solver.validate()?;
        self.weights.validate().map_err(|err| match err {
            EquigroupError::Config(message) => ConfigError::Invalid(message),
            other => ConfigError::Invalid(other.to_string()),
        })
    }
}

/// Solver configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Maximum seconds the solver may spend on one model.
    #[serde(default = "default_time_limit_seconds")]
    pub time_limit_seconds: f64,

    /// Backends to probe, most preferred first.
    #[serde(default = "default_backends")]
    pub backends: Vec<SolverBackend>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit_seconds: DEFAULT_TIME_LIMIT_SECONDS,
            backends: default_backends(),
        }
    }
}

impl SolverConfig {
    /// Returns the time limit as a Duration.
    pub fn time_limit(&self) -> Duration {
        Duration::from_secs_f64(self.time_limit_seconds.max(0.0))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.time_limit_seconds.is_finite() || self.time_limit_seconds <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "time_limit_seconds must be positive, got {}",
                self.time_limit_seconds
            )));
        }
        if self.backends.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one solver backend must be listed".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_time_limit_seconds() -> f64 {
    DEFAULT_TIME_LIMIT_SECONDS
}

fn default_backends() -> Vec<SolverBackend> {
    SolverBackend::ALL.to_vec()
}

#[cfg(test)]
mod tests;
