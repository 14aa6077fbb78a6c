use std::collections::BTreeMap;

use equigroup_core::{EquigroupError, Result};

/// Historical weight of the categorical violation sum.
pub const DEFAULT_CATEGORICAL_PENALTY: f64 = 1e4;

/// Multipliers applied to the objective terms of both formulations.
///
/// The categorical penalty is large so one unit of categorical violation
/// outweighs any numerical imbalance; numerical terms break ties.
///
/// This is also the `[weights]` section of the grouping configuration;
/// missing fields take their defaults.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "snake_case")
)]
pub struct ObjectiveWeights {
    /// Multiplier of the summed categorical violations.
    pub categorical_penalty: f64,
    /// Per-variable multipliers of the numerical terms (default 1.0).
    pub numerical: BTreeMap<String, f64>,
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        Self {
            categorical_penalty: DEFAULT_CATEGORICAL_PENALTY,
            numerical: BTreeMap::new(),
        }
    }
}

impl ObjectiveWeights {
    pub fn new(categorical_penalty: f64) -> Self {
        Self {
            categorical_penalty,
            numerical: BTreeMap::new(),
        }
    }

    pub fn with_numerical(mut self, variable: impl Into<String>, weight: f64) -> Self {
        self.numerical.insert(variable.into(), weight);
        self
    }

    /// Multiplier of `variable`'s terms, 1.0 unless overridden.
    pub fn numerical_weight(&self, variable: &str) -> f64 {
        self.numerical.get(variable).copied().unwrap_or(1.0)
    }

    /// Checks the penalty is positive and every weight non-negative.
    ///
    /// # Errors
    ///
    /// Returns `Config` naming the offending value.
    pub fn validate(&self) -> Result<()> {
        if !self.categorical_penalty.is_finite() || self.categorical_penalty <= 0.0 {
            return Err(EquigroupError::Config(format!(
                "categorical_penalty must be positive, got {}",
                self.categorical_penalty
            )));
        }
        if let Some((name, w)) = self
            .numerical
            .iter()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(EquigroupError::Config(format!(
                "weight of '{}' must be non-negative, got {}",
                name, w
            )));
        }
        Ok(())
    }
}
