//! Values produced by a solver for a [`LinearModel`](super::LinearModel).

use std::fmt;
use std::time::Duration;

use super::VarId;

/// Binary values above this threshold read as 1.
const BINARY_THRESHOLD: f64 = 0.5;

/// Whether the solver finished within its time budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum SolveStatus {
    /// The solver completed its search.
    Optimal,

    /// The budget expired; the values are the best found, not proven optimal.
    TimeLimited,
}

impl SolveStatus {
    pub fn is_optimal(self) -> bool {
        self == SolveStatus::Optimal
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Optimal => f.write_str("optimal"),
            SolveStatus::TimeLimited => f.write_str("time_limited"),
        }
    }
}

/// Per-variable solved values plus how the solve ended.
#[derive(Debug, Clone, PartialEq)]
pub struct SolvedValues {
    values: Vec<f64>,
    status: SolveStatus,
    objective: f64,
    elapsed: Duration,
}

impl SolvedValues {
    pub fn new(values: Vec<f64>, status: SolveStatus, objective: f64, elapsed: Duration) -> Self {
        Self {
            values,
            status,
            objective,
            elapsed,
        }
    }

    pub fn value(&self, var: VarId) -> Option<f64> {
        self.values.get(var.index()).copied()
    }

    /// Reads a binary variable.
    pub fn is_one(&self, var: VarId) -> Option<bool> {
        self.value(var).map(|v| v > BINARY_THRESHOLD)
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn status(&self) -> SolveStatus {
        self.status
    }

    pub fn objective(&self) -> f64 {
        self.objective
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}
