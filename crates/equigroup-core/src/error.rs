//! Error types for equigroup

use std::time::Duration;

use thiserror::Error;

use crate::stats::Statistic;

/// Main error type for equigroup operations
#[derive(Debug, Error)]
pub enum EquigroupError {
    /// Input that cannot produce a meaningful model (zero groups, empty dataset, ...)
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    /// A numerical variable whose global statistic is used as an objective divisor is zero
    #[error("Degenerate variable '{variable}': global {statistic} is zero")]
    DegenerateVariable {
        variable: String,
        statistic: Statistic,
    },

    /// Malformed entity records or summaries
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// No feasible assignment exists
    #[error("Infeasible: {0}")]
    Infeasible(String),

    /// None of the configured solver backends could run
    #[error("Solver unavailable: {0}")]
    SolverUnavailable(String),

    /// The time budget expired before the solver produced any solution
    #[error("Time limit of {0:?} exceeded without a solution")]
    TimeLimitExceeded(Duration),

    /// Any other failure reported by a solver backend
    #[error("Solver error: {0}")]
    Solver(String),

    /// Solved values do not describe a valid allocation
    #[error("Invalid solution: {0}")]
    InvalidSolution(String),

    /// Error in configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for equigroup operations
pub type Result<T> = std::result::Result<T, EquigroupError>;
