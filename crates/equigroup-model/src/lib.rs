//! MILP formulations for balanced partitioning and representative selection.
//!
//! Each formulation reads a [`Dataset`](equigroup_core::Dataset), emits one
//! immutable [`LinearModel`] and later turns the solver's values back into a
//! report:
//!
//! - [`PartitionModel`] - split every entity into size-balanced groups with
//!   similar statistics
//! - [`DistributionModel`] - pick a fixed-size subset whose profile matches a
//!   reference population
//!
//! Neither type knows about a concrete solver; see `equigroup-solver`.

pub mod distribution;
pub mod keys;
pub mod partition;
mod weights;

pub use distribution::{
    DistributionModel, DistributionQuality, DistributionReport, MatchError, NumericalMatch,
};
pub use keys::{AssignmentKey, DeviationPair, LevelKey, NumericBounds, NumericDeviations};
pub use partition::{
    NumericalBalance, PartitionAllocation, PartitionModel, PartitionQuality, PartitionReport,
};
pub use weights::{ObjectiveWeights, DEFAULT_CATEGORICAL_PENALTY};

use equigroup_core::{EquigroupError, LinearModel, Result, SolvedValues};

/// Tolerance used when checking solved values against a model.
pub const FEASIBILITY_TOLERANCE: f64 = 1e-6;

/// A problem that can be handed to a solver and read back.
///
/// Implementors build their [`LinearModel`] once, at construction, so input
/// errors surface before any solve is attempted.
pub trait Formulation {
    /// What [`interpret`](Formulation::interpret) produces.
    type Report;

    /// The finished model to hand to a solver.
    fn linear_model(&self) -> &LinearModel;

    /// Extracts the allocation and assesses its quality.
    ///
    /// Reading the same values twice yields the same report.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSolution` when `solved` does not describe a valid
    /// allocation for this model.
    fn interpret(&self, solved: &SolvedValues) -> Result<Self::Report>;
}

// Largest integer not above `proportion * size`, ignoring float noise just below an integer.
pub(crate) fn proportional_target(proportion: f64, size: usize) -> f64 {
    (proportion * size as f64 + 1e-9).floor()
}

// Solved values must cover exactly the model's variables.
pub(crate) fn check_value_count(model: &LinearModel, solved: &SolvedValues) -> Result<()> {
    if solved.len() != model.variable_count() {
        return Err(EquigroupError::InvalidSolution(format!(
            "model '{}' has {} variables but {} values were supplied",
            model.name(),
            model.variable_count(),
            solved.len()
        )));
    }
    Ok(())
}
